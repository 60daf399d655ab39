pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod jobs;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use crate::config::Config;
use crate::jobs::{JobContext, JobRegistry};
use crate::services::{
    attempt_service::AttemptService, job_log_service::JobLogService, mail_transport,
    mail_transport::MailTransport, notification_service::NotificationService,
    preference_service::PreferenceService, quiz_service::QuizService,
};
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Arc<Config>,
    pub jobs: Arc<JobRegistry>,
    pub quiz_service: QuizService,
    pub attempt_service: AttemptService,
    pub preference_service: PreferenceService,
    pub job_log_service: JobLogService,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: Config) -> Self {
        let transport = mail_transport::from_config(&config.mail);
        Self::with_transport(pool, config, transport)
    }

    /// Same as [`AppState::new`] with the mail transport supplied by the caller.
    pub fn with_transport(pool: SqlitePool, config: Config, transport: Arc<dyn MailTransport>) -> Self {
        let notifications = NotificationService::new(
            transport,
            config.mail.from_address.clone(),
            config.frontend_url.clone(),
            config.mail.send_delay,
        );
        let jobs = JobRegistry::new(JobContext::new(pool.clone(), notifications));

        Self {
            quiz_service: QuizService::new(pool.clone()),
            attempt_service: AttemptService::new(pool.clone()),
            preference_service: PreferenceService::new(pool.clone()),
            job_log_service: JobLogService::new(pool.clone()),
            jobs: Arc::new(jobs),
            config: Arc::new(config),
            pool,
        }
    }
}
