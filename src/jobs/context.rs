use crate::models::job_log::JobStatus;
use crate::services::job_log_service::JobLogService;
use crate::services::metrics_service::MetricsService;
use crate::services::notification_service::NotificationService;
use crate::services::preference_service::PreferenceService;
use crate::services::quiz_service::QuizService;
use sqlx::SqlitePool;

/// Everything a task may touch. Built once at startup.
#[derive(Clone)]
pub struct JobContext {
    pub pool: SqlitePool,
    pub notifications: NotificationService,
    pub job_logs: JobLogService,
    pub preferences: PreferenceService,
    pub metrics: MetricsService,
    pub quizzes: QuizService,
}

impl JobContext {
    pub fn new(pool: SqlitePool, notifications: NotificationService) -> Self {
        Self {
            job_logs: JobLogService::new(pool.clone()),
            preferences: PreferenceService::new(pool.clone()),
            metrics: MetricsService::new(pool.clone()),
            quizzes: QuizService::new(pool.clone()),
            notifications,
            pool,
        }
    }
}

/// How a task finished when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    Completed(String),
    Skipped(String),
}

impl JobOutcome {
    pub fn status(&self) -> JobStatus {
        match self {
            JobOutcome::Completed(_) => JobStatus::Completed,
            JobOutcome::Skipped(_) => JobStatus::Skipped,
        }
    }

    pub fn details(&self) -> &str {
        match self {
            JobOutcome::Completed(d) | JobOutcome::Skipped(d) => d,
        }
    }
}
