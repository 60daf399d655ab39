#![allow(dead_code)]

use chrono::{DateTime, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use quizmaster_backend::{
    config::{Config, MailConfig},
    database::pool::{create_memory_pool, run_migrations},
    jobs::{JobContext, JobRegistry},
    middleware::auth::Claims,
    models::job_log::JobLog,
    services::{mail_transport::NoopTransport, notification_service::NotificationService},
    AppState,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;

pub const JWT_SECRET: &str = "test_secret_key";

pub async fn setup_pool() -> SqlitePool {
    let pool = create_memory_pool().await.expect("pool");
    run_migrations(&pool).await.expect("migrations");
    pool
}

pub fn test_config() -> Config {
    Config {
        server_address: "127.0.0.1:0".to_string(),
        database_url: "sqlite::memory:".to_string(),
        database_max_connections: 1,
        jwt_secret: JWT_SECRET.to_string(),
        frontend_url: "http://app.test".to_string(),
        enable_jobs: false,
        mail: MailConfig {
            send_delay: Duration::ZERO,
            ..MailConfig::default()
        },
    }
}

pub fn test_state(pool: SqlitePool) -> AppState {
    AppState::with_transport(pool, test_config(), Arc::new(NoopTransport))
}

pub fn test_registry(pool: SqlitePool) -> JobRegistry {
    let notifications = NotificationService::new(
        Arc::new(NoopTransport),
        "QuizMaster <noreply@example.com>".to_string(),
        "http://app.test".to_string(),
        Duration::ZERO,
    );
    JobRegistry::new(JobContext::new(pool, notifications))
}

pub async fn seed_user(pool: &SqlitePool, username: &str, role: &str) -> i64 {
    sqlx::query(
        "INSERT INTO users (username, email, password_hash, role, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(username)
    .bind(format!("{}@example.com", username))
    .bind("not-a-real-hash")
    .bind(role)
    .bind(Utc::now())
    .execute(pool)
    .await
    .expect("seed user")
    .last_insert_rowid()
}

/// Seeds a quiz whose questions all have `a` as the correct answer.
pub async fn seed_quiz(pool: &SqlitePool, title: &str, questions: usize) -> (i64, Vec<i64>) {
    let quiz_id = sqlx::query("INSERT INTO quizzes (title, created_at) VALUES (?, ?)")
        .bind(title)
        .bind(Utc::now())
        .execute(pool)
        .await
        .expect("seed quiz")
        .last_insert_rowid();

    let mut ids = Vec::with_capacity(questions);
    for n in 0..questions {
        let id = sqlx::query(
            r#"INSERT INTO questions (quiz_id, question, option_a, option_b, option_c, option_d, correct_answer)
               VALUES (?, ?, 'A', 'B', 'C', 'D', 'a')"#,
        )
        .bind(quiz_id)
        .bind(format!("Question {}", n + 1))
        .execute(pool)
        .await
        .expect("seed question")
        .last_insert_rowid();
        ids.push(id);
    }
    (quiz_id, ids)
}

pub async fn seed_attempt(
    pool: &SqlitePool,
    user_id: i64,
    quiz_id: i64,
    score: i64,
    total: i64,
    completed_at: DateTime<Utc>,
) {
    sqlx::query(
        r#"INSERT INTO quiz_attempts (user_id, quiz_id, score, total_questions, time_taken, completed_at)
           VALUES (?, ?, ?, ?, 60, ?)"#,
    )
    .bind(user_id)
    .bind(quiz_id)
    .bind(score)
    .bind(total)
    .bind(completed_at)
    .execute(pool)
    .await
    .expect("seed attempt");
}

pub async fn logs_for(pool: &SqlitePool, job_name: &str) -> Vec<JobLog> {
    sqlx::query_as::<_, JobLog>(
        "SELECT id, job_name, status, details, executed_at FROM job_logs WHERE job_name = ? ORDER BY id ASC",
    )
    .bind(job_name)
    .fetch_all(pool)
    .await
    .expect("job logs")
}

pub fn bearer(sub: i64, role: &str) -> String {
    let claims = Claims {
        sub: sub.to_string(),
        exp: (Utc::now().timestamp() + 3600) as usize,
        role: Some(role.to_string()),
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .expect("token");
    format!("Bearer {}", token)
}
