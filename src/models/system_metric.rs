use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SystemMetric {
    pub id: i64,
    pub metric_date: NaiveDate,
    pub total_users: i64,
    pub total_quizzes: i64,
    pub total_attempts: i64,
    pub daily_attempts: i64,
    pub average_score: f64,
    pub created_at: DateTime<Utc>,
}
