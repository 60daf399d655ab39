use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// History row: an attempt with the title of its quiz.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AttemptWithQuiz {
    pub id: i64,
    pub user_id: i64,
    pub quiz_id: i64,
    pub score: i64,
    pub total_questions: i64,
    pub time_taken: Option<i64>,
    pub completed_at: DateTime<Utc>,
    pub quiz_title: String,
}
