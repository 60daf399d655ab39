use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const DEFAULT_REMINDER_TIME: &str = "09:00";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserPreference {
    pub user_id: i64,
    pub email_reminders: bool,
    pub reminder_time: String,
    pub weekly_reports: bool,
    pub last_reminder_sent: Option<DateTime<Utc>>,
}

impl UserPreference {
    pub fn defaults_for(user_id: i64) -> Self {
        Self {
            user_id,
            email_reminders: true,
            reminder_time: DEFAULT_REMINDER_TIME.to_string(),
            weekly_reports: true,
            last_reminder_sent: None,
        }
    }
}
