use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdatePreferencesPayload {
    pub email_reminders: bool,
    #[validate(custom(function = "validate_reminder_time"))]
    pub reminder_time: Option<String>,
    pub weekly_reports: bool,
}

fn validate_reminder_time(value: &str) -> Result<(), validator::ValidationError> {
    chrono::NaiveTime::parse_from_str(value, "%H:%M")
        .map(|_| ())
        .map_err(|_| validator::ValidationError::new("reminder_time_format"))
}
