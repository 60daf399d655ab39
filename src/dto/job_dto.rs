use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_JOB_LOG_LIMIT: i64 = 50;
pub const MAX_JOB_LOG_LIMIT: i64 = 500;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobLogQuery {
    pub limit: Option<i64>,
}

impl JobLogQuery {
    pub fn effective_limit(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_JOB_LOG_LIMIT)
            .clamp(1, MAX_JOB_LOG_LIMIT)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunJobResponse {
    pub message: String,
    pub status: String,
    pub details: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledJobSummary {
    pub name: String,
    pub schedule: String,
    pub timezone: String,
    pub manual: bool,
    pub next_run: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetricsQuery {
    pub limit: Option<i64>,
}
