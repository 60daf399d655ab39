use super::context::{JobContext, JobOutcome};
use super::tasks;
use crate::error::Result;
use chrono::{DateTime, Utc};
use std::future::Future;
use std::pin::Pin;
use std::str::FromStr;

pub type TaskFuture<'a> = Pin<Box<dyn Future<Output = Result<JobOutcome>> + Send + 'a>>;
pub type TaskFn = for<'a> fn(&'a JobContext) -> TaskFuture<'a>;

/// One row of the job table.
#[derive(Clone, Copy)]
pub struct JobDefinition {
    /// Name used by the manual trigger and the scheduler.
    pub name: &'static str,
    /// Name written to `job_logs.job_name`.
    pub log_name: &'static str,
    /// Five-field cron: minute hour day-of-month month day-of-week.
    pub schedule: &'static str,
    pub timezone: Utc,
    /// Whether the manual trigger accepts this job.
    pub manual: bool,
    /// Whether a `STARTED` row precedes the outcome row.
    pub log_start: bool,
    pub handler: TaskFn,
}

impl std::fmt::Debug for JobDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobDefinition")
            .field("name", &self.name)
            .field("schedule", &self.schedule)
            .field("manual", &self.manual)
            .finish()
    }
}

impl JobDefinition {
    /// The schedule with a leading seconds field, as the cron engines expect.
    pub fn cron_expression(&self) -> String {
        format!("0 {}", self.schedule)
    }

    pub fn timezone_name(&self) -> &'static str {
        "UTC"
    }

    pub fn parsed_schedule(&self) -> std::result::Result<cron::Schedule, String> {
        cron::Schedule::from_str(&self.cron_expression()).map_err(|e| e.to_string())
    }

    pub fn next_run_after(&self, after: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let schedule = self.parsed_schedule().ok()?;
        schedule.after(&after.with_timezone(&self.timezone)).next()
    }
}

pub const JOB_TABLE: &[JobDefinition] = &[
    JobDefinition {
        name: "daily-reminder",
        log_name: "DAILY_REMINDER",
        schedule: "0 9 * * *",
        timezone: Utc,
        manual: true,
        log_start: true,
        handler: tasks::daily_reminder_task,
    },
    JobDefinition {
        name: "weekly-report",
        log_name: "WEEKLY_REPORT",
        schedule: "0 10 * * Sun",
        timezone: Utc,
        manual: true,
        log_start: true,
        handler: tasks::weekly_report_task,
    },
    JobDefinition {
        name: "admin-daily-report",
        log_name: "ADMIN_DAILY_REPORT",
        schedule: "0 8 * * *",
        timezone: Utc,
        manual: true,
        log_start: true,
        handler: tasks::admin_daily_report_task,
    },
    JobDefinition {
        name: "collect-metrics",
        log_name: "COLLECT_METRICS",
        schedule: "0 0 * * *",
        timezone: Utc,
        manual: true,
        log_start: true,
        handler: tasks::collect_metrics_task,
    },
    JobDefinition {
        name: "database-cleanup",
        log_name: "DATABASE_CLEANUP",
        schedule: "0 2 * * Sun",
        timezone: Utc,
        manual: true,
        log_start: true,
        handler: tasks::database_cleanup_task,
    },
    JobDefinition {
        name: "health-check",
        log_name: "HEALTH_CHECK",
        schedule: "0 * * * *",
        timezone: Utc,
        manual: false,
        log_start: false,
        handler: tasks::health_check_task,
    },
];
