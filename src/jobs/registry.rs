use super::context::{JobContext, JobOutcome};
use super::definitions::{JobDefinition, JOB_TABLE};
use crate::dto::job_dto::ScheduledJobSummary;
use crate::error::{Error, Result};
use crate::models::job_log::JobStatus;
use chrono::Utc;
use std::sync::Arc;

/// The job table bound to its runtime context. Created once at startup and
/// shared read-only by the cron engine, the HTTP layer and the CLI.
#[derive(Clone)]
pub struct JobRegistry {
    ctx: Arc<JobContext>,
    table: &'static [JobDefinition],
}

impl JobRegistry {
    pub fn new(ctx: JobContext) -> Self {
        Self::with_table(ctx, JOB_TABLE)
    }

    pub fn with_table(ctx: JobContext, table: &'static [JobDefinition]) -> Self {
        Self {
            ctx: Arc::new(ctx),
            table,
        }
    }

    pub fn context(&self) -> &JobContext {
        &self.ctx
    }

    pub fn definitions(&self) -> &'static [JobDefinition] {
        self.table
    }

    pub fn find(&self, name: &str) -> Option<&'static JobDefinition> {
        self.table.iter().find(|def| def.name == name)
    }

    /// Runs a job by name and waits for it. Only manually triggerable jobs are
    /// accepted; anything else is `UnknownJob` and leaves no job log behind.
    pub async fn trigger(&self, name: &str) -> Result<JobOutcome> {
        let def = self
            .find(name)
            .filter(|def| def.manual)
            .ok_or_else(|| Error::UnknownJob(name.to_string()))?;

        tracing::info!(job = def.name, "executing job");
        let outcome = self.run(def).await?;
        tracing::info!(job = def.name, status = %outcome.status(), "job execution completed");
        Ok(outcome)
    }

    /// Runs one job under the logging protocol: `STARTED`, then `COMPLETED`,
    /// `SKIPPED` or `ERROR`. Errors are returned after being logged.
    pub async fn run(&self, def: &JobDefinition) -> Result<JobOutcome> {
        let logs = &self.ctx.job_logs;
        if def.log_start {
            logs.record(def.log_name, JobStatus::Started, "").await;
        }

        match (def.handler)(self.ctx.as_ref()).await {
            Ok(outcome) => {
                logs.record(def.log_name, outcome.status(), outcome.details()).await;
                Ok(outcome)
            }
            Err(e) => {
                logs.record(def.log_name, JobStatus::Error, &e.to_string()).await;
                Err(e)
            }
        }
    }

    pub fn schedule_summary(&self) -> Vec<ScheduledJobSummary> {
        let now = Utc::now();
        self.table
            .iter()
            .map(|def| ScheduledJobSummary {
                name: def.name.to_string(),
                schedule: def.schedule.to_string(),
                timezone: def.timezone_name().to_string(),
                manual: def.manual,
                next_run: def.next_run_after(now),
            })
            .collect()
    }
}
