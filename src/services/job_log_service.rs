use crate::error::Result;
use crate::models::job_log::{JobLog, JobStatus};
use chrono::{DateTime, Duration, Utc};
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct JobLogService {
    pool: SqlitePool,
}

impl JobLogService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(
        &self,
        job_name: &str,
        status: JobStatus,
        details: &str,
        executed_at: DateTime<Utc>,
    ) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO job_logs (job_name, status, details, executed_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(job_name)
        .bind(status)
        .bind(details)
        .bind(executed_at)
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_rowid())
    }

    /// Audit write that never fails the caller.
    pub async fn record(&self, job_name: &str, status: JobStatus, details: &str) {
        tracing::info!(job = job_name, %status, details, "job status");
        if let Err(e) = self.insert(job_name, status, details, Utc::now()).await {
            tracing::warn!(job = job_name, %status, error = %e, "failed to write job log");
        }
    }

    pub async fn recent(&self, limit: i64) -> Result<Vec<JobLog>> {
        let logs = sqlx::query_as::<_, JobLog>(
            r#"
            SELECT id, job_name, status, details, executed_at
            FROM job_logs
            ORDER BY executed_at DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(logs)
    }

    pub async fn count_for(&self, job_name: &str) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM job_logs WHERE job_name = ?")
            .bind(job_name)
            .fetch_one(&self.pool)
            .await?;
        Ok(count.0)
    }

    /// Deletes rows executed before `now - retention`; returns how many went.
    pub async fn purge_older_than(&self, retention: Duration, now: DateTime<Utc>) -> Result<u64> {
        let cutoff = now - retention;
        let result = sqlx::query("DELETE FROM job_logs WHERE executed_at < ?")
            .bind(cutoff)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
