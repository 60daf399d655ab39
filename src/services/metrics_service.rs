use crate::error::Result;
use crate::models::system_metric::SystemMetric;
use crate::models::user::{Recipient, UserRole};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// Aggregate counts over the whole store at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemTotals {
    pub total_users: i64,
    pub total_quizzes: i64,
    pub total_attempts: i64,
    pub daily_attempts: i64,
    pub average_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyStats {
    pub quizzes_completed: i64,
    pub average_score: i64,
}

/// Result of writing a daily snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotWrite {
    Inserted,
    AlreadyPresent,
}

#[derive(Clone)]
pub struct MetricsService {
    pool: SqlitePool,
}

fn day_bounds(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = date.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc();
    (start, start + Duration::days(1))
}

impl MetricsService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn users_with_role(&self, role: UserRole) -> Result<Vec<Recipient>> {
        let users = sqlx::query_as::<_, Recipient>(
            "SELECT id, username, email FROM users WHERE role = ? ORDER BY id ASC",
        )
        .bind(role)
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    pub async fn count_users(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE role = 'user'")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.0)
    }

    pub async fn count_quizzes(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM quizzes")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.0)
    }

    pub async fn count_attempts(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM quiz_attempts")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.0)
    }

    /// Attempts completed on the given UTC calendar date.
    pub async fn count_attempts_on(&self, date: NaiveDate) -> Result<i64> {
        let (start, end) = day_bounds(date);
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM quiz_attempts WHERE completed_at >= ? AND completed_at < ?",
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;
        Ok(count.0)
    }

    /// Mean of per-attempt `score / total_questions` as a percentage; 0 with no attempts.
    pub async fn average_score(&self) -> Result<f64> {
        let avg: (Option<f64>,) = sqlx::query_as(
            "SELECT AVG(score * 100.0 / NULLIF(total_questions, 0)) FROM quiz_attempts",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(avg.0.unwrap_or(0.0))
    }

    pub async fn totals(&self, now: DateTime<Utc>) -> Result<SystemTotals> {
        Ok(SystemTotals {
            total_users: self.count_users().await?,
            total_quizzes: self.count_quizzes().await?,
            total_attempts: self.count_attempts().await?,
            daily_attempts: self.count_attempts_on(now.date_naive()).await?,
            average_score: self.average_score().await?,
        })
    }

    /// Attempt count and rounded average percentage over the 7 days before `now`.
    pub async fn weekly_stats(&self, user_id: i64, now: DateTime<Utc>) -> Result<WeeklyStats> {
        let since = now - Duration::days(7);
        let row: (i64, Option<f64>) = sqlx::query_as(
            r#"
            SELECT COUNT(*), AVG(score * 100.0 / NULLIF(total_questions, 0))
            FROM quiz_attempts
            WHERE user_id = ? AND completed_at > ?
            "#,
        )
        .bind(user_id)
        .bind(since)
        .fetch_one(&self.pool)
        .await?;
        Ok(WeeklyStats {
            quizzes_completed: row.0,
            average_score: row.1.unwrap_or(0.0).round() as i64,
        })
    }

    pub async fn snapshot_exists(&self, date: NaiveDate) -> Result<bool> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM system_metrics WHERE metric_date = ?")
            .bind(date)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }

    /// Inserts the snapshot unless the date already has one.
    pub async fn insert_snapshot(
        &self,
        date: NaiveDate,
        totals: &SystemTotals,
        created_at: DateTime<Utc>,
    ) -> Result<SnapshotWrite> {
        let result = sqlx::query(
            r#"
            INSERT INTO system_metrics
                (metric_date, total_users, total_quizzes, total_attempts, daily_attempts, average_score, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT (metric_date) DO NOTHING
            "#,
        )
        .bind(date)
        .bind(totals.total_users)
        .bind(totals.total_quizzes)
        .bind(totals.total_attempts)
        .bind(totals.daily_attempts)
        .bind(totals.average_score)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        Ok(if result.rows_affected() == 0 {
            SnapshotWrite::AlreadyPresent
        } else {
            SnapshotWrite::Inserted
        })
    }

    pub async fn recent_snapshots(&self, limit: i64) -> Result<Vec<SystemMetric>> {
        let rows = sqlx::query_as::<_, SystemMetric>(
            r#"
            SELECT id, metric_date, total_users, total_quizzes, total_attempts,
                   daily_attempts, average_score, created_at
            FROM system_metrics
            ORDER BY metric_date DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
