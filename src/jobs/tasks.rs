//! Task bodies. Each returns how it finished; the registry writes the job log.

use super::context::{JobContext, JobOutcome};
use super::definitions::TaskFuture;
use crate::error::Result;
use crate::models::user::UserRole;
use crate::services::email_templates::EmailTemplate;
use crate::services::metrics_service::SnapshotWrite;
use crate::services::notification_service::{DeliveryReport, Envelope};
use chrono::{Duration, SecondsFormat, Utc};

/// Job logs older than this are removed by the cleanup job.
pub const JOB_LOG_RETENTION_DAYS: i64 = 30;

fn successes(reports: &[DeliveryReport]) -> usize {
    reports.iter().filter(|r| r.success).count()
}

pub async fn daily_reminder(ctx: &JobContext) -> Result<JobOutcome> {
    let now = Utc::now();
    let users = ctx.preferences.reminder_candidates(now).await?;
    if users.is_empty() {
        return Ok(JobOutcome::Completed("No users need reminders".to_string()));
    }

    let available_quizzes = ctx.quizzes.count().await?;

    let mut batch = Vec::with_capacity(users.len());
    for user in &users {
        if let Err(e) = ctx.preferences.mark_reminder_sent(user.id, now).await {
            tracing::warn!(user_id = user.id, error = %e, "could not stamp last reminder");
        }
        batch.push(Envelope {
            email: user.email.clone(),
            username: user.username.clone(),
            template: EmailTemplate::DailyReminder {
                username: user.username.clone(),
                available_quizzes,
            },
        });
    }

    let reports = ctx.notifications.send_bulk(batch).await;
    Ok(JobOutcome::Completed(format!(
        "Sent {}/{} reminders",
        successes(&reports),
        users.len()
    )))
}

pub async fn weekly_report(ctx: &JobContext) -> Result<JobOutcome> {
    let now = Utc::now();
    let users = ctx.preferences.weekly_report_recipients().await?;

    let mut batch = Vec::with_capacity(users.len());
    for user in &users {
        let stats = ctx.metrics.weekly_stats(user.id, now).await?;
        batch.push(Envelope {
            email: user.email.clone(),
            username: user.username.clone(),
            template: EmailTemplate::WeeklyReport {
                username: user.username.clone(),
                quizzes_completed: stats.quizzes_completed,
                average_score: stats.average_score,
            },
        });
    }

    let reports = ctx.notifications.send_bulk(batch).await;
    Ok(JobOutcome::Completed(format!(
        "Sent {}/{} reports",
        successes(&reports),
        users.len()
    )))
}

pub async fn admin_daily_report(ctx: &JobContext) -> Result<JobOutcome> {
    let admins = ctx.metrics.users_with_role(UserRole::Admin).await?;

    let now = Utc::now();
    let report = EmailTemplate::AdminDailyReport {
        total_users: ctx.metrics.count_users().await?,
        total_attempts: ctx.metrics.count_attempts().await?,
        today_attempts: ctx.metrics.count_attempts_on(now.date_naive()).await?,
        average_score: ctx.metrics.average_score().await?.round() as i64,
    };

    let batch = admins
        .iter()
        .map(|admin| Envelope {
            email: admin.email.clone(),
            username: admin.username.clone(),
            template: report.clone(),
        })
        .collect();
    let reports = ctx.notifications.send_bulk(batch).await;
    let failed = reports.len() - successes(&reports);
    if failed > 0 {
        tracing::warn!(failed, "some admin reports were not delivered");
    }

    Ok(JobOutcome::Completed(format!("Sent to {} admins", admins.len())))
}

pub async fn collect_metrics(ctx: &JobContext) -> Result<JobOutcome> {
    let now = Utc::now();
    let today = now.date_naive();

    if ctx.metrics.snapshot_exists(today).await? {
        return Ok(JobOutcome::Skipped("Already collected today".to_string()));
    }

    let totals = ctx.metrics.totals(now).await?;
    match ctx.metrics.insert_snapshot(today, &totals, now).await? {
        SnapshotWrite::Inserted => Ok(JobOutcome::Completed(format!(
            "Metrics saved for {}",
            today.format("%Y-%m-%d")
        ))),
        SnapshotWrite::AlreadyPresent => {
            Ok(JobOutcome::Skipped("Already collected today".to_string()))
        }
    }
}

pub async fn database_cleanup(ctx: &JobContext) -> Result<JobOutcome> {
    let removed = ctx
        .job_logs
        .purge_older_than(Duration::days(JOB_LOG_RETENTION_DAYS), Utc::now())
        .await?;

    sqlx::query("VACUUM").execute(&ctx.pool).await?;

    Ok(JobOutcome::Completed(format!(
        "Removed {} old logs and vacuumed database",
        removed
    )))
}

pub async fn health_check(_ctx: &JobContext) -> Result<JobOutcome> {
    Ok(JobOutcome::Completed(format!(
        "System running at {}",
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
    )))
}

pub fn daily_reminder_task(ctx: &JobContext) -> TaskFuture<'_> {
    Box::pin(daily_reminder(ctx))
}

pub fn weekly_report_task(ctx: &JobContext) -> TaskFuture<'_> {
    Box::pin(weekly_report(ctx))
}

pub fn admin_daily_report_task(ctx: &JobContext) -> TaskFuture<'_> {
    Box::pin(admin_daily_report(ctx))
}

pub fn collect_metrics_task(ctx: &JobContext) -> TaskFuture<'_> {
    Box::pin(collect_metrics(ctx))
}

pub fn database_cleanup_task(ctx: &JobContext) -> TaskFuture<'_> {
    Box::pin(database_cleanup(ctx))
}

pub fn health_check_task(ctx: &JobContext) -> TaskFuture<'_> {
    Box::pin(health_check(ctx))
}
