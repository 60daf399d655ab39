mod common;

use chrono::{Duration, Utc};
use common::*;
use quizmaster_backend::{
    dto::preference_dto::UpdatePreferencesPayload,
    error::Error,
    jobs::{definitions::TaskFuture, JobContext, JobDefinition, JobOutcome, JobRegistry},
    models::job_log::JobStatus,
    services::{job_log_service::JobLogService, preference_service::PreferenceService},
};

#[tokio::test]
async fn collect_metrics_runs_once_per_day() {
    let pool = setup_pool().await;
    let user = seed_user(&pool, "alice", "user").await;
    seed_user(&pool, "root", "admin").await;
    let (quiz, _) = seed_quiz(&pool, "Rust basics", 4).await;
    seed_attempt(&pool, user, quiz, 3, 4, Utc::now()).await;
    seed_attempt(&pool, user, quiz, 1, 4, Utc::now() - Duration::days(3)).await;
    let registry = test_registry(pool.clone());

    let first = registry.trigger("collect-metrics").await.expect("first run");
    assert_eq!(first.status(), JobStatus::Completed);
    assert_eq!(
        first.details(),
        format!("Metrics saved for {}", Utc::now().format("%Y-%m-%d"))
    );

    let second = registry.trigger("collect-metrics").await.expect("second run");
    assert_eq!(second, JobOutcome::Skipped("Already collected today".to_string()));

    let rows: (i64, i64, i64, i64, i64, f64) = sqlx::query_as(
        "SELECT COUNT(*), total_users, total_quizzes, total_attempts, daily_attempts, average_score FROM system_metrics",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(rows.0, 1);
    assert_eq!(rows.1, 1, "admins are not counted as users");
    assert_eq!(rows.2, 1);
    assert_eq!(rows.3, 2);
    assert_eq!(rows.4, 1);
    assert!((rows.5 - 50.0).abs() < 1e-9);

    let statuses: Vec<JobStatus> = logs_for(&pool, "COLLECT_METRICS")
        .await
        .into_iter()
        .map(|l| l.status)
        .collect();
    assert_eq!(
        statuses,
        vec![
            JobStatus::Started,
            JobStatus::Completed,
            JobStatus::Started,
            JobStatus::Skipped
        ]
    );
}

#[tokio::test]
async fn database_cleanup_removes_only_expired_logs() {
    let pool = setup_pool().await;
    let logs = JobLogService::new(pool.clone());
    let now = Utc::now();
    logs.insert("DAILY_REMINDER", JobStatus::Completed, "old", now - Duration::days(31))
        .await
        .unwrap();
    logs.insert("DAILY_REMINDER", JobStatus::Completed, "recent", now - Duration::days(29))
        .await
        .unwrap();
    let registry = test_registry(pool.clone());

    let outcome = registry.trigger("database-cleanup").await.expect("cleanup");
    assert_eq!(outcome.details(), "Removed 1 old logs and vacuumed database");

    let remaining = logs_for(&pool, "DAILY_REMINDER").await;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].details, "recent");
    assert_eq!(logs_for(&pool, "DATABASE_CLEANUP").await.len(), 2);
}

#[tokio::test]
async fn unknown_job_is_rejected_without_logging() {
    let pool = setup_pool().await;
    let registry = test_registry(pool.clone());

    let err = registry.trigger("make-coffee").await.unwrap_err();
    assert!(matches!(err, Error::UnknownJob(ref name) if name == "make-coffee"));

    let err = registry.trigger("health-check").await.unwrap_err();
    assert!(matches!(err, Error::UnknownJob(_)));

    let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM job_logs")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(total.0, 0);
}

#[tokio::test]
async fn daily_reminder_skips_active_opted_out_and_recently_reminded_users() {
    let pool = setup_pool().await;
    let idle = seed_user(&pool, "idle", "user").await;
    let active = seed_user(&pool, "active", "user").await;
    let opted_out = seed_user(&pool, "quiet", "user").await;
    let reminded = seed_user(&pool, "reminded", "user").await;
    seed_user(&pool, "root", "admin").await;
    let (quiz, _) = seed_quiz(&pool, "Geography", 2).await;
    let now = Utc::now();

    seed_attempt(&pool, active, quiz, 2, 2, now - Duration::hours(2)).await;
    seed_attempt(&pool, idle, quiz, 1, 2, now - Duration::hours(30)).await;

    let prefs = PreferenceService::new(pool.clone());
    prefs
        .upsert(
            opted_out,
            &UpdatePreferencesPayload {
                email_reminders: false,
                reminder_time: None,
                weekly_reports: true,
            },
        )
        .await
        .unwrap();
    prefs
        .mark_reminder_sent(reminded, now - Duration::hours(5))
        .await
        .unwrap();

    let registry = test_registry(pool.clone());
    let outcome = registry.trigger("daily-reminder").await.expect("reminder");
    assert_eq!(outcome.details(), "Sent 1/1 reminders");

    let stamped = prefs.get(idle).await.unwrap();
    assert!(stamped.last_reminder_sent.is_some());
    assert!(stamped.email_reminders);

    let untouched = prefs.get(active).await.unwrap();
    assert!(untouched.last_reminder_sent.is_none());
    assert!(!prefs.get(opted_out).await.unwrap().email_reminders);

    // the freshly stamped user is now inside the throttle window
    let again = registry.trigger("daily-reminder").await.expect("second reminder");
    assert_eq!(again.details(), "No users need reminders");
}

#[tokio::test]
async fn reminder_throttle_expires_after_twenty_hours() {
    let pool = setup_pool().await;
    let stale = seed_user(&pool, "stale", "user").await;
    let fresh = seed_user(&pool, "fresh", "user").await;
    let now = Utc::now();
    let prefs = PreferenceService::new(pool.clone());
    prefs
        .mark_reminder_sent(stale, now - Duration::hours(21))
        .await
        .unwrap();
    prefs
        .mark_reminder_sent(fresh, now - Duration::hours(19))
        .await
        .unwrap();

    let due: Vec<i64> = prefs
        .reminder_candidates(now)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(due, vec![stale]);

    let registry = test_registry(pool.clone());
    let outcome = registry.trigger("daily-reminder").await.expect("reminder");
    assert_eq!(outcome.details(), "Sent 1/1 reminders");
    let restamped = prefs.get(stale).await.unwrap().last_reminder_sent.unwrap();
    assert!(restamped > now - Duration::hours(1));
}

#[tokio::test]
async fn activity_window_is_twenty_four_hours() {
    let pool = setup_pool().await;
    let recent = seed_user(&pool, "recent", "user").await;
    let lapsed = seed_user(&pool, "lapsed", "user").await;
    let (quiz, _) = seed_quiz(&pool, "Science", 1).await;
    let now = Utc::now();
    seed_attempt(&pool, recent, quiz, 1, 1, now - Duration::hours(23)).await;
    seed_attempt(&pool, lapsed, quiz, 1, 1, now - Duration::hours(25)).await;

    let due: Vec<i64> = PreferenceService::new(pool.clone())
        .reminder_candidates(now)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(due, vec![lapsed]);
}

#[tokio::test]
async fn reminder_stamp_keeps_existing_preferences() {
    let pool = setup_pool().await;
    let user = seed_user(&pool, "bea", "user").await;
    let prefs = PreferenceService::new(pool.clone());
    prefs
        .upsert(
            user,
            &UpdatePreferencesPayload {
                email_reminders: true,
                reminder_time: Some("18:30".to_string()),
                weekly_reports: false,
            },
        )
        .await
        .unwrap();

    prefs.mark_reminder_sent(user, Utc::now()).await.unwrap();

    let stored = prefs.get(user).await.unwrap();
    assert_eq!(stored.reminder_time, "18:30");
    assert!(!stored.weekly_reports);
    assert!(stored.last_reminder_sent.is_some());
}

#[tokio::test]
async fn weekly_report_goes_to_subscribed_users() {
    let pool = setup_pool().await;
    let reader = seed_user(&pool, "reader", "user").await;
    let other = seed_user(&pool, "other", "user").await;
    let unsubscribed = seed_user(&pool, "nope", "user").await;
    let (quiz, _) = seed_quiz(&pool, "History", 4).await;
    seed_attempt(&pool, reader, quiz, 4, 4, Utc::now() - Duration::days(1)).await;
    seed_attempt(&pool, other, quiz, 2, 4, Utc::now() - Duration::days(10)).await;

    PreferenceService::new(pool.clone())
        .upsert(
            unsubscribed,
            &UpdatePreferencesPayload {
                email_reminders: true,
                reminder_time: None,
                weekly_reports: false,
            },
        )
        .await
        .unwrap();

    let registry = test_registry(pool.clone());
    let stats = registry
        .context()
        .metrics
        .weekly_stats(reader, Utc::now())
        .await
        .unwrap();
    assert_eq!(stats.quizzes_completed, 1);
    assert_eq!(stats.average_score, 100);

    let outcome = registry.trigger("weekly-report").await.expect("weekly");
    assert_eq!(outcome.details(), "Sent 2/2 reports");
}

#[tokio::test]
async fn admin_report_counts_admins() {
    let pool = setup_pool().await;
    seed_user(&pool, "alice", "user").await;
    let registry = test_registry(pool.clone());

    let none = registry.trigger("admin-daily-report").await.expect("no admins");
    assert_eq!(none.details(), "Sent to 0 admins");

    seed_user(&pool, "root", "admin").await;
    seed_user(&pool, "ops", "admin").await;
    let two = registry.trigger("admin-daily-report").await.expect("two admins");
    assert_eq!(two.status(), JobStatus::Completed);
    assert_eq!(two.details(), "Sent to 2 admins");
}

#[tokio::test]
async fn health_check_logs_only_completion() {
    let pool = setup_pool().await;
    let registry = test_registry(pool.clone());
    let def = registry.find("health-check").expect("health-check job");

    let outcome = registry.run(def).await.expect("health check");
    assert!(outcome.details().starts_with("System running at "));

    let logs = logs_for(&pool, "HEALTH_CHECK").await;
    assert_eq!(logs.len(), 1);
    assert_eq!(registry.context().job_logs.count_for("HEALTH_CHECK").await.unwrap(), 1);
    assert_eq!(logs[0].status, JobStatus::Completed);
}

#[tokio::test]
async fn failing_job_logs_error_and_returns_it() {
    let pool = setup_pool().await;
    sqlx::query("DROP TABLE system_metrics")
        .execute(&pool)
        .await
        .unwrap();
    let registry = test_registry(pool.clone());

    let err = registry.trigger("collect-metrics").await.unwrap_err();
    assert!(matches!(err, Error::Database(_)));

    let logs = logs_for(&pool, "COLLECT_METRICS").await;
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0].status, JobStatus::Started);
    assert_eq!(logs[1].status, JobStatus::Error);
    assert!(!logs[1].details.is_empty());
}

#[tokio::test]
async fn schedule_summary_lists_every_job() {
    let pool = setup_pool().await;
    let registry = test_registry(pool);
    let summary = registry.schedule_summary();

    assert_eq!(summary.len(), 6);
    assert!(summary.iter().all(|job| job.next_run.is_some() && job.timezone == "UTC"));
    let health = summary.iter().find(|job| job.name == "health-check").unwrap();
    assert!(!health.manual);
}

fn always_fails(_ctx: &JobContext) -> TaskFuture<'_> {
    Box::pin(async { Err::<JobOutcome, _>(Error::Internal("mail relay offline".to_string())) })
}

static FAILING_TABLE: &[JobDefinition] = &[JobDefinition {
    name: "flaky",
    log_name: "FLAKY",
    schedule: "*/5 * * * *",
    timezone: Utc,
    manual: true,
    log_start: false,
    handler: always_fails,
}];

#[tokio::test]
async fn custom_table_error_is_logged_with_message() {
    let pool = setup_pool().await;
    let base = test_registry(pool.clone());
    let registry = JobRegistry::with_table(base.context().clone(), FAILING_TABLE);

    let err = registry.trigger("flaky").await.unwrap_err();
    assert!(matches!(err, Error::Internal(_)));
    assert!(registry.trigger("collect-metrics").await.is_err());

    let logs = logs_for(&pool, "FLAKY").await;
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].status, JobStatus::Error);
    assert!(logs[0].details.contains("mail relay offline"));
}
