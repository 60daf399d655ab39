use crate::dto::preference_dto::UpdatePreferencesPayload;
use crate::error::Result;
use crate::models::user::Recipient;
use crate::models::user_preference::{UserPreference, DEFAULT_REMINDER_TIME};
use chrono::{DateTime, Duration, Utc};
use sqlx::SqlitePool;

/// No reminder for anyone who completed a quiz this recently.
pub const ACTIVITY_WINDOW_HOURS: i64 = 24;
/// No second reminder within this many hours, even when the job re-runs.
pub const REMINDER_THROTTLE_HOURS: i64 = 20;

#[derive(Clone)]
pub struct PreferenceService {
    pool: SqlitePool,
}

impl PreferenceService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Stored preferences, or the defaults when the user never saved any.
    pub async fn get(&self, user_id: i64) -> Result<UserPreference> {
        let row = sqlx::query_as::<_, UserPreference>(
            r#"
            SELECT user_id, email_reminders, reminder_time, weekly_reports, last_reminder_sent
            FROM user_preferences
            WHERE user_id = ?
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.unwrap_or_else(|| UserPreference::defaults_for(user_id)))
    }

    pub async fn upsert(&self, user_id: i64, payload: &UpdatePreferencesPayload) -> Result<UserPreference> {
        let reminder_time = payload
            .reminder_time
            .clone()
            .unwrap_or_else(|| DEFAULT_REMINDER_TIME.to_string());
        sqlx::query(
            r#"
            INSERT INTO user_preferences (user_id, email_reminders, reminder_time, weekly_reports)
            VALUES (?, ?, ?, ?)
            ON CONFLICT (user_id) DO UPDATE SET
                email_reminders = excluded.email_reminders,
                reminder_time = excluded.reminder_time,
                weekly_reports = excluded.weekly_reports
            "#,
        )
        .bind(user_id)
        .bind(payload.email_reminders)
        .bind(reminder_time)
        .bind(payload.weekly_reports)
        .execute(&self.pool)
        .await?;
        self.get(user_id).await
    }

    /// Stamps the reminder throttle without touching the user's opt-ins.
    pub async fn mark_reminder_sent(&self, user_id: i64, sent_at: DateTime<Utc>) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO user_preferences (user_id, last_reminder_sent)
            VALUES (?, ?)
            ON CONFLICT (user_id) DO UPDATE SET last_reminder_sent = excluded.last_reminder_sent
            "#,
        )
        .bind(user_id)
        .bind(sent_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Users due a daily reminder at `now`: role `user`, reminders on (the
    /// default), no attempt inside the activity window, and no reminder inside
    /// the throttle window.
    pub async fn reminder_candidates(&self, now: DateTime<Utc>) -> Result<Vec<Recipient>> {
        let active_since = now - Duration::hours(ACTIVITY_WINDOW_HOURS);
        let throttle_until = now - Duration::hours(REMINDER_THROTTLE_HOURS);
        let users = sqlx::query_as::<_, Recipient>(
            r#"
            SELECT u.id, u.username, u.email
            FROM users u
            LEFT JOIN user_preferences up ON up.user_id = u.id
            WHERE u.role = 'user'
              AND COALESCE(up.email_reminders, 1) = 1
              AND NOT EXISTS (
                  SELECT 1 FROM quiz_attempts qa
                  WHERE qa.user_id = u.id AND qa.completed_at > ?
              )
              AND (up.last_reminder_sent IS NULL OR up.last_reminder_sent < ?)
            ORDER BY u.id ASC
            "#,
        )
        .bind(active_since)
        .bind(throttle_until)
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    pub async fn weekly_report_recipients(&self) -> Result<Vec<Recipient>> {
        let users = sqlx::query_as::<_, Recipient>(
            r#"
            SELECT u.id, u.username, u.email
            FROM users u
            LEFT JOIN user_preferences up ON up.user_id = u.id
            WHERE u.role = 'user'
              AND COALESCE(up.weekly_reports, 1) = 1
            ORDER BY u.id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }
}
