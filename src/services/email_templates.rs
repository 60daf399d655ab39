//! Named email templates for the notification jobs.

use serde::{Deserialize, Serialize};

/// Template name plus the payload it renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "template", rename_all = "camelCase")]
pub enum EmailTemplate {
    #[serde(rename_all = "camelCase")]
    DailyReminder {
        username: String,
        available_quizzes: i64,
    },
    #[serde(rename_all = "camelCase")]
    WeeklyReport {
        username: String,
        quizzes_completed: i64,
        average_score: i64,
    },
    #[serde(rename_all = "camelCase")]
    AdminDailyReport {
        total_users: i64,
        total_attempts: i64,
        today_attempts: i64,
        average_score: i64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
}

impl EmailTemplate {
    pub fn name(&self) -> &'static str {
        match self {
            EmailTemplate::DailyReminder { .. } => "dailyReminder",
            EmailTemplate::WeeklyReport { .. } => "weeklyReport",
            EmailTemplate::AdminDailyReport { .. } => "adminDailyReport",
        }
    }

    pub fn render(&self, frontend_url: &str) -> RenderedEmail {
        match self {
            EmailTemplate::DailyReminder {
                username,
                available_quizzes,
            } => RenderedEmail {
                subject: "Daily Quiz Reminder - Keep Learning with QuizMaster!".to_string(),
                html: layout(
                    "QuizMaster",
                    "Your Daily Learning Reminder",
                    &format!(
                        r#"<h2 style="color: #1F2937;">Hi {name}!</h2>
<p style="color: #4B5563; line-height: 1.6;">Don't let your learning streak break! We have <strong>{count}</strong> quizzes waiting for you. Take a few minutes today to challenge yourself and expand your knowledge.</p>
<ul style="color: #4B5563;"><li>Reinforce your learning</li><li>Track your progress</li><li>Discover new topics</li><li>Challenge yourself</li></ul>"#,
                        name = escape(display_name(username)),
                        count = available_quizzes,
                    ),
                    &format!("{}/dashboard", frontend_url),
                    "Start Learning Now",
                    Some(&format!("{}/settings", frontend_url)),
                ),
            },
            EmailTemplate::WeeklyReport {
                username,
                quizzes_completed,
                average_score,
            } => RenderedEmail {
                subject: "Your Weekly Quiz Performance Report".to_string(),
                html: layout(
                    "Weekly Report",
                    "Your Learning Progress",
                    &format!(
                        r#"<h2 style="color: #1F2937;">Great work this week, {name}!</h2>
{completed}
{average}"#,
                        name = escape(display_name(username)),
                        completed = stat_box(&quizzes_completed.to_string(), "Quizzes Completed"),
                        average = stat_box(&format!("{}%", average_score), "Average Score"),
                    ),
                    &format!("{}/history", frontend_url),
                    "View Full Report",
                    None,
                ),
            },
            EmailTemplate::AdminDailyReport {
                total_users,
                total_attempts,
                today_attempts,
                average_score,
            } => RenderedEmail {
                subject: "QuizMaster Daily Admin Report".to_string(),
                html: layout(
                    "Admin Report",
                    "Daily System Overview",
                    &format!(
                        r#"<h2 style="color: #1F2937;">System Status - {date}</h2>
{users}
{attempts}
{today}
{average}"#,
                        date = chrono::Utc::now().format("%Y-%m-%d"),
                        users = stat_box(&total_users.to_string(), "Total Users"),
                        attempts = stat_box(&total_attempts.to_string(), "Total Attempts"),
                        today = stat_box(&today_attempts.to_string(), "Today's Attempts"),
                        average = stat_box(&format!("{}%", average_score), "Avg Score"),
                    ),
                    &format!("{}/admin", frontend_url),
                    "View Admin Dashboard",
                    None,
                ),
            },
        }
    }
}

fn display_name(username: &str) -> &str {
    if username.trim().is_empty() {
        "there"
    } else {
        username
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

fn stat_box(value: &str, label: &str) -> String {
    format!(
        r#"<div style="background: #EFF6FF; padding: 15px; border-radius: 8px; text-align: center; margin-bottom: 10px;"><h3 style="color: #1E40AF; margin: 0 0 5px 0;">{}</h3><p style="color: #3B82F6; margin: 0;">{}</p></div>"#,
        value, label
    )
}

fn layout(title: &str, subtitle: &str, body: &str, cta_href: &str, cta_label: &str, unsubscribe: Option<&str>) -> String {
    let footer = unsubscribe
        .map(|href| {
            format!(
                r#"<p style="text-align: center; color: #9CA3AF; font-size: 14px;">Keep learning, keep growing! <a href="{}" style="color: #6B7280;">Unsubscribe</a></p>"#,
                href
            )
        })
        .unwrap_or_default();
    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
<div style="background: white; padding: 30px; border-radius: 10px;">
<div style="text-align: center; margin-bottom: 30px;"><h1 style="color: #4F46E5; margin: 0;">{title}</h1><p style="color: #6B7280;">{subtitle}</p></div>
{body}
<div style="text-align: center; margin: 25px 0;"><a href="{cta_href}" style="background: #4F46E5; color: white; padding: 15px 30px; text-decoration: none; border-radius: 8px; font-weight: bold;">{cta_label}</a></div>
{footer}
</div>
</div>"#
    )
}
