use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database_url: String,
    pub database_max_connections: u32,
    pub jwt_secret: String,
    pub frontend_url: String,
    pub enable_jobs: bool,
    pub mail: MailConfig,
}

/// Mail delivery settings. Without both an API URL and a key the dispatcher
/// runs in test mode.
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub api_url: Option<Url>,
    pub api_key: Option<String>,
    pub from_address: String,
    pub send_delay: Duration,
}

impl MailConfig {
    pub fn has_credentials(&self) -> bool {
        self.api_url.is_some() && self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            api_key: None,
            from_address: "QuizMaster <noreply@quizmaster.local>".to_string(),
            send_delay: Duration::from_millis(1000),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let frontend_url = get_env_or("FRONTEND_URL", "http://localhost:5173");
        Url::parse(&frontend_url)
            .map_err(|e| Error::Config(format!("Invalid value for FRONTEND_URL: {}", e)))?;

        let api_url = match env::var("MAIL_API_URL").ok().filter(|v| !v.is_empty()) {
            Some(raw) => Some(
                Url::parse(&raw)
                    .map_err(|e| Error::Config(format!("Invalid value for MAIL_API_URL: {}", e)))?,
            ),
            None => None,
        };
        let defaults = MailConfig::default();

        Ok(Self {
            server_address: get_env_or("SERVER_ADDRESS", "0.0.0.0:3001"),
            database_url: get_env("DATABASE_URL")?,
            database_max_connections: get_env_parse_or("DATABASE_MAX_CONNECTIONS", 5)?,
            jwt_secret: get_env("JWT_SECRET")?,
            frontend_url: frontend_url.trim_end_matches('/').to_string(),
            enable_jobs: get_env_parse_or("ENABLE_JOBS", true)?,
            mail: MailConfig {
                api_url,
                api_key: env::var("MAIL_API_KEY").ok(),
                from_address: get_env_or("MAIL_FROM", &defaults.from_address),
                send_delay: Duration::from_millis(get_env_parse_or("MAIL_SEND_DELAY_MS", 1000)?),
            },
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}
