use crate::config::MailConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use url::Url;

pub const TEST_MODE_MESSAGE_ID: &str = "test-mode";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingMail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryReceipt {
    pub message_id: Option<String>,
    pub test_mode: bool,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn deliver(&self, mail: &OutgoingMail) -> Result<DeliveryReceipt>;

    /// True when nothing actually leaves the process.
    fn is_test_mode(&self) -> bool;
}

/// Picks the transport once, from configuration: the HTTP mail API when both
/// its URL and key are set, test mode otherwise.
pub fn from_config(config: &MailConfig) -> Arc<dyn MailTransport> {
    match (&config.api_url, &config.api_key) {
        (Some(url), Some(key)) if config.has_credentials() => {
            tracing::info!(endpoint = %url, "mail delivery via HTTP API");
            Arc::new(HttpMailTransport::new(Client::new(), url.clone(), key.clone()))
        }
        _ => {
            tracing::warn!("mail credentials missing, notifications run in test mode");
            Arc::new(NoopTransport)
        }
    }
}

/// Posts each message as JSON to a transactional mail API.
#[derive(Clone)]
pub struct HttpMailTransport {
    client: Client,
    endpoint: Url,
    api_key: String,
}

impl HttpMailTransport {
    pub fn new(client: Client, endpoint: Url, api_key: String) -> Self {
        Self {
            client,
            endpoint,
            api_key,
        }
    }
}

#[async_trait]
impl MailTransport for HttpMailTransport {
    async fn deliver(&self, mail: &OutgoingMail) -> Result<DeliveryReceipt> {
        let resp = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(mail)
            .send()
            .await
            .map_err(|e| Error::Delivery(format!("mail API unreachable: {}", e)))?;

        let status = resp.status();
        let body = match resp.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(to = %mail.to, %status, error = %e, "could not read mail API response body");
                String::new()
            }
        };
        if !status.is_success() {
            return Err(Error::Delivery(format!(
                "mail API returned {} for {}: {}",
                status.as_u16(),
                mail.to,
                body
            )));
        }

        let message_id = serde_json::from_str::<JsonValue>(&body).ok().and_then(|v| {
            v.get("id")
                .or_else(|| v.get("messageId"))
                .and_then(|id| id.as_str())
                .map(|s| s.to_string())
        });
        tracing::info!(to = %mail.to, message_id = ?message_id, "email sent");
        Ok(DeliveryReceipt {
            message_id,
            test_mode: false,
        })
    }

    fn is_test_mode(&self) -> bool {
        false
    }
}

/// Test-mode transport: reports success without sending anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTransport;

#[async_trait]
impl MailTransport for NoopTransport {
    async fn deliver(&self, mail: &OutgoingMail) -> Result<DeliveryReceipt> {
        tracing::info!(to = %mail.to, subject = %mail.subject, "test mode, email not sent");
        Ok(DeliveryReceipt {
            message_id: Some(TEST_MODE_MESSAGE_ID.to_string()),
            test_mode: true,
        })
    }

    fn is_test_mode(&self) -> bool {
        true
    }
}
