use crate::error::Result;
use crate::services::email_templates::EmailTemplate;
use crate::services::mail_transport::{DeliveryReceipt, MailTransport, OutgoingMail};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// One message of a bulk send.
#[derive(Debug, Clone)]
pub struct Envelope {
    pub email: String,
    pub username: String,
    pub template: EmailTemplate,
}

/// Per-recipient outcome of a bulk send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryReport {
    pub email: String,
    pub username: String,
    pub success: bool,
    pub message_id: Option<String>,
    pub test_mode: bool,
    pub error: Option<String>,
}

#[derive(Clone)]
pub struct NotificationService {
    transport: Arc<dyn MailTransport>,
    from_address: String,
    frontend_url: String,
    send_delay: Duration,
}

impl NotificationService {
    pub fn new(
        transport: Arc<dyn MailTransport>,
        from_address: String,
        frontend_url: String,
        send_delay: Duration,
    ) -> Self {
        Self {
            transport,
            from_address,
            frontend_url,
            send_delay,
        }
    }

    pub fn is_test_mode(&self) -> bool {
        self.transport.is_test_mode()
    }

    pub async fn send_email(&self, to: &str, template: &EmailTemplate) -> Result<DeliveryReceipt> {
        let rendered = template.render(&self.frontend_url);
        let mail = OutgoingMail {
            from: self.from_address.clone(),
            to: to.to_string(),
            subject: rendered.subject,
            html: rendered.html,
        };
        match self.transport.deliver(&mail).await {
            Ok(receipt) => Ok(receipt),
            Err(e) => {
                tracing::error!(to, template = template.name(), error = %e, "failed to send email");
                Err(e)
            }
        }
    }

    /// Sends sequentially. A real send, failed or not, is followed by the
    /// configured delay; test-mode sends are not.
    pub async fn send_bulk(&self, batch: Vec<Envelope>) -> Vec<DeliveryReport> {
        let mut reports = Vec::with_capacity(batch.len());

        for envelope in batch {
            let outcome = self.send_email(&envelope.email, &envelope.template).await;
            let test_mode = matches!(&outcome, Ok(r) if r.test_mode);
            reports.push(match outcome {
                Ok(receipt) => DeliveryReport {
                    email: envelope.email,
                    username: envelope.username,
                    success: true,
                    message_id: receipt.message_id,
                    test_mode: receipt.test_mode,
                    error: None,
                },
                Err(e) => DeliveryReport {
                    email: envelope.email,
                    username: envelope.username,
                    success: false,
                    message_id: None,
                    test_mode: false,
                    error: Some(e.to_string()),
                },
            });

            if !test_mode && !self.send_delay.is_zero() {
                tokio::time::sleep(self.send_delay).await;
            }
        }

        reports
    }
}
