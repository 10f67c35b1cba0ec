//! Email delivery through Resend or SendGrid

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::json;
use soilmate_core::EmailMessage;
use tracing::{debug, info, warn};

use super::{EmailService, IntegrationError, IntegrationsConfig, configured};

const RESEND_DEFAULT_FROM: &str = "onboarding@resend.dev";
const SENDGRID_DEFAULT_FROM: &str = "noreply@ekondo.com";

/// A provider that can deliver a rendered email
#[async_trait]
pub trait EmailTransport: Send + Sync {
    fn name(&self) -> &'static str;

    async fn send(&self, message: &EmailMessage) -> Result<(), IntegrationError>;
}

/// What happened to an email
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailOutcome {
    Sent,
    /// No provider is configured
    Skipped,
}

/// Sends emails through the configured transport, if any
#[derive(Clone)]
pub struct EmailSender {
    transport: Option<Arc<dyn EmailTransport>>,
}

impl fmt::Debug for EmailSender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailSender")
            .field("transport", &self.transport.as_ref().map(|t| t.name()))
            .finish()
    }
}

impl EmailSender {
    pub fn new(transport: Arc<dyn EmailTransport>) -> Self {
        Self {
            transport: Some(transport),
        }
    }

    pub fn disabled() -> Self {
        Self { transport: None }
    }

    /// Pick a transport for the configured service; a missing key disables sending
    pub fn from_config(http: reqwest::Client, config: &IntegrationsConfig) -> Self {
        let from = configured(config.from_email.clone());
        let transport: Option<Arc<dyn EmailTransport>> = match config.email_service {
            EmailService::Resend => configured(config.resend_api_key.clone()).map(|key| {
                Arc::new(ResendTransport {
                    http,
                    base_url: config.resend_base_url.trim_end_matches('/').to_string(),
                    api_key: key,
                    from: from.unwrap_or_else(|| RESEND_DEFAULT_FROM.to_string()),
                }) as Arc<dyn EmailTransport>
            }),
            EmailService::SendGrid => configured(config.sendgrid_api_key.clone()).map(|key| {
                Arc::new(SendGridTransport {
                    http,
                    base_url: config.sendgrid_base_url.trim_end_matches('/').to_string(),
                    api_key: key,
                    from: from.unwrap_or_else(|| SENDGRID_DEFAULT_FROM.to_string()),
                }) as Arc<dyn EmailTransport>
            }),
            EmailService::None => None,
        };

        if transport.is_none() && config.email_service != EmailService::None {
            warn!(
                service = config.email_service.as_str(),
                "email service selected without an API key; emails will not be sent"
            );
        }

        Self { transport }
    }

    pub fn transport_name(&self) -> Option<&'static str> {
        self.transport.as_ref().map(|transport| transport.name())
    }

    pub async fn send(&self, message: &EmailMessage) -> Result<EmailOutcome, IntegrationError> {
        let Some(transport) = &self.transport else {
            debug!("no email service configured, skipping");
            return Ok(EmailOutcome::Skipped);
        };

        transport.send(message).await?;
        info!(transport = transport.name(), "email sent");
        Ok(EmailOutcome::Sent)
    }
}

pub struct ResendTransport {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    from: String,
}

#[async_trait]
impl EmailTransport for ResendTransport {
    fn name(&self) -> &'static str {
        "resend"
    }

    async fn send(&self, message: &EmailMessage) -> Result<(), IntegrationError> {
        let body = json!({
            "from": self.from,
            "to": [message.to],
            "subject": message.subject,
            "html": message.html,
        });

        let response = self
            .http
            .post(format!("{}/emails", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        check_status(self.name(), response).await
    }
}

pub struct SendGridTransport {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    from: String,
}

#[async_trait]
impl EmailTransport for SendGridTransport {
    fn name(&self) -> &'static str {
        "sendgrid"
    }

    async fn send(&self, message: &EmailMessage) -> Result<(), IntegrationError> {
        let body = json!({
            "personalizations": [{
                "to": [{ "email": message.to }],
                "subject": message.subject,
            }],
            "from": { "email": self.from },
            "content": [{ "type": "text/html", "value": message.html }],
        });

        let response = self
            .http
            .post(format!("{}/v3/mail/send", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        check_status(self.name(), response).await
    }
}

async fn check_status(provider: &str, response: reqwest::Response) -> Result<(), IntegrationError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }

    let text = response.text().await.unwrap_or_default();
    warn!(provider, status = status.as_u16(), body = %text, "email provider error");
    Err(IntegrationError::Upstream {
        status: status.as_u16(),
        message: format!("{provider} rejected the email"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct RecordingTransport {
        sent: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl EmailTransport for RecordingTransport {
        fn name(&self) -> &'static str {
            "recording"
        }

        async fn send(&self, message: &EmailMessage) -> Result<(), IntegrationError> {
            self.sent.lock().unwrap().push(message.to.clone());
            Ok(())
        }
    }

    fn message() -> EmailMessage {
        EmailMessage {
            to: "ana@example.com".to_string(),
            subject: "Hi".to_string(),
            html: "<p>Hi</p>".to_string(),
        }
    }

    #[tokio::test]
    async fn disabled_sender_skips() {
        let outcome = EmailSender::disabled().send(&message()).await.unwrap();
        assert_eq!(outcome, EmailOutcome::Skipped);
    }

    #[tokio::test]
    async fn sender_uses_transport() {
        let transport = Arc::new(RecordingTransport {
            sent: Mutex::new(Vec::new()),
        });
        let sender = EmailSender::new(transport.clone());

        let outcome = sender.send(&message()).await.unwrap();
        assert_eq!(outcome, EmailOutcome::Sent);
        assert_eq!(*transport.sent.lock().unwrap(), vec!["ana@example.com"]);
    }

    #[test]
    fn from_config_requires_key() {
        let http = reqwest::Client::new();
        let config = IntegrationsConfig::default();
        assert_eq!(EmailSender::from_config(http.clone(), &config).transport_name(), None);

        let config = IntegrationsConfig {
            resend_api_key: Some("re_test".to_string()),
            ..IntegrationsConfig::default()
        };
        assert_eq!(
            EmailSender::from_config(http.clone(), &config).transport_name(),
            Some("resend")
        );

        let config = IntegrationsConfig {
            email_service: EmailService::SendGrid,
            resend_api_key: Some("re_test".to_string()),
            ..IntegrationsConfig::default()
        };
        assert_eq!(EmailSender::from_config(http.clone(), &config).transport_name(), None);

        let config = IntegrationsConfig {
            email_service: EmailService::None,
            resend_api_key: Some("re_test".to_string()),
            ..IntegrationsConfig::default()
        };
        assert_eq!(EmailSender::from_config(http, &config).transport_name(), None);
    }
}
