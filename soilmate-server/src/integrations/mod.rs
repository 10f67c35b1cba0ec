//! Outbound integrations: contact list, spreadsheet webhook, lead form and email
//!
//! Every integration is optional. An integration without its key or URL is
//! skipped rather than treated as a failure, so the quiz keeps working in a
//! bare local setup.

mod brevo;
mod email;
mod forms;
mod sheets;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use brevo::{BrevoClient, BrevoContact};
pub use email::{EmailOutcome, EmailSender, EmailTransport, ResendTransport, SendGridTransport};
pub use forms::{FormFields, FormsClient};
pub use sheets::SheetsWebhook;

/// Errors from outbound integration calls
#[derive(Debug, Error)]
pub enum IntegrationError {
    /// A required key or URL is missing
    #[error("{0} not set")]
    NotConfigured(&'static str),

    /// The remote service answered with a non-success status
    #[error("{message}")]
    Upstream { status: u16, message: String },

    /// The request could not be completed
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Whether a best-effort call reached its target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ForwardOutcome {
    Forwarded,
    /// The target is not configured
    Skipped,
}

/// Which provider delivers match emails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailService {
    #[default]
    Resend,
    #[serde(rename = "sendgrid")]
    SendGrid,
    /// Emails are not sent
    None,
}

impl EmailService {
    /// Parse a provider name, treating anything unknown as disabled
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "resend" => Self::Resend,
            "sendgrid" => Self::SendGrid,
            _ => Self::None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Resend => "resend",
            Self::SendGrid => "sendgrid",
            Self::None => "none",
        }
    }
}

pub const DEFAULT_BREVO_BASE_URL: &str = "https://api.brevo.com";
pub const DEFAULT_RESEND_BASE_URL: &str = "https://api.resend.com";
pub const DEFAULT_SENDGRID_BASE_URL: &str = "https://api.sendgrid.com";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Settings for every outbound integration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegrationsConfig {
    pub brevo_api_key: Option<String>,
    pub brevo_base_url: String,
    /// Contact lists new contacts join
    pub brevo_list_ids: Vec<u64>,
    /// Spreadsheet webhook that receives match events
    pub sheets_webhook_url: Option<String>,
    /// Form endpoint that receives leads
    pub forms_url: Option<String>,
    pub forms_fields: FormFields,
    pub email_service: EmailService,
    pub resend_api_key: Option<String>,
    pub resend_base_url: String,
    pub sendgrid_api_key: Option<String>,
    pub sendgrid_base_url: String,
    /// Sender address; each provider has its own fallback
    pub from_email: Option<String>,
    pub request_timeout_secs: u64,
}

impl Default for IntegrationsConfig {
    fn default() -> Self {
        Self {
            brevo_api_key: None,
            brevo_base_url: DEFAULT_BREVO_BASE_URL.to_string(),
            brevo_list_ids: vec![2],
            sheets_webhook_url: None,
            forms_url: None,
            forms_fields: FormFields::default(),
            email_service: EmailService::default(),
            resend_api_key: None,
            resend_base_url: DEFAULT_RESEND_BASE_URL.to_string(),
            sendgrid_api_key: None,
            sendgrid_base_url: DEFAULT_SENDGRID_BASE_URL.to_string(),
            from_email: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

/// Clients for every outbound integration, sharing one HTTP client
#[derive(Debug, Clone)]
pub struct Integrations {
    pub brevo: BrevoClient,
    pub sheets: SheetsWebhook,
    pub forms: FormsClient,
    pub email: EmailSender,
}

impl Integrations {
    /// Build clients from configuration
    pub fn from_config(config: &IntegrationsConfig) -> Result<Self, IntegrationError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            brevo: BrevoClient::new(
                http.clone(),
                &config.brevo_base_url,
                config.brevo_api_key.clone(),
                config.brevo_list_ids.clone(),
            ),
            sheets: SheetsWebhook::new(http.clone(), config.sheets_webhook_url.clone()),
            forms: FormsClient::new(
                http.clone(),
                config.forms_url.clone(),
                config.forms_fields.clone(),
            ),
            email: EmailSender::from_config(http, config),
        })
    }

    /// Clients with nothing configured; every call is skipped
    pub fn disabled() -> Self {
        let http = reqwest::Client::new();
        Self {
            brevo: BrevoClient::new(http.clone(), DEFAULT_BREVO_BASE_URL, None, vec![2]),
            sheets: SheetsWebhook::new(http.clone(), None),
            forms: FormsClient::new(http, None, FormFields::default()),
            email: EmailSender::disabled(),
        }
    }
}

/// Non-empty trimmed value of an optional setting
pub(crate) fn configured(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
