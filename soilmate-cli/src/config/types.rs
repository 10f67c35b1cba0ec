use serde::{Deserialize, Serialize};
use soilmate_server::integrations::FormFields;
use soilmate_server::{IntegrationsConfig, ServerConfig};

/// Configuration as stored in TOML files (with optional fields for merging)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawSoilmateConfig {
    #[serde(default)]
    pub server: RawServerConfig,

    #[serde(default)]
    pub integrations: RawIntegrationsConfig,
}

/// Server config as stored in TOML (optional fields for proper merging)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawServerConfig {
    /// Host to bind to
    pub host: Option<String>,

    /// Port for the soilmate server
    pub port: Option<u16>,

    /// Mark attribution cookies Secure
    pub secure_cookies: Option<bool>,
}

/// Integration settings as stored in TOML
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawIntegrationsConfig {
    pub brevo_api_key: Option<String>,
    pub brevo_base_url: Option<String>,
    pub brevo_list_ids: Option<Vec<u64>>,
    pub sheets_webhook_url: Option<String>,
    pub forms_url: Option<String>,
    /// Entry ids for the form; unset ids keep their defaults
    pub forms_fields: Option<FormFields>,
    /// Provider name, resolved leniently when the config is finalized
    pub email_service: Option<String>,
    pub resend_api_key: Option<String>,
    pub resend_base_url: Option<String>,
    pub sendgrid_api_key: Option<String>,
    pub sendgrid_base_url: Option<String>,
    pub from_email: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

/// Final configuration with defaults applied
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SoilmateConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub integrations: IntegrationsConfig,
}

const REDACTED: &str = "********";

impl SoilmateConfig {
    /// Copy with API keys masked, for display
    pub fn redacted(&self) -> Self {
        let mask = |key: &Option<String>| key.as_ref().map(|_| REDACTED.to_string());
        let mut config = self.clone();
        config.integrations.brevo_api_key = mask(&self.integrations.brevo_api_key);
        config.integrations.resend_api_key = mask(&self.integrations.resend_api_key);
        config.integrations.sendgrid_api_key = mask(&self.integrations.sendgrid_api_key);
        config
    }
}
