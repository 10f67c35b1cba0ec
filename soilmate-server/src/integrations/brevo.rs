//! Brevo contact list client

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, warn};

use super::{IntegrationError, configured};

/// A contact to add or update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrevoContact {
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

#[derive(Debug, Clone)]
pub struct BrevoClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    list_ids: Vec<u64>,
}

impl BrevoClient {
    pub fn new(
        http: reqwest::Client,
        base_url: &str,
        api_key: Option<String>,
        list_ids: Vec<u64>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: configured(api_key),
            list_ids,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Create the contact, or update it when it already exists
    ///
    /// Returns the provider's response body, or `Value::Null` when it had none.
    pub async fn upsert_contact(&self, contact: &BrevoContact) -> Result<Value, IntegrationError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(IntegrationError::NotConfigured("BREVO_API_KEY"))?;

        let body = json!({
            "email": contact.email,
            "attributes": {
                "FIRSTNAME": contact.first_name,
                "LASTNAME": contact.last_name,
            },
            "updateEnabled": true,
            "listIds": self.list_ids,
        });

        let response = self
            .http
            .post(format!("{}/v3/contacts", self.base_url))
            .header("api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        let data = serde_json::from_str::<Value>(&text).unwrap_or(Value::Null);
        debug!(status = status.as_u16(), "brevo response");

        if !status.is_success() {
            let message = error_message(&data);
            warn!(status = status.as_u16(), %message, "brevo rejected contact");
            return Err(IntegrationError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        Ok(data)
    }
}

/// Pick the most useful error text from a provider error body
fn error_message(data: &Value) -> String {
    let field = |name: &str| {
        data.get(name)
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
    };

    match data {
        Value::Null => "Brevo error".to_string(),
        _ => field("message")
            .or_else(|| field("code"))
            .unwrap_or_else(|| data.to_string()),
    }
}
