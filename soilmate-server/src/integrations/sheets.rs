//! Spreadsheet webhook forwarding

use chrono::Utc;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::{ForwardOutcome, IntegrationError, configured};

#[derive(Debug, Clone)]
pub struct SheetsWebhook {
    http: reqwest::Client,
    url: Option<String>,
}

impl SheetsWebhook {
    pub fn new(http: reqwest::Client, url: Option<String>) -> Self {
        Self {
            http,
            url: configured(url),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.url.is_some()
    }

    /// Post an event to the webhook
    ///
    /// The payload starts with `event` and `timestamp`; keys in `body`
    /// override them.
    pub async fn forward(
        &self,
        event: &str,
        body: Map<String, Value>,
    ) -> Result<ForwardOutcome, IntegrationError> {
        let Some(url) = self.url.as_deref() else {
            debug!(event, "sheets webhook not configured");
            return Ok(ForwardOutcome::Skipped);
        };

        let payload = event_payload(event, body);
        let response = self.http.post(url).json(&payload).send().await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = if text.is_empty() {
                "Forwarding failed".to_string()
            } else {
                text
            };
            warn!(status = status.as_u16(), %message, "sheets webhook rejected event");
            return Err(IntegrationError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        debug!(event, "forwarded to sheets webhook");
        Ok(ForwardOutcome::Forwarded)
    }
}

fn event_payload(event: &str, body: Map<String, Value>) -> Map<String, Value> {
    let mut payload = Map::new();
    payload.insert("event".to_string(), Value::from(event));
    payload.insert("timestamp".to_string(), Value::from(Utc::now().to_rfc3339()));
    payload.extend(body);
    payload
}
