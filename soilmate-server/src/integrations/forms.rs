//! Lead form submission

use serde::{Deserialize, Serialize};
use soilmate_core::Lead;
use tracing::{debug, warn};

use super::{ForwardOutcome, IntegrationError, configured};

/// Form field names that receive each lead attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Receives the matched plant name
    pub plant: String,
}

impl Default for FormFields {
    fn default() -> Self {
        Self {
            name: "entry.1992583615".to_string(),
            email: "entry.1431523734".to_string(),
            phone: "entry.321670577".to_string(),
            plant: "entry.1278630449".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FormsClient {
    http: reqwest::Client,
    url: Option<String>,
    fields: FormFields,
}

impl FormsClient {
    pub fn new(http: reqwest::Client, url: Option<String>, fields: FormFields) -> Self {
        Self {
            http,
            url: configured(url),
            fields,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.url.is_some()
    }

    /// Submit a lead, and the plant it matched if known, as a url-encoded form
    pub async fn submit(
        &self,
        lead: &Lead,
        plant_name: Option<&str>,
    ) -> Result<ForwardOutcome, IntegrationError> {
        let Some(url) = self.url.as_deref() else {
            debug!("lead form not configured");
            return Ok(ForwardOutcome::Skipped);
        };

        let response = self
            .http
            .post(url)
            .form(&self.form_entries(lead, plant_name))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "lead form rejected submission");
            return Err(IntegrationError::Upstream {
                status: status.as_u16(),
                message: "Form submission failed".to_string(),
            });
        }

        debug!("lead submitted to form");
        Ok(ForwardOutcome::Forwarded)
    }

    fn form_entries<'a>(
        &'a self,
        lead: &'a Lead,
        plant_name: Option<&'a str>,
    ) -> Vec<(&'a str, &'a str)> {
        let mut entries = vec![
            (self.fields.name.as_str(), lead.name.as_str()),
            (self.fields.email.as_str(), lead.email.as_str()),
            (self.fields.phone.as_str(), lead.phone.as_str()),
        ];
        if let Some(plant_name) = plant_name {
            entries.push((self.fields.plant.as_str(), plant_name));
        }
        entries
    }
}
