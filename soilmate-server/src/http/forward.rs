//! Handlers that relay visitor data to outside services

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use soilmate_core::{EmailMessage, PlantEmail, is_valid_email};
use tracing::{error, info};

use super::{error_response, parse_json};
use crate::AppState;
use crate::integrations::{
    BrevoContact, EmailOutcome, ForwardOutcome, IntegrationError,
};

/// Body of a successful relay call
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl MessageResponse {
    fn ok() -> Self {
        Self {
            ok: true,
            message: None,
            data: None,
        }
    }

    fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::ok()
        }
    }
}

/// Map an integration failure onto a response status
fn integration_failure(e: &IntegrationError, upstream_status: StatusCode) -> Response {
    match e {
        IntegrationError::Upstream { .. } => error_response(upstream_status, e.to_string()),
        IntegrationError::NotConfigured(_) | IntegrationError::Request(_) => {
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// POST /api/match - Forward a match event to the spreadsheet webhook
pub async fn forward_match(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let event: Map<String, Value> = match parse_json(&body) {
        Ok(event) => event,
        Err(response) => return response,
    };

    match state.integrations.sheets.forward("match", event).await {
        Ok(ForwardOutcome::Forwarded) => Json(MessageResponse::ok()).into_response(),
        Ok(ForwardOutcome::Skipped) => {
            Json(MessageResponse::with_message("Webhook URL not configured")).into_response()
        }
        Err(e) => {
            error!("Webhook forwarding failed: {}", e);
            match e {
                IntegrationError::Upstream { message, .. } => {
                    error_response(StatusCode::BAD_GATEWAY, message)
                }
                _ => error_response(StatusCode::BAD_GATEWAY, "Forwarding failed"),
            }
        }
    }
}

/// POST /api/brevo - Add or update a contact in the mailing list
pub async fn brevo(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let contact: BrevoContact = match parse_json(&body) {
        Ok(contact) => contact,
        Err(response) => return response,
    };

    match state.integrations.brevo.upsert_contact(&contact).await {
        Ok(data) => {
            info!("Contact synced to Brevo");
            Json(MessageResponse {
                data: Some(data),
                ..MessageResponse::ok()
            })
            .into_response()
        }
        Err(e) => {
            error!("Brevo sync failed: {}", e);
            let status = match &e {
                IntegrationError::Upstream { status, .. } => {
                    StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
                }
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            integration_failure(&e, status)
        }
    }
}

/// POST /api/send-email body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub plant_name: String,
    #[serde(default)]
    pub plant_image: String,
    #[serde(default)]
    pub plant_description: String,
    #[serde(default)]
    pub plant_personality: String,
}

impl SendEmailRequest {
    fn is_complete(&self) -> bool {
        [
            &self.email,
            &self.plant_name,
            &self.plant_image,
            &self.plant_description,
            &self.plant_personality,
        ]
        .iter()
        .all(|field| !field.trim().is_empty())
    }
}

/// POST /api/send-email - Email the visitor their match
pub async fn send_email(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let request: SendEmailRequest = match parse_json(&body) {
        Ok(request) => request,
        Err(response) => return response,
    };

    if !request.is_complete() {
        return error_response(StatusCode::BAD_REQUEST, "Missing required fields");
    }
    let email = request.email.trim();
    if !is_valid_email(email) {
        return error_response(StatusCode::BAD_REQUEST, "Invalid email format");
    }

    let plant = PlantEmail {
        plant_name: request.plant_name,
        plant_image: request.plant_image,
        plant_description: request.plant_description,
        plant_personality: request.plant_personality,
    };
    let message = EmailMessage::compose(email, &plant);

    match state.integrations.email.send(&message).await {
        Ok(EmailOutcome::Sent) => {
            Json(MessageResponse::with_message("Email sent successfully")).into_response()
        }
        Ok(EmailOutcome::Skipped) => {
            Json(MessageResponse::with_message("Email service not configured")).into_response()
        }
        Err(e) => {
            error!("Email sending failed: {}", e);
            integration_failure(&e, StatusCode::BAD_GATEWAY)
        }
    }
}
