//! Attribution handlers
//!
//! `GET` returns the stored record. `POST` tracks a navigation the browser
//! reports itself, for pages this server does not render.

use std::sync::Arc;

use axum::{
    Extension, Json,
    body::Bytes,
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use soilmate_core::{AttributionRecord, Visit, track_visit};

use super::parse_json;
use crate::AppState;
use crate::middleware::{append_set_cookies, cookie_jar};

#[derive(Debug, Serialize, Deserialize)]
pub struct AttributionResponse {
    pub attribution: AttributionRecord,
    /// Whether this call wrote cookies
    pub updated: bool,
}

/// GET /api/attribution - Current attribution for this visitor
pub async fn current(attribution: Option<Extension<AttributionRecord>>) -> Json<AttributionResponse> {
    Json(AttributionResponse {
        attribution: attribution
            .map(|Extension(record)| record)
            .unwrap_or_default(),
        updated: false,
    })
}

/// POST /api/attribution body
#[derive(Debug, Deserialize)]
pub struct TrackRequest {
    /// Path of the page visited
    pub path: String,
    /// Its query string
    #[serde(default)]
    pub query: String,
    /// The page's incoming referrer
    #[serde(default)]
    pub referrer: String,
}

/// POST /api/attribution - Track a page visit reported by the browser
pub async fn track(State(state): State<Arc<AppState>>, headers: HeaderMap, body: Bytes) -> Response {
    let request: TrackRequest = match parse_json(&body) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let mut jar = cookie_jar(&headers, state.secure_cookies);
    let visit = Visit::new(&request.path, &request.query, &request.referrer);
    let update = track_visit(&mut jar, &visit);

    let mut response = Json(AttributionResponse {
        attribution: update.record,
        updated: update.should_persist,
    })
    .into_response();
    append_set_cookies(&jar, response.headers_mut());
    response
}
