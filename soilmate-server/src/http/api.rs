//! REST API handlers for health, questions and plants

use std::sync::Arc;

use axum::{Json, extract::State};
use serde::Serialize;
use soilmate_core::{Plant, quiz::Question};

use crate::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status of the server
    pub status: String,
    /// Server version
    pub version: String,
    /// Seconds since server started
    pub uptime_seconds: i64,
    /// Number of plants the quiz can match
    pub plants: usize,
}

/// Health check endpoint
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
        plants: state.matcher.catalog().len(),
    })
}

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub questions: &'static [Question],
}

/// GET /api/quiz - The five quiz questions in order
pub async fn quiz() -> Json<QuizResponse> {
    Json(QuizResponse {
        questions: soilmate_core::quiz::questions(),
    })
}

#[derive(Debug, Serialize)]
pub struct PlantsResponse {
    pub plants: Vec<Plant>,
}

/// GET /api/plants - The plant catalog in match order
pub async fn plants(State(state): State<Arc<AppState>>) -> Json<PlantsResponse> {
    Json(PlantsResponse {
        plants: state.matcher.catalog().plants().to_vec(),
    })
}
