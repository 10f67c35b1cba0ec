//! HTTP server module

mod api;
mod attribution;
mod forward;
mod page;
mod quiz;

use std::sync::Arc;

use axum::{
    Json, Router,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tower_http::trace::TraceLayer;

use crate::AppState;
use crate::middleware::attribution_middleware;

pub use api::{HealthResponse, PlantsResponse, QuizResponse};
pub use attribution::{AttributionResponse, TrackRequest};
pub use forward::{MessageResponse, SendEmailRequest};
pub use quiz::{MatchRequest, MatchResponse};

/// Body of every failed API call
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
}

pub(crate) fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            ok: false,
            error: error.into(),
        }),
    )
        .into_response()
}

/// Parse a JSON body, answering 400 `Invalid request` when it does not fit
pub(crate) fn parse_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, Response> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!("Rejected request body: {}", e);
        error_response(StatusCode::BAD_REQUEST, "Invalid request")
    })
}

async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

/// Create the HTTP router with all routes configured
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(page::index))
        .route("/api/health", get(api::health))
        .route("/api/quiz", get(api::quiz))
        .route("/api/plants", get(api::plants))
        .route("/api/quiz/match", post(quiz::quiz_match))
        .route("/api/match", post(forward::forward_match))
        .route("/api/brevo", post(forward::brevo))
        .route("/api/send-email", post(forward::send_email))
        .route(
            "/api/attribution",
            get(attribution::current).post(attribution::track),
        )
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            attribution_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_test::TestServer;

    fn server() -> TestServer {
        let state = Arc::new(AppState::new_for_testing());
        TestServer::new(create_router(state)).unwrap()
    }

    #[tokio::test]
    async fn test_router_has_health_endpoint() {
        let response = server().get("/api/health").await;
        response.assert_status_ok();
    }

    #[tokio::test]
    async fn unknown_paths_are_json_404() {
        let response = server().get("/nowhere").await;
        response.assert_status(StatusCode::NOT_FOUND);
        let body: ErrorResponse = response.json();
        assert!(!body.ok);
    }

    fn set_cookie_count(response: &axum_test::TestResponse) -> usize {
        response
            .headers()
            .get_all(axum::http::header::SET_COOKIE)
            .iter()
            .count()
    }

    #[tokio::test]
    async fn page_visits_set_attribution_cookies() {
        let response = server()
            .get("/")
            .add_query_param("utm_campaign", "spring")
            .await;
        response.assert_status_ok();
        assert!(set_cookie_count(&response) > 0);
    }

    #[tokio::test]
    async fn asset_requests_do_not_claim_landing_page() {
        let server = server();
        for path in ["/favicon.ico", "/robots.txt"] {
            let response = server.get(path).add_query_param("utm_source", "google").await;
            response.assert_status(StatusCode::NOT_FOUND);
            assert_eq!(set_cookie_count(&response), 0, "{path}");
        }
    }

    #[test]
    fn parse_json_rejects_garbage() {
        let result: Result<serde_json::Value, Response> = parse_json(b"{not json");
        let response = result.unwrap_err();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
