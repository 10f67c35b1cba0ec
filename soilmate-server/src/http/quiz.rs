//! Quiz matching handler

use std::sync::Arc;

use axum::{
    Extension, Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use soilmate_core::{AttributionRecord, Lead, MatchReason, Plant, QuizAnswers};
use tracing::{info, warn};

use super::{error_response, parse_json};
use crate::AppState;
use crate::integrations::ForwardOutcome;

/// POST /api/quiz/match body
#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    /// Answers keyed by question index, `"0"` to `"4"`
    pub answers: QuizAnswers,
    /// Contact details, when the visitor left them
    #[serde(default)]
    pub lead: Option<Lead>,
    /// Page the quiz was taken on
    #[serde(default)]
    pub page: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResponse {
    pub ok: bool,
    pub plant: Plant,
    pub adopt_url: String,
    pub reason: MatchReason,
    /// Whether all five answers were present and recognized
    pub complete: bool,
}

/// Spreadsheet event describing a match
fn match_event(
    plant: &Plant,
    answers: &QuizAnswers,
    attribution: &AttributionRecord,
    page: Option<&str>,
) -> Map<String, Value> {
    let mut event = Map::new();
    event.insert("plant_id".to_string(), json!(plant.id));
    event.insert("plant_name".to_string(), json!(plant.name));
    event.insert("care_level".to_string(), json!(plant.care_level));
    event.insert("light_needs".to_string(), json!(plant.light_needs));
    event.insert("answers".to_string(), json!(answers));
    event.insert("utm".to_string(), json!(attribution));
    if let Some(page) = page {
        event.insert("page".to_string(), json!(page));
    }
    event
}

/// POST /api/quiz/match - Match answers to a plant
///
/// The match is forwarded to the spreadsheet webhook and the lead, if any,
/// to the lead form. Both are best effort: failures are logged and the
/// visitor still gets their plant.
pub async fn quiz_match(
    State(state): State<Arc<AppState>>,
    attribution: Option<Extension<AttributionRecord>>,
    body: Bytes,
) -> Response {
    let request: MatchRequest = match parse_json(&body) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let lead = match request
        .lead
        .map(|lead| Lead::new(lead.name, lead.email, lead.phone))
        .transpose()
    {
        Ok(lead) => lead,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e.to_string()),
    };

    let found = state.matcher.explain(&request.answers);
    let plant = found.plant.clone();
    let reason = found.reason;
    let complete = request.answers.parse().is_ok();
    info!(plant = %plant.id, ?reason, complete, "quiz matched");

    let attribution = attribution
        .map(|Extension(record)| record)
        .unwrap_or_default();
    let event = match_event(
        &plant,
        &request.answers,
        &attribution,
        request.page.as_deref(),
    );

    let integrations = &state.integrations;
    let (sheets, forms) = tokio::join!(integrations.sheets.forward("match", event), async {
        match &lead {
            Some(lead) => integrations.forms.submit(lead, Some(&plant.name)).await,
            None => Ok(ForwardOutcome::Skipped),
        }
    });
    if let Err(e) = sheets {
        warn!("Match event not forwarded: {}", e);
    }
    if let Err(e) = forms {
        warn!("Lead not submitted: {}", e);
    }

    (
        StatusCode::OK,
        Json(MatchResponse {
            ok: true,
            adopt_url: plant.adopt_url().to_string(),
            plant,
            reason,
            complete,
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create_router;
    use axum_test::TestServer;

    fn server() -> TestServer {
        TestServer::new(create_router(Arc::new(AppState::new_for_testing()))).unwrap()
    }

    #[tokio::test]
    async fn matches_complete_answers() {
        let response = server()
            .post("/api/quiz/match")
            .json(&json!({
                "answers": {"0": "busy", "1": "daily", "2": "little", "3": "mixed", "4": "slow-down"}
            }))
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["ok"], true);
        assert_eq!(body["plant"]["id"], "snake-plant");
        assert_eq!(body["complete"], true);
        assert!(body["adoptUrl"].as_str().unwrap().starts_with("https://"));
    }

    #[tokio::test]
    async fn shady_answers_use_low_light_override() {
        let body: Value = server()
            .post("/api/quiz/match")
            .json(&json!({
                "answers": {"0": "relaxed", "1": "daily", "2": "love-it", "3": "shady", "4": "gratitude"}
            }))
            .await
            .json();
        assert_eq!(body["plant"]["id"], "snake-plant");
        assert_eq!(body["reason"]["rule"], "low_light_override");
    }

    #[tokio::test]
    async fn incomplete_answers_get_default_plant() {
        let body: Value = server()
            .post("/api/quiz/match")
            .json(&json!({"answers": {"0": "busy"}}))
            .await
            .json();
        assert_eq!(body["plant"]["id"], "aglaonema");
        assert_eq!(body["complete"], false);
        assert_eq!(body["reason"]["rule"], "incomplete_answers");
    }

    #[tokio::test]
    async fn invalid_lead_is_rejected() {
        let response = server()
            .post("/api/quiz/match")
            .json(&json!({
                "answers": {"0": "busy"},
                "lead": {"name": "Ana", "email": "nope", "phone": "555"}
            }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_body_is_rejected() {
        let response = server()
            .post("/api/quiz/match")
            .text("answers=busy")
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "Invalid request");
    }

    #[test]
    fn event_carries_plant_answers_and_attribution() {
        let catalog = soilmate_core::Catalog::standard();
        let plant = catalog.default_plant();
        let answers = QuizAnswers::from_ordered(["busy"]);
        let attribution = AttributionRecord::from_query("utm_source=ig");

        let event = match_event(plant, &answers, &attribution, Some("https://x.test/quiz"));
        assert_eq!(event["plant_id"], "aglaonema");
        assert_eq!(event["answers"]["0"], "busy");
        assert_eq!(event["utm"]["utm_source"], "ig");
        assert_eq!(event["page"], "https://x.test/quiz");
        assert_eq!(event["care_level"], plant.care_level.as_str());
    }
}
