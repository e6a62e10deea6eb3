use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::state::{AppState, ModelState};

/// GET /
/// Service banner: what the API does and how to call the predict endpoint.
pub async fn banner_handler() -> Json<Value> {
    Json(json!({
        "message": "Fake job posting detection API",
        "endpoints": {
            "POST /predict": {
                "description": "Predict whether a job posting is fake or real",
                "content_types": ["application/json", "application/x-www-form-urlencoded"],
                "example_input": { "text": "Earn $5000 per week working from home!" },
                "response": {
                    "label": "0 (real) | 1 (fraudulent)",
                    "verdict": "REAL | FRAUDULENT",
                    "canonical_text": "the cleaned text the model scored"
                }
            }
        }
    }))
}

/// GET /health
/// Returns a simple status object with service version and bundle state.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let model = match state.model.as_ref() {
        ModelState::Ready(_) => "loaded",
        ModelState::Unavailable(_) => "unavailable",
    };
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "jobguard-api",
        "model": model
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::predict::tests::{state_with, unavailable_state};

    #[tokio::test]
    async fn test_banner_describes_predict_input_shape() {
        let Json(banner) = banner_handler().await;
        let predict = &banner["endpoints"]["POST /predict"];
        assert!(predict["example_input"]["text"].is_string());
        assert!(predict["response"]["verdict"].is_string());
        assert!(predict["content_types"].is_array());
    }

    #[tokio::test]
    async fn test_health_reports_loaded_bundle() {
        let Json(body) = health_handler(State(state_with(0))).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["model"], "loaded");
    }

    #[tokio::test]
    async fn test_health_reports_unavailable_bundle() {
        let Json(body) = health_handler(State(unavailable_state("no artifacts"))).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["model"], "unavailable");
    }
}
