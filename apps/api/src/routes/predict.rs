use axum::{
    async_trait,
    extract::{FromRequest, Request, State},
    http::header,
    Form, Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::inference::service::Verdict;
use crate::state::{AppState, ModelState};

#[derive(Debug, Deserialize)]
pub struct JsonPredictRequest {
    pub text: Option<String>,
}

/// Form-encoded shape posted by the browser form client. `job_text` is the
/// historical field name; bare `text` is accepted too.
#[derive(Debug, Deserialize)]
pub struct FormPredictRequest {
    pub job_text: Option<String>,
    pub text: Option<String>,
}

/// The posting text, extracted from whichever body shape the caller used.
///
/// Rejects with 400 when the text field is missing. An empty string is a
/// valid value: it classifies as an empty document rather than erroring.
#[derive(Debug)]
pub struct PredictInput {
    pub text: String,
}

#[async_trait]
impl<S> FromRequest<S> for PredictInput
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if content_type.starts_with("application/json") {
            let Json(body) = Json::<JsonPredictRequest>::from_request(req, state)
                .await
                .map_err(|e| AppError::Validation(format!("Invalid JSON body: {e}")))?;
            let text = body.text.ok_or_else(|| {
                AppError::Validation("Missing 'text' field in JSON body".to_string())
            })?;
            Ok(PredictInput { text })
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(body) = Form::<FormPredictRequest>::from_request(req, state)
                .await
                .map_err(|e| AppError::Validation(format!("Invalid form body: {e}")))?;
            let text = body.job_text.or(body.text).ok_or_else(|| {
                AppError::Validation("Missing 'job_text' field in form body".to_string())
            })?;
            Ok(PredictInput { text })
        } else {
            Err(AppError::Validation(
                "Expected an application/json or application/x-www-form-urlencoded body"
                    .to_string(),
            ))
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub label: u8,
    pub verdict: Verdict,
    pub canonical_text: String,
}

/// POST /predict
///
/// The bundle check runs before body extraction: when the artifacts failed to
/// load, every request gets the load-failure answer regardless of its body.
pub async fn predict_handler(
    State(state): State<AppState>,
    req: Request,
) -> Result<Json<PredictResponse>, AppError> {
    let service = match state.model.as_ref() {
        ModelState::Ready(service) => service,
        ModelState::Unavailable(reason) => return Err(AppError::ModelUnavailable(reason.clone())),
    };

    let input = PredictInput::from_request(req, &()).await?;
    let inference = service.infer(&input.text).map_err(AppError::Inference)?;

    // Best-effort observability; never fails the request.
    info!(
        input = %input.text,
        canonical = %inference.canonical_text,
        verdict = %inference.verdict,
        "prediction served"
    );

    Ok(Json(PredictResponse {
        label: inference.label,
        verdict: inference.verdict,
        canonical_text: inference.canonical_text,
    }))
}
