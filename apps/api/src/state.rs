use std::sync::Arc;

use crate::config::Config;
use crate::inference::service::InferenceService;

/// Outcome of the single startup artifact load, fixed for the process
/// lifetime. There is no reload path: a failed load stays failed until the
/// service is restarted, and every inference request reports the reason.
pub enum ModelState {
    Ready(InferenceService),
    Unavailable(String),
}

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub model: Arc<ModelState>,
}
