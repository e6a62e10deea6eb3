mod config;
mod errors;
mod inference;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::inference::artifacts::ModelBundle;
use crate::inference::normalizer::TextNormalizer;
use crate::inference::service::InferenceService;
use crate::routes::build_router;
use crate::state::{AppState, ModelState};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting JobGuard API v{}", env!("CARGO_PKG_VERSION"));

    // Single artifact-load attempt for the process lifetime. A failure is
    // non-fatal: the service starts anyway and every inference request
    // answers with the recorded reason until a restart.
    let model = match ModelBundle::load(&config.vectorizer_path, &config.classifier_path) {
        Ok(bundle) => {
            info!(
                vectorizer = %config.vectorizer_path.display(),
                classifier = %config.classifier_path.display(),
                "Model bundle loaded"
            );
            let normalizer = TextNormalizer::new(config.normalizer_charset);
            ModelState::Ready(InferenceService::new(
                normalizer,
                bundle.vectorizer,
                bundle.classifier,
            ))
        }
        Err(e) => {
            error!("Failed to load model bundle: {e:#}");
            ModelState::Unavailable(format!("{e:#}"))
        }
    };

    // Build app state
    let state = AppState {
        config: config.clone(),
        model: Arc::new(model),
    };

    // Build router. CORS stays permissive: the predict endpoint is called
    // from a browser extension on arbitrary origins.
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
