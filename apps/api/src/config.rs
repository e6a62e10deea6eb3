use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::inference::normalizer::TokenCharset;

/// Application configuration loaded from environment variables.
/// Every variable has a default; a `.env` file is honored when present.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub vectorizer_path: PathBuf,
    pub classifier_path: PathBuf,
    /// Must match the cleaning profile used when the artifacts were trained.
    pub normalizer_charset: TokenCharset,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            vectorizer_path: env_or("VECTORIZER_PATH", "artifacts/tfidf_vectorizer.json").into(),
            classifier_path: env_or("CLASSIFIER_PATH", "artifacts/job_classifier.json").into(),
            normalizer_charset: env_or("NORMALIZER_CHARSET", "alphanumeric").parse()?,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
