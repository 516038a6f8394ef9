//! Per-location fetch failures and page rendering errors.

use serde::Serialize;
use thiserror::Error;

/// Why a single location could not be turned into a reading.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream returned HTTP {0}")]
    Status(u16),

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("unrecognised observation time: {0}")]
    Timestamp(String),
}

/// Failure to produce the dashboard HTML.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("could not serialize chart description: {0}")]
    Json(#[from] serde_json::Error),

    #[error("template error: {0}")]
    Template(#[from] askama::Error),
}

/// A failed location, kept by name so it can be reported next to the data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationFailure {
    // ---
    pub name: String,
    pub message: String,
}

impl LocationFailure {
    pub fn new(name: &str, error: &FetchError) -> Self {
        Self {
            name: name.to_string(),
            message: error.to_string(),
        }
    }
}

impl std::fmt::Display for LocationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error fetching {}: {}", self.name, self.message)
    }
}
