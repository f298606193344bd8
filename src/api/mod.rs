pub mod client;
pub mod types;

pub use client::ApiClient;
pub use types::{HealthStatus, Movie, MovieId, MoviePayload};

use thiserror::Error;

/// Failure of a single API call
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("{0}")]
    Rejected(String),

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}
