//! Error types for the CamPulse engine

use thiserror::Error;

/// Errors that can occur during an evaluation run
///
/// Fewer than four logs is not an error: the pipeline reports it as the
/// baseline-phase result instead.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("caller identity missing")]
    Unauthenticated,

    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("invalid rating for {metric}: {value} (expected 1-5)")]
    InvalidRating { metric: &'static str, value: u8 },

    #[error("invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}
