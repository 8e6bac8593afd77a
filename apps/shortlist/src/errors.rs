use thiserror::Error;

use crate::api::ApiError;

/// Core error taxonomy for the ranking loop.
///
/// Validation errors (`NoJobSelected`, `NoRankingsYet`, `InvalidTopK`) are
/// detected locally and never reach the transport layer. Transport failures
/// are caught at the call site and surfaced as notifications while prior
/// valid state is preserved. `ModelUnavailable` is deliberately swallowed
/// without a user-visible signal so the UI stays usable on stale or default
/// weights when the model endpoint is not yet ready.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("No job selected")]
    NoJobSelected,

    #[error("No rankings fetched yet")]
    NoRankingsYet,

    #[error("Top-K must be at least 1, got {0}")]
    InvalidTopK(i64),

    #[error("Rankings unavailable: {0}")]
    RankingsUnavailable(#[source] ApiError),

    #[error("Feedback submission failed: {0}")]
    FeedbackFailed(#[source] ApiError),

    #[error("Model state unavailable: {0}")]
    ModelUnavailable(#[source] ApiError),
}
