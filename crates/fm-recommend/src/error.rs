//! Recommendation errors.
//!
//! Evaluation itself never fails. These cover parsing user input: phase
//! names, override bounds and unit choices.

use thiserror::Error;

pub type RecommendResult<T> = Result<T, RecommendError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecommendError {
    #[error("Unknown growth phase: {name}")]
    UnknownPhase { name: String },

    #[error("Invalid override for {key}: {reason}")]
    InvalidOverride { key: String, reason: String },

    #[error("Unit '{unit}' is not available for {key}")]
    UnknownUnit { key: String, unit: String },
}
