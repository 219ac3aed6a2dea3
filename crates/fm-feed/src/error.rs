//! Feed data model errors.

use thiserror::Error;

/// Result type for feed data operations.
pub type FeedResult<T> = Result<T, FeedError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeedError {
    /// Key that is not part of the nutrient table.
    #[error("Unknown nutrient key: {key}")]
    UnknownNutrient { key: String },

    /// Report key that is neither a namespaced nutrient nor a cost total.
    #[error("Unknown report key: {key}")]
    UnknownReportKey { key: String },

    #[error("Unknown ingredient category: {name}")]
    UnknownCategory { name: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FeedError::UnknownNutrient {
            key: "Fat_pct".into(),
        };
        assert!(err.to_string().contains("Fat_pct"));

        let err = FeedError::UnknownReportKey {
            key: "totals.cost".into(),
        };
        assert!(err.to_string().contains("report key"));
    }
}
