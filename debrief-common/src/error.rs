//! Common error types for the debrief service

use thiserror::Error;

/// Common result type for debrief operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the debrief pipeline
#[derive(Error, Debug)]
pub enum Error {
    /// Missing body, missing path id, or a body of the wrong shape
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// `User-Id` header absent on a create/update style operation
    #[error("User-Id is required in the headers")]
    MissingIdentity,

    /// A top-level record field was null or absent after enrichment
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// Classification service unreachable, failed, or returned garbage
    #[error("Enrichment error: {0}")]
    Enrichment(String),

    /// Classification service returned the wrong number of cluster names
    #[error("Enrichment error: expected {expected} cluster assignments, got {actual}")]
    ClusterCountMismatch { expected: usize, actual: usize },

    /// Persistence gateway call failed
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// True for failures caused by the caller's request rather than a collaborator
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            Error::InvalidInput(_) | Error::MissingIdentity | Error::MissingField(_)
        )
    }

    /// True for failures of the classification round trip
    pub fn is_enrichment_failure(&self) -> bool {
        matches!(self, Error::Enrichment(_) | Error::ClusterCountMismatch { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_message_names_field() {
        let err = Error::MissingField("title".to_string());
        assert_eq!(err.to_string(), "Missing required field: title");
    }

    #[test]
    fn test_error_categories() {
        assert!(Error::MissingIdentity.is_malformed_input());
        assert!(Error::InvalidInput("no body".into()).is_malformed_input());
        assert!(!Error::Persistence("down".into()).is_malformed_input());

        let mismatch = Error::ClusterCountMismatch { expected: 3, actual: 2 };
        assert!(mismatch.is_enrichment_failure());
        assert!(!mismatch.is_malformed_input());
        assert!(mismatch.to_string().contains("expected 3"));
    }
}
