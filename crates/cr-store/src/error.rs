//! Error types for collaborator calls

/// Failure of a puzzle, result or leaderboard request
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Requested record does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Record already exists (e.g. second solution for the same challenge)
    #[error("conflict: {0}")]
    Conflict(String),

    /// Backend could not be reached
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    /// Record failed validation before being stored
    #[error("invalid record: {0}")]
    InvalidRecord(String),
}

impl StoreError {
    /// Transient failure; the caller may choose to try again
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_unavailable_is_retryable() {
        assert!(StoreError::Unavailable("down".into()).is_retryable());
        assert!(!StoreError::Conflict("dup".into()).is_retryable());
        assert!(!StoreError::NotFound("x".into()).is_retryable());
    }

    #[test]
    fn display_includes_detail() {
        let err = StoreError::Conflict("solution already recorded".into());
        assert_eq!(err.to_string(), "conflict: solution already recorded");
    }
}
