//! Error types for game modes

use chrono::NaiveDate;
use cr_core::ChainError;
use cr_store::StoreError;

/// Failures of a game-mode operation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModeError {
    /// Collaborator call failed
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Chain rejected the submission or could not be built
    #[error("chain error: {0}")]
    Chain(#[from] ChainError),

    /// Nothing scheduled for the requested date
    #[error("no daily challenge scheduled for {0}")]
    NoChallenge(NaiveDate),

    /// Session has ended; restart to play again
    #[error("game over")]
    GameOver,

    /// No chain loaded, usually after a failed puzzle fetch
    #[error("no active chain")]
    NoActiveChain,
}

impl ModeError {
    /// The session can continue after this error
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Chain(e) => e.is_recoverable(),
            Self::Store(e) => e.is_retryable(),
            Self::NoActiveChain => true,
            Self::NoChallenge(_) | Self::GameOver => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_rejections_are_recoverable() {
        let err = ModeError::from(ChainError::LengthMismatch {
            expected: 4,
            actual: 2,
        });
        assert!(err.is_recoverable());
        assert!(!ModeError::from(ChainError::AlreadyComplete).is_recoverable());
    }

    #[test]
    fn store_errors_follow_retryability() {
        assert!(ModeError::from(StoreError::Unavailable("down".into())).is_recoverable());
        assert!(!ModeError::from(StoreError::Conflict("dup".into())).is_recoverable());
        assert!(!ModeError::GameOver.is_recoverable());
    }

    #[test]
    fn no_challenge_names_the_date() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(
            ModeError::NoChallenge(date).to_string(),
            "no daily challenge scheduled for 2026-10-19"
        );
    }
}
