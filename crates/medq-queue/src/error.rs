use medq_core::{CategoryId, CounterId, PatientId, TokenId, TokenStatus};
use medq_storage::StorageError;
use thiserror::Error;

/// Errors surfaced by queue operations.
///
/// Notification delivery failures never appear here; they are logged and
/// swallowed inside the dispatcher.
#[derive(Debug, Error)]
pub enum QueueError {
    #[error("Patient not found: {0}")]
    PatientNotFound(PatientId),

    #[error("Token not found: {0}")]
    TokenNotFound(TokenId),

    #[error("Counter not found: {0}")]
    CounterNotFound(CounterId),

    #[error("No active counter available in category {0}")]
    NoAvailableCounter(CategoryId),

    #[error("No waiting token at counter {0}")]
    NoWaitingToken(CounterId),

    #[error("Invalid transition: {from} -> {to}")]
    InvalidTransition { from: TokenStatus, to: TokenStatus },

    #[error("Routing failed after {attempts} attempts")]
    RoutingFailed { attempts: u32 },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl QueueError {
    /// Stable machine-readable kind, used by the API layer for status
    /// mapping and by log fields.
    pub fn kind(&self) -> QueueErrorKind {
        match self {
            Self::PatientNotFound(_)
            | Self::TokenNotFound(_)
            | Self::CounterNotFound(_)
            | Self::NoWaitingToken(_) => QueueErrorKind::NotFound,
            Self::NoAvailableCounter(_) => QueueErrorKind::NoAvailableCounter,
            Self::InvalidTransition { .. } => QueueErrorKind::InvalidTransition,
            Self::RoutingFailed { .. } => QueueErrorKind::RoutingFailed,
            Self::Storage(_) => QueueErrorKind::Storage,
        }
    }
}

/// The error taxonomy callers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueErrorKind {
    NotFound,
    NoAvailableCounter,
    InvalidTransition,
    RoutingFailed,
    Storage,
}

impl std::fmt::Display for QueueErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::NoAvailableCounter => write!(f, "no_available_counter"),
            Self::InvalidTransition => write!(f, "invalid_transition"),
            Self::RoutingFailed => write!(f, "routing_failed"),
            Self::Storage => write!(f, "storage"),
        }
    }
}

/// Convenience result type for queue operations
pub type Result<T> = std::result::Result<T, QueueError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(
            QueueError::PatientNotFound(PatientId::new()).kind(),
            QueueErrorKind::NotFound
        );
        assert_eq!(
            QueueError::NoAvailableCounter(CategoryId::new()).kind(),
            QueueErrorKind::NoAvailableCounter
        );
        assert_eq!(
            QueueError::InvalidTransition {
                from: TokenStatus::Completed,
                to: TokenStatus::Called,
            }
            .kind(),
            QueueErrorKind::InvalidTransition
        );
        assert_eq!(
            QueueError::RoutingFailed { attempts: 3 }.kind(),
            QueueErrorKind::RoutingFailed
        );
    }

    #[test]
    fn test_storage_error_conversion() {
        let err: QueueError = StorageError::internal("boom").into();
        assert_eq!(err.kind(), QueueErrorKind::Storage);
    }

    #[test]
    fn test_invalid_transition_display() {
        let err = QueueError::InvalidTransition {
            from: TokenStatus::Cancelled,
            to: TokenStatus::Completed,
        };
        assert_eq!(err.to_string(), "Invalid transition: CANCELLED -> COMPLETED");
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(QueueErrorKind::NotFound.to_string(), "not_found");
        assert_eq!(
            QueueErrorKind::NoAvailableCounter.to_string(),
            "no_available_counter"
        );
        assert_eq!(QueueErrorKind::RoutingFailed.to_string(), "routing_failed");
    }
}
