use thiserror::Error;

use crate::types::ConnectionState;

/// Error type for driver operations
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Connection lost: {0}")]
    ConnectionLost(String),

    #[error("Connection is closed")]
    ConnectionClosed,

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Malformed query: {0}")]
    QueryMalformed(String),

    #[error("Constraint violated: {0}")]
    ConstraintViolated(String),

    #[error("Expected {expected} parameter(s), got {actual}")]
    ParameterMismatch { expected: usize, actual: usize },

    #[error("Parameter ${index} cannot be bound: {reason}")]
    InvalidParameter { index: usize, reason: String },

    #[error("Cannot {operation} while connection is {state}")]
    TransactionState {
        operation: &'static str,
        state: ConnectionState,
    },

    #[error("Expected {expected} result, got {actual}")]
    UnexpectedResult {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Expected {expected} row(s), got {actual}")]
    UnexpectedRowCount { expected: usize, actual: usize },

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Coarse classification of a [`DriverError`], stable across engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    ConnectionFailed,
    ConnectionLost,
    ConnectionClosed,
    QueryFailed,
    QueryMalformed,
    ConstraintViolated,
    ParameterMismatch,
    TransactionState,
    UnexpectedResult,
    InvalidConfig,
}

impl DriverError {
    /// Returns the engine-neutral kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DriverError::ConnectionFailed(_) => ErrorKind::ConnectionFailed,
            DriverError::ConnectionLost(_) => ErrorKind::ConnectionLost,
            DriverError::ConnectionClosed => ErrorKind::ConnectionClosed,
            DriverError::QueryFailed(_) => ErrorKind::QueryFailed,
            DriverError::QueryMalformed(_) => ErrorKind::QueryMalformed,
            DriverError::ConstraintViolated(_) => ErrorKind::ConstraintViolated,
            DriverError::ParameterMismatch { .. } | DriverError::InvalidParameter { .. } => {
                ErrorKind::ParameterMismatch
            }
            DriverError::TransactionState { .. } => ErrorKind::TransactionState,
            DriverError::UnexpectedResult { .. }
            | DriverError::UnexpectedRowCount { .. }
            | DriverError::ColumnNotFound(_) => ErrorKind::UnexpectedResult,
            DriverError::InvalidConfig(_) => ErrorKind::InvalidConfig,
        }
    }

    /// Returns true if retrying on a fresh connection may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::ConnectionFailed | ErrorKind::ConnectionLost
        )
    }
}

/// Result type alias for driver operations
pub type Result<T> = std::result::Result<T, DriverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_groups_parameter_errors() {
        let mismatch = DriverError::ParameterMismatch {
            expected: 2,
            actual: 1,
        };
        let invalid = DriverError::InvalidParameter {
            index: 1,
            reason: "out of range".to_string(),
        };
        assert_eq!(mismatch.kind(), ErrorKind::ParameterMismatch);
        assert_eq!(invalid.kind(), ErrorKind::ParameterMismatch);
    }

    #[test]
    fn test_transient_errors() {
        assert!(DriverError::ConnectionFailed("refused".to_string()).is_transient());
        assert!(DriverError::ConnectionLost("reset".to_string()).is_transient());
        assert!(!DriverError::ConnectionClosed.is_transient());
        assert!(!DriverError::ConstraintViolated("users_pkey".to_string()).is_transient());
    }

    #[test]
    fn test_transaction_state_message() {
        let err = DriverError::TransactionState {
            operation: "commit",
            state: ConnectionState::Idle,
        };
        assert_eq!(err.to_string(), "Cannot commit while connection is idle");
    }
}
