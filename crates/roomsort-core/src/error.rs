//! Error types for roomsort

use thiserror::Error;

/// Main error type for roomsort operations
#[derive(Debug, Clone, Error)]
pub enum RoomsortError {
    /// The initial configuration or layout violates a structural invariant
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// The frontier emptied without reaching a sorted state
    #[error("No sorted state is reachable ({explored} states explored)")]
    Unreachable { explored: u64 },

    /// A state or move produced during search is inconsistent
    #[error("Internal invariant violated: {0}")]
    InvariantViolation(String),

    /// A termination condition stopped the search before it finished
    #[error("Search terminated after {explored} states without a result")]
    Terminated { explored: u64 },

    /// Error in solver configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl RoomsortError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        RoomsortError::MalformedInput(message.into())
    }
}

/// Result type alias for roomsort operations
pub type Result<T> = std::result::Result<T, RoomsortError>;
