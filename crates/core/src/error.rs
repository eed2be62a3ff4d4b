//! Shared error type for identifier and scope handling.

/// Errors that can occur while constructing or parsing core identifiers.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A node id, workflow id, etc. failed to parse.
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// Catch-all for conditions that should not occur.
    #[error("internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Build an [`CoreError::InvalidId`] from anything displayable.
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
