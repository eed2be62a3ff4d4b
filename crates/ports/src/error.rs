//! Error type for port operations.
//!
//! Every port method returns `Result<_, PortsError>`. Backend drivers map
//! their internal errors into these variants so the engine and node
//! executor can make decisions (fail the node, abort the run) without
//! knowing the concrete backend.

#[derive(Debug, Clone, thiserror::Error)]
pub enum PortsError {
    /// Entity not found.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// A required service was not injected for this run.
    ///
    /// Surfaces to the caller as the `missing_dependency` error kind
    /// (§7) rather than a panic or a silent no-op.
    #[error("missing dependency: {service} required for {context}")]
    MissingDependency { service: String, context: String },

    /// Backend connection failure.
    #[error("connection error: {0}")]
    Connection(String),

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Operation exceeded its timeout.
    #[error("timeout: {operation}")]
    Timeout { operation: String },

    /// Catch-all internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl PortsError {
    #[must_use]
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    #[must_use]
    pub fn missing_dependency(service: impl Into<String>, context: impl Into<String>) -> Self {
        Self::MissingDependency {
            service: service.into(),
            context: context.into(),
        }
    }

    /// `true` for transient errors the engine may reasonably retry.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Timeout { .. })
    }
}

impl From<serde_json::Error> for PortsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
