//! Error type returned by node implementations.
//!
//! Distinguishes retryable from fatal failures so the engine can decide
//! retry policy without the action needing to know about resilience
//! patterns. The Node Executor (§4.5) never lets this escape as a panic —
//! every variant becomes a `NodeExecutionResult::Error` with a stable
//! message string.

use std::time::Duration;

#[derive(Debug, Clone, thiserror::Error)]
pub enum ActionError {
    /// Transient failure — the engine's retry policy decides whether to
    /// retry. The source engine's default policy is "no retries" (§4.7),
    /// so today this is equivalent to `Fatal` unless a host configures
    /// otherwise.
    #[error("retryable: {error}")]
    Retryable {
        error: String,
        backoff_hint: Option<Duration>,
    },

    /// Permanent failure — invalid input, rejected business rule, anything
    /// that would fail identically on replay.
    #[error("fatal: {error}")]
    Fatal { error: String },

    /// A required input was missing or malformed before execution began.
    #[error("validation: {0}")]
    Validation(String),

    /// Execution was cancelled cooperatively via the context's
    /// cancellation token.
    #[error("cancelled")]
    Cancelled,

    /// The Durable-Step Seam's per-step timeout elapsed before `step`
    /// resolved (§4.7). Surfaces as a `node_error` with kind `step_timeout`
    /// (§7) — the outer loop treats it like any other node failure and
    /// does not affect siblings already in flight.
    #[error("step_timeout: step `{step}` exceeded its timeout")]
    Timeout { step: String },
}

impl ActionError {
    #[must_use]
    pub fn retryable(msg: impl Into<String>) -> Self {
        Self::Retryable {
            error: msg.into(),
            backoff_hint: None,
        }
    }

    #[must_use]
    pub fn retryable_with_backoff(msg: impl Into<String>, backoff: Duration) -> Self {
        Self::Retryable {
            error: msg.into(),
            backoff_hint: Some(backoff),
        }
    }

    #[must_use]
    pub fn fatal(msg: impl Into<String>) -> Self {
        Self::Fatal { error: msg.into() }
    }

    #[must_use]
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    #[must_use]
    pub fn step_timeout(step: impl Into<String>) -> Self {
        Self::Timeout { step: step.into() }
    }

    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Retryable { .. })
    }

    #[must_use]
    pub fn backoff_hint(&self) -> Option<Duration> {
        match self {
            Self::Retryable { backoff_hint, .. } => *backoff_hint,
            _ => None,
        }
    }
}

impl From<nebula_ports::PortsError> for ActionError {
    fn from(err: nebula_ports::PortsError) -> Self {
        if err.is_retryable() {
            Self::retryable(err.to_string())
        } else {
            Self::fatal(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_carries_backoff_hint() {
        let err = ActionError::retryable_with_backoff("rate limited", Duration::from_secs(2));
        assert!(err.is_retryable());
        assert_eq!(err.backoff_hint(), Some(Duration::from_secs(2)));
    }

    #[test]
    fn fatal_is_not_retryable() {
        assert!(!ActionError::fatal("bad input").is_retryable());
    }

    #[test]
    fn ports_connection_error_becomes_retryable() {
        let err: ActionError = nebula_ports::PortsError::Connection("refused".into()).into();
        assert!(err.is_retryable());
    }

    #[test]
    fn ports_not_found_becomes_fatal() {
        let err: ActionError = nebula_ports::PortsError::not_found("Queue", "q1").into();
        assert!(!err.is_retryable());
    }

    #[test]
    fn step_timeout_is_distinguishable_and_not_retryable() {
        let err = ActionError::step_timeout("node:n1");
        assert!(err.is_timeout());
        assert!(!err.is_retryable());
        assert!(err.to_string().starts_with("step_timeout:"));
    }
}
