//! Small cross-cutting helpers every runtime error type shares.
//!
//! This crate deliberately does not define one big error enum — each crate
//! owns its own (`PortsError`, `ActionError`, `ValidationError`, ...). What
//! it gives them is a common vocabulary for deciding *what to do* with an
//! error once it's been returned.

/// Severity classification, independent of what produced the error.
///
/// Used by the monitoring update (`nebula-engine`) to decide how loudly to
/// surface a failure without needing to match on every concrete error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Expected, routine — e.g. a conditional branch not taken.
    Info,
    /// A single node failed; the workflow may still recover.
    Warning,
    /// The whole run is aborting.
    Fatal,
}

/// Implemented by error types that can tell the caller whether retrying the
/// same operation might succeed.
pub trait Retryable {
    /// Returns `true` if the failure is transient (connection reset, lock
    /// contention, timeout) rather than permanent (validation, not-found).
    fn is_retryable(&self) -> bool;
}
