//! Errors the Runtime Core itself cannot route into a `WorkflowExecution`
//! record (§7).
//!
//! `validation_error` and `credit_exceeded` are *not* here — both are
//! ordinary terminal outcomes the core records directly in the returned
//! execution. `EngineError` is reserved for the two persistence-boundary
//! ports whose failures the core does not attempt to recover from: the
//! pre-flight credit check talking to a backend that's down, and the
//! final execution-store save (§7: "failures there are not caught by the
//! core").

use nebula_ports::PortsError;

#[derive(Debug, Clone, thiserror::Error)]
pub enum EngineError {
    #[error("credit service unavailable: {0}")]
    CreditService(PortsError),

    #[error("execution store save failed: {0}")]
    ExecutionStoreSave(PortsError),
}
