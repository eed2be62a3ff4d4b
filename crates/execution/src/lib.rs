//! # Nebula Execution
//!
//! Per-run mutable state, the single mutator that keeps its invariants
//! intact, skip classification, and the derived-status / persisted-record
//! shapes the rest of the runtime hands back to callers.

pub mod context;
pub mod record;
pub mod result;
pub mod skip;
pub mod state;
pub mod status;

pub use context::{TriggerPayload, WorkflowExecutionContext};
pub use record::{NodeExecution, NodeStatus, WorkflowExecution, snapshot};
pub use result::{NodeExecutionResult, PendingEvent, SkipReason};
pub use skip::{SkipClassification, infer_skip_reason};
pub use state::ExecutionState;
pub use status::{ExecutionStatus, get_execution_status};
