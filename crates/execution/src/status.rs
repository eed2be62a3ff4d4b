//! Derived workflow status (§4.4): computed on demand from `(context,
//! state)`, never stored as a field. See design note "derived status, not
//! stored".

use serde::{Deserialize, Serialize};

use crate::context::WorkflowExecutionContext;
use crate::result::SkipReason;
use crate::skip::infer_skip_reason;
use crate::state::ExecutionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    Executing,
    Completed,
    Error,
}

/// The single source of truth for a run's terminal (or in-flight) status.
///
/// A pure function of its two arguments (P5): same context and state in,
/// same status out, always.
#[must_use]
pub fn get_execution_status(
    context: &WorkflowExecutionContext,
    state: &ExecutionState,
) -> ExecutionStatus {
    for node in context.all_node_ids() {
        if !state.is_settled(node) {
            return ExecutionStatus::Executing;
        }
    }

    if !state.node_errors.is_empty() {
        return ExecutionStatus::Error;
    }

    for node in &state.skipped_nodes {
        let classification = infer_skip_reason(&context.workflow, state, node);
        if classification.reason == SkipReason::UpstreamFailure {
            return ExecutionStatus::Error;
        }
    }

    ExecutionStatus::Completed
}
