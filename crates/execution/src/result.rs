//! `NodeExecutionResult` — the single shape every node execution reduces
//! to, regardless of whether it completed, was skipped, errored, or
//! suspended (§3).

use std::collections::HashMap;
use std::time::Duration;

use nebula_core::NodeId;
use nebula_value::{RuntimeValue, ValueOrMany};
use serde::{Deserialize, Serialize};

/// Why a node was skipped rather than executed (§4.4.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Cascaded from an errored (or upstream-failure-skipped) ancestor;
    /// promotes the workflow to `error`.
    UpstreamFailure,
    /// An upstream node ran but deliberately left the feeding output
    /// unpopulated. Does not fail the workflow.
    ConditionalBranch,
}

/// What a long-running node implementation yields back instead of a
/// terminal result, reserved for the durable host (§3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingEvent {
    pub event_type: String,
    pub timeout: Duration,
}

/// The outcome of executing exactly one node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum NodeExecutionResult {
    Completed {
        outputs: HashMap<String, ValueOrMany<RuntimeValue>>,
        usage: i64,
    },
    Skipped {
        skip_reason: SkipReason,
        blocked_by: Vec<NodeId>,
    },
    Error {
        message: String,
        usage: i64,
    },
    Pending(PendingEvent),
}

impl NodeExecutionResult {
    #[must_use]
    pub fn completed(outputs: HashMap<String, ValueOrMany<RuntimeValue>>, usage: i64) -> Self {
        Self::Completed { outputs, usage }
    }

    #[must_use]
    pub fn error(message: impl Into<String>, usage: i64) -> Self {
        Self::Error {
            message: message.into(),
            usage,
        }
    }

    #[must_use]
    pub fn skipped(skip_reason: SkipReason, blocked_by: Vec<NodeId>) -> Self {
        Self::Skipped {
            skip_reason,
            blocked_by,
        }
    }
}
