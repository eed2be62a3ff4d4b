//! Mutable per-run execution state (§3, §4.4).
//!
//! `ExecutionState` is owned exclusively by the single applier inside the
//! runtime core's level loop (§5) — nothing here takes a lock, because
//! nothing here is ever touched concurrently.

use std::collections::HashMap;

use indexmap::IndexSet;
use nebula_core::NodeId;
use nebula_value::{RuntimeValue, ValueOrMany};
use serde::{Deserialize, Serialize};

use crate::result::NodeExecutionResult;

/// The mutable state of one in-flight (or just-finished) workflow
/// execution. See §3 for the invariants this type must always satisfy
/// after `apply_node_result` returns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecutionState {
    pub node_outputs: HashMap<NodeId, HashMap<String, ValueOrMany<RuntimeValue>>>,
    pub executed_nodes: IndexSet<NodeId>,
    pub skipped_nodes: IndexSet<NodeId>,
    pub node_errors: HashMap<NodeId, String>,
    pub node_usage: HashMap<NodeId, i64>,
}

impl ExecutionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` once `node` has landed in exactly one of the three terminal
    /// sets (invariant P1).
    #[must_use]
    pub fn is_settled(&self, node: &NodeId) -> bool {
        self.executed_nodes.contains(node)
            || self.skipped_nodes.contains(node)
            || self.node_errors.contains_key(node)
    }

    /// The single mutator for `ExecutionState` (§4.4). Dispatches on the
    /// result's variant and appends to exactly one terminal set —
    /// never to more than one, which is what keeps invariants P1–P4
    /// trivially true without any runtime assertion.
    pub fn apply_node_result(&mut self, node: NodeId, result: NodeExecutionResult) {
        match result {
            NodeExecutionResult::Completed { outputs, usage } => {
                self.node_outputs.insert(node.clone(), outputs);
                self.executed_nodes.insert(node.clone());
                if usage > 0 {
                    self.node_usage.insert(node, usage);
                }
            }
            NodeExecutionResult::Skipped { .. } => {
                self.skipped_nodes.insert(node);
            }
            NodeExecutionResult::Error { message, usage } => {
                self.node_errors.insert(node.clone(), message);
                if usage > 0 {
                    self.node_usage.insert(node, usage);
                }
            }
            NodeExecutionResult::Pending(_) => {
                // Reserved for the durable host's long-running node
                // support; the ephemeral core never produces this
                // variant and never needs to settle it here.
            }
        }
    }

    /// Total usage recorded across every node (§4.6 step 7).
    #[must_use]
    pub fn total_usage(&self) -> i64 {
        self.node_usage.values().sum()
    }
}
