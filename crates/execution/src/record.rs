//! The persisted/returned shapes from §6: `WorkflowExecution` is what the
//! runtime core hands back from `run`, and what the execution store and
//! monitoring service receive.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use nebula_core::{DeploymentId, ExecutionId, NodeId, OrganizationId, WorkflowId};
use nebula_value::{RuntimeValue, ValueOrMany};
use serde::{Deserialize, Serialize};

use crate::context::WorkflowExecutionContext;
use crate::result::SkipReason;
use crate::skip::infer_skip_reason;
use crate::state::ExecutionState;
use crate::status::{ExecutionStatus, get_execution_status};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeStatus {
    Completed,
    Error,
    Skipped,
    Pending,
}

/// One node's final (or, for `pending`, suspended) outcome as surfaced to
/// the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeExecution {
    pub node_id: NodeId,
    pub status: NodeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<HashMap<String, ValueOrMany<RuntimeValue>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_reason: Option<SkipReason>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocked_by: Option<Vec<NodeId>>,
}

/// The full record of one workflow run: persisted by the execution store
/// and returned from `run` (§6).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowExecution {
    pub id: ExecutionId,
    pub workflow_id: WorkflowId,
    pub organization_id: OrganizationId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment_id: Option<DeploymentId>,
    pub status: ExecutionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub node_executions: Vec<NodeExecution>,
    pub usage: i64,
    pub started_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
}

/// Build the point-in-time `WorkflowExecution` snapshot for `context` and
/// `state`. Called after every applied result to produce a monitoring
/// update, and once more at termination to produce the saved record.
#[must_use]
pub fn snapshot(
    context: &WorkflowExecutionContext,
    state: &ExecutionState,
    started_at: DateTime<Utc>,
    top_level_error: Option<String>,
) -> WorkflowExecution {
    let status = get_execution_status(context, state);
    let ended_at = (status != ExecutionStatus::Executing).then(Utc::now);

    let mut node_executions = Vec::with_capacity(context.plan.node_count());
    for node_id in context.all_node_ids() {
        let entry = if let Some(outputs) = state.node_outputs.get(node_id) {
            NodeExecution {
                node_id: node_id.clone(),
                status: NodeStatus::Completed,
                outputs: Some(outputs.clone()),
                error: None,
                usage: state.node_usage.get(node_id).copied(),
                skip_reason: None,
                blocked_by: None,
            }
        } else if let Some(message) = state.node_errors.get(node_id) {
            NodeExecution {
                node_id: node_id.clone(),
                status: NodeStatus::Error,
                outputs: None,
                error: Some(message.clone()),
                usage: state.node_usage.get(node_id).copied(),
                skip_reason: None,
                blocked_by: None,
            }
        } else if state.skipped_nodes.contains(node_id) {
            let classification = infer_skip_reason(&context.workflow, state, node_id);
            NodeExecution {
                node_id: node_id.clone(),
                status: NodeStatus::Skipped,
                outputs: None,
                error: None,
                usage: None,
                skip_reason: Some(classification.reason),
                blocked_by: Some(classification.blocked_by),
            }
        } else {
            NodeExecution {
                node_id: node_id.clone(),
                status: NodeStatus::Pending,
                outputs: None,
                error: None,
                usage: None,
                skip_reason: None,
                blocked_by: None,
            }
        };
        node_executions.push(entry);
    }

    WorkflowExecution {
        id: context.execution_id,
        workflow_id: context.workflow_id,
        organization_id: context.organization_id,
        deployment_id: context.deployment_id,
        status,
        error: top_level_error,
        node_executions,
        usage: state.total_usage(),
        started_at,
        ended_at,
    }
}
