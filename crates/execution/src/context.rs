//! `WorkflowExecutionContext` — the immutable, per-run configuration the
//! runtime core and node executor read from (§3). Deep-immutable by
//! construction: nothing in here is ever mutated after `run` builds it.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use nebula_core::{DeploymentId, ExecutionId, NodeId, OrganizationId, WorkflowId};
use nebula_workflow::{ExecutionPlan, Workflow};
use serde::{Deserialize, Serialize};

/// Whatever triggered this run, carried through for node implementations
/// that read it (an HTTP-triggered workflow's first node reading the
/// request body, say).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TriggerPayload {
    Http(serde_json::Value),
    Email(serde_json::Value),
    Queue(serde_json::Value),
    Scheduled(DateTime<Utc>),
}

/// Everything the runtime core and node executor need to know about a
/// single in-flight execution, fixed for its entire lifetime.
#[derive(Debug, Clone)]
pub struct WorkflowExecutionContext {
    pub workflow: Arc<Workflow>,
    pub plan: ExecutionPlan,
    pub workflow_id: WorkflowId,
    pub organization_id: OrganizationId,
    pub execution_id: ExecutionId,
    pub deployment_id: Option<DeploymentId>,
    pub trigger_payload: Option<TriggerPayload>,
    pub monitoring_session_id: Option<String>,
}

impl WorkflowExecutionContext {
    #[must_use]
    pub fn new(
        workflow: Arc<Workflow>,
        plan: ExecutionPlan,
        organization_id: OrganizationId,
        execution_id: ExecutionId,
    ) -> Self {
        let workflow_id = workflow.id;
        Self {
            workflow,
            plan,
            workflow_id,
            organization_id,
            execution_id,
            deployment_id: None,
            trigger_payload: None,
            monitoring_session_id: None,
        }
    }

    /// Every node id the plan knows about, in level-major order.
    pub fn all_node_ids(&self) -> impl Iterator<Item = &NodeId> {
        self.plan.flat_nodes()
    }
}
