//! Execution store port — persistence for finished and in-flight
//! `WorkflowExecution` records (§4.6 step 8).

use async_trait::async_trait;
use nebula_core::{ExecutionId, OrganizationId};
use nebula_execution::WorkflowExecution;

use crate::error::PortsError;

/// Pagination and filtering options for [`ExecutionStore::list`].
#[derive(Debug, Clone, Default)]
pub struct ListExecutionsOptions {
    pub workflow_id: Option<nebula_core::WorkflowId>,
    pub offset: usize,
    pub limit: usize,
}

#[async_trait]
pub trait ExecutionStore: Send + Sync {
    /// Persist the final (or a checkpointed) record. The runtime core
    /// calls this exactly once per run, at termination (§4.6 step 8);
    /// a failure here is not caught by the core (§7).
    async fn save(&self, record: WorkflowExecution) -> Result<WorkflowExecution, PortsError>;

    async fn get(
        &self,
        id: ExecutionId,
        org_id: OrganizationId,
    ) -> Result<Option<WorkflowExecution>, PortsError>;

    async fn list(
        &self,
        org_id: OrganizationId,
        opts: ListExecutionsOptions,
    ) -> Result<Vec<WorkflowExecution>, PortsError>;
}
