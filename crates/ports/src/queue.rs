//! Queue service port — resolving a workflow-declared queue handle to a
//! live sink a node can send messages through.

use async_trait::async_trait;
use nebula_core::OrganizationId;
use serde_json::Value as Json;

use crate::error::PortsError;

/// Delivery mode for [`Queue::send`] / [`Queue::send_batch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendMode {
    /// Wait for the broker to acknowledge the write.
    Confirmed,
    /// Fire-and-forget.
    BestEffort,
}

#[async_trait]
pub trait Queue: Send + Sync {
    async fn send(&self, payload: Json, mode: SendMode) -> Result<(), PortsError>;
    async fn send_batch(&self, payloads: Vec<Json>, mode: SendMode) -> Result<(), PortsError>;
}

#[async_trait]
pub trait QueueService: Send + Sync {
    /// Resolve a declared queue id or handle to a live [`Queue`].
    /// `None` means the queue does not exist or is not visible to
    /// `org_id` — distinct from a connection failure (`Err`).
    async fn resolve(
        &self,
        queue_id_or_handle: &str,
        org_id: OrganizationId,
    ) -> Result<Option<std::sync::Arc<dyn Queue>>, PortsError>;
}
