//! Monitoring service port — live progress updates for a single run.

use async_trait::async_trait;
use nebula_execution::WorkflowExecution;

#[async_trait]
pub trait MonitoringService: Send + Sync {
    /// Deliver the current snapshot. A no-op if `session_id` is `None` —
    /// callers don't need to branch on whether monitoring is configured
    /// for this run (§4.8).
    async fn send_update(&self, session_id: Option<&str>, execution: &WorkflowExecution);
}

/// A [`MonitoringService`] that drops every update. Used when a host
/// wires the engine without a monitoring backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMonitoringService;

#[async_trait]
impl MonitoringService for NoopMonitoringService {
    async fn send_update(&self, _session_id: Option<&str>, _execution: &WorkflowExecution) {}
}
