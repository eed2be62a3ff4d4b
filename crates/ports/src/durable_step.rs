//! Durable-step store port — the persistence half of the Durable-Step Seam
//! (§4.7). The seam itself (ephemeral vs. durable dispatch) lives in
//! `nebula-action`; this port is only the host-provided backend a durable
//! seam delegates to.

use async_trait::async_trait;

use crate::error::PortsError;

/// Persists the result of a named step so that replaying the same step
/// name returns the previously computed value instead of re-executing it.
#[async_trait]
pub trait DurableStepStore: Send + Sync {
    /// Look up a previously persisted result for `step_name`, if any.
    async fn load(&self, step_name: &str) -> Result<Option<serde_json::Value>, PortsError>;

    /// Persist the result of `step_name` for future replays.
    async fn store(&self, step_name: &str, value: &serde_json::Value) -> Result<(), PortsError>;
}
