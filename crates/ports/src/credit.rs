//! Credit service port — the pre-flight and post-run usage accounting
//! hooks the runtime core calls around every execution (§4.6 steps 3, 7).

use async_trait::async_trait;
use nebula_core::OrganizationId;

use crate::error::PortsError;

/// Inputs to the pre-flight credit check.
#[derive(Debug, Clone)]
pub struct CreditCheck {
    pub org_id: OrganizationId,
    /// Credits included in the organization's current plan.
    pub included: i64,
    /// Statically estimated usage for the workflow about to run.
    pub estimated: i64,
    pub subscription_status: Option<String>,
    /// Extra credits the org is allowed to run into the red for.
    pub overage_limit: Option<i64>,
}

#[async_trait]
pub trait CreditService: Send + Sync {
    /// Returns `false` if running the estimated usage would exceed what
    /// the organization is entitled to; the runtime short-circuits with
    /// `credit_exceeded` in that case (§7).
    async fn has_enough_credits(&self, check: &CreditCheck) -> Result<bool, PortsError>;

    /// Record actual usage after a run completes (§4.6 step 7).
    async fn record_usage(&self, org_id: OrganizationId, usage: i64) -> Result<(), PortsError>;
}
