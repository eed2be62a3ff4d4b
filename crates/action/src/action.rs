//! The node implementation contract (§4.5).
//!
//! A single object-safe trait covers both shapes the source engine
//! distinguishes: a "simple" node never calls [`ActionContext::sleep`] or
//! [`ActionContext::do_step`], a "multi-step" node does. The runtime
//! doesn't need to know which kind it's invoking — both are "one async
//! function" from its point of view, durability comes from what the
//! function calls internally, not from its type.

use async_trait::async_trait;

use crate::context::ActionContext;
use crate::error::ActionError;
use crate::result::ActionOutcome;

/// Identifies and executes one node type.
///
/// The registry (`nebula-action::registry`) stores these as
/// `Arc<dyn NodeAction>`, so implementations must be `Send + Sync +
/// 'static`.
#[async_trait]
pub trait NodeAction: Send + Sync + 'static {
    /// The node type this implements, e.g. `"http.request"`.
    fn type_name(&self) -> &str;

    /// Run the node. Must never panic on ordinary failure paths — return
    /// an [`ActionError`] instead; the Node Executor turns it into an
    /// `error` result and never propagates it further (§4.5).
    async fn execute(&self, ctx: &ActionContext) -> Result<ActionOutcome, ActionError>;
}
