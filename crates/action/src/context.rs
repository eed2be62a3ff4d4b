//! Runtime context handed to a node implementation for the duration of a
//! single invocation (§4.5).

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use nebula_core::{ExecutionId, NodeId, WorkflowId};
use nebula_value::{NodeValue, ValueOrMany};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use crate::error::ActionError;
use crate::step::StepSeam;

/// Everything a node implementation needs besides its own logic: the
/// inputs the Node Executor already gathered and converted (§4.5 step 1),
/// identity for logging/step-naming, a cancellation signal, and the
/// Durable-Step Seam for multi-step nodes.
pub struct ActionContext {
    pub execution_id: ExecutionId,
    pub node_id: NodeId,
    pub workflow_id: WorkflowId,
    pub cancellation: CancellationToken,
    inputs: HashMap<String, ValueOrMany<NodeValue>>,
    step_seam: StepSeam,
}

impl ActionContext {
    /// `cancellation` should be a clone of the token the run itself was
    /// started with, not a freshly minted one — cancelling that shared
    /// token is what lets a host cancel an in-flight execution
    /// cooperatively (§5): every node currently running observes the same
    /// signal via `check_cancelled`.
    #[must_use]
    pub fn new(
        execution_id: ExecutionId,
        node_id: NodeId,
        workflow_id: WorkflowId,
        inputs: HashMap<String, ValueOrMany<NodeValue>>,
        step_seam: StepSeam,
        cancellation: CancellationToken,
    ) -> Self {
        Self {
            execution_id,
            node_id,
            workflow_id,
            cancellation,
            inputs,
            step_seam,
        }
    }

    /// Look up a gathered input by its declared parameter name.
    #[must_use]
    pub fn input(&self, name: &str) -> Option<&ValueOrMany<NodeValue>> {
        self.inputs.get(name)
    }

    /// Look up a gathered input, failing with a validation error if the
    /// Node Executor didn't already guarantee its presence.
    pub fn require_input(&self, name: &str) -> Result<&ValueOrMany<NodeValue>, ActionError> {
        self.input(name)
            .ok_or_else(|| ActionError::validation(format!("missing required input `{name}`")))
    }

    /// Cooperative cancellation check — long-running node implementations
    /// should call this periodically.
    pub fn check_cancelled(&self) -> Result<(), ActionError> {
        if self.cancellation.is_cancelled() {
            Err(ActionError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Durable sleep (§4.7): suspends without re-executing on replay.
    pub async fn sleep(&self, duration: Duration) {
        self.step_seam.sleep(duration).await;
    }

    /// Durable sub-step (§4.7): `name` is namespaced under this node's id
    /// so replay derives the same step name deterministically.
    pub async fn do_step<T, F, Fut>(&self, name: &str, f: F) -> Result<T, ActionError>
    where
        T: Serialize + DeserializeOwned + Send,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<T, ActionError>> + Send,
    {
        let step_name = format!("node:{}:{name}", self.node_id);
        self.step_seam.execute_step(&step_name, f).await
    }
}
