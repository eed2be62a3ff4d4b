//! What a successful node invocation hands back to the Node Executor
//! (§4.5 step 5), before the Parameter Mapper converts outputs to wire
//! form.

use std::collections::HashMap;

use nebula_value::{NodeValue, ValueOrMany};
use serde::{Deserialize, Serialize};

/// Declared outputs plus any usage the implementation reports, in node
/// form. The Node Executor sums this with zero and converts each output
/// through the Parameter Mapper before it becomes a `NodeExecutionResult`.
///
/// Serializable so the whole-node invocation can go through the
/// Durable-Step Seam (§4.7) under its `"node:{nodeId}"` step name, not
/// just a node implementation's own internal `doStep` calls.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionOutcome {
    pub outputs: HashMap<String, ValueOrMany<NodeValue>>,
    pub usage: i64,
}

impl ActionOutcome {
    #[must_use]
    pub fn new(outputs: HashMap<String, ValueOrMany<NodeValue>>) -> Self {
        Self { outputs, usage: 0 }
    }

    #[must_use]
    pub fn with_usage(mut self, usage: i64) -> Self {
        self.usage = usage;
        self
    }

    #[must_use]
    pub fn single(name: impl Into<String>, value: NodeValue) -> Self {
        let mut outputs = HashMap::new();
        outputs.insert(name.into(), ValueOrMany::One(value));
        Self::new(outputs)
    }
}
