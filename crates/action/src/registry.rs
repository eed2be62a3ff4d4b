//! Node-type registry — maps a workflow node's declared type string to the
//! implementation the Node Executor invokes.

use std::collections::HashMap;
use std::sync::Arc;

use crate::action::NodeAction;

#[derive(Default)]
pub struct ActionRegistry {
    actions: HashMap<String, Arc<dyn NodeAction>>,
}

impl ActionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an implementation under its own `type_name`. Overwrites
    /// any previous registration for that type.
    pub fn register(&mut self, action: Arc<dyn NodeAction>) {
        self.actions.insert(action.type_name().to_string(), action);
    }

    #[must_use]
    pub fn get(&self, type_name: &str) -> Option<Arc<dyn NodeAction>> {
        self.actions.get(type_name).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
