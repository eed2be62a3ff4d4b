//! [`SimpleAction`] — sugar for the common case: a node that takes its
//! gathered inputs, produces outputs, and never touches the Durable-Step
//! Seam directly.
//!
//! A blanket impl adapts every `SimpleAction` into [`NodeAction`], so
//! simple nodes plug into the registry unchanged.

use async_trait::async_trait;

use crate::action::NodeAction;
use crate::context::ActionContext;
use crate::error::ActionError;
use crate::result::ActionOutcome;

#[async_trait]
pub trait SimpleAction: Send + Sync + 'static {
    fn type_name(&self) -> &str;

    async fn run(&self, ctx: &ActionContext) -> Result<ActionOutcome, ActionError>;
}

#[async_trait]
impl<T> NodeAction for T
where
    T: SimpleAction,
{
    fn type_name(&self) -> &str {
        SimpleAction::type_name(self)
    }

    async fn execute(&self, ctx: &ActionContext) -> Result<ActionOutcome, ActionError> {
        self.run(ctx).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use nebula_core::{ExecutionId, NodeId, WorkflowId};
    use nebula_value::{NodeValue, Primitive, ValueOrMany};

    use super::*;
    use crate::step::StepSeam;

    struct AddOne;

    #[async_trait]
    impl SimpleAction for AddOne {
        fn type_name(&self) -> &str {
            "test.add_one"
        }

        async fn run(&self, ctx: &ActionContext) -> Result<ActionOutcome, ActionError> {
            let ValueOrMany::One(NodeValue::Primitive(Primitive::Number(n))) =
                ctx.require_input("x")?
            else {
                return Err(ActionError::validation("x must be a single number"));
            };
            Ok(ActionOutcome::single(
                "y",
                NodeValue::Primitive(Primitive::Number(n + 1.0)),
            ))
        }
    }

    #[tokio::test]
    async fn simple_action_runs_through_node_action() {
        let mut inputs = HashMap::new();
        inputs.insert(
            "x".to_string(),
            ValueOrMany::One(NodeValue::Primitive(Primitive::Number(41.0))),
        );
        let ctx = ActionContext::new(
            ExecutionId::v4(),
            NodeId::new("n1").unwrap(),
            WorkflowId::v4(),
            inputs,
            StepSeam::Ephemeral,
            tokio_util::sync::CancellationToken::new(),
        );

        let action = AddOne;
        let outcome = NodeAction::execute(&action, &ctx).await.unwrap();
        let ValueOrMany::One(NodeValue::Primitive(Primitive::Number(y))) = &outcome.outputs["y"]
        else {
            panic!("expected numeric output");
        };
        assert!((*y - 42.0).abs() < f64::EPSILON);
        assert_eq!(NodeAction::type_name(&action), "test.add_one");
    }
}
