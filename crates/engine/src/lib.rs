//! # Nebula Engine
//!
//! The Runtime Core (§4.6) and Node Executor (§4.5): the part of the
//! runtime that actually drives a workflow from `pending` to a terminal
//! [`nebula_execution::WorkflowExecution`], wiring together the graph
//! planner, the parameter mapper, the action registry, and every backend
//! port behind a [`ServiceBundle`].

mod error;
mod node_executor;
mod runtime;
mod services;

pub use error::EngineError;
pub use runtime::{RunParams, run};
pub use services::ServiceBundle;

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use nebula_action::{ActionContext, ActionError, ActionOutcome, NodeAction};
    use nebula_core::{ExecutionId, NodeId, OrganizationId, WorkflowId};
    use nebula_execution::ExecutionStatus;
    use nebula_value::{NodeValue, ParamType, Primitive, RuntimeValue, ValueOrMany};
    use nebula_workflow::{Edge, InputParam, NodeDef, OutputParam, Trigger, Workflow};

    use super::*;

    struct AddOne;

    #[async_trait]
    impl NodeAction for AddOne {
        fn type_name(&self) -> &str {
            "add-one"
        }

        async fn execute(&self, ctx: &ActionContext) -> Result<ActionOutcome, ActionError> {
            let input = ctx.require_input("in")?;
            let ValueOrMany::One(NodeValue::Primitive(Primitive::Number(n))) = input else {
                return Err(ActionError::validation("`in` must be a number"));
            };
            Ok(ActionOutcome::single(
                "out",
                NodeValue::Primitive(Primitive::Number(n + 1.0)),
            ))
        }
    }

    struct MergeTwo;

    #[async_trait]
    impl NodeAction for MergeTwo {
        fn type_name(&self) -> &str {
            "merge-two"
        }

        async fn execute(&self, ctx: &ActionContext) -> Result<ActionOutcome, ActionError> {
            let ValueOrMany::One(NodeValue::Primitive(Primitive::Number(x))) =
                ctx.require_input("x")?
            else {
                return Err(ActionError::validation("`x` must be a number"));
            };
            let ValueOrMany::One(NodeValue::Primitive(Primitive::Number(y))) =
                ctx.require_input("y")?
            else {
                return Err(ActionError::validation("`y` must be a number"));
            };
            Ok(ActionOutcome::single(
                "sum",
                NodeValue::Primitive(Primitive::Number(x + y)),
            ))
        }
    }

    /// Produces exactly one of its two outputs, chosen by `flag` — the
    /// other stays unproduced so the branch not taken classifies as
    /// `conditional_branch` rather than `upstream_failure`.
    struct Branch;

    #[async_trait]
    impl NodeAction for Branch {
        fn type_name(&self) -> &str {
            "branch"
        }

        async fn execute(&self, ctx: &ActionContext) -> Result<ActionOutcome, ActionError> {
            let ValueOrMany::One(NodeValue::Primitive(Primitive::Boolean(flag))) =
                ctx.require_input("flag")?
            else {
                return Err(ActionError::validation("`flag` must be a boolean"));
            };
            let key = if flag { "on_true" } else { "on_false" };
            Ok(ActionOutcome::single(
                key,
                NodeValue::Primitive(Primitive::Number(1.0)),
            ))
        }
    }

    struct AlwaysFails;

    #[async_trait]
    impl NodeAction for AlwaysFails {
        fn type_name(&self) -> &str {
            "always-fails"
        }

        async fn execute(&self, _ctx: &ActionContext) -> Result<ActionOutcome, ActionError> {
            Err(ActionError::fatal("boom"))
        }
    }

    fn node_id(id: &str) -> NodeId {
        NodeId::new(id).unwrap()
    }

    fn linear_workflow() -> Workflow {
        let mut a = NodeDef::new(node_id("a"), "add-one");
        a.inputs.push(InputParam::new("in", ParamType::Number).with_default(RuntimeValue::number(1.0)));
        a.outputs.push(OutputParam::new("out", ParamType::Number));

        let mut b = NodeDef::new(node_id("b"), "add-one");
        b.inputs.push(InputParam::new("in", ParamType::Number).required());
        b.outputs.push(OutputParam::new("out", ParamType::Number));

        Workflow {
            id: WorkflowId::v4(),
            trigger: Trigger::Manual,
            nodes: vec![a, b],
            edges: vec![Edge::new(node_id("a"), "out", node_id("b"), "in")],
        }
    }

    #[tokio::test]
    async fn a_two_node_chain_completes_and_produces_outputs() {
        let mut registry = nebula_action::ActionRegistry::new();
        registry.register(Arc::new(AddOne));

        let workflow = Arc::new(linear_workflow());
        let params = RunParams::new(OrganizationId::v4(), ExecutionId::v4());
        let services = ServiceBundle::new();

        let record = run(workflow, params, &registry, &services).await.unwrap();

        assert_eq!(record.status, ExecutionStatus::Completed);
        assert_eq!(record.node_executions.len(), 2);
    }

    #[tokio::test]
    async fn a_diamond_shaped_workflow_runs_both_branches_and_merges_at_the_join() {
        let mut registry = nebula_action::ActionRegistry::new();
        registry.register(Arc::new(AddOne));
        registry.register(Arc::new(MergeTwo));

        let mut a = NodeDef::new(node_id("a"), "add-one");
        a.inputs
            .push(InputParam::new("in", ParamType::Number).with_default(RuntimeValue::number(1.0)));
        a.outputs.push(OutputParam::new("out", ParamType::Number));

        let mut b = NodeDef::new(node_id("b"), "add-one");
        b.inputs.push(InputParam::new("in", ParamType::Number).required());
        b.outputs.push(OutputParam::new("out", ParamType::Number));

        let mut c = NodeDef::new(node_id("c"), "add-one");
        c.inputs.push(InputParam::new("in", ParamType::Number).required());
        c.outputs.push(OutputParam::new("out", ParamType::Number));

        let mut d = NodeDef::new(node_id("d"), "merge-two");
        d.inputs.push(InputParam::new("x", ParamType::Number).required());
        d.inputs.push(InputParam::new("y", ParamType::Number).required());
        d.outputs.push(OutputParam::new("sum", ParamType::Number));

        let workflow = Arc::new(Workflow {
            id: WorkflowId::v4(),
            trigger: Trigger::Manual,
            nodes: vec![a, b, c, d],
            edges: vec![
                Edge::new(node_id("a"), "out", node_id("b"), "in"),
                Edge::new(node_id("a"), "out", node_id("c"), "in"),
                Edge::new(node_id("b"), "out", node_id("d"), "x"),
                Edge::new(node_id("c"), "out", node_id("d"), "y"),
            ],
        });

        let params = RunParams::new(OrganizationId::v4(), ExecutionId::v4());
        let services = ServiceBundle::new();

        let record = run(workflow, params, &registry, &services).await.unwrap();

        assert_eq!(record.status, ExecutionStatus::Completed);
        assert_eq!(record.node_executions.len(), 4);
        assert!(
            record
                .node_executions
                .iter()
                .all(|n| n.status == nebula_execution::NodeStatus::Completed)
        );

        let d_entry = record
            .node_executions
            .iter()
            .find(|n| n.node_id == node_id("d"))
            .unwrap();
        let outputs = d_entry.outputs.as_ref().unwrap();
        let ValueOrMany::One(RuntimeValue::Primitive(Primitive::Number(sum))) = &outputs["sum"]
        else {
            panic!("expected numeric sum output");
        };
        // a: 1 + 1 = 2; b = c = 2 + 1 = 3 each; d = 3 + 3.
        assert!((*sum - 6.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn a_conditional_branch_skip_does_not_fail_the_workflow() {
        let mut registry = nebula_action::ActionRegistry::new();
        registry.register(Arc::new(Branch));
        registry.register(Arc::new(AddOne));

        let mut a = NodeDef::new(node_id("a"), "branch");
        a.inputs.push(
            InputParam::new("flag", ParamType::Boolean).with_default(RuntimeValue::boolean(true)),
        );
        a.outputs.push(OutputParam::new("on_true", ParamType::Number));
        a.outputs.push(OutputParam::new("on_false", ParamType::Number));

        let mut b = NodeDef::new(node_id("b"), "add-one");
        b.inputs.push(InputParam::new("in", ParamType::Number).required());
        b.outputs.push(OutputParam::new("out", ParamType::Number));

        let mut c = NodeDef::new(node_id("c"), "add-one");
        c.inputs.push(InputParam::new("in", ParamType::Number).required());
        c.outputs.push(OutputParam::new("out", ParamType::Number));

        let workflow = Arc::new(Workflow {
            id: WorkflowId::v4(),
            trigger: Trigger::Manual,
            nodes: vec![a, b, c],
            edges: vec![
                Edge::new(node_id("a"), "on_true", node_id("b"), "in"),
                Edge::new(node_id("a"), "on_false", node_id("c"), "in"),
            ],
        });

        let params = RunParams::new(OrganizationId::v4(), ExecutionId::v4());
        let services = ServiceBundle::new();

        let record = run(workflow, params, &registry, &services).await.unwrap();

        assert_eq!(record.status, ExecutionStatus::Completed);

        let b_entry = record
            .node_executions
            .iter()
            .find(|n| n.node_id == node_id("b"))
            .unwrap();
        assert_eq!(b_entry.status, nebula_execution::NodeStatus::Completed);

        let c_entry = record
            .node_executions
            .iter()
            .find(|n| n.node_id == node_id("c"))
            .unwrap();
        assert_eq!(c_entry.status, nebula_execution::NodeStatus::Skipped);
        assert_eq!(
            c_entry.skip_reason,
            Some(nebula_execution::SkipReason::ConditionalBranch)
        );
    }

    #[tokio::test]
    async fn an_errored_node_fails_the_whole_run_and_skips_downstream() {
        let mut registry = nebula_action::ActionRegistry::new();
        registry.register(Arc::new(AlwaysFails));
        registry.register(Arc::new(AddOne));

        let mut a = NodeDef::new(node_id("a"), "always-fails");
        a.outputs.push(OutputParam::new("out", ParamType::Number));
        let mut b = NodeDef::new(node_id("b"), "add-one");
        b.inputs.push(InputParam::new("in", ParamType::Number).required());
        b.outputs.push(OutputParam::new("out", ParamType::Number));

        let workflow = Arc::new(Workflow {
            id: WorkflowId::v4(),
            trigger: Trigger::Manual,
            nodes: vec![a, b],
            edges: vec![Edge::new(node_id("a"), "out", node_id("b"), "in")],
        });

        let params = RunParams::new(OrganizationId::v4(), ExecutionId::v4());
        let services = ServiceBundle::new();

        let record = run(workflow, params, &registry, &services).await.unwrap();

        assert_eq!(record.status, ExecutionStatus::Error);
        let b_entry = record
            .node_executions
            .iter()
            .find(|n| n.node_id == node_id("b"))
            .unwrap();
        assert_eq!(b_entry.status, nebula_execution::NodeStatus::Skipped);
    }

    #[tokio::test]
    async fn an_invalid_workflow_short_circuits_before_any_node_runs() {
        let registry = nebula_action::ActionRegistry::new();

        let mut b = NodeDef::new(node_id("b"), "add-one");
        b.inputs.push(InputParam::new("in", ParamType::Number).required());

        let workflow = Arc::new(Workflow {
            id: WorkflowId::v4(),
            trigger: Trigger::Manual,
            nodes: vec![b],
            edges: vec![Edge::new(node_id("ghost"), "out", node_id("b"), "in")],
        });

        let params = RunParams::new(OrganizationId::v4(), ExecutionId::v4());
        let services = ServiceBundle::new();

        let record = run(workflow, params, &registry, &services).await.unwrap();

        assert_eq!(record.status, ExecutionStatus::Error);
        assert!(record.error.unwrap().starts_with("validation_error"));
        assert!(record.node_executions.iter().all(|n| n.status == nebula_execution::NodeStatus::Pending));
    }

    struct CreditBlocker {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl nebula_ports::CreditService for CreditBlocker {
        async fn has_enough_credits(
            &self,
            _check: &nebula_ports::CreditCheck,
        ) -> Result<bool, nebula_ports::PortsError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(false)
        }

        async fn record_usage(
            &self,
            _org_id: OrganizationId,
            _usage: i64,
        ) -> Result<(), nebula_ports::PortsError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn insufficient_credit_short_circuits_without_running_nodes() {
        let mut registry = nebula_action::ActionRegistry::new();
        registry.register(Arc::new(AddOne));

        let workflow = Arc::new(linear_workflow());
        let params = RunParams::new(OrganizationId::v4(), ExecutionId::v4());
        let services = ServiceBundle::new().with_credit_service(Arc::new(CreditBlocker {
            calls: AtomicUsize::new(0),
        }));

        let record = run(workflow, params, &registry, &services).await.unwrap();

        assert_eq!(record.status, ExecutionStatus::Error);
        assert_eq!(record.error, Some("credit_exceeded".to_string()));
        assert!(record.node_executions.iter().all(|n| n.status == nebula_execution::NodeStatus::Pending));
    }
}
