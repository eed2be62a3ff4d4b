//! Skip classification (§4.4.1): distinguishing "legitimately unvisited
//! branch" from "blocked by a real failure" is what lets the engine
//! report `completed` for workflows with conditional forks while still
//! failing when upstream errors fan out.

use indexmap::IndexSet;
use nebula_core::NodeId;
use nebula_workflow::Workflow;

use crate::result::SkipReason;
use crate::state::ExecutionState;

/// The classification result for one skipped node: why it was skipped,
/// and the transitive set of nodes responsible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipClassification {
    pub reason: SkipReason,
    pub blocked_by: Vec<NodeId>,
}

/// Walk `node`'s inbound edges and classify why it was skipped.
///
/// Failure dominates: a single errored (or failure-skipped) ancestor
/// makes the whole skip `UpstreamFailure`, even if other inbound edges
/// are merely unpopulated conditional branches.
#[must_use]
pub fn infer_skip_reason(
    workflow: &Workflow,
    state: &ExecutionState,
    node: &NodeId,
) -> SkipClassification {
    let mut failure_blockers: IndexSet<NodeId> = IndexSet::new();
    let mut conditional_blockers: IndexSet<NodeId> = IndexSet::new();

    for edge in workflow.inbound_edges(node) {
        let source = &edge.source;

        if state.node_errors.contains_key(source) {
            failure_blockers.insert(source.clone());
        } else if state.skipped_nodes.contains(source) {
            let upstream = infer_skip_reason(workflow, state, source);
            match upstream.reason {
                SkipReason::UpstreamFailure => failure_blockers.extend(upstream.blocked_by),
                SkipReason::ConditionalBranch => conditional_blockers.extend(upstream.blocked_by),
            }
        } else if state.executed_nodes.contains(source) {
            let produced = state
                .node_outputs
                .get(source)
                .is_some_and(|outputs| outputs.contains_key(&edge.source_output));
            if !produced {
                conditional_blockers.insert(source.clone());
            }
        }
        // Source not yet settled: per invariant 4 this cannot happen once
        // the node itself is being classified, so the edge is ignored.
    }

    if !failure_blockers.is_empty() {
        return SkipClassification {
            reason: SkipReason::UpstreamFailure,
            blocked_by: failure_blockers.into_iter().collect(),
        };
    }
    if !conditional_blockers.is_empty() {
        return SkipClassification {
            reason: SkipReason::ConditionalBranch,
            blocked_by: conditional_blockers.into_iter().collect(),
        };
    }

    // No inbound edge contributed a blocker — an ill-formed case for a
    // well-formed skip (§4.4.1). Default conservatively to failure.
    SkipClassification {
        reason: SkipReason::UpstreamFailure,
        blocked_by: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use nebula_core::WorkflowId;
    use nebula_value::ParamType;
    use nebula_workflow::{Edge, InputParam, NodeDef, OutputParam, Trigger, Workflow};

    use super::*;
    use crate::result::NodeExecutionResult;

    fn node_id(id: &str) -> NodeId {
        NodeId::new(id).unwrap()
    }

    fn build_workflow() -> Workflow {
        let mut a = NodeDef::new(node_id("a"), "noop");
        a.outputs.push(OutputParam::new("on_true", ParamType::Number));
        a.outputs.push(OutputParam::new("on_false", ParamType::Number));

        let mut b = NodeDef::new(node_id("b"), "noop");
        b.inputs.push(InputParam::new("in", ParamType::Number));

        let mut c = NodeDef::new(node_id("c"), "noop");
        c.inputs.push(InputParam::new("in", ParamType::Number));

        Workflow {
            id: WorkflowId::v4(),
            trigger: Trigger::Manual,
            nodes: vec![a, b, c],
            edges: vec![
                Edge::new(node_id("a"), "on_true", node_id("b"), "in"),
                Edge::new(node_id("a"), "on_false", node_id("c"), "in"),
            ],
        }
    }

    #[test]
    fn conditional_branch_when_upstream_executed_but_output_absent() {
        let wf = build_workflow();
        let mut state = ExecutionState::new();
        let mut outputs = HashMap::new();
        outputs.insert(
            "on_true".to_string(),
            nebula_value::ValueOrMany::One(nebula_value::RuntimeValue::boolean(true)),
        );
        state.apply_node_result(node_id("a"), NodeExecutionResult::completed(outputs, 0));

        let classification = infer_skip_reason(&wf, &state, &node_id("c"));
        assert_eq!(classification.reason, SkipReason::ConditionalBranch);
        assert_eq!(classification.blocked_by, vec![node_id("a")]);
    }

    #[test]
    fn upstream_failure_dominates() {
        let wf = build_workflow();
        let mut state = ExecutionState::new();
        state.apply_node_result(node_id("a"), NodeExecutionResult::error("boom", 0));

        let classification = infer_skip_reason(&wf, &state, &node_id("b"));
        assert_eq!(classification.reason, SkipReason::UpstreamFailure);
        assert_eq!(classification.blocked_by, vec![node_id("a")]);
    }

    #[test]
    fn failure_propagates_transitively_through_a_skip_chain() {
        // a errors -> b skipped(upstream_failure) -> c skipped, blocked_by should trace back to a.
        let mut a = NodeDef::new(node_id("a"), "noop");
        a.outputs.push(OutputParam::new("out", ParamType::Number));
        let mut b = NodeDef::new(node_id("b"), "noop");
        b.inputs.push(InputParam::new("in", ParamType::Number));
        b.outputs.push(OutputParam::new("out", ParamType::Number));
        let mut c = NodeDef::new(node_id("c"), "noop");
        c.inputs.push(InputParam::new("in", ParamType::Number));

        let wf = Workflow {
            id: WorkflowId::v4(),
            trigger: Trigger::Manual,
            nodes: vec![a, b, c],
            edges: vec![
                Edge::new(node_id("a"), "out", node_id("b"), "in"),
                Edge::new(node_id("b"), "out", node_id("c"), "in"),
            ],
        };

        let mut state = ExecutionState::new();
        state.apply_node_result(node_id("a"), NodeExecutionResult::error("boom", 0));
        state.apply_node_result(
            node_id("b"),
            NodeExecutionResult::skipped(SkipReason::UpstreamFailure, vec![node_id("a")]),
        );

        let classification = infer_skip_reason(&wf, &state, &node_id("c"));
        assert_eq!(classification.reason, SkipReason::UpstreamFailure);
        assert_eq!(classification.blocked_by, vec![node_id("a")]);
    }
}
