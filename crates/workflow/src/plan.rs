//! Plan builder (§4.2): turn a validated workflow into deterministic
//! execution levels.

use nebula_core::NodeId;

use crate::graph::GraphView;
use crate::model::Workflow;

/// An ordered sequence of execution levels. Level `k` contains every node
/// whose upstream dependencies all live in levels `< k`; within a level,
/// nodes keep their position from `workflow.nodes` (§4.2).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionPlan {
    pub levels: Vec<Vec<NodeId>>,
}

impl ExecutionPlan {
    #[must_use]
    pub fn level_of(&self, node: &NodeId) -> Option<usize> {
        self.levels.iter().position(|level| level.contains(node))
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.levels.iter().map(Vec::len).sum()
    }

    /// Flattened, level-major node order — used by the runtime to size
    /// progress tracking and by tests asserting the full node set ran.
    pub fn flat_nodes(&self) -> impl Iterator<Item = &NodeId> {
        self.levels.iter().flatten()
    }
}

/// Builds the execution plan for an already-validated workflow.
///
/// # Panics
///
/// Never returns levels covering a smaller node set than the workflow
/// declares: callers must validate first (§4.1) so this never encounters
/// a cycle. If it somehow does (a caller skipped validation), the
/// cyclic nodes are silently dropped from the plan rather than panicking,
/// since `nebula-workflow::validate` is the single source of truth for
/// that failure mode.
#[must_use]
pub fn plan(workflow: &Workflow) -> ExecutionPlan {
    let view = GraphView::build(workflow);
    let (levels, _leftover_cycle_nodes) = view.levels();

    let levels = levels
        .into_iter()
        .map(|level| level.into_iter().map(|i| view.node_order[i].clone()).collect())
        .collect();

    ExecutionPlan { levels }
}

#[cfg(test)]
mod tests {
    use nebula_value::ParamType;

    use super::*;
    use crate::model::{Edge, InputParam, NodeDef, OutputParam, Trigger};

    fn node(id: &str) -> NodeDef {
        NodeDef::new(NodeId::new(id).unwrap(), "noop")
    }

    fn workflow(nodes: Vec<NodeDef>, edges: Vec<Edge>) -> Workflow {
        Workflow {
            id: nebula_core::WorkflowId::v4(),
            trigger: Trigger::Manual,
            nodes,
            edges,
        }
    }

    #[test]
    fn disconnected_nodes_all_land_in_level_zero() {
        let wf = workflow(vec![node("a"), node("b"), node("c")], vec![]);
        let p = plan(&wf);
        assert_eq!(p.levels.len(), 1);
        assert_eq!(p.levels[0].len(), 3);
    }

    #[test]
    fn linear_chain_gets_one_node_per_level() {
        let mut a = node("a");
        a.outputs.push(OutputParam::new("out", ParamType::Number));
        let mut b = node("b");
        b.inputs.push(InputParam::new("in", ParamType::Number));
        b.outputs.push(OutputParam::new("out", ParamType::Number));
        let mut c = node("c");
        c.inputs.push(InputParam::new("in", ParamType::Number));

        let wf = workflow(
            vec![a, b, c],
            vec![
                Edge::new(NodeId::new("a").unwrap(), "out", NodeId::new("b").unwrap(), "in"),
                Edge::new(NodeId::new("b").unwrap(), "out", NodeId::new("c").unwrap(), "in"),
            ],
        );
        let p = plan(&wf);
        assert_eq!(p.levels.len(), 3);
        assert_eq!(p.level_of(&NodeId::new("a").unwrap()), Some(0));
        assert_eq!(p.level_of(&NodeId::new("b").unwrap()), Some(1));
        assert_eq!(p.level_of(&NodeId::new("c").unwrap()), Some(2));
    }

    #[test]
    fn diamond_puts_parallel_branches_in_the_same_level() {
        let mut src = node("src");
        src.outputs.push(OutputParam::new("out", ParamType::Number));
        let mut left = node("left");
        left.inputs.push(InputParam::new("in", ParamType::Number));
        left.outputs.push(OutputParam::new("out", ParamType::Number));
        let mut right = node("right");
        right.inputs.push(InputParam::new("in", ParamType::Number));
        right.outputs.push(OutputParam::new("out", ParamType::Number));
        let mut sink = node("sink");
        sink.inputs.push(InputParam::new("a", ParamType::Number));
        sink.inputs.push(InputParam::new("b", ParamType::Number));

        let wf = workflow(
            vec![src, left, right, sink],
            vec![
                Edge::new(NodeId::new("src").unwrap(), "out", NodeId::new("left").unwrap(), "in"),
                Edge::new(NodeId::new("src").unwrap(), "out", NodeId::new("right").unwrap(), "in"),
                Edge::new(NodeId::new("left").unwrap(), "out", NodeId::new("sink").unwrap(), "a"),
                Edge::new(NodeId::new("right").unwrap(), "out", NodeId::new("sink").unwrap(), "b"),
            ],
        );
        let p = plan(&wf);
        assert_eq!(p.levels.len(), 3);
        assert_eq!(p.levels[1].len(), 2);
        assert!(p.levels[1].contains(&NodeId::new("left").unwrap()));
        assert!(p.levels[1].contains(&NodeId::new("right").unwrap()));
    }

    #[test]
    fn plan_covers_every_node_exactly_once() {
        let mut a = node("a");
        a.outputs.push(OutputParam::new("out", ParamType::Number));
        let mut b = node("b");
        b.inputs.push(InputParam::new("in", ParamType::Number));

        let wf = workflow(
            vec![a, b],
            vec![Edge::new(NodeId::new("a").unwrap(), "out", NodeId::new("b").unwrap(), "in")],
        );
        let p = plan(&wf);
        assert_eq!(p.node_count(), 2);
        assert_eq!(p.flat_nodes().count(), 2);
    }
}
