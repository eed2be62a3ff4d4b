//! Shared Kahn's-algorithm plumbing used by both the validator's cycle
//! check and the plan builder's leveling pass (design note: "do both with
//! a single Kahn pass" — here that's a shared helper rather than one
//! literal pass, since the validator needs to keep going after finding a
//! cycle while the planner only ever runs on an already-validated graph).

use std::collections::HashMap;

use nebula_core::NodeId;

use crate::model::Workflow;

/// In-degree and forward-adjacency view of a workflow's graph, indexed by
/// the node's position in `workflow.nodes` for deterministic ordering.
pub(crate) struct GraphView<'a> {
    pub node_order: Vec<&'a NodeId>,
    pub index_of: HashMap<&'a NodeId, usize>,
    pub adjacency: Vec<Vec<usize>>,
    pub in_degree: Vec<usize>,
}

impl<'a> GraphView<'a> {
    pub(crate) fn build(workflow: &'a Workflow) -> Self {
        let node_order: Vec<&NodeId> = workflow.nodes.iter().map(|n| &n.id).collect();
        let index_of: HashMap<&NodeId, usize> = node_order
            .iter()
            .enumerate()
            .map(|(i, id)| (*id, i))
            .collect();

        let mut adjacency = vec![Vec::new(); node_order.len()];
        let mut in_degree = vec![0usize; node_order.len()];

        for edge in &workflow.edges {
            let (Some(&src), Some(&dst)) = (index_of.get(&edge.source), index_of.get(&edge.target))
            else {
                // Unknown node references are reported by the validator;
                // the graph view just ignores the dangling edge.
                continue;
            };
            adjacency[src].push(dst);
            in_degree[dst] += 1;
        }

        Self {
            node_order,
            index_of,
            adjacency,
            in_degree,
        }
    }

    /// Runs Kahn's algorithm with level grouping. Returns the levels found
    /// and the set of node indices left over with non-zero in-degree
    /// (non-empty iff the graph contains a cycle).
    pub(crate) fn levels(&self) -> (Vec<Vec<usize>>, Vec<usize>) {
        let mut in_degree = self.in_degree.clone();
        let mut remaining: usize = in_degree.len();
        let mut levels = Vec::new();

        loop {
            let level: Vec<usize> = (0..in_degree.len())
                .filter(|&i| in_degree[i] == 0)
                .collect();
            if level.is_empty() {
                break;
            }
            for &i in &level {
                // Mark visited so it's never picked again.
                in_degree[i] = usize::MAX;
            }
            for &i in &level {
                for &next in &self.adjacency[i] {
                    if in_degree[next] != usize::MAX {
                        in_degree[next] -= 1;
                    }
                }
            }
            remaining -= level.len();
            levels.push(level);
        }

        let leftover: Vec<usize> = (0..self.in_degree.len())
            .filter(|&i| in_degree[i] != usize::MAX)
            .collect();
        debug_assert_eq!(leftover.len(), remaining);
        (levels, leftover)
    }
}
