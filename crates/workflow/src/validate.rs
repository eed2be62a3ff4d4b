//! Graph validator (§4.1): reject a workflow before any execution work
//! begins if it cannot possibly complete.

use nebula_core::NodeId;
use nebula_value::types_compatible;
use serde::{Deserialize, Serialize};

use crate::graph::GraphView;
use crate::model::{Edge, Workflow};

/// One validation failure. Rules run independently and in full — a
/// workflow can fail for several reasons at once, and `validate` reports
/// all of them rather than stopping at the first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ValidationError {
    UnknownEdgeSource { edge_index: usize, node: NodeId },
    UnknownEdgeTarget { edge_index: usize, node: NodeId },
    UnknownSourceOutput { edge_index: usize, node: NodeId, output: String },
    UnknownTargetInput { edge_index: usize, node: NodeId, input: String },
    Cycle { nodes: Vec<NodeId> },
    TypeMismatch { edge_index: usize, source_type: String, target_type: String },
    MissingRequiredInput { node: NodeId, input: String },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownEdgeSource { edge_index, node } => {
                write!(f, "edge[{edge_index}] references unknown source node `{node}`")
            }
            Self::UnknownEdgeTarget { edge_index, node } => {
                write!(f, "edge[{edge_index}] references unknown target node `{node}`")
            }
            Self::UnknownSourceOutput { edge_index, node, output } => {
                write!(f, "edge[{edge_index}] references undeclared output `{output}` on node `{node}`")
            }
            Self::UnknownTargetInput { edge_index, node, input } => {
                write!(f, "edge[{edge_index}] references undeclared input `{input}` on node `{node}`")
            }
            Self::Cycle { nodes } => {
                let ids = nodes.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
                write!(f, "cycle detected among nodes: {ids}")
            }
            Self::TypeMismatch { edge_index, source_type, target_type } => {
                write!(f, "edge[{edge_index}] type mismatch: `{source_type}` -> `{target_type}`")
            }
            Self::MissingRequiredInput { node, input } => {
                write!(f, "node `{node}` is missing required input `{input}` (no edge and no default)")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Runs every validation rule and returns all violations found. An empty
/// result means the workflow is safe to plan and execute.
#[must_use]
pub fn validate(workflow: &Workflow) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    check_edge_endpoints(workflow, &mut errors);
    check_cycles(workflow, &mut errors);
    check_type_compatibility(workflow, &mut errors);
    check_required_inputs(workflow, &mut errors);

    errors
}

fn check_edge_endpoints(workflow: &Workflow, errors: &mut Vec<ValidationError>) {
    for (i, edge) in workflow.edges.iter().enumerate() {
        let Some(source_node) = workflow.node(&edge.source) else {
            errors.push(ValidationError::UnknownEdgeSource {
                edge_index: i,
                node: edge.source.clone(),
            });
            continue;
        };
        let Some(target_node) = workflow.node(&edge.target) else {
            errors.push(ValidationError::UnknownEdgeTarget {
                edge_index: i,
                node: edge.target.clone(),
            });
            continue;
        };
        if source_node.output(&edge.source_output).is_none() {
            errors.push(ValidationError::UnknownSourceOutput {
                edge_index: i,
                node: edge.source.clone(),
                output: edge.source_output.clone(),
            });
        }
        if target_node.input(&edge.target_input).is_none() {
            errors.push(ValidationError::UnknownTargetInput {
                edge_index: i,
                node: edge.target.clone(),
                input: edge.target_input.clone(),
            });
        }
    }
}

fn check_cycles(workflow: &Workflow, errors: &mut Vec<ValidationError>) {
    let view = GraphView::build(workflow);
    let (_, leftover) = view.levels();
    if !leftover.is_empty() {
        let nodes = leftover
            .into_iter()
            .map(|i| view.node_order[i].clone())
            .collect();
        errors.push(ValidationError::Cycle { nodes });
    }
}

fn check_type_compatibility(workflow: &Workflow, errors: &mut Vec<ValidationError>) {
    for (i, edge) in edges_with_valid_endpoints(workflow) {
        let source_node = workflow.node(&edge.source).expect("checked above");
        let target_node = workflow.node(&edge.target).expect("checked above");
        let (Some(out), Some(input)) = (
            source_node.output(&edge.source_output),
            target_node.input(&edge.target_input),
        ) else {
            continue;
        };
        if !types_compatible(out.param_type, input.param_type) {
            errors.push(ValidationError::TypeMismatch {
                edge_index: i,
                source_type: format!("{:?}", out.param_type),
                target_type: format!("{:?}", input.param_type),
            });
        }
    }
}

fn edges_with_valid_endpoints(workflow: &Workflow) -> impl Iterator<Item = (usize, &Edge)> {
    workflow
        .edges
        .iter()
        .enumerate()
        .filter(|(_, e)| workflow.node(&e.source).is_some() && workflow.node(&e.target).is_some())
}

fn check_required_inputs(workflow: &Workflow, errors: &mut Vec<ValidationError>) {
    for node in &workflow.nodes {
        for input in &node.inputs {
            if !input.required {
                continue;
            }
            let connected = workflow.edges_into(&node.id, &input.name).next().is_some();
            let defaulted = input.value.is_some();
            if !connected && !defaulted {
                errors.push(ValidationError::MissingRequiredInput {
                    node: node.id.clone(),
                    input: input.name.clone(),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use nebula_core::NodeId;
    use nebula_value::ParamType;

    use super::*;
    use crate::model::{InputParam, NodeDef, OutputParam, Trigger};

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
    fn empty_workflow_is_valid() {
        assert!(validate(&workflow(vec![], vec![])).is_empty());
    }

    #[test]
    fn unknown_source_and_target_are_both_reported() {
        let wf = workflow(
            vec![node("a")],
            vec![Edge::new(
                NodeId::new("missing").unwrap(),
                "out",
                NodeId::new("also-missing").unwrap(),
                "in",
            )],
        );
        let errors = validate(&wf);
        assert!(errors.iter().any(|e| matches!(e, ValidationError::UnknownEdgeSource { .. })));
        assert!(errors.iter().any(|e| matches!(e, ValidationError::UnknownEdgeTarget { .. })));
    }

    #[test]
    fn undeclared_ports_are_reported() {
        let a = node("a");
        let mut b = node("b");
        b.inputs.push(InputParam::new("x", ParamType::Number));
        let wf = workflow(
            vec![a, b],
            vec![Edge::new(
                NodeId::new("a").unwrap(),
                "nope",
                NodeId::new("b").unwrap(),
                "nope",
            )],
        );
        let errors = validate(&wf);
        assert!(errors.iter().any(|e| matches!(e, ValidationError::UnknownSourceOutput { .. })));
        assert!(errors.iter().any(|e| matches!(e, ValidationError::UnknownTargetInput { .. })));
    }

    #[test]
    fn simple_cycle_is_detected() {
        let mut a = node("a");
        a.inputs.push(InputParam::new("in", ParamType::Number));
        a.outputs.push(OutputParam::new("out", ParamType::Number));
        let mut b = node("b");
        b.inputs.push(InputParam::new("in", ParamType::Number));
        b.outputs.push(OutputParam::new("out", ParamType::Number));

        let wf = workflow(
            vec![a, b],
            vec![
                Edge::new(NodeId::new("a").unwrap(), "out", NodeId::new("b").unwrap(), "in"),
                Edge::new(NodeId::new("b").unwrap(), "out", NodeId::new("a").unwrap(), "in"),
            ],
        );
        let errors = validate(&wf);
        assert!(errors.iter().any(|e| matches!(e, ValidationError::Cycle { .. })));
    }

    #[test]
    fn type_mismatch_is_reported() {
        let mut a = node("a");
        a.outputs.push(OutputParam::new("out", ParamType::String));
        let mut b = node("b");
        b.inputs.push(InputParam::new("in", ParamType::Number));

        let wf = workflow(
            vec![a, b],
            vec![Edge::new(NodeId::new("a").unwrap(), "out", NodeId::new("b").unwrap(), "in")],
        );
        let errors = validate(&wf);
        assert!(errors.iter().any(|e| matches!(e, ValidationError::TypeMismatch { .. })));
    }

    #[test]
    fn any_and_blob_family_edges_type_check() {
        let mut a = node("a");
        a.outputs.push(OutputParam::new("out", ParamType::Image));
        let mut b = node("b");
        b.inputs.push(InputParam::new("in", ParamType::Blob));

        let wf = workflow(
            vec![a, b],
            vec![Edge::new(NodeId::new("a").unwrap(), "out", NodeId::new("b").unwrap(), "in")],
        );
        assert!(validate(&wf).is_empty());
    }

    #[test]
    fn missing_required_input_without_default_or_edge() {
        let mut a = node("a");
        a.inputs.push(InputParam::new("x", ParamType::Number).required());
        let wf = workflow(vec![a], vec![]);
        let errors = validate(&wf);
        assert!(errors.iter().any(|e| matches!(e, ValidationError::MissingRequiredInput { .. })));
    }

    #[test]
    fn required_input_with_default_is_fine() {
        let mut a = node("a");
        a.inputs.push(
            InputParam::new("x", ParamType::Number)
                .required()
                .with_default(nebula_value::RuntimeValue::number(1.0)),
        );
        let wf = workflow(vec![a], vec![]);
        assert!(validate(&wf).is_empty());
    }

    #[test]
    fn all_rules_run_even_when_one_already_failed() {
        // Dangling edge AND a missing required input on an unrelated node —
        // both should show up, proving there's no early exit.
        let mut lonely = node("lonely");
        lonely.inputs.push(InputParam::new("x", ParamType::Number).required());
        let wf = workflow(
            vec![lonely],
            vec![Edge::new(
                NodeId::new("ghost").unwrap(),
                "out",
                NodeId::new("also-ghost").unwrap(),
                "in",
            )],
        );
        let errors = validate(&wf);
        assert!(errors.iter().any(|e| matches!(e, ValidationError::UnknownEdgeSource { .. })));
        assert!(errors.iter().any(|e| matches!(e, ValidationError::MissingRequiredInput { .. })));
    }
}
