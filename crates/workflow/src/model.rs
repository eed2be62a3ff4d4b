//! The immutable workflow definition: nodes, edges, and parameters.

use nebula_core::NodeId;
use nebula_value::{ParamType, RuntimeValue};
use serde::{Deserialize, Serialize};

/// What kicked off an execution of this workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    Manual,
    Http,
    Email,
    Queue,
    Cron,
}

/// A declared input parameter on a node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputParam {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: ParamType,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub value: Option<RuntimeValue>,
    #[serde(default)]
    pub hidden: bool,
}

impl InputParam {
    #[must_use]
    pub fn new(name: impl Into<String>, param_type: ParamType) -> Self {
        Self {
            name: name.into(),
            param_type,
            required: false,
            value: None,
            hidden: false,
        }
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn with_default(mut self, value: RuntimeValue) -> Self {
        self.value = Some(value);
        self
    }
}

/// A declared output parameter on a node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputParam {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: ParamType,
}

impl OutputParam {
    #[must_use]
    pub fn new(name: impl Into<String>, param_type: ParamType) -> Self {
        Self {
            name: name.into(),
            param_type,
        }
    }
}

/// A node in the workflow graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeDef {
    pub id: NodeId,
    /// Selects the `ExecutableNode` implementation from the node registry.
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub inputs: Vec<InputParam>,
    #[serde(default)]
    pub outputs: Vec<OutputParam>,
    /// Statically declared usage estimate, summed by the Runtime Core's
    /// pre-flight credit check (§4.6 step 3). Not the actual usage a run
    /// reports — that comes back from the node implementation itself.
    #[serde(default)]
    pub estimated_usage: i64,
}

impl NodeDef {
    #[must_use]
    pub fn new(id: NodeId, node_type: impl Into<String>) -> Self {
        Self {
            id,
            node_type: node_type.into(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            estimated_usage: 0,
        }
    }

    #[must_use]
    pub fn with_estimated_usage(mut self, estimated_usage: i64) -> Self {
        self.estimated_usage = estimated_usage;
        self
    }

    #[must_use]
    pub fn input(&self, name: &str) -> Option<&InputParam> {
        self.inputs.iter().find(|p| p.name == name)
    }

    #[must_use]
    pub fn output(&self, name: &str) -> Option<&OutputParam> {
        self.outputs.iter().find(|p| p.name == name)
    }
}

/// A typed connection from one node's output to another's input.
///
/// Edges are declared in an order; that order is the tie-breaker whenever
/// more than one edge feeds the same `target_input` (§3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeId,
    pub source_output: String,
    pub target: NodeId,
    pub target_input: String,
}

impl Edge {
    #[must_use]
    pub fn new(
        source: NodeId,
        source_output: impl Into<String>,
        target: NodeId,
        target_input: impl Into<String>,
    ) -> Self {
        Self {
            source,
            source_output: source_output.into(),
            target,
            target_input: target_input.into(),
        }
    }
}

/// An immutable workflow definition: a typed graph of nodes and edges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workflow {
    pub id: nebula_core::WorkflowId,
    pub trigger: Trigger,
    pub nodes: Vec<NodeDef>,
    pub edges: Vec<Edge>,
}

impl Workflow {
    #[must_use]
    pub fn node(&self, id: &NodeId) -> Option<&NodeDef> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    /// Edges whose `target`/`target_input` match, in declaration order.
    pub fn edges_into(&self, target: &NodeId, target_input: &str) -> impl Iterator<Item = &Edge> {
        self.edges
            .iter()
            .filter(move |e| &e.target == target && e.target_input == target_input)
    }

    /// All edges with inbound connections to `target`, in declaration order.
    pub fn inbound_edges(&self, target: &NodeId) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(move |e| &e.target == target)
    }
}
