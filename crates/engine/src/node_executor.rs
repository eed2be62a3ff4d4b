//! The Node Executor (§4.5): execute exactly one node and return exactly
//! one `NodeExecutionResult`, without mutating shared state.
//!
//! Every fallible step in here funnels into `NodeExecutionResult::Error`
//! or `::Skipped` rather than an `Err` escaping to the caller — per §4.5,
//! "the Node Executor never throws to its caller".

use std::collections::HashMap;

use nebula_action::{ActionContext, ActionError, StepSeam};
use nebula_core::{ExecutionId, OrganizationId, WorkflowId};
use nebula_execution::{ExecutionState, NodeExecutionResult, infer_skip_reason};
use nebula_parameter::{ConversionDeps, node_to_wire, wire_to_node};
use nebula_ports::PortsError;
use nebula_value::{NodeValue, ParamType, Primitive, RuntimeValue, ValueOrMany};
use nebula_workflow::{NodeDef, Workflow};
use tokio_util::sync::CancellationToken;

use crate::services::ServiceBundle;

/// What input gathering (§4.5 steps 1–3) produced for one node.
enum Gathered {
    Ready(HashMap<String, ValueOrMany<NodeValue>>),
    Skip(nebula_execution::SkipClassification),
}

/// Execute `node` against `state` (read-only: other nodes in the same
/// level may be executing concurrently against the same snapshot, which
/// is safe because no two nodes in a level share an edge — §5).
#[allow(clippy::too_many_arguments)]
pub async fn execute_node(
    workflow: &Workflow,
    registry: &nebula_action::ActionRegistry,
    services: &ServiceBundle,
    step_seam: &StepSeam,
    node: &NodeDef,
    state: &ExecutionState,
    org_id: OrganizationId,
    execution_id: ExecutionId,
    workflow_id: WorkflowId,
    cancellation: CancellationToken,
) -> NodeExecutionResult {
    let gathered = match gather_inputs(workflow, services, node, state, org_id).await {
        Ok(Gathered::Ready(inputs)) => inputs,
        Ok(Gathered::Skip(classification)) => {
            return NodeExecutionResult::skipped(classification.reason, classification.blocked_by);
        }
        Err(message) => return NodeExecutionResult::error(message, 0),
    };

    let Some(action) = registry.get(&node.node_type) else {
        return NodeExecutionResult::error(format!("unknown node type `{}`", node.node_type), 0);
    };

    let ctx = ActionContext::new(
        execution_id,
        node.id.clone(),
        workflow_id,
        gathered,
        step_seam.clone(),
        cancellation,
    );

    let step_name = format!("node:{}", node.id);
    let outcome = step_seam
        .execute_step(&step_name, || async move { action.execute(&ctx).await })
        .await;

    match outcome {
        Ok(outcome) => {
            match outputs_to_wire(node, outcome.outputs, services, org_id, execution_id).await {
                Ok(outputs) => NodeExecutionResult::completed(outputs, outcome.usage),
                Err(message) => NodeExecutionResult::error(message, outcome.usage),
            }
        }
        Err(err) => NodeExecutionResult::error(action_error_message(&err), 0),
    }
}

fn action_error_message(err: &ActionError) -> String {
    err.to_string()
}

async fn gather_inputs(
    workflow: &Workflow,
    services: &ServiceBundle,
    node: &NodeDef,
    state: &ExecutionState,
    org_id: OrganizationId,
) -> Result<Gathered, String> {
    let object_store = services.object_store.as_deref();
    let mut inputs = HashMap::with_capacity(node.inputs.len());

    for param in &node.inputs {
        let mut contributing: Vec<RuntimeValue> = Vec::new();
        for edge in workflow.edges_into(&node.id, &param.name) {
            if !state.executed_nodes.contains(&edge.source) {
                continue;
            }
            let Some(value) = state
                .node_outputs
                .get(&edge.source)
                .and_then(|outputs| outputs.get(&edge.source_output))
            else {
                continue;
            };
            match value {
                ValueOrMany::One(v) => contributing.push(v.clone()),
                ValueOrMany::Many(vs) => contributing.extend(vs.iter().cloned()),
            }
        }

        let wire_value = if contributing.is_empty() {
            param.value.clone().map(ValueOrMany::One)
        } else {
            ValueOrMany::from_collected(contributing)
        };

        let Some(wire_value) = wire_value else {
            if param.required {
                let classification = infer_skip_reason(workflow, state, &node.id);
                return Ok(Gathered::Skip(classification));
            }
            continue;
        };

        let node_value = convert_wire_to_node(param.param_type, &wire_value, object_store)
            .await
            .map_err(|e| e.to_string())?;
        let node_value = resolve_service_kind(param.param_type, node_value, services, org_id)
            .await
            .map_err(|e| e.to_string())?;

        inputs.insert(param.name.clone(), node_value);
    }

    Ok(Gathered::Ready(inputs))
}

async fn convert_wire_to_node(
    param_type: ParamType,
    value: &ValueOrMany<RuntimeValue>,
    object_store: Option<&dyn nebula_ports::ObjectStore>,
) -> Result<ValueOrMany<NodeValue>, PortsError> {
    match value {
        ValueOrMany::One(v) => Ok(ValueOrMany::One(
            wire_to_node(param_type, v, object_store).await?,
        )),
        ValueOrMany::Many(vs) => {
            let mut out = Vec::with_capacity(vs.len());
            for v in vs {
                out.push(wire_to_node(param_type, v, object_store).await?);
            }
            Ok(ValueOrMany::Many(out))
        }
    }
}

/// Step 2 of §4.5: runtime-only kinds resolved by asking the
/// corresponding service. `queue`/`database`/`dataset` only resolve far
/// enough to surface a deterministic not-found/missing-dependency error —
/// the live `Queue`/`Connection`/`Dataset` handle isn't representable as
/// a `NodeValue`, so a node implementation that actually sends/queries
/// holds its own `Arc<dyn QueueService>` (etc.) and calls `resolve` again
/// with the id this step already validated. `email` has no backing port
/// in the service contract (§4.8) and passes through unchanged.
async fn resolve_service_kind(
    param_type: ParamType,
    value: ValueOrMany<NodeValue>,
    services: &ServiceBundle,
    org_id: OrganizationId,
) -> Result<ValueOrMany<NodeValue>, PortsError> {
    if !param_type.is_service_resolved() {
        return Ok(value);
    }
    match value {
        ValueOrMany::One(v) => Ok(ValueOrMany::One(
            resolve_one(param_type, v, services, org_id).await?,
        )),
        ValueOrMany::Many(vs) => {
            let mut out = Vec::with_capacity(vs.len());
            for v in vs {
                out.push(resolve_one(param_type, v, services, org_id).await?);
            }
            Ok(ValueOrMany::Many(out))
        }
    }
}

fn value_as_id(value: &NodeValue, param_type: ParamType) -> Result<String, PortsError> {
    match value {
        NodeValue::Primitive(Primitive::String(s)) => Ok(s.clone()),
        _ => Err(PortsError::Serialization(format!(
            "{param_type:?} input must be a string identifier"
        ))),
    }
}

async fn resolve_one(
    param_type: ParamType,
    value: NodeValue,
    services: &ServiceBundle,
    org_id: OrganizationId,
) -> Result<NodeValue, PortsError> {
    let id = value_as_id(&value, param_type)?;

    match param_type {
        ParamType::Secret => {
            let credential = services
                .credential_service
                .as_deref()
                .ok_or_else(|| PortsError::missing_dependency("CredentialService", "secret input"))?;
            let secret = credential
                .get_secret(&id)
                .await?
                .ok_or_else(|| PortsError::not_found("Secret", &id))?;
            Ok(NodeValue::Primitive(Primitive::String(secret)))
        }
        ParamType::Integration => {
            let credential = services.credential_service.as_deref().ok_or_else(|| {
                PortsError::missing_dependency("CredentialService", "integration input")
            })?;
            let info = credential.get_integration(&id).await?;
            let json = serde_json::to_value(info)?;
            Ok(NodeValue::Json(json))
        }
        ParamType::Queue => {
            let queues = services
                .queue_service
                .as_deref()
                .ok_or_else(|| PortsError::missing_dependency("QueueService", "queue input"))?;
            queues
                .resolve(&id, org_id)
                .await?
                .ok_or_else(|| PortsError::not_found("Queue", &id))?;
            Ok(value)
        }
        ParamType::Database => {
            let databases = services
                .database_service
                .as_deref()
                .ok_or_else(|| PortsError::missing_dependency("DatabaseService", "database input"))?;
            databases
                .resolve(&id, org_id)
                .await?
                .ok_or_else(|| PortsError::not_found("Database", &id))?;
            Ok(value)
        }
        ParamType::Dataset => {
            let datasets = services
                .dataset_service
                .as_deref()
                .ok_or_else(|| PortsError::missing_dependency("DatasetService", "dataset input"))?;
            datasets
                .resolve(&id, org_id)
                .await?
                .ok_or_else(|| PortsError::not_found("Dataset", &id))?;
            Ok(value)
        }
        _ => Ok(value),
    }
}

async fn outputs_to_wire(
    node: &NodeDef,
    outputs: HashMap<String, ValueOrMany<NodeValue>>,
    services: &ServiceBundle,
    org_id: OrganizationId,
    execution_id: ExecutionId,
) -> Result<HashMap<String, ValueOrMany<RuntimeValue>>, String> {
    let object_store = services.object_store.as_deref();
    let mut wire = HashMap::with_capacity(outputs.len());

    for (name, value) in outputs {
        let Some(declared) = node.output(&name) else {
            // Unknown output name: no downstream edge could reference it
            // since validation (§4.1) checked every edge's source output
            // against the node's declared outputs. Drop it rather than
            // erroring the node over an implementation's extra field.
            continue;
        };
        let deps = ConversionDeps {
            object_store,
            org_id: Some(org_id),
            execution_id: Some(execution_id),
        };
        let converted = match value {
            ValueOrMany::One(v) => {
                let wire_one = node_to_wire(declared.param_type, &v, deps)
                    .await
                    .map_err(|e| e.to_string())?;
                wire_one.map(ValueOrMany::One)
            }
            ValueOrMany::Many(vs) => {
                let mut out = Vec::with_capacity(vs.len());
                for v in &vs {
                    match node_to_wire(declared.param_type, v, deps).await {
                        Ok(Some(w)) => out.push(w),
                        Ok(None) => {}
                        Err(e) => return Err(e.to_string()),
                    }
                }
                ValueOrMany::from_collected(out)
            }
        };
        if let Some(converted) = converted {
            wire.insert(name, converted);
        }
    }

    Ok(wire)
}
