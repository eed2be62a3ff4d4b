//! The parameter mapper (§4.3): the sole place that knows how to move a
//! value between its node form and its wire form.

use nebula_core::{ExecutionId, OrganizationId};
use nebula_ports::{ObjectStore, PortsError};
use nebula_value::{BlobValue, NodeValue, ObjectRef, ParamType, Primitive, RuntimeValue};

use crate::date;

/// The object store and scoping ids a blob-family conversion needs.
/// Optional because not every run configures an object store, and most
/// parameter types never touch it.
#[derive(Clone, Copy, Default)]
pub struct ConversionDeps<'a> {
    pub object_store: Option<&'a dyn ObjectStore>,
    pub org_id: Option<OrganizationId>,
    pub execution_id: Option<ExecutionId>,
}

impl<'a> ConversionDeps<'a> {
    #[must_use]
    pub fn new(object_store: &'a dyn ObjectStore, org_id: OrganizationId) -> Self {
        Self {
            object_store: Some(object_store),
            org_id: Some(org_id),
            execution_id: None,
        }
    }

    #[must_use]
    pub fn with_execution(mut self, execution_id: ExecutionId) -> Self {
        self.execution_id = Some(execution_id);
        self
    }
}

/// Convert a node-form value to its wire form (§4.3 `nodeToApi`).
///
/// `Ok(None)` means the value didn't match `param_type`'s expected shape
/// (an `undefined` result in the source engine) — the caller treats that
/// the same as "this edge contributed nothing". `Err` is reserved for the
/// deterministic `missing_dependency` failure when a blob-family type
/// needs an object store that wasn't injected.
pub async fn node_to_wire(
    param_type: ParamType,
    value: &NodeValue,
    deps: ConversionDeps<'_>,
) -> Result<Option<RuntimeValue>, PortsError> {
    if param_type.is_blob_family() {
        return node_blob_to_wire(value, deps).await;
    }

    if param_type == ParamType::Any {
        return node_any_to_wire(value, deps).await;
    }

    if param_type == ParamType::Date {
        return Ok(node_date_to_wire(value));
    }

    if param_type.is_json_family() {
        return Ok(Some(node_json_to_wire(value)));
    }

    // Primitives and runtime-resolved scalar kinds (secret, integration,
    // queue, database, dataset, email): the node form is already the
    // wire form as long as the dynamic shape matches.
    Ok(node_scalar_to_wire(param_type, value))
}

async fn node_blob_to_wire(
    value: &NodeValue,
    deps: ConversionDeps<'_>,
) -> Result<Option<RuntimeValue>, PortsError> {
    let NodeValue::Blob(blob) = value else {
        return Ok(None);
    };
    let store = deps
        .object_store
        .ok_or_else(|| PortsError::missing_dependency("ObjectStore", "blob-family output"))?;
    let org_id = deps
        .org_id
        .ok_or_else(|| PortsError::missing_dependency("OrganizationId", "blob-family output"))?;

    let reference = store
        .write_object(
            blob.data.clone(),
            &blob.mime_type,
            org_id,
            deps.execution_id,
            blob.filename.as_deref(),
        )
        .await?;
    Ok(Some(RuntimeValue::Reference(reference)))
}

fn node_date_to_wire(value: &NodeValue) -> Option<RuntimeValue> {
    let raw = match value {
        NodeValue::Primitive(Primitive::String(s)) => s.clone(),
        NodeValue::Primitive(Primitive::Number(n)) => n.to_string(),
        NodeValue::Json(json) => match json {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Number(n) => n.to_string(),
            _ => return None,
        },
        NodeValue::Blob(_) => return None,
    };
    date::normalize_to_rfc3339_utc(&raw).map(RuntimeValue::string)
}

fn node_json_to_wire(value: &NodeValue) -> RuntimeValue {
    match value {
        NodeValue::Json(json) => RuntimeValue::from_json(json.clone()),
        NodeValue::Primitive(p) => RuntimeValue::from_json(p.to_json()),
        NodeValue::Blob(_) => RuntimeValue::JsonObject(serde_json::Map::new()),
    }
}

fn node_scalar_to_wire(param_type: ParamType, value: &NodeValue) -> Option<RuntimeValue> {
    let NodeValue::Primitive(p) = value else {
        return None;
    };
    let matches = match (param_type, p) {
        (ParamType::String | ParamType::Secret | ParamType::Integration | ParamType::Queue
            | ParamType::Database | ParamType::Dataset | ParamType::Email, Primitive::String(_)) => true,
        (ParamType::Number, Primitive::Number(_)) => true,
        (ParamType::Boolean, Primitive::Boolean(_)) => true,
        _ => false,
    };
    matches.then(|| RuntimeValue::Primitive(p.clone()))
}

async fn node_any_to_wire(
    value: &NodeValue,
    deps: ConversionDeps<'_>,
) -> Result<Option<RuntimeValue>, PortsError> {
    match value {
        NodeValue::Blob(_) => node_blob_to_wire(value, deps).await,
        NodeValue::Json(json) => Ok(Some(RuntimeValue::from_json(json.clone()))),
        NodeValue::Primitive(p) => Ok(Some(RuntimeValue::Primitive(p.clone()))),
    }
}

/// Convert a wire-form value back to node form (§4.3 `apiToNode`).
pub async fn wire_to_node(
    param_type: ParamType,
    value: &RuntimeValue,
    object_store: Option<&dyn ObjectStore>,
) -> Result<NodeValue, PortsError> {
    if param_type.is_blob_family() {
        return wire_blob_to_node(value, object_store).await;
    }

    if param_type == ParamType::Any {
        return wire_any_to_node(value, object_store).await;
    }

    if param_type.is_json_family() {
        return Ok(wire_json_to_node(value));
    }

    Ok(wire_scalar_to_node(value))
}

async fn wire_blob_to_node(
    value: &RuntimeValue,
    object_store: Option<&dyn ObjectStore>,
) -> Result<NodeValue, PortsError> {
    let RuntimeValue::Reference(reference) = value else {
        return Ok(wire_scalar_to_node(value));
    };
    let store = object_store
        .ok_or_else(|| PortsError::missing_dependency("ObjectStore", "blob-family input"))?;
    let data = store.read_object(reference).await?;
    let mut blob = BlobValue::new(data, reference.mime_type.clone());
    blob.filename = reference.filename.clone();
    Ok(NodeValue::Blob(blob))
}

fn wire_json_to_node(value: &RuntimeValue) -> NodeValue {
    match value {
        RuntimeValue::Primitive(Primitive::String(s)) => serde_json::from_str(s)
            .map(NodeValue::Json)
            .unwrap_or_else(|_| NodeValue::Primitive(Primitive::String(s.clone()))),
        other => NodeValue::Json(other.to_json()),
    }
}

fn wire_scalar_to_node(value: &RuntimeValue) -> NodeValue {
    match value {
        RuntimeValue::Primitive(p) => NodeValue::Primitive(p.clone()),
        other => NodeValue::Json(other.to_json()),
    }
}

async fn wire_any_to_node(
    value: &RuntimeValue,
    object_store: Option<&dyn ObjectStore>,
) -> Result<NodeValue, PortsError> {
    match value {
        RuntimeValue::Reference(reference) => {
            let store = object_store
                .ok_or_else(|| PortsError::missing_dependency("ObjectStore", "`any`-typed blob input"))?;
            let _ = ParamType::from_mime_type(&reference.mime_type); // classification recorded by the caller
            let data = store.read_object(reference).await?;
            let mut blob = BlobValue::new(data, reference.mime_type.clone());
            blob.filename = reference.filename.clone();
            Ok(NodeValue::Blob(blob))
        }
        RuntimeValue::Primitive(p) => Ok(NodeValue::Primitive(p.clone())),
        other => Ok(NodeValue::Json(other.to_json())),
    }
}

/// Classify an `any`-typed object reference into the narrowest blob tag,
/// for callers that need to know *which* blob type they ended up with
/// (§4.3: "classify the resulting blob type by mimeType").
#[must_use]
pub fn classify_any_reference(reference: &ObjectRef) -> ParamType {
    ParamType::from_mime_type(&reference.mime_type)
}
