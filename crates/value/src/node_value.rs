//! `NodeValue` — what a node implementation actually reads and writes.
//!
//! Distinct from [`crate::RuntimeValue`] only in how blobs are carried:
//! bytes in memory here, an [`crate::ObjectRef`] on the wire.

use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

use crate::blob::BlobValue;
use crate::primitive::Primitive;

/// A value as a node implementation sees it.
///
/// `Blob` is declared before `Json` so untagged deserialization (used when
/// an `ActionOutcome` round-trips through the Durable-Step Seam, §4.7)
/// tries the narrower blob shape before falling back to "any JSON value" —
/// `Json`'s variant would otherwise swallow every object shape first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeValue {
    Primitive(Primitive),
    Blob(BlobValue),
    Json(Json),
}

impl NodeValue {
    #[must_use]
    pub fn as_blob(&self) -> Option<&BlobValue> {
        match self {
            Self::Blob(b) => Some(b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_json(&self) -> Option<&Json> {
        match self {
            Self::Json(j) => Some(j),
            _ => None,
        }
    }
}
