//! The in-memory (node-form) representation of a blob-family value.

use serde::{Deserialize, Serialize};

use crate::reference::ObjectRef;

/// Bytes plus the metadata a node implementation needs to interpret them.
///
/// This is what flows *inside* a node execution. It never appears in
/// `ExecutionState` — the parameter mapper writes the bytes to the object
/// store and stores an [`ObjectRef`] instead (§4.3).
///
/// Serializable (base64-encoded) so an `ActionOutcome` carrying a blob
/// output can round-trip through the Durable-Step Seam's persisted-value
/// encoding (§4.7), not because `ExecutionState` ever stores one directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobValue {
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
    pub mime_type: String,
    pub filename: Option<String>,
}

mod base64_bytes {
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded)
            .map_err(serde::de::Error::custom)
    }
}

impl BlobValue {
    #[must_use]
    pub fn new(data: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            data,
            mime_type: mime_type.into(),
            filename: None,
        }
    }

    #[must_use]
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Carry this blob's metadata over onto a reference that points at it.
    #[must_use]
    pub fn reference_for(&self, object_id: impl Into<String>) -> ObjectRef {
        let mut r = ObjectRef::new(object_id, self.mime_type.clone());
        r.filename = self.filename.clone();
        r
    }
}
