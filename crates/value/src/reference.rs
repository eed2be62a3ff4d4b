//! Object references — the wire form of every blob-family value.

use serde::{Deserialize, Serialize};

/// Opaque pointer to bytes held by the object store.
///
/// The `id` is never interpreted by the runtime; only the object store
/// that issued it knows how to resolve it back to bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRef {
    pub id: String,
    pub mime_type: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub filename: Option<String>,
}

impl ObjectRef {
    #[must_use]
    pub fn new(id: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            mime_type: mime_type.into(),
            filename: None,
        }
    }

    #[must_use]
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }
}
