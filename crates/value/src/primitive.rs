//! The primitive leaf of both the wire and node value variants.

use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

/// A scalar value with no further structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Primitive {
    Null,
    String(String),
    Number(f64),
    Boolean(bool),
}

impl Primitive {
    /// Best-effort conversion from a `serde_json::Value`. Returns `None` for
    /// arrays and objects — those belong in `RuntimeValue::JsonArray` /
    /// `JsonObject`, not here.
    #[must_use]
    pub fn from_json(value: &Json) -> Option<Self> {
        match value {
            Json::Null => Some(Self::Null),
            Json::String(s) => Some(Self::String(s.clone())),
            Json::Bool(b) => Some(Self::Boolean(*b)),
            Json::Number(n) => n.as_f64().map(Self::Number),
            Json::Array(_) | Json::Object(_) => None,
        }
    }

    #[must_use]
    pub fn to_json(&self) -> Json {
        match self {
            Self::Null => Json::Null,
            Self::String(s) => Json::String(s.clone()),
            Self::Number(n) => serde_json::Number::from_f64(*n)
                .map(Json::Number)
                .unwrap_or(Json::Null),
            Self::Boolean(b) => Json::Bool(*b),
        }
    }
}
