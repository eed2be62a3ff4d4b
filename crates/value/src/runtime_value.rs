//! `RuntimeValue` — the wire form stored in `ExecutionState` and persisted
//! between runs.
//!
//! Per the design notes, this is a closed variant rather than the loose
//! JSON blob the original engine passed around: primitive, object
//! reference, or one of the two JSON container shapes. Every converter in
//! `nebula-parameter` dispatches on this enum instead of pattern-matching
//! raw `serde_json::Value`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};

use crate::primitive::Primitive;
use crate::reference::ObjectRef;

/// A value as it sits in `ExecutionState` or travels over the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuntimeValue {
    Primitive(Primitive),
    Reference(ObjectRef),
    JsonArray(Vec<Json>),
    JsonObject(Map<String, Json>),
}

impl RuntimeValue {
    #[must_use]
    pub fn string(s: impl Into<String>) -> Self {
        Self::Primitive(Primitive::String(s.into()))
    }

    #[must_use]
    pub fn number(n: f64) -> Self {
        Self::Primitive(Primitive::Number(n))
    }

    #[must_use]
    pub fn boolean(b: bool) -> Self {
        Self::Primitive(Primitive::Boolean(b))
    }

    /// Classify an arbitrary JSON value into the closed variant. Used when
    /// a node implementation hands back a raw `serde_json::Value` for a
    /// `json` / GeoJSON / `any` output.
    #[must_use]
    pub fn from_json(value: Json) -> Self {
        match value {
            Json::Array(items) => Self::JsonArray(items),
            Json::Object(map) => Self::JsonObject(map),
            other => Primitive::from_json(&other).map_or_else(
                || Self::JsonObject(Map::new()),
                Self::Primitive,
            ),
        }
    }

    #[must_use]
    pub fn to_json(&self) -> Json {
        match self {
            Self::Primitive(p) => p.to_json(),
            Self::Reference(r) => serde_json::to_value(r).unwrap_or(Json::Null),
            Self::JsonArray(items) => Json::Array(items.clone()),
            Self::JsonObject(map) => Json::Object(map.clone()),
        }
    }

    /// `true` if this value shape looks like a blob object reference
    /// (used by the `any`-type dispatch in §4.3).
    #[must_use]
    pub fn as_reference(&self) -> Option<&ObjectRef> {
        match self {
            Self::Reference(r) => Some(r),
            _ => None,
        }
    }
}

/// Either a single value or an ordered list of values — the shape of a
/// node's input once multiple edges have fanned into the same parameter,
/// or of an output a node declares as repeating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValueOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> ValueOrMany<T> {
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        match self {
            Self::One(v) => std::slice::from_ref(v),
            Self::Many(items) => items,
        }
    }

    pub fn from_collected(mut items: Vec<T>) -> Option<Self> {
        match items.len() {
            0 => None,
            1 => Some(Self::One(items.pop().expect("len checked"))),
            _ => Some(Self::Many(items)),
        }
    }
}
