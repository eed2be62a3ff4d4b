//! # Nebula Value
//!
//! The runtime value vocabulary shared by the parameter mapper, the node
//! executor, and execution state: parameter type tags, the wire-form
//! [`RuntimeValue`], the node-form [`NodeValue`], and the blob/reference
//! pair that lets large binary payloads skip the execution state entirely.

pub mod blob;
pub mod node_value;
pub mod param_type;
pub mod primitive;
pub mod reference;
pub mod runtime_value;

pub use blob::BlobValue;
pub use node_value::NodeValue;
pub use param_type::{ParamType, types_compatible};
pub use primitive::Primitive;
pub use reference::ObjectRef;
pub use runtime_value::{RuntimeValue, ValueOrMany};
