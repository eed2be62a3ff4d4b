//! # Nebula Parameter
//!
//! The parameter mapper (§4.3): conversion between the in-memory
//! [`nebula_value::NodeValue`] a node implementation works with and the
//! wire-form [`nebula_value::RuntimeValue`] that lives in execution state.
//!
//! This crate is deliberately thin — it owns no state of its own and
//! depends only on the [`nebula_ports::ObjectStore`] port for blob-family
//! conversions.

pub mod convert;
pub mod date;

pub use convert::{classify_any_reference, node_to_wire, wire_to_node, ConversionDeps};
