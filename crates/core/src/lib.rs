//! # Nebula Core
//!
//! Identifiers and a small error type shared by every crate in the workflow
//! runtime. Kept deliberately thin: this crate has no knowledge of graphs,
//! parameters, or execution — just the vocabulary other crates build on.

pub mod error;
pub mod id;

pub use error::CoreError;
pub use id::{DeploymentId, ExecutionId, NodeId, OrganizationId, WorkflowId};

/// Result type used throughout the core crates.
pub type Result<T> = std::result::Result<T, CoreError>;
