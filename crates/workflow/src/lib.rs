//! # Nebula Workflow
//!
//! The workflow definition, its graph validator, and its execution
//! planner. This crate knows nothing about running nodes — it only
//! describes the graph and decides whether and in what order it *can*
//! run.

mod graph;
pub mod model;
pub mod plan;
pub mod validate;

pub use model::{Edge, InputParam, NodeDef, OutputParam, Trigger, Workflow};
pub use plan::{ExecutionPlan, plan};
pub use validate::{ValidationError, validate};
