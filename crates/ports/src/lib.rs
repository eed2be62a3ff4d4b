//! # Nebula Ports
//!
//! Backend interface traits (ports) the workflow runtime depends on.
//! Every method is `async` and every trait is object-safe so a host can
//! inject whatever concrete backend it wants — Postgres, S3, an
//! in-memory stub for tests — without the core crates knowing the
//! difference (§4.8).

pub mod credential;
pub mod credit;
pub mod database;
pub mod dataset;
pub mod durable_step;
pub mod error;
pub mod execution_store;
pub mod monitoring;
pub mod object_store;
pub mod queue;

pub use credential::{CredentialService, IntegrationInfo};
pub use credit::{CreditCheck, CreditService};
pub use database::{Connection, DatabaseService, ExecuteOutcome, Row};
pub use dataset::{Dataset, DatasetFile, DatasetService, SearchHit};
pub use durable_step::DurableStepStore;
pub use error::PortsError;
pub use execution_store::{ExecutionStore, ListExecutionsOptions};
pub use monitoring::{MonitoringService, NoopMonitoringService};
pub use object_store::{ObjectMetadata, ObjectStore};
pub use queue::{Queue, QueueService, SendMode};
