//! Database service port — resolving a workflow-declared connection
//! handle and running parameterized statements through it.

use async_trait::async_trait;
use nebula_core::OrganizationId;
use serde_json::Value as Json;

use crate::error::PortsError;

/// One result row, as a JSON object keyed by column name.
pub type Row = serde_json::Map<String, Json>;

/// Outcome of a write statement.
#[derive(Debug, Clone, Default)]
pub struct ExecuteOutcome {
    pub rows_affected: u64,
    pub last_insert_rowid: Option<i64>,
}

#[async_trait]
pub trait Connection: Send + Sync {
    async fn query(&self, sql: &str, params: &[Json]) -> Result<Vec<Row>, PortsError>;
    async fn execute(&self, sql: &str, params: &[Json]) -> Result<ExecuteOutcome, PortsError>;
}

#[async_trait]
pub trait DatabaseService: Send + Sync {
    async fn resolve(
        &self,
        db_id_or_handle: &str,
        org_id: OrganizationId,
    ) -> Result<Option<std::sync::Arc<dyn Connection>>, PortsError>;
}
