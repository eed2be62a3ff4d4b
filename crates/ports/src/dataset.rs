//! Dataset service port — file storage and search scoped to a declared
//! dataset.

use async_trait::async_trait;
use nebula_core::OrganizationId;
use serde::{Deserialize, Serialize};

use crate::error::PortsError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetFile {
    pub path: String,
    pub size_bytes: u64,
    pub mime_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub path: String,
    pub score: f64,
    pub snippet: Option<String>,
}

#[async_trait]
pub trait Dataset: Send + Sync {
    async fn list_files(&self) -> Result<Vec<DatasetFile>, PortsError>;
    async fn get_file(&self, path: &str) -> Result<Vec<u8>, PortsError>;
    async fn upload_file(&self, path: &str, bytes: Vec<u8>, mime_type: &str) -> Result<DatasetFile, PortsError>;
    async fn delete_file(&self, path: &str) -> Result<(), PortsError>;
    /// Exact / lexical search over file contents.
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, PortsError>;
    /// Embedding-backed semantic search.
    async fn ai_search(&self, query: &str) -> Result<Vec<SearchHit>, PortsError>;
}

#[async_trait]
pub trait DatasetService: Send + Sync {
    async fn resolve(
        &self,
        dataset_id: &str,
        org_id: OrganizationId,
    ) -> Result<Option<std::sync::Arc<dyn Dataset>>, PortsError>;
}
