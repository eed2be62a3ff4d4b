//! Object store port — the only place large binary payloads live.
//!
//! The parameter mapper (`nebula-parameter`) is the sole caller of this
//! trait from inside the core; node implementations that need presigned
//! URLs call it directly through their own context.

use async_trait::async_trait;
use nebula_core::{ExecutionId, OrganizationId};
use nebula_value::ObjectRef;
use serde::{Deserialize, Serialize};

use crate::error::PortsError;

/// Metadata about a stored object, as returned by [`ObjectStore::list`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectMetadata {
    pub id: String,
    pub mime_type: String,
    pub filename: Option<String>,
    pub size_bytes: u64,
}

/// Content-addressed (or at least opaquely-addressed) blob storage scoped
/// to an organization and, optionally, a single execution.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Write bytes, scoped to `(org_id, execution_id)`, and return a
    /// reference the caller can round-trip through `ExecutionState`.
    async fn write_object(
        &self,
        bytes: Vec<u8>,
        mime_type: &str,
        org_id: OrganizationId,
        execution_id: Option<ExecutionId>,
        filename: Option<&str>,
    ) -> Result<ObjectRef, PortsError>;

    /// Resolve a reference back to its bytes and metadata.
    async fn read_object(&self, reference: &ObjectRef) -> Result<Vec<u8>, PortsError>;

    /// Delete an object. The store owns retention; the runtime never
    /// calls this on the happy path.
    async fn delete_object(&self, reference: &ObjectRef) -> Result<(), PortsError>;

    /// Produce a time-limited URL for direct download.
    async fn presign(&self, reference: &ObjectRef, ttl_seconds: u64) -> Result<String, PortsError>;

    /// Convenience: write then immediately presign in one call.
    async fn write_and_presign(
        &self,
        bytes: Vec<u8>,
        mime_type: &str,
        org_id: OrganizationId,
        ttl_seconds: u64,
    ) -> Result<String, PortsError> {
        let reference = self
            .write_object(bytes, mime_type, org_id, None, None)
            .await?;
        self.presign(&reference, ttl_seconds).await
    }

    /// List everything stored for an organization.
    async fn list(&self, org_id: OrganizationId) -> Result<Vec<ObjectMetadata>, PortsError>;
}
