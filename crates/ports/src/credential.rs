//! Credential service port — secrets and third-party integration tokens.

use async_trait::async_trait;
use nebula_core::OrganizationId;
use serde::{Deserialize, Serialize};

use crate::error::PortsError;

/// A resolved OAuth-style integration credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegrationInfo {
    pub token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub token_expires_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

#[async_trait]
pub trait CredentialService: Send + Sync {
    /// Scope subsequent lookups to an organization. Node executors call
    /// this once per run before resolving any `secret` / `integration`
    /// input.
    async fn initialize(&self, org_id: OrganizationId) -> Result<(), PortsError>;

    /// Look up a named secret. `None` means the secret does not exist —
    /// that is distinct from a connection failure (`Err`).
    async fn get_secret(&self, name: &str) -> Result<Option<String>, PortsError>;

    async fn get_integration(&self, id: &str) -> Result<IntegrationInfo, PortsError>;
}
