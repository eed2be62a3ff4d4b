//! Identifiers for workflow entities.
//!
//! Workflow, execution, organization and deployment identifiers are UUIDs —
//! assigned by the host, never authored by a user. Node identifiers are
//! short strings declared by whoever authors the workflow graph (`"add"`,
//! `"http-1"`, ...), so they get a string-backed key instead of a UUID.

use domain_key::{define_domain, define_uuid, key_type};

define_uuid!(WorkflowIdDomain => WorkflowId);
define_uuid!(ExecutionIdDomain => ExecutionId);
define_uuid!(OrganizationIdDomain => OrganizationId);
define_uuid!(DeploymentIdDomain => DeploymentId);

define_domain!(NodeIdDomain, "node");
key_type!(NodeId, NodeIdDomain);
