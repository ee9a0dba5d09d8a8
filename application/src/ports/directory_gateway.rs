//! Directory gateway port
//!
//! Defines the interface for the academy backend's enumeration endpoints.

use async_trait::async_trait;
use roster_domain::{GroupId, RosterKind};
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur during gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

impl GatewayError {
    /// Whether this failure means the caller lacks the privileged path.
    ///
    /// The backend answers the privileged endpoint with access-forbidden or
    /// resource-not-found for non-admin callers; both settle the session
    /// capability. Everything else is transient and retryable.
    pub fn is_permission_denied(&self) -> bool {
        matches!(
            self,
            GatewayError::PermissionDenied(_) | GatewayError::NotFound(_)
        )
    }
}

/// Gateway to the academy backend's enumeration endpoints.
///
/// This port defines how the application layer reaches the backend.
/// Implementations (adapters) live in the infrastructure layer. All three
/// calls return the raw response envelope; callers normalize it through the
/// domain's envelope unwrapping, so the core never depends on wire shapes.
#[async_trait]
pub trait DirectoryGateway: Send + Sync {
    /// Privileged enumeration: the full center roster in one call.
    /// Only reachable for elevated callers.
    async fn list_center_members(&self, kind: RosterKind) -> Result<Value, GatewayError>;

    /// The groups owned by the current caller.
    async fn list_owned_groups(&self) -> Result<Value, GatewayError>;

    /// The members of one owned group.
    async fn list_group_members(
        &self,
        group: &GroupId,
        kind: RosterKind,
    ) -> Result<Value, GatewayError>;
}
