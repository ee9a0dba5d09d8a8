//! HTTP adapter for the directory gateway port
//!
//! Translates the three abstract enumeration calls into backend requests and
//! maps HTTP failures onto the port's error classes. Status codes stop here;
//! the application layer only ever sees `GatewayError`.

use crate::config::ApiConfig;
use async_trait::async_trait;
use reqwest::StatusCode;
use roster_application::ports::directory_gateway::{DirectoryGateway, GatewayError};
use roster_domain::{GroupId, RosterKind};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Gateway adapter speaking to the academy backend over HTTP/JSON.
pub struct HttpDirectoryGateway {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpDirectoryGateway {
    pub fn new(config: &ApiConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GatewayError::Other(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get_json(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, GatewayError> {
        let url = self.endpoint(path);
        debug!("GET {url}");

        let mut request = self.client.get(&url).query(query);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(classify_status(status, &url));
        }

        response
            .json()
            .await
            .map_err(|e| GatewayError::RequestFailed(format!("invalid JSON body: {e}")))
    }
}

#[async_trait]
impl DirectoryGateway for HttpDirectoryGateway {
    async fn list_center_members(&self, kind: RosterKind) -> Result<Value, GatewayError> {
        self.get_json("staff/center/members", &[("role", kind.role_param())])
            .await
    }

    async fn list_owned_groups(&self) -> Result<Value, GatewayError> {
        self.get_json("staff/groups", &[]).await
    }

    async fn list_group_members(
        &self,
        group: &GroupId,
        kind: RosterKind,
    ) -> Result<Value, GatewayError> {
        let path = format!("staff/groups/{group}/members");
        self.get_json(&path, &[("role", kind.role_param())]).await
    }
}

/// Map an HTTP status onto the port's failure classes. Forbidden and
/// not-found both mean the caller lacks the privileged path; the backend
/// answers 404 rather than 403 on some deployments.
fn classify_status(status: StatusCode, url: &str) -> GatewayError {
    match status {
        StatusCode::FORBIDDEN => GatewayError::PermissionDenied(format!("{status} from {url}")),
        StatusCode::NOT_FOUND => GatewayError::NotFound(format!("{status} from {url}")),
        _ => GatewayError::RequestFailed(format!("HTTP {status} from {url}")),
    }
}

fn map_transport_error(err: reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        GatewayError::Timeout
    } else {
        GatewayError::ConnectionError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_status_permission_classes() {
        assert!(classify_status(StatusCode::FORBIDDEN, "u").is_permission_denied());
        assert!(classify_status(StatusCode::NOT_FOUND, "u").is_permission_denied());
        assert!(!classify_status(StatusCode::INTERNAL_SERVER_ERROR, "u").is_permission_denied());
        assert!(!classify_status(StatusCode::UNAUTHORIZED, "u").is_permission_denied());
    }

    #[test]
    fn test_endpoint_joining_tolerates_slashes() {
        let config = ApiConfig {
            base_url: "https://academy.example/api/".to_string(),
            token: None,
            timeout_secs: 5,
        };
        let gateway = HttpDirectoryGateway::new(&config).unwrap();
        assert_eq!(
            gateway.endpoint("/staff/groups"),
            "https://academy.example/api/staff/groups"
        );
        assert_eq!(
            gateway.endpoint("staff/groups"),
            "https://academy.example/api/staff/groups"
        );
    }
}
