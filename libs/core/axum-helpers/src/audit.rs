//! Audit trail for data modifications.
//!
//! Events go to the `audit` tracing target so they can be routed separately.
//!
//! ```ignore
//! use axum_helpers::audit::{AuditEvent, AuditOutcome, ClientInfo};
//!
//! async fn delete_user(client: ClientInfo, UuidPath(id): UuidPath) {
//!     // ...
//!     AuditEvent::new("user.delete", Some(format!("user:{}", id)), AuditOutcome::Success)
//!         .with_client(&client)
//!         .log();
//! }
//! ```

use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::{HeaderMap, header, request::Parts},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::convert::Infallible;
use std::net::SocketAddr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditOutcome {
    Success,
    /// Rejected or failed (validation, missing record, storage fault)
    Failure,
}

/// One audited action.
#[derive(Debug, Serialize)]
pub struct AuditEvent {
    /// e.g. "user.create", "user.delete"
    pub action: String,
    /// e.g. "user:0190a5c1-..."
    pub resource: Option<String>,
    pub outcome: AuditOutcome,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
    pub details: Option<serde_json::Value>,
}

impl AuditEvent {
    pub fn new(action: impl Into<String>, resource: Option<String>, outcome: AuditOutcome) -> Self {
        Self {
            action: action.into(),
            resource,
            outcome,
            ip_address: None,
            user_agent: None,
            timestamp: Utc::now(),
            details: None,
        }
    }

    pub fn with_client(mut self, client: &ClientInfo) -> Self {
        self.ip_address = client.ip.clone();
        self.user_agent = client.user_agent.clone();
        self
    }

    /// Attach extra context, serialized to JSON.
    pub fn with_details(mut self, details: impl Serialize) -> Self {
        self.details = serde_json::to_value(details).ok();
        self
    }

    /// Emit on the `audit` target.
    pub fn log(self) {
        tracing::info!(
            target: "audit",
            action = %self.action,
            resource = self.resource,
            outcome = ?self.outcome,
            ip = self.ip_address,
            user_agent = self.user_agent,
            timestamp = %self.timestamp,
            details = ?self.details,
            "{}",
            serde_json::to_string(&self).unwrap_or_else(|_| "Failed to serialize audit event".to_string())
        );
    }
}

/// Caller address and user agent, taken from proxy headers or the socket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientInfo {
    pub ip: Option<String>,
    pub user_agent: Option<String>,
}

impl<S> FromRequestParts<S> for ClientInfo
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let socket = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);

        Ok(Self {
            ip: extract_ip_from_headers(&parts.headers).or_else(|| extract_ip_from_socket(socket)),
            user_agent: extract_user_agent(&parts.headers),
        })
    }
}

/// First address in `X-Forwarded-For`, else `X-Real-IP`.
pub fn extract_ip_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .map(|s| s.trim().to_string())
        })
}

pub fn extract_ip_from_socket(socket: Option<SocketAddr>) -> Option<String> {
    socket.map(|addr| addr.ip().to_string())
}

pub fn extract_user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, Request};

    #[test]
    fn test_forwarded_for_takes_first_hop() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("203.0.113.7, 10.0.0.1"));
        headers.insert("x-real-ip", HeaderValue::from_static("10.0.0.2"));
        assert_eq!(extract_ip_from_headers(&headers).as_deref(), Some("203.0.113.7"));
    }

    #[test]
    fn test_real_ip_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.4"));
        assert_eq!(extract_ip_from_headers(&headers).as_deref(), Some("198.51.100.4"));
    }

    #[tokio::test]
    async fn test_client_info_falls_back_to_socket() {
        let request = Request::builder()
            .header(header::USER_AGENT, "curl/8.5.0")
            .extension(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 4000))))
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();

        let client = ClientInfo::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(client.ip.as_deref(), Some("127.0.0.1"));
        assert_eq!(client.user_agent.as_deref(), Some("curl/8.5.0"));
    }

    #[test]
    fn test_audit_event_serializes_outcome_lowercase() {
        let event = AuditEvent::new("user.create", Some("user:1".to_string()), AuditOutcome::Success)
            .with_client(&ClientInfo {
                ip: Some("127.0.0.1".to_string()),
                user_agent: None,
            });
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["outcome"], "success");
        assert_eq!(json["ip_address"], "127.0.0.1");
    }
}
