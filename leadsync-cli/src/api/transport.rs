//! HTTP transport used by the HubSpot client

use async_trait::async_trait;
use reqwest::Client;

use super::error::CrmError;
use super::operations::{HttpMethod, Operation};
use crate::config::SyncConfig;

/// Raw response: status plus undecoded body text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    #[cfg(test)]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one [`Operation`] and returns whatever the server answered.
///
/// Implementations must not interpret the status code; mapping non-2xx
/// responses to errors is the client's job.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, operation: &Operation) -> Result<ApiResponse, CrmError>;
}

/// reqwest-backed transport for the real API
#[derive(Clone)]
pub struct ReqwestTransport {
    http_client: Client,
    base_url: String,
    access_token: String,
}

impl ReqwestTransport {
    pub fn new(config: &SyncConfig) -> Result<Self, CrmError> {
        if !config.verify_tls {
            log::warn!("TLS certificate verification is disabled for {}", config.base_url);
        }

        let http_client = Client::builder()
            .danger_accept_invalid_certs(!config.verify_tls)
            .build()?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            access_token: config.access_token.clone(),
        })
    }

    fn url(&self, operation: &Operation) -> String {
        format!("{}{}", self.base_url, operation.path())
    }
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, operation: &Operation) -> Result<ApiResponse, CrmError> {
        let url = self.url(operation);
        let mut request = match operation.http_method() {
            HttpMethod::Post => self.http_client.post(&url),
            HttpMethod::Patch => self.http_client.patch(&url),
        };

        request = request
            .header("Authorization", format!("Bearer {}", self.access_token))
            .header("Content-Type", "application/json");

        if let Some(body) = operation.body()? {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_range() {
        assert!(ApiResponse::new(200, "").is_success());
        assert!(ApiResponse::new(204, "").is_success());
        assert!(!ApiResponse::new(199, "").is_success());
        assert!(!ApiResponse::new(300, "").is_success());
        assert!(!ApiResponse::new(404, "").is_success());
        assert!(!ApiResponse::new(500, "").is_success());
    }

    #[test]
    fn test_url_joins_base_without_double_slash() {
        let config = SyncConfig::builder()
            .access_token("pat-123")
            .base_url("https://example.test/")
            .build();
        let transport = ReqwestTransport::new(&config).unwrap();

        assert_eq!(
            transport.url(&Operation::search_contact("a@x.com")),
            "https://example.test/crm/v3/objects/contacts/search"
        );
    }

    #[test]
    fn test_debug_hides_token() {
        let config = SyncConfig::builder().access_token("pat-secret").build();
        let transport = ReqwestTransport::new(&config).unwrap();
        assert!(!format!("{:?}", transport).contains("pat-secret"));
    }
}
