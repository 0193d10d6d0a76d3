//! HTTP client for a REST users collection.

pub mod remote;
pub mod users;

use std::time::Duration;

use crate::config::Config;
use crate::error::{ClientError, Result};

/// HTTP client for the users API.
#[derive(Debug, Clone)]
pub struct UsersyncClient {
    client: reqwest::Client,
    base_url: String,
}

impl UsersyncClient {
    /// Create a new client with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: normalize_base_url(base_url.into()),
        }
    }

    /// Create a client whose requests fail after `timeout`.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: normalize_base_url(base_url.into()),
        })
    }

    /// Create from a loaded [`Config`].
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::with_timeout(&config.base_url, config.timeout())
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a URL for an endpoint.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Handle error responses.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
        resource: &str,
    ) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            response.json().await.map_err(ClientError::from)
        } else {
            Err(Self::error_from(response, resource).await)
        }
    }

    /// Handle delete responses (body ignored).
    async fn handle_delete_response(&self, response: reqwest::Response, resource: &str) -> Result<()> {
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_from(response, resource).await)
        }
    }

    async fn error_from(response: reqwest::Response, resource: &str) -> ClientError {
        let status = response.status().as_u16();
        tracing::debug!(status, resource, "Request failed");

        if status == 404 {
            return ClientError::NotFound {
                resource: resource.to_string(),
            };
        }

        let message = response
            .text()
            .await
            .ok()
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| "Unknown error".to_string());
        ClientError::ServerError { status, message }
    }
}

fn normalize_base_url(base_url: String) -> String {
    base_url.trim_end_matches('/').to_string()
}
