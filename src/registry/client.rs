//! HTTP client shared foundation
//!
//! This module provides a shared HTTP client with:
//! - A short request timeout so the update check never stalls the CLI
//! - A User-Agent identifying the tool
//! - Single-attempt JSON fetching that maps every failure to `RegistryError`

use crate::error::{ConfigError, RegistryError};
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Default timeout for HTTP requests (5 seconds)
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default User-Agent header
const DEFAULT_USER_AGENT: &str = concat!("wheel/", env!("CARGO_PKG_VERSION"));

/// HTTP client wrapper
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_config(DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(timeout: Duration, user_agent: &str) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| ConfigError::HttpClient {
                message: e.to_string(),
            })?;

        Ok(Self { client, timeout })
    }

    /// Configured request timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Perform one GET request and parse the JSON body
    ///
    /// Only status 200 counts as success.
    pub async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        package: &str,
        registry: &str,
    ) -> Result<T, RegistryError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            let message = if e.is_timeout() {
                format!("timed out after {}s", self.timeout.as_secs())
            } else {
                e.to_string()
            };
            RegistryError::unavailable(package, registry, message)
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(RegistryError::unavailable(
                package,
                registry,
                format!("HTTP {}", status),
            ));
        }

        response.json::<T>().await.map_err(|e| {
            RegistryError::unavailable(package, registry, format!("failed to parse JSON: {}", e))
        })
    }
}
