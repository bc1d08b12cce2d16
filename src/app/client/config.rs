//! HTTP client configuration and building logic
//!
//! This module handles the configuration and construction of the HTTP client
//! used for both the token exchange and asset downloads.

use std::time::Duration;

use reqwest::Client;

use crate::constants::{api, http};
use crate::errors::{AuthError, AuthResult};

/// Configuration for the orders API HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Scheme and host of the orders API
    pub api_base_url: String,
    /// Request timeout
    pub request_timeout: Duration,
    /// Connect timeout
    pub connect_timeout: Duration,
    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: api::HOST.to_string(),
            request_timeout: http::DEFAULT_TIMEOUT,
            connect_timeout: http::CONNECT_TIMEOUT,
            user_agent: http::USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Builds the HTTP client with the specified configuration
    pub fn build_http_client(&self) -> AuthResult<Client> {
        Client::builder()
            .timeout(self.request_timeout)
            .connect_timeout(self.connect_timeout)
            .user_agent(self.user_agent.as_str())
            .build()
            .map_err(AuthError::Http)
    }
}
