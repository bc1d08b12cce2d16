//! HTTP client for the Viya Orders API
//!
//! The module is organized into specialized components:
//! - `config`: HTTP client configuration and building
//! - `auth`: OAuth client-credentials token exchange
//! - `http`: authenticated requests and status classification
//! - `download`: file naming and body persistence

use url::Url;

use crate::app::models::{AssetKind, AssetRequest, BearerToken};
use crate::auth::ClientCredentials;
use crate::constants::api;
use crate::errors::{AuthResult, ConfigError, DownloadError, DownloadResult, Result};

// Module declarations
pub mod auth;
pub mod config;
pub mod download;
pub mod http;

pub use config::ClientConfig;

use auth::TokenHandler;
use http::HttpHandler;

/// Path of an asset endpoint
///
/// `/mysas/orders/<order>/` followed by the optional cadence name, version,
/// and release segments (name and version lower-cased), then the asset kind.
/// Empty optional values add no segment.
pub fn asset_path(
    order_number: &str,
    cadence_name: Option<&str>,
    cadence_version: Option<&str>,
    cadence_release: Option<&str>,
    kind: AssetKind,
) -> String {
    let mut path = format!("{}{}/{}/", api::BASE_PATH, api::ORDERS_PATH, order_number);

    if let Some(name) = cadence_name.filter(|n| !n.is_empty()) {
        path.push_str("cadenceNames/");
        path.push_str(&name.to_lowercase());
        path.push('/');
    }

    if let Some(version) = cadence_version.filter(|v| !v.is_empty()) {
        path.push_str("cadenceVersions/");
        path.push_str(&version.to_lowercase());
        path.push('/');
    }

    if let Some(release) = cadence_release.filter(|r| !r.is_empty()) {
        path.push_str("cadenceReleases/");
        path.push_str(release);
        path.push('/');
    }

    path.push_str(kind.path_segment());
    path
}

/// HTTP client for the orders API
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct OrdersClient {
    http_handler: HttpHandler,
    base_url: Url,
}

impl OrdersClient {
    /// Creates a client with default configuration
    pub fn new() -> Result<Self> {
        Self::new_with_config(&ClientConfig::default())
    }

    /// Creates a client with custom configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the API base URL does not parse,
    /// or `AuthError` if the HTTP client cannot be built
    pub fn new_with_config(config: &ClientConfig) -> Result<Self> {
        let base_url =
            Url::parse(&config.api_base_url).map_err(|e| ConfigError::InvalidValue {
                field: "client.api_base_url".to_string(),
                value: config.api_base_url.clone(),
                reason: e.to_string(),
            })?;
        let client = config.build_http_client()?;

        tracing::debug!("Created orders API client for {}", base_url);

        Ok(Self {
            http_handler: HttpHandler::new(client),
            base_url,
        })
    }

    /// Exchanges client credentials for a bearer token
    pub async fn request_token(&self, credentials: &ClientCredentials) -> AuthResult<BearerToken> {
        let token_url = self.token_url();
        TokenHandler::request_token(&self.http_handler, &token_url, credentials).await
    }

    /// Token endpoint URL
    pub fn token_url(&self) -> Url {
        self.with_path(&format!("{}{}", api::BASE_PATH, api::TOKEN_PATH))
    }

    /// Request URL for an asset
    pub fn asset_url(&self, request: &AssetRequest) -> DownloadResult<Url> {
        let path = asset_path(
            request.order_number().as_str(),
            request.cadence_name(),
            request.cadence_version(),
            request.cadence_release(),
            request.kind(),
        );

        let url = self.with_path(&path);
        if url.cannot_be_a_base() {
            return Err(DownloadError::InvalidUrl {
                url: url.to_string(),
                error: "API base URL cannot carry a path".to_string(),
            });
        }
        Ok(url)
    }

    /// Base URL with `path` appended to any path it already carries
    fn with_path(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        let prefix = url.path().trim_end_matches('/').to_string();
        url.set_path(&format!("{}{}", prefix, path));
        url.set_query(None);
        url
    }

    pub(crate) fn http(&self) -> &HttpHandler {
        &self.http_handler
    }

    /// Get the base URL of the orders API
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}
