//! Application constants for the Viya Orders client
//!
//! This module centralizes all constants used throughout the application,
//! organized by functional domain.

use std::time::Duration;

/// Environment variable names
pub mod env {
    /// Base64-encoded OAuth client id
    pub const CLIENT_CREDENTIALS_ID: &str = "CLIENTCREDENTIALSID";

    /// Base64-encoded OAuth client secret
    pub const CLIENT_CREDENTIALS_SECRET: &str = "CLIENTCREDENTIALSSECRET";

    /// Directory where downloaded assets are saved
    pub const FILE_PATH: &str = "VIYA4_ORDERS_FILE_PATH";

    /// File name (without extension) for downloaded assets
    pub const FILE_NAME: &str = "VIYA4_ORDERS_FILE_NAME";

    /// Output format
    pub const OUTPUT: &str = "VIYA4_ORDERS_OUTPUT";
}

/// Viya Orders API endpoints
pub mod api {
    /// API host
    pub const HOST: &str = "https://api.sas.com";

    /// Base path shared by every endpoint
    pub const BASE_PATH: &str = "/mysas";

    /// Token endpoint, relative to the base path
    pub const TOKEN_PATH: &str = "/token";

    /// Orders collection, relative to the base path
    pub const ORDERS_PATH: &str = "/orders";

    /// OAuth grant used for the token exchange
    pub const GRANT_TYPE: &str = "client_credentials";
}

/// Order number format
pub mod order {
    /// Exact length of an order number
    pub const ORDER_NUMBER_LENGTH: usize = 6;
}

/// Deployment asset archive layout
pub mod cadence {
    /// Member of the deployment assets archive carrying cadence information
    pub const CHECKSUMS_FILE: &str = "sas-bases/checksums.txt";

    /// Label preceding the cadence display name
    pub const DISPLAY_NAME_LABEL: &str = "Cadence Display Name:";

    /// Whitespace token index of the display name value, counted from the label
    pub const DISPLAY_NAME_TOKEN: usize = 3;

    /// Label preceding the cadence release
    pub const RELEASE_LABEL: &str = "Cadence Release:";

    /// Whitespace token index of the release value, counted from the label
    pub const RELEASE_TOKEN: usize = 2;
}

/// HTTP client configuration constants
pub mod http {
    use super::Duration;

    /// Default user agent for all HTTP requests
    pub const USER_AGENT: &str = concat!("viya4-orders-cli/", env!("CARGO_PKG_VERSION"));

    /// Default HTTP request timeout
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

    /// Connection establishment timeout
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
}

/// Configuration file locations
pub mod config {
    /// Config file looked up in the working directory
    pub const LOCAL_FILE_NAME: &str = "viya4-orders-cli.toml";

    /// Config file looked up in the home directory
    pub const HOME_FILE_NAME: &str = ".viya4-orders-cli.toml";

    /// Directory under the user config dir
    pub const APP_DIR_NAME: &str = "viya4-orders-cli";

    /// File name under the user config dir
    pub const APP_FILE_NAME: &str = "config.toml";
}

// Re-export commonly used constants for convenience
pub use api::HOST as API_HOST;
pub use cadence::CHECKSUMS_FILE;
pub use http::{DEFAULT_TIMEOUT as HTTP_TIMEOUT, USER_AGENT};
