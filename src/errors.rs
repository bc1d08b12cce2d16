//! Error types for the Viya Orders client
//!
//! Each stage of a retrieval has its own error enum so callers can tell a bad
//! credential from a bad order number from a malformed archive. Every variant
//! carries the underlying cause in its message.

use std::path::PathBuf;
use thiserror::Error;

/// Token exchange errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// The token request could not be completed
    #[error("Bearer token request failed to complete: {0}")]
    Http(#[from] reqwest::Error),

    /// The token endpoint answered with a non-success status
    #[error("Bearer token request failed: {message}")]
    Rejected { message: String },

    /// The token endpoint answered with something other than a token document
    #[error("unmarshalling of token API response failed: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}

/// Configuration and credential errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file given on the command line does not exist
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Configuration file could not be read
    #[error("Failed to read configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for this application
    #[error("Invalid configuration format in {path}: {source}")]
    InvalidFormat {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A required setting is not present anywhere
    #[error("Missing required configuration field: {field}")]
    MissingField { field: String },

    /// A setting is present but unusable
    #[error("Invalid configuration value for {field}: {value}. {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    /// A base64-encoded credential could not be decoded
    #[error("attempt to decode {field} failed: {source}")]
    CredentialDecode {
        field: String,
        source: base64::DecodeError,
    },
}

/// Request parameter errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Order number is not six letters and digits with at least one of each
    #[error("Given order number '{order_number}' does not have the format of a valid order number.")]
    OrderNumber { order_number: String },

    /// Asset kind is not one the API serves
    #[error("Unknown asset kind '{value}'. Expected one of: license, deploymentAssets, certificates, assetHistory")]
    AssetKind { value: String },

    /// Output format is not text or json
    #[error("invalid value {value} specified for -o, --output option! Valid values: j, json, t, text")]
    OutputFormat { value: String },
}

/// Asset download errors
#[derive(Error, Debug)]
pub enum DownloadError {
    /// The asset request could not be completed
    #[error("asset request failed to complete: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("asset request failed: {message}")]
    Server { message: String },

    /// The request URL could not be assembled
    #[error("Invalid URL: {url} - {error}")]
    InvalidUrl { url: String, error: String },

    /// The response body stream failed partway through saving
    #[error("download to {path} interrupted after {written} bytes: {source}")]
    Interrupted {
        path: PathBuf,
        written: u64,
        source: reqwest::Error,
    },

    /// Local file system failure while saving the asset
    #[error("attempt to {operation} {path} failed: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Unparsable response headers, archives, or manifest content
#[derive(Error, Debug)]
pub enum FormatError {
    /// Response carried no Content-Disposition header
    #[error("response has no Content-Disposition header")]
    MissingContentDisposition,

    /// Content-Disposition header could not be parsed
    #[error("malformed Content-Disposition header '{header}': {reason}")]
    ContentDisposition { header: String, reason: String },

    /// Archive could not be opened or read
    #[error("attempt to read {path} failed: {source}")]
    Archive {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Archive ended before the checksums manifest was found
    #[error("end of file reached in {path} before cadence information found")]
    ChecksumsNotFound { path: PathBuf },

    /// Archive member was shorter than its header declared
    #[error("attempt to read {member} failed: read {actual} of {expected} bytes")]
    TruncatedMember {
        member: String,
        expected: u64,
        actual: u64,
    },

    /// Checksums manifest does not have the expected field layout
    #[error("cadence field '{label}' not found in expected layout: {reason}")]
    ManifestField { label: String, reason: String },
}

/// Top-level application error that can represent any error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Authentication error
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Validation error
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Download error
    #[error(transparent)]
    Download(#[from] DownloadError),

    /// Format error
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Generic I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Generic application error with context
    #[error("Application error: {message}")]
    Generic { message: String },
}

impl AppError {
    /// Create a generic application error with a message
    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Auth(_) => "authentication",
            AppError::Config(_) => "config",
            AppError::Validation(_) => "validation",
            AppError::Download(DownloadError::Request(_))
            | AppError::Download(DownloadError::InvalidUrl { .. })
            | AppError::Download(DownloadError::Interrupted { .. }) => "request",
            AppError::Download(DownloadError::Server { .. }) => "server",
            AppError::Download(DownloadError::Io { .. }) | AppError::Io(_) => "io",
            AppError::Format(_) => "format",
            AppError::Generic { .. } => "generic",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Authentication result type alias
pub type AuthResult<T> = std::result::Result<T, AuthError>;

/// Configuration result type alias
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Download result type alias
pub type DownloadResult<T> = std::result::Result<T, DownloadError>;

/// Format result type alias
pub type FormatResult<T> = std::result::Result<T, FormatError>;
