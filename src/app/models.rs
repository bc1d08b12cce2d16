//! Data models for the Viya Orders client
//!
//! This module defines the request and result values that flow through an
//! asset retrieval, along with the small validated types they are built from.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::order::ORDER_NUMBER_LENGTH;
use crate::errors::ValidationError;

/// Downloadable artifact categories served by the orders API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetKind {
    /// Software license file
    #[serde(rename = "license")]
    License,
    /// Deployment assets tarball
    #[serde(rename = "deploymentAssets")]
    DeploymentAssets,
    /// Certificates bundle
    #[serde(rename = "certificates")]
    Certificates,
    /// History of completed asset downloads
    #[serde(rename = "assetHistory")]
    AssetHistory,
}

impl AssetKind {
    /// Kinds fetched together by the `getall` command
    pub const DOWNLOADABLE: [AssetKind; 3] = [
        AssetKind::License,
        AssetKind::DeploymentAssets,
        AssetKind::Certificates,
    ];

    /// Final URL path segment, also used as the display name
    pub fn path_segment(&self) -> &'static str {
        match self {
            Self::License => "license",
            Self::DeploymentAssets => "deploymentAssets",
            Self::Certificates => "certificates",
            Self::AssetHistory => "assetHistory",
        }
    }

    /// Whether cadence information is reported for this kind
    pub fn has_cadence(&self) -> bool {
        matches!(self, Self::License | Self::DeploymentAssets)
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

impl FromStr for AssetKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "license" => Ok(Self::License),
            "deploymentAssets" => Ok(Self::DeploymentAssets),
            "certificates" => Ok(Self::Certificates),
            "assetHistory" => Ok(Self::AssetHistory),
            other => Err(ValidationError::AssetKind {
                value: other.to_string(),
            }),
        }
    }
}

/// Check the order number format
///
/// An order number is exactly six ASCII letters and digits, with at least
/// one letter and at least one digit.
pub fn is_valid_order_number(order_number: &str) -> bool {
    if order_number.len() != ORDER_NUMBER_LENGTH {
        return false;
    }

    if !order_number.chars().all(|c| c.is_ascii_alphanumeric()) {
        return false;
    }

    order_number.chars().any(|c| c.is_ascii_alphabetic())
        && order_number.chars().any(|c| c.is_ascii_digit())
}

/// An order number that passed format validation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderNumber(String);

impl OrderNumber {
    /// Validate and wrap an order number
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::OrderNumber` naming the rejected value
    pub fn parse(order_number: &str) -> Result<Self, ValidationError> {
        if is_valid_order_number(order_number) {
            Ok(Self(order_number.to_string()))
        } else {
            Err(ValidationError::OrderNumber {
                order_number: order_number.to_string(),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How the retrieval summary is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One `Label: value` line per field
    #[default]
    Text,
    /// Indented JSON object
    Json,
}

impl OutputFormat {
    /// Interpret a format name the way the renderer does: `json`/`j` in any
    /// case selects JSON, everything else falls back to text
    pub fn from_lenient(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "json" | "j" => Self::Json,
            _ => Self::Text,
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "t" => Ok(Self::Text),
            "json" | "j" => Ok(Self::Json),
            _ => Err(ValidationError::OutputFormat {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Json => f.write_str("json"),
        }
    }
}

/// Short-lived OAuth access token
///
/// The API grants roughly thirty minutes of validity. One token is fetched
/// per process run and never refreshed.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header
    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

/// Parameters of a single asset request
///
/// Built once through the `with_*` methods and never changed afterwards.
/// Empty optional values are stored as `None`.
#[derive(Debug, Clone)]
pub struct AssetRequest {
    token: BearerToken,
    kind: AssetKind,
    order_number: OrderNumber,
    cadence_name: Option<String>,
    cadence_version: Option<String>,
    cadence_release: Option<String>,
    file_path: Option<PathBuf>,
    file_name: Option<String>,
    output: OutputFormat,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl AssetRequest {
    /// Create a request, validating the order number
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::OrderNumber` if the order number is malformed
    pub fn new(
        token: BearerToken,
        kind: AssetKind,
        order_number: &str,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            token,
            kind,
            order_number: OrderNumber::parse(order_number)?,
            cadence_name: None,
            cadence_version: None,
            cadence_release: None,
            file_path: None,
            file_name: None,
            output: OutputFormat::Text,
        })
    }

    pub fn with_cadence(mut self, name: Option<String>, version: Option<String>) -> Self {
        self.cadence_name = non_empty(name);
        self.cadence_version = non_empty(version);
        self
    }

    /// Cadence release only applies to deployment assets and is ignored otherwise
    pub fn with_cadence_release(mut self, release: Option<String>) -> Self {
        self.cadence_release = match self.kind {
            AssetKind::DeploymentAssets => non_empty(release),
            _ => None,
        };
        self
    }

    pub fn with_file_path(mut self, path: Option<PathBuf>) -> Self {
        self.file_path = path.filter(|p| !p.as_os_str().is_empty());
        self
    }

    pub fn with_file_name(mut self, name: Option<String>) -> Self {
        self.file_name = non_empty(name);
        self
    }

    pub fn with_output(mut self, output: OutputFormat) -> Self {
        self.output = output;
        self
    }

    pub fn token(&self) -> &BearerToken {
        &self.token
    }

    pub fn kind(&self) -> AssetKind {
        self.kind
    }

    pub fn order_number(&self) -> &OrderNumber {
        &self.order_number
    }

    pub fn cadence_name(&self) -> Option<&str> {
        self.cadence_name.as_deref()
    }

    pub fn cadence_version(&self) -> Option<&str> {
        self.cadence_version.as_deref()
    }

    pub fn cadence_release(&self) -> Option<&str> {
        self.cadence_release.as_deref()
    }

    pub fn file_path(&self) -> Option<&PathBuf> {
        self.file_path.as_ref()
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn output(&self) -> OutputFormat {
        self.output
    }
}

/// Summary of a completed retrieval
///
/// Field order here is the order of the text output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetResult {
    #[serde(rename = "orderNumber")]
    pub order_number: String,
    #[serde(rename = "assetName")]
    pub asset_name: String,
    #[serde(rename = "assetReqURL")]
    pub asset_req_url: String,
    #[serde(rename = "assetLocation")]
    pub asset_location: String,
    #[serde(rename = "cadence")]
    pub cadence: String,
    #[serde(rename = "cadenceRelease")]
    pub cadence_release: String,
}

impl AssetResult {
    /// Labeled fields in display order
    pub fn fields(&self) -> [(&'static str, &str); 6] {
        [
            ("OrderNumber", self.order_number.as_str()),
            ("AssetName", self.asset_name.as_str()),
            ("AssetReqURL", self.asset_req_url.as_str()),
            ("AssetLocation", self.asset_location.as_str()),
            ("Cadence", self.cadence.as_str()),
            ("CadenceRelease", self.cadence_release.as_str()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_order_numbers() {
        assert!(is_valid_order_number("99A456"));
        assert!(is_valid_order_number("a1b2c3"));
        assert!(is_valid_order_number("Z00000"));
    }

    #[test]
    fn test_invalid_order_numbers() {
        assert!(!is_valid_order_number("994567")); // no letter
        assert!(!is_valid_order_number("ABCDEF")); // no digit
        assert!(!is_valid_order_number("99A45")); // too short
        assert!(!is_valid_order_number("99A4567")); // too long
        assert!(!is_valid_order_number("99A45!")); // disallowed character
        assert!(!is_valid_order_number("99A 45"));
        assert!(!is_valid_order_number(""));
        assert!(!is_valid_order_number("99Ä456"));
    }

    #[test]
    fn test_order_number_parse_error_names_value() {
        let err = OrderNumber::parse("994567").unwrap_err();
        assert_eq!(
            err,
            ValidationError::OrderNumber {
                order_number: "994567".to_string()
            }
        );
        assert!(err.to_string().contains("994567"));
    }

    #[test]
    fn test_asset_kind_round_trip_names() {
        for kind in [
            AssetKind::License,
            AssetKind::DeploymentAssets,
            AssetKind::Certificates,
            AssetKind::AssetHistory,
        ] {
            assert_eq!(kind.path_segment().parse::<AssetKind>().unwrap(), kind);
        }
        assert!("licence".parse::<AssetKind>().is_err());
    }

    #[test]
    fn test_cadence_kinds() {
        assert!(AssetKind::License.has_cadence());
        assert!(AssetKind::DeploymentAssets.has_cadence());
        assert!(!AssetKind::Certificates.has_cadence());
        assert!(!AssetKind::AssetHistory.has_cadence());
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("J".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("t".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("yaml".parse::<OutputFormat>().is_err());

        assert_eq!(OutputFormat::from_lenient("JSON"), OutputFormat::Json);
        assert_eq!(OutputFormat::from_lenient("yaml"), OutputFormat::Text);
    }

    #[test]
    fn test_bearer_token_debug_is_redacted() {
        let token = BearerToken::new("secret-token");
        assert!(!format!("{:?}", token).contains("secret-token"));
        assert_eq!(token.authorization_header(), "Bearer secret-token");
    }

    #[test]
    fn test_request_normalizes_empty_values() {
        let request = AssetRequest::new(BearerToken::new("t"), AssetKind::License, "99A456")
            .unwrap()
            .with_cadence(Some("stable".to_string()), Some(String::new()))
            .with_file_name(Some(String::new()))
            .with_file_path(Some(PathBuf::new()));

        assert_eq!(request.cadence_name(), Some("stable"));
        assert_eq!(request.cadence_version(), None);
        assert_eq!(request.file_name(), None);
        assert_eq!(request.file_path(), None);
    }

    #[test]
    fn test_release_only_kept_for_deployment_assets() {
        let license = AssetRequest::new(BearerToken::new("t"), AssetKind::License, "99A456")
            .unwrap()
            .with_cadence_release(Some("20250115".to_string()));
        assert_eq!(license.cadence_release(), None);

        let assets =
            AssetRequest::new(BearerToken::new("t"), AssetKind::DeploymentAssets, "99A456")
                .unwrap()
                .with_cadence_release(Some("20250115".to_string()));
        assert_eq!(assets.cadence_release(), Some("20250115"));
    }

    #[test]
    fn test_request_rejects_bad_order() {
        let result = AssetRequest::new(BearerToken::new("t"), AssetKind::Certificates, "99A45");
        assert!(matches!(result, Err(ValidationError::OrderNumber { .. })));
    }

    #[test]
    fn test_result_field_order() {
        let result = AssetResult {
            order_number: "99A456".to_string(),
            asset_name: "license".to_string(),
            ..Default::default()
        };
        let labels: Vec<&str> = result.fields().iter().map(|(label, _)| *label).collect();
        assert_eq!(
            labels,
            [
                "OrderNumber",
                "AssetName",
                "AssetReqURL",
                "AssetLocation",
                "Cadence",
                "CadenceRelease"
            ]
        );
    }
}
