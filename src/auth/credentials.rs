//! OAuth client credentials for the orders API
//!
//! The client id and secret are configured base64-encoded (through
//! `CLIENTCREDENTIALSID` / `CLIENTCREDENTIALSSECRET` or the `[credentials]`
//! table of the config file) and decoded once before the token exchange.

use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::config::CredentialsConfig;
use crate::constants::env as env_constants;
use crate::errors::{ConfigError, ConfigResult};

/// Decoded OAuth client id and secret
#[derive(Clone, PartialEq, Eq)]
pub struct ClientCredentials {
    id: String,
    secret: String,
}

impl ClientCredentials {
    pub fn new(id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            secret: secret.into(),
        }
    }

    /// Decode base64-encoded credentials
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::CredentialDecode` naming the offending setting
    /// when either value is not valid base64
    pub fn from_encoded(encoded_id: &str, encoded_secret: &str) -> ConfigResult<Self> {
        let id = decode(env_constants::CLIENT_CREDENTIALS_ID, encoded_id)?;
        let secret = decode(env_constants::CLIENT_CREDENTIALS_SECRET, encoded_secret)?;
        Ok(Self { id, secret })
    }

    /// Decode the credentials held in configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingField` if either value is absent or
    /// empty, or a decode error as for [`ClientCredentials::from_encoded`]
    pub fn from_config(config: &CredentialsConfig) -> ConfigResult<Self> {
        let id = required(
            env_constants::CLIENT_CREDENTIALS_ID,
            config.client_credentials_id.as_deref(),
        )?;
        let secret = required(
            env_constants::CLIENT_CREDENTIALS_SECRET,
            config.client_credentials_secret.as_deref(),
        )?;
        Self::from_encoded(id, secret)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("id", &"<redacted>")
            .field("secret", &"<redacted>")
            .finish()
    }
}

fn required<'a>(field: &str, value: Option<&'a str>) -> ConfigResult<&'a str> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingField {
            field: field.to_string(),
        })
}

fn decode(field: &str, encoded: &str) -> ConfigResult<String> {
    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|source| ConfigError::CredentialDecode {
            field: field.to_string(),
            source,
        })?;

    String::from_utf8(bytes).map_err(|e| ConfigError::InvalidValue {
        field: field.to_string(),
        value: "<redacted>".to_string(),
        reason: format!("decoded value is not UTF-8: {}", e),
    })
}

/// Authentication status information
#[derive(Debug, Clone)]
pub struct AuthStatus {
    /// Whether a client id is configured
    pub id_set: bool,
    /// Whether a client secret is configured
    pub secret_set: bool,
    /// Whether both configured values decode (None = not both configured)
    pub decodable: Option<bool>,
    /// Whether a token request succeeded (None = not tested)
    ///
    /// `get_auth_status` leaves this unset; `auth status` fills it in after
    /// attempting a token exchange.
    pub credentials_valid: Option<bool>,
}

impl AuthStatus {
    /// Check if both credentials are configured
    pub fn has_credentials(&self) -> bool {
        self.id_set && self.secret_set
    }

    /// Get descriptive status message for display
    pub fn status_message(&self) -> String {
        match (self.has_credentials(), self.decodable, self.credentials_valid) {
            (false, _, _) => format!(
                "Missing credentials - set {} and {}",
                env_constants::CLIENT_CREDENTIALS_ID,
                env_constants::CLIENT_CREDENTIALS_SECRET
            ),
            (true, Some(false), _) => "Credentials configured but not valid base64".to_string(),
            (true, _, None) => "Credentials configured but not verified".to_string(),
            (true, _, Some(true)) => "Credentials configured and verified".to_string(),
            (true, _, Some(false)) => "Credentials configured but rejected".to_string(),
        }
    }
}

/// Check which credentials are configured and whether they decode
pub fn get_auth_status(config: &CredentialsConfig) -> AuthStatus {
    let is_set = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.trim().is_empty());
    let id_set = is_set(&config.client_credentials_id);
    let secret_set = is_set(&config.client_credentials_secret);

    let decodable = (id_set && secret_set).then(|| ClientCredentials::from_config(config).is_ok());

    AuthStatus {
        id_set,
        secret_set,
        decodable,
        credentials_valid: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(value: &str) -> String {
        STANDARD.encode(value)
    }

    fn config(id: Option<&str>, secret: Option<&str>) -> CredentialsConfig {
        CredentialsConfig {
            client_credentials_id: id.map(str::to_string),
            client_credentials_secret: secret.map(str::to_string),
        }
    }

    #[test]
    fn test_from_encoded() {
        let creds =
            ClientCredentials::from_encoded(&encoded("my-client"), &encoded("s3cret")).unwrap();
        assert_eq!(creds.id(), "my-client");
        assert_eq!(creds.secret(), "s3cret");
    }

    #[test]
    fn test_from_encoded_trims_whitespace() {
        let id = format!("  {}\n", encoded("my-client"));
        let creds = ClientCredentials::from_encoded(&id, &encoded("s3cret")).unwrap();
        assert_eq!(creds.id(), "my-client");
    }

    #[test]
    fn test_decode_failure_names_setting() {
        let err = ClientCredentials::from_encoded(&encoded("my-client"), "not base64!!").unwrap_err();
        assert!(matches!(err, ConfigError::CredentialDecode { ref field, .. }
            if field == "CLIENTCREDENTIALSSECRET"));
        assert!(err
            .to_string()
            .starts_with("attempt to decode CLIENTCREDENTIALSSECRET failed:"));
    }

    #[test]
    fn test_from_config_missing() {
        let err = ClientCredentials::from_config(&config(None, Some("eA=="))).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField { ref field } if field == "CLIENTCREDENTIALSID"));

        let err = ClientCredentials::from_config(&config(Some("eA=="), Some("  "))).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField { ref field } if field == "CLIENTCREDENTIALSSECRET"));
    }

    #[test]
    fn test_debug_is_redacted() {
        let creds = ClientCredentials::new("my-client", "s3cret");
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("my-client"));
        assert!(!debug.contains("s3cret"));
    }

    #[test]
    fn test_auth_status() {
        let status = get_auth_status(&config(None, None));
        assert!(!status.has_credentials());
        assert_eq!(status.decodable, None);
        assert!(status.status_message().starts_with("Missing credentials"));

        let status = get_auth_status(&config(Some(&encoded("id")), Some("%%%")));
        assert!(status.has_credentials());
        assert_eq!(status.decodable, Some(false));
        assert!(status.status_message().contains("not valid base64"));

        let mut status = get_auth_status(&config(Some(&encoded("id")), Some(&encoded("s"))));
        assert_eq!(status.decodable, Some(true));
        assert_eq!(
            status.status_message(),
            "Credentials configured but not verified"
        );

        status.credentials_valid = Some(true);
        assert_eq!(status.status_message(), "Credentials configured and verified");

        status.credentials_valid = Some(false);
        assert_eq!(status.status_message(), "Credentials configured but rejected");
    }
}
