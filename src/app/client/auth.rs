//! OAuth client-credentials token exchange
//!
//! Posts the decoded client id and secret to the token endpoint and pulls the
//! access token out of the JSON answer.

use reqwest::StatusCode;
use serde::Deserialize;
use url::Url;

use crate::app::client::http::{error_message, HttpHandler};
use crate::app::models::BearerToken;
use crate::auth::ClientCredentials;
use crate::constants::api;
use crate::errors::{AuthError, AuthResult};

/// Token endpoint response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
    #[serde(default)]
    scope: Option<String>,
}

/// Handles the token exchange
pub struct TokenHandler;

impl TokenHandler {
    /// Exchanges client credentials for a bearer token
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if:
    /// - The request cannot complete
    /// - The endpoint answers with a non-200 status
    /// - The answer is not a token document
    pub async fn request_token(
        http: &HttpHandler,
        token_url: &Url,
        credentials: &ClientCredentials,
    ) -> AuthResult<BearerToken> {
        tracing::info!("Requesting bearer token from {}", token_url);

        let response = http
            .post_form(
                token_url,
                &[
                    ("client_id", credentials.id()),
                    ("client_secret", credentials.secret()),
                    ("grant_type", api::GRANT_TYPE),
                ],
            )
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK {
            tracing::warn!("Token request rejected with {}", status);
            return Err(AuthError::Rejected {
                message: error_message(status, &body),
            });
        }

        Self::parse_token(&body)
    }

    fn parse_token(body: &str) -> AuthResult<BearerToken> {
        let token: TokenResponse = serde_json::from_str(body)?;

        if token.access_token.is_empty() {
            return Err(AuthError::MalformedResponse(serde::de::Error::custom(
                "access_token is empty",
            )));
        }

        tracing::debug!(
            "Received {} token, expires in {:?}s, scope {:?}",
            token.token_type.as_deref().unwrap_or("unknown"),
            token.expires_in,
            token.scope
        );

        Ok(BearerToken::new(token.access_token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_token() {
        let body = r#"{
            "access_token": "abc123",
            "token_type": "BearerToken",
            "issued_at": 1700000000000,
            "expires_in": 1799,
            "scope": ""
        }"#;

        let token = TokenHandler::parse_token(body).unwrap();
        assert_eq!(token.as_str(), "abc123");
    }

    #[test]
    fn test_parse_token_missing_access_token() {
        let result = TokenHandler::parse_token(r#"{"token_type": "BearerToken"}"#);
        assert!(matches!(result, Err(AuthError::MalformedResponse(_))));
    }

    #[test]
    fn test_parse_token_empty_access_token() {
        let result = TokenHandler::parse_token(r#"{"access_token": ""}"#);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("access_token is empty"));
    }

    #[test]
    fn test_parse_token_not_json() {
        let result = TokenHandler::parse_token("<html>gateway timeout</html>");
        assert!(matches!(result, Err(AuthError::MalformedResponse(_))));
    }
}
