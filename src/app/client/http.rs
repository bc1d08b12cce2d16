//! Core HTTP operations against the orders API
//!
//! Requests run once; there is no retry or backoff. Any status other than
//! 200 OK is turned into an error carrying the response body, or the status
//! code and reason phrase when the body is empty.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Response, StatusCode};
use url::Url;

use crate::app::models::BearerToken;
use crate::errors::{DownloadError, DownloadResult};

/// Error text for a non-success response
///
/// The body wins when present; otherwise `"<code> -- <reason>"`.
pub fn error_message(status: StatusCode, body: &str) -> String {
    if !body.is_empty() {
        body.to_string()
    } else {
        format!(
            "{} -- {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("")
        )
    }
}

/// HTTP operations handler
#[derive(Debug, Clone)]
pub struct HttpHandler {
    client: Client,
}

impl HttpHandler {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Issues an authenticated GET and returns the successful response
    ///
    /// # Errors
    ///
    /// Returns `DownloadError::Request` if the request cannot complete, or
    /// `DownloadError::Server` if the API answers with anything but 200 OK
    pub async fn get_response(&self, url: &Url, token: &BearerToken) -> DownloadResult<Response> {
        let response = self
            .client
            .get(url.clone())
            .header(AUTHORIZATION, token.authorization_header())
            .send()
            .await
            .map_err(|e| {
                tracing::error!("[GET] {} - Error: {}", url, e);
                DownloadError::Request(e)
            })?;

        tracing::info!("[GET] {} [{}]", url, response.status());
        Self::check_status(response).await
    }

    /// Posts a form-encoded body
    pub async fn post_form(
        &self,
        url: &Url,
        form: &[(&str, &str)],
    ) -> Result<Response, reqwest::Error> {
        let response = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .form(form)
            .send()
            .await?;

        tracing::info!("[POST] {} [{}]", url, response.status());
        Ok(response)
    }

    async fn check_status(response: Response) -> DownloadResult<Response> {
        let status = response.status();
        if status == StatusCode::OK {
            return Ok(response);
        }

        let body = response.text().await?;
        let message = error_message(status, &body);
        tracing::warn!("Asset request rejected with {}: {}", status, message);
        Err(DownloadError::Server { message })
    }

    /// Get a reference to the underlying HTTP client
    pub fn client(&self) -> &Client {
        &self.client
    }
}
