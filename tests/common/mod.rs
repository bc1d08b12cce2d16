//! Shared helpers for integration tests
//!
//! Provides an in-process stand-in for the orders API and fixture archives.
//! Order numbers select the stub's behavior:
//!
//! - `99E404`: every asset answers 404 with body `order not found`
//! - `99E500`: every asset answers 500 with an empty body
//! - `99N0CD`: every asset answers 200 without a Content-Disposition header
//! - `99C500`: certificates answer 500 with a body; other kinds succeed
//! - `99BRKN`: every asset answers 200, then the body stream fails partway
//! - anything else: every asset succeeds

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::extract::{Form, Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use flate2::write::GzEncoder;
use flate2::Compression;
use futures::{stream, StreamExt};
use tokio::net::TcpListener;

use viya_orders::app::{BearerToken, ClientConfig, OrdersClient};
use viya_orders::auth::ClientCredentials;

pub const CLIENT_ID: &str = "test-client";
pub const CLIENT_SECRET: &str = "test-secret";
pub const ACCESS_TOKEN: &str = "stub-access-token";

pub const LICENSE_BODY: &[u8] = b"-----BEGIN LICENSE-----\nstub\n-----END LICENSE-----\n";

pub const CHECKSUMS: &str = "\
# SAS Viya deployment assets
Cadence Display Name: Stable 2025.01
Cadence Release: 20250115.1736951234567
a1b2c3d4  sas-bases/base/kustomization.yaml
";

#[derive(Clone, Default)]
struct StubState {
    requests: Arc<Mutex<Vec<String>>>,
}

/// A running stub of the orders API
pub struct StubServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    /// Start the stub on an ephemeral port
    pub async fn start() -> Self {
        let state = StubState::default();
        let requests = state.requests.clone();

        let app = Router::new()
            .route("/mysas/token", post(token_endpoint))
            .route("/mysas/orders/*rest", get(asset))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            requests,
        }
    }

    /// Client pointed at this stub
    pub fn client(&self) -> OrdersClient {
        let config = ClientConfig {
            api_base_url: self.base_url.clone(),
            ..ClientConfig::default()
        };
        OrdersClient::new_with_config(&config).unwrap()
    }

    /// Paths of the asset requests received so far
    pub fn requested_paths(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

pub fn credentials() -> ClientCredentials {
    ClientCredentials::new(CLIENT_ID, CLIENT_SECRET)
}

/// Token as issued by the stub
pub fn token() -> BearerToken {
    BearerToken::new(ACCESS_TOKEN)
}

/// A gzip-compressed tar archive with the given members
pub fn build_archive(members: &[(&str, &[u8])]) -> Vec<u8> {
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = tar::Builder::new(encoder);
    for (name, content) in members {
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append_data(&mut header, name, *content).unwrap();
    }
    let mut encoder = builder.into_inner().unwrap();
    encoder.flush().unwrap();
    encoder.finish().unwrap()
}

/// The deployment assets archive served by the stub
pub fn deployment_archive() -> Vec<u8> {
    build_archive(&[
        ("sas-bases/README.md", b"Deployment assets\n"),
        ("sas-bases/checksums.txt", CHECKSUMS.as_bytes()),
        ("sas-bases/base/kustomization.yaml", b"resources: []\n"),
    ])
}

async fn token_endpoint(Form(form): Form<HashMap<String, String>>) -> Response {
    let id = form.get("client_id").map(String::as_str);
    let secret = form.get("client_secret").map(String::as_str);
    let grant = form.get("grant_type").map(String::as_str);

    if id != Some(CLIENT_ID) || secret != Some(CLIENT_SECRET) || grant != Some("client_credentials")
    {
        return (StatusCode::UNAUTHORIZED, "invalid_client").into_response();
    }

    let body = format!(
        r#"{{"access_token":"{}","token_type":"BearerToken","issued_at":1700000000000,"expires_in":1799,"scope":""}}"#,
        ACCESS_TOKEN
    );
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response()
}

async fn asset(
    State(state): State<StubState>,
    Path(rest): Path<String>,
    headers: HeaderMap,
) -> Response {
    state
        .requests
        .lock()
        .unwrap()
        .push(format!("/mysas/orders/{}", rest.trim_start_matches('/')));

    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {}", ACCESS_TOKEN))
        .unwrap_or(false);
    if !authorized {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let rest = rest.trim_start_matches('/');
    let order = rest.split('/').next().unwrap_or_default().to_string();
    let kind = rest.rsplit('/').next().unwrap_or_default().to_string();

    match (order.as_str(), kind.as_str()) {
        ("99E404", _) => return (StatusCode::NOT_FOUND, "order not found").into_response(),
        ("99E500", _) => return StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        ("99C500", "certificates") => {
            return (StatusCode::INTERNAL_SERVER_ERROR, "certificates unavailable").into_response()
        }
        _ => {}
    }

    let (file_name, body): (String, Vec<u8>) = match kind.as_str() {
        "license" => (format!("SASViyaV4_{}_license.jwt", order), LICENSE_BODY.to_vec()),
        "deploymentAssets" => (
            format!("SASViyaV4_{}_stable-2025.01_deploymentAssets.tgz", order),
            deployment_archive(),
        ),
        "certificates" => (
            format!("SASViyaV4_{}_certs.zip", order),
            b"PK\x03\x04stub certificates".to_vec(),
        ),
        "assetHistory" => (
            format!("SASViyaV4_{}_assetHistory.json", order),
            br#"{"orderNumber":"stub","history":[]}"#.to_vec(),
        ),
        _ => return (StatusCode::NOT_FOUND, "unknown asset").into_response(),
    };

    if order == "99N0CD" {
        return (StatusCode::OK, body).into_response();
    }

    let disposition = [(
        header::CONTENT_DISPOSITION,
        format!("attachment; filename=\"{}\"", file_name),
    )];

    if order == "99BRKN" {
        return (StatusCode::OK, disposition, broken_body(body)).into_response();
    }

    (StatusCode::OK, disposition, body).into_response()
}

/// A body that sends the first half of `body`, then fails
fn broken_body(body: Vec<u8>) -> Body {
    let head = body[..body.len() / 2].to_vec();
    let first = stream::once(async move { Ok::<_, std::io::Error>(Bytes::from(head)) });
    let failure = stream::once(async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        Err(std::io::Error::new(
            std::io::ErrorKind::ConnectionReset,
            "stream cut",
        ))
    });
    Body::from_stream(first.chain(failure))
}
