//! Saving asset responses to disk
//!
//! The server names the file through `Content-Disposition`. A user supplied
//! name replaces the stem but keeps the server's extension. The body is
//! streamed straight into the target file; a failed copy leaves whatever was
//! written in place.

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use reqwest::header::CONTENT_DISPOSITION;
use reqwest::Response;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::errors::{DownloadError, DownloadResult, FormatError, FormatResult};

/// A parsed `Content-Disposition` header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDisposition {
    /// Disposition type, lower-cased (e.g. `attachment`)
    pub disposition: String,
    /// Parameters keyed by lower-cased name
    pub params: HashMap<String, String>,
}

impl ContentDisposition {
    /// Parse a header value of the form `type; key=value; key="quoted value"`
    pub fn parse(header: &str) -> FormatResult<Self> {
        let malformed = |reason: &str| FormatError::ContentDisposition {
            header: header.to_string(),
            reason: reason.to_string(),
        };

        let (disposition, mut rest) = match header.find(';') {
            Some(idx) => (&header[..idx], &header[idx..]),
            None => (header, ""),
        };
        let disposition = disposition.trim();
        if disposition.is_empty() || !disposition.chars().all(is_token_char) {
            return Err(malformed("no disposition type"));
        }

        let mut params = HashMap::new();
        loop {
            rest = rest.trim_start();
            if rest.is_empty() {
                break;
            }
            rest = rest
                .strip_prefix(';')
                .ok_or_else(|| malformed("expected ';' between parameters"))?
                .trim_start();
            if rest.is_empty() {
                break;
            }

            let key_end = rest.find(|c: char| !is_token_char(c)).unwrap_or(rest.len());
            let key = &rest[..key_end];
            if key.is_empty() {
                return Err(malformed("empty parameter name"));
            }
            rest = rest[key_end..].trim_start();
            rest = rest
                .strip_prefix('=')
                .ok_or_else(|| malformed("invalid parameter, missing '='"))?
                .trim_start();

            let (value, remaining) = if let Some(quoted) = rest.strip_prefix('"') {
                parse_quoted(quoted).ok_or_else(|| malformed("unterminated quoted string"))?
            } else {
                let end = rest.find(|c: char| !is_token_char(c)).unwrap_or(rest.len());
                if end == 0 {
                    return Err(malformed("empty parameter value"));
                }
                (rest[..end].to_string(), &rest[end..])
            };
            rest = remaining;

            if params.insert(key.to_lowercase(), value).is_some() {
                return Err(malformed("duplicate parameter name"));
            }
        }

        Ok(Self {
            disposition: disposition.to_lowercase(),
            params,
        })
    }

    /// The server suggested file name, reduced to its final path component
    ///
    /// An extended `filename*` value that decodes takes precedence over a
    /// plain `filename`.
    pub fn file_name(&self) -> Option<String> {
        let name = match self.params.get("filename*").and_then(|v| decode_ext_value(v)) {
            Some(decoded) => decoded,
            None => self.params.get("filename")?.clone(),
        };
        Path::new(&name)
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
    }
}

/// Decodes an extended parameter value (`charset'language'percent-encoded`)
///
/// Only UTF-8 and US-ASCII charsets are accepted.
fn decode_ext_value(value: &str) -> Option<String> {
    let mut parts = value.splitn(3, '\'');
    let charset = parts.next()?;
    let _language = parts.next()?;
    let encoded = parts.next()?;
    if !charset.eq_ignore_ascii_case("utf-8") && !charset.eq_ignore_ascii_case("us-ascii") {
        return None;
    }

    let bytes = encoded.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes.get(i + 1..i + 3)?;
            if !hex.iter().all(u8::is_ascii_hexdigit) {
                return None;
            }
            let hex = std::str::from_utf8(hex).ok()?;
            decoded.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            decoded.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(decoded).ok()
}

fn is_token_char(c: char) -> bool {
    c.is_ascii_graphic() && !"()<>@,;:\\\"/[]?=".contains(c)
}

/// Reads a quoted-string body (after the opening quote), returning the
/// unescaped value and the input after the closing quote
fn parse_quoted(input: &str) -> Option<(String, &str)> {
    let mut value = String::new();
    let mut chars = input.char_indices();
    while let Some((idx, c)) = chars.next() {
        match c {
            '"' => return Some((value, &input[idx + 1..])),
            '\\' => value.push(chars.next()?.1),
            _ => value.push(c),
        }
    }
    None
}

/// Server suggested file name from a response
pub fn server_file_name(response: &Response) -> FormatResult<String> {
    let header = response
        .headers()
        .get(CONTENT_DISPOSITION)
        .ok_or(FormatError::MissingContentDisposition)?;
    let header = header
        .to_str()
        .map_err(|e| FormatError::ContentDisposition {
            header: String::from_utf8_lossy(header.as_bytes()).into_owned(),
            reason: e.to_string(),
        })?;

    let disposition = ContentDisposition::parse(header)?;
    disposition
        .file_name()
        .ok_or_else(|| FormatError::ContentDisposition {
            header: header.to_string(),
            reason: "no filename parameter".to_string(),
        })
}

/// Work out where the asset lands on disk
///
/// With a user file name the result is `dir/<user name><server extension>`;
/// otherwise `dir/<server name>`.
pub fn resolve_destination(dir: &Path, server_name: &str, user_name: Option<&str>) -> PathBuf {
    match user_name {
        Some(user_name) => {
            let mut name = OsString::from(user_name);
            if let Some(ext) = Path::new(server_name).extension() {
                name.push(".");
                name.push(ext);
            }
            dir.join(name)
        }
        None => dir.join(server_name),
    }
}

/// Directory to save into: the requested one, or the working directory
pub fn target_directory(file_path: Option<&PathBuf>) -> DownloadResult<PathBuf> {
    match file_path {
        Some(path) => Ok(path.clone()),
        None => std::env::current_dir().map_err(|source| DownloadError::Io {
            operation: "determine working directory for",
            path: PathBuf::from("."),
            source,
        }),
    }
}

/// Streams a response body into `destination`, returning the bytes written
///
/// The file is created or truncated. Nothing is removed on failure.
pub async fn save_response(mut response: Response, destination: &Path) -> DownloadResult<u64> {
    let io_error = |operation: &'static str| {
        move |source: std::io::Error| DownloadError::Io {
            operation,
            path: destination.to_path_buf(),
            source,
        }
    };

    let mut file = File::create(destination)
        .await
        .map_err(io_error("create output file"))?;

    let mut written = 0u64;
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|source| DownloadError::Interrupted {
            path: destination.to_path_buf(),
            written,
            source,
        })?
    {
        file.write_all(&chunk)
            .await
            .map_err(io_error("write to"))?;
        written += chunk.len() as u64;
    }
    file.flush().await.map_err(io_error("write to"))?;

    tracing::info!("Saved {} bytes to {}", written, destination.display());
    Ok(written)
}
