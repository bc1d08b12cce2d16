//! Cadence information for licenses and deployment assets
//!
//! Licenses report the cadence the caller asked for. Deployment assets carry
//! it in `sas-bases/checksums.txt` inside the downloaded tarball, in lines
//! such as:
//!
//! ```text
//! Cadence Display Name: Stable 2025.01
//! Cadence Release: 20250115.1736951234567
//! ```

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;
use tar::Archive;

use crate::constants::cadence::{
    CHECKSUMS_FILE, DISPLAY_NAME_LABEL, DISPLAY_NAME_TOKEN, RELEASE_LABEL, RELEASE_TOKEN,
};
use crate::errors::{FormatError, FormatResult};

/// Cadence display name and release of a retrieved asset
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CadenceInfo {
    pub display_name: String,
    pub release: String,
}

/// Upper-case the first letter of every word
///
/// Words are separated by anything other than letters, digits, and `_`, so
/// `long-term support` becomes `Long-Term Support`.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut at_word_start = true;
    for c in value.chars() {
        if at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = !(c.is_alphanumeric() || c == '_');
    }
    out
}

/// Cadence reported for a license: title-cased name, a space, the version
pub fn license_cadence(name: Option<&str>, version: Option<&str>) -> CadenceInfo {
    CadenceInfo {
        display_name: format!(
            "{} {}",
            title_case(name.unwrap_or_default()),
            version.unwrap_or_default()
        ),
        release: String::new(),
    }
}

/// Read cadence information from a saved deployment assets tarball
///
/// Blocking; run it off the async executor.
pub fn read_archive_cadence(path: &Path) -> FormatResult<CadenceInfo> {
    let file = File::open(path).map_err(|source| FormatError::Archive {
        path: path.to_path_buf(),
        source,
    })?;

    let data = find_checksums(BufReader::new(file), path)?;
    extract_cadence(&data)
}

/// Scan a gzip-compressed tar stream for the checksums manifest and return
/// its full content
fn find_checksums<R: Read>(reader: R, path: &Path) -> FormatResult<Vec<u8>> {
    let archive_error = |source: std::io::Error| FormatError::Archive {
        path: path.to_path_buf(),
        source,
    };

    let mut archive = Archive::new(GzDecoder::new(reader));
    for entry in archive.entries().map_err(archive_error)? {
        let mut entry = entry.map_err(archive_error)?;
        if &*entry.path_bytes() != CHECKSUMS_FILE.as_bytes() {
            continue;
        }

        let expected = entry.size();
        let mut data = Vec::new();
        (&mut entry)
            .take(expected)
            .read_to_end(&mut data)
            .map_err(archive_error)?;

        let actual = data.len() as u64;
        if actual < expected {
            return Err(FormatError::TruncatedMember {
                member: CHECKSUMS_FILE.to_string(),
                expected,
                actual,
            });
        }

        tracing::debug!("Found {} ({} bytes) in {}", CHECKSUMS_FILE, actual, path.display());
        return Ok(data);
    }

    Err(FormatError::ChecksumsNotFound {
        path: path.to_path_buf(),
    })
}

/// Pull the cadence display name and release out of checksums text
///
/// Token offsets count whitespace-separated tokens from the start of the
/// label: the display name starts at token 3 and runs to the end of the
/// line, the release is token 2.
pub fn extract_cadence(data: &[u8]) -> FormatResult<CadenceInfo> {
    let display_name = {
        let section = from_label(data, DISPLAY_NAME_LABEL)?;
        let (start, _) = nth_token(section, DISPLAY_NAME_TOKEN)
            .ok_or_else(|| layout_error(DISPLAY_NAME_LABEL, "too few tokens after label"))?;
        let end = section
            .iter()
            .position(|&b| b == b'\n')
            .ok_or_else(|| layout_error(DISPLAY_NAME_LABEL, "no newline after value"))?;
        if start > end {
            return Err(layout_error(DISPLAY_NAME_LABEL, "value not on the label's line"));
        }
        String::from_utf8_lossy(&section[start..end]).into_owned()
    };

    let release = {
        let section = from_label(data, RELEASE_LABEL)?;
        let (start, end) = nth_token(section, RELEASE_TOKEN)
            .ok_or_else(|| layout_error(RELEASE_LABEL, "too few tokens after label"))?;
        String::from_utf8_lossy(&section[start..end]).into_owned()
    };

    Ok(CadenceInfo {
        display_name,
        release,
    })
}

fn from_label<'a>(data: &'a [u8], label: &str) -> FormatResult<&'a [u8]> {
    data.windows(label.len())
        .position(|window| window == label.as_bytes())
        .map(|idx| &data[idx..])
        .ok_or_else(|| layout_error(label, "label missing"))
}

/// Byte range of the `n`th (zero-based) whitespace-separated token
fn nth_token(data: &[u8], n: usize) -> Option<(usize, usize)> {
    let mut seen = 0;
    let mut idx = 0;
    while idx < data.len() {
        while idx < data.len() && data[idx].is_ascii_whitespace() {
            idx += 1;
        }
        if idx == data.len() {
            break;
        }
        let start = idx;
        while idx < data.len() && !data[idx].is_ascii_whitespace() {
            idx += 1;
        }
        if seen == n {
            return Some((start, idx));
        }
        seen += 1;
    }
    None
}

fn layout_error(label: &str, reason: &str) -> FormatError {
    FormatError::ManifestField {
        label: label.to_string(),
        reason: reason.to_string(),
    }
}
