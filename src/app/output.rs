//! Rendering retrieval summaries
//!
//! A summary is rendered into a buffer first and then written to stdout in
//! one locked write, so summaries from concurrent retrievals never interleave.

use std::io::Write;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::app::models::{AssetResult, OutputFormat};
use crate::errors::{AppError, Result};

/// Render a summary as text lines or tab-indented JSON, newline terminated
pub fn render(result: &AssetResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => render_json(result),
        OutputFormat::Text => Ok(render_text(result)),
    }
}

fn render_text(result: &AssetResult) -> String {
    result
        .fields()
        .iter()
        .map(|(label, value)| format!("{}: {}\n", label, value))
        .collect()
}

fn render_json(result: &AssetResult) -> Result<String> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"\t"));
    result
        .serialize(&mut serializer)
        .map_err(|e| AppError::generic(format!("unable to render summary as JSON: {}", e)))?;
    buf.push(b'\n');

    String::from_utf8(buf)
        .map_err(|e| AppError::generic(format!("unable to render summary as JSON: {}", e)))
}

/// Write a rendered summary to stdout
pub fn print_summary(summary: &str) -> Result<()> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    handle.write_all(summary.as_bytes())?;
    handle.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AssetResult {
        AssetResult {
            order_number: "99A456".to_string(),
            asset_name: "license".to_string(),
            asset_req_url: "https://api.sas.com/mysas/orders/99A456/cadenceNames/stable/cadenceVersions/2025.01/license".to_string(),
            asset_location: "/tmp/sas/license.txt".to_string(),
            cadence: "Stable 2025.01".to_string(),
            cadence_release: String::new(),
        }
    }

    #[test]
    fn test_render_text_order() {
        let text = render(&sample(), OutputFormat::Text).unwrap();
        let labels: Vec<&str> = text
            .lines()
            .map(|line| line.split(": ").next().unwrap())
            .collect();
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
        assert!(text.starts_with("OrderNumber: 99A456\nAssetName: license\n"));
        assert!(text.ends_with("CadenceRelease: \n"));
    }

    #[test]
    fn test_render_json() {
        let json = render(&sample(), OutputFormat::Json).unwrap();
        assert!(json.starts_with("{\n\t\"orderNumber\": \"99A456\",\n\t\"assetName\": \"license\""));
        assert!(json.ends_with("}\n"));

        let parsed: AssetResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn test_render_json_key_order() {
        let json = render(&sample(), OutputFormat::Json).unwrap();
        let keys = [
            "\"orderNumber\"",
            "\"assetName\"",
            "\"assetReqURL\"",
            "\"assetLocation\"",
            "\"cadence\"",
            "\"cadenceRelease\"",
        ];
        let positions: Vec<usize> = keys.iter().map(|k| json.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}
