//! Retrieval of a single asset
//!
//! One [`AssetRetriever`] runs the whole cycle for one request: build the
//! URL, GET it, pick the file name, save the body, work out the cadence, and
//! render the summary. The first failing step ends the retrieval.

use std::path::PathBuf;

use crate::app::cadence::{self, CadenceInfo};
use crate::app::client::download::{
    resolve_destination, save_response, server_file_name, target_directory,
};
use crate::app::client::OrdersClient;
use crate::app::models::{AssetKind, AssetRequest, AssetResult};
use crate::app::output;
use crate::errors::{AppError, Result};

/// Retrieves one asset and describes it
#[derive(Debug, Clone)]
pub struct AssetRetriever {
    client: OrdersClient,
    request: AssetRequest,
}

impl AssetRetriever {
    pub fn new(client: OrdersClient, request: AssetRequest) -> Self {
        Self { client, request }
    }

    pub fn request(&self) -> &AssetRequest {
        &self.request
    }

    /// Download and save the asset, returning its summary
    pub async fn fetch(&self) -> Result<AssetResult> {
        let request = &self.request;
        let url = self.client.asset_url(request)?;

        let mut result = AssetResult {
            order_number: request.order_number().to_string(),
            asset_name: request.kind().to_string(),
            asset_req_url: url.to_string(),
            ..AssetResult::default()
        };

        let response = self.client.http().get_response(&url, request.token()).await?;

        let server_name = server_file_name(&response)?;
        let dir = target_directory(request.file_path())?;
        let destination = resolve_destination(&dir, &server_name, request.file_name());
        tracing::debug!(
            "Saving {} for order {} as {}",
            request.kind(),
            request.order_number(),
            destination.display()
        );

        save_response(response, &destination).await?;
        result.asset_location = destination.display().to_string();

        if let Some(info) = self.cadence(destination).await? {
            result.cadence = info.display_name;
            result.cadence_release = info.release;
        }

        Ok(result)
    }

    /// Fetch the asset, then render and print its summary
    pub async fn get_asset(&self) -> Result<AssetResult> {
        let result = self.fetch().await?;
        let summary = output::render(&result, self.request.output())?;
        output::print_summary(&summary)?;
        Ok(result)
    }

    async fn cadence(&self, saved: PathBuf) -> Result<Option<CadenceInfo>> {
        match self.request.kind() {
            AssetKind::License => Ok(Some(cadence::license_cadence(
                self.request.cadence_name(),
                self.request.cadence_version(),
            ))),
            AssetKind::DeploymentAssets => {
                let info = tokio::task::spawn_blocking(move || cadence::read_archive_cadence(&saved))
                    .await
                    .map_err(|e| AppError::generic(format!("cadence extraction task failed: {}", e)))??;
                Ok(Some(info))
            }
            AssetKind::Certificates | AssetKind::AssetHistory => Ok(None),
        }
    }
}
