//! Command handlers for the Viya Orders CLI
//!
//! This module implements the command handlers that coordinate between
//! CLI arguments, validated settings, and the retrieval components.

use tracing::{error, info, warn};

use crate::app::{
    fetch_all, AssetKind, AssetRequest, AssetRetriever, BearerToken, OrderNumber, OrdersClient,
};
use crate::auth::{get_auth_status, ClientCredentials};
use crate::cli::{AuthAction, AuthArgs, DeploymentAssetsArgs, LicenseArgs, OrderArgs};
use crate::config::Settings;
use crate::errors::{AppError, Result};

/// Handle the license command
pub async fn handle_license(settings: &Settings, args: LicenseArgs) -> Result<()> {
    let (client, token) = connect(settings, &args.order_number).await?;
    let request = base_request(settings, token, AssetKind::License, &args.order_number)?
        .with_cadence(Some(args.cadence_name), Some(args.cadence_version));

    AssetRetriever::new(client, request).get_asset().await?;
    Ok(())
}

/// Handle the deploymentAssets command
pub async fn handle_deployment_assets(
    settings: &Settings,
    args: DeploymentAssetsArgs,
) -> Result<()> {
    let (client, token) = connect(settings, &args.order_number).await?;
    let request = base_request(settings, token, AssetKind::DeploymentAssets, &args.order_number)?
        .with_cadence(Some(args.cadence_name), args.cadence_version)
        .with_cadence_release(args.cadence_release);

    AssetRetriever::new(client, request).get_asset().await?;
    Ok(())
}

/// Handle the certificates and assetHistory commands
pub async fn handle_order_asset(settings: &Settings, kind: AssetKind, args: OrderArgs) -> Result<()> {
    let (client, token) = connect(settings, &args.order_number).await?;
    let request = base_request(settings, token, kind, &args.order_number)?;

    AssetRetriever::new(client, request).get_asset().await?;
    Ok(())
}

/// Handle the getall command
///
/// Retrieves the license, deployment assets, and certificates concurrently.
/// Every retrieval runs to completion; the command fails if any of them did.
pub async fn handle_get_all(settings: &Settings, args: LicenseArgs) -> Result<()> {
    if settings.file_name.is_some() {
        warn!("--file-name is ignored by getall; server file names are used");
    }

    let (client, token) = connect(settings, &args.order_number).await?;

    let mut retrievers = Vec::with_capacity(AssetKind::DOWNLOADABLE.len());
    for kind in AssetKind::DOWNLOADABLE {
        let mut request = AssetRequest::new(token.clone(), kind, &args.order_number)?
            .with_file_path(settings.file_path.clone())
            .with_output(settings.output);
        if kind.has_cadence() {
            request = request.with_cadence(
                Some(args.cadence_name.clone()),
                Some(args.cadence_version.clone()),
            );
        }
        retrievers.push(AssetRetriever::new(client.clone(), request));
    }

    let outcomes = fetch_all(retrievers).await;

    let mut failed = 0;
    for outcome in &outcomes {
        if let Err(e) = &outcome.result {
            failed += 1;
            error!("{} retrieval failed [{}]: {}", outcome.kind, e.category(), e);
            eprintln!("Error retrieving {}: {}", outcome.kind, e);
        }
    }

    if failed > 0 {
        return Err(AppError::generic(format!(
            "{} of {} retrievals failed",
            failed,
            outcomes.len()
        )));
    }
    Ok(())
}

/// Handle authentication commands
pub async fn handle_auth(settings: &Settings, args: AuthArgs) -> Result<()> {
    match args.action {
        AuthAction::Verify => {
            let credentials = ClientCredentials::from_config(&settings.credentials)?;
            let client = OrdersClient::new_with_config(&settings.client)?;
            client.request_token(&credentials).await?;
            println!("Credentials verified successfully");
        }
        AuthAction::Status => {
            let mut status = get_auth_status(&settings.credentials);
            if status.decodable == Some(true) {
                let credentials = ClientCredentials::from_config(&settings.credentials)?;
                let client = OrdersClient::new_with_config(&settings.client)?;
                match client.request_token(&credentials).await {
                    Ok(_) => status.credentials_valid = Some(true),
                    Err(e) => {
                        warn!("Token request failed: {}", e);
                        status.credentials_valid = Some(false);
                    }
                }
            }

            println!("Authentication Status");
            println!("=====================");
            println!(
                "Client id:     {}",
                if status.id_set { "configured" } else { "missing" }
            );
            println!(
                "Client secret: {}",
                if status.secret_set { "configured" } else { "missing" }
            );
            println!();
            println!("{}", status.status_message());
        }
    }

    Ok(())
}

/// Validate the order number, then exchange credentials for a token
async fn connect(settings: &Settings, order_number: &str) -> Result<(OrdersClient, BearerToken)> {
    OrderNumber::parse(order_number)?;

    let credentials = ClientCredentials::from_config(&settings.credentials)?;
    let client = OrdersClient::new_with_config(&settings.client)?;
    let token = client.request_token(&credentials).await?;
    info!("Obtained bearer token");

    Ok((client, token))
}

fn base_request(
    settings: &Settings,
    token: BearerToken,
    kind: AssetKind,
    order_number: &str,
) -> Result<AssetRequest> {
    Ok(AssetRequest::new(token, kind, order_number)?
        .with_file_path(settings.file_path.clone())
        .with_file_name(settings.file_name.clone())
        .with_output(settings.output))
}
