//! Command-line argument parsing for the Viya Orders client
//!
//! This module defines the CLI structure using clap derive macros: one
//! subcommand per asset kind, `getall` for the three downloadable kinds at
//! once, and `auth` for credential checks.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::CliOverrides;

/// viya4-orders-cli - Retrieve SAS Viya order assets
#[derive(Parser, Debug)]
#[command(
    name = "viya4-orders-cli",
    version,
    about = "Retrieve SAS Viya order assets from the Viya Orders API",
    long_about = "Downloads licenses, deployment assets, certificates, and asset history for a SAS Viya order.
Credentials are read base64-encoded from CLIENTCREDENTIALSID and CLIENTCREDENTIALSSECRET or from the config file."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all subcommands
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Configuration file path
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Name (without extension) of the downloaded file; the server name is used otherwise
    #[arg(short = 'n', long, global = true, value_name = "NAME")]
    pub file_name: Option<String>,

    /// Directory the file is saved into; must exist (defaults to the working directory)
    #[arg(short = 'p', long, global = true, value_name = "DIR")]
    pub file_path: Option<PathBuf>,

    /// Output format: t, text, j, json
    #[arg(short, long, global = true, value_name = "FORMAT")]
    pub output: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Very verbose logging (debug level)
    #[arg(long, global = true)]
    pub very_verbose: bool,

    /// Quiet mode - only errors are logged
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Retrieve the license for an order
    #[command(name = "license", visible_alias = "lic")]
    License(LicenseArgs),

    /// Retrieve the deployment assets for an order
    #[command(name = "deploymentAssets", visible_aliases = ["depassets", "dep"])]
    DeploymentAssets(DeploymentAssetsArgs),

    /// Retrieve the certificates for an order
    #[command(name = "certificates", visible_aliases = ["certs", "cer"])]
    Certificates(OrderArgs),

    /// Retrieve the asset history for an order
    #[command(name = "assetHistory", visible_alias = "ah")]
    AssetHistory(OrderArgs),

    /// Retrieve the license, deployment assets, and certificates concurrently
    #[command(name = "getall", visible_alias = "all")]
    GetAll(LicenseArgs),

    /// Check API credentials
    Auth(AuthArgs),
}

/// Arguments naming only an order
#[derive(Args, Debug, Clone)]
pub struct OrderArgs {
    /// Six character order number
    #[arg(value_name = "ORDER")]
    pub order_number: String,
}

/// Arguments for assets tied to a cadence name and version
#[derive(Args, Debug, Clone)]
pub struct LicenseArgs {
    /// Six character order number
    #[arg(value_name = "ORDER")]
    pub order_number: String,

    /// Cadence name (e.g. stable, lts)
    #[arg(value_name = "NAME")]
    pub cadence_name: String,

    /// Cadence version (e.g. 2025.01)
    #[arg(value_name = "VERSION")]
    pub cadence_version: String,
}

/// Arguments for the deploymentAssets command
#[derive(Args, Debug, Clone)]
pub struct DeploymentAssetsArgs {
    /// Six character order number
    #[arg(value_name = "ORDER")]
    pub order_number: String,

    /// Cadence name (e.g. stable, lts)
    #[arg(value_name = "NAME")]
    pub cadence_name: String,

    /// Cadence version; the latest version of the cadence when omitted
    #[arg(value_name = "VERSION")]
    pub cadence_version: Option<String>,

    /// Cadence release; the latest release of the version when omitted
    #[arg(value_name = "RELEASE")]
    pub cadence_release: Option<String>,
}

/// Arguments for authentication checks
#[derive(Args, Debug)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub action: AuthAction,
}

/// Authentication actions
#[derive(Subcommand, Debug)]
pub enum AuthAction {
    /// Request a bearer token with the configured credentials
    Verify,

    /// Show which credentials are configured
    Status,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Log level chosen by the verbosity flags, if any
    pub fn log_level(&self) -> Option<tracing::Level> {
        if self.global.quiet {
            Some(tracing::Level::ERROR)
        } else if self.global.very_verbose {
            Some(tracing::Level::DEBUG)
        } else if self.global.verbose {
            Some(tracing::Level::INFO)
        } else {
            None
        }
    }
}

impl GlobalArgs {
    /// Flags that override config file and environment settings
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            file_path: self.file_path.clone(),
            file_name: self.file_name.clone(),
            output: self.output.clone(),
        }
    }
}
