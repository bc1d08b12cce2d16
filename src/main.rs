//! viya4-orders-cli application
//!
//! Command-line interface for retrieving SAS Viya order assets. Summaries go
//! to stdout; logs go to stderr.

use std::process;

use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use viya_orders::app::AssetKind;
use viya_orders::cli::{
    handle_auth, handle_deployment_assets, handle_get_all, handle_license, handle_order_asset,
    Cli, Commands,
};
use viya_orders::config::AppConfig;
use viya_orders::errors::Result;

#[tokio::main]
async fn main() {
    // Initialize program
    let result = run().await;

    // Handle any errors that occurred
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Main application logic
async fn run() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenv::dotenv().ok();

    let cli = Cli::parse_args();

    let mut config = AppConfig::load(cli.global.config.clone()).await?;
    config.apply_env_vars();
    config.apply_cli(&cli.global.overrides());
    let settings = config.into_settings()?;

    init_logging(&cli, &settings.log_level);

    info!("viya4-orders-cli v{} starting", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::License(args) => {
            info!("Executing license command");
            handle_license(&settings, args).await
        }
        Commands::DeploymentAssets(args) => {
            info!("Executing deploymentAssets command");
            handle_deployment_assets(&settings, args).await
        }
        Commands::Certificates(args) => {
            info!("Executing certificates command");
            handle_order_asset(&settings, AssetKind::Certificates, args).await
        }
        Commands::AssetHistory(args) => {
            info!("Executing assetHistory command");
            handle_order_asset(&settings, AssetKind::AssetHistory, args).await
        }
        Commands::GetAll(args) => {
            info!("Executing getall command");
            handle_get_all(&settings, args).await
        }
        Commands::Auth(args) => {
            info!("Executing auth command");
            handle_auth(&settings, args).await
        }
    }
}

/// Initialize logging on stderr from the verbosity flags, falling back to
/// the configured level
fn init_logging(cli: &Cli, configured_level: &str) {
    let log_level = cli
        .log_level()
        .map(|level| level.to_string().to_lowercase())
        .unwrap_or_else(|| configured_level.to_lowercase());

    let mut filter = EnvFilter::from_default_env();
    match format!("viya_orders={}", log_level).parse() {
        Ok(directive) => filter = filter.add_directive(directive),
        Err(e) => eprintln!("Ignoring log level '{}': {}", log_level, e),
    }

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(cli.global.very_verbose) // Show levels only in very verbose mode
        .init();

    if cli.global.very_verbose {
        info!("Very verbose logging enabled");
    } else if cli.global.verbose {
        info!("Verbose logging enabled");
    }
}
