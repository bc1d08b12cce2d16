//! Command-line interface components
//!
//! This module contains CLI-specific code for the Viya Orders client:
//! argument parsing and the command handlers.

pub mod args;
pub mod commands;

pub use args::{
    AuthAction, AuthArgs, Cli, Commands, DeploymentAssetsArgs, GlobalArgs, LicenseArgs, OrderArgs,
};
pub use commands::{
    handle_auth, handle_deployment_assets, handle_get_all, handle_license, handle_order_asset,
};
