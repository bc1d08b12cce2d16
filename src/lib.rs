//! Viya Orders Library
//!
//! A Rust library for retrieving software order assets (licenses,
//! deployment assets, certificates, asset history) from the SAS Viya Orders
//! API and describing what was saved.

pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;

// Re-export commonly used types for convenience
pub use errors::{AppError, Result};
