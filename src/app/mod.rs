//! Core application logic for the Viya Orders client
//!
//! This module contains the HTTP client, data models, cadence extraction,
//! summary rendering, and the single and concurrent retrieval drivers.
//!
//! # Examples
//!
//! ```rust,no_run
//! use viya_orders::app::{AssetKind, AssetRequest, AssetRetriever, OrdersClient};
//! use viya_orders::auth::ClientCredentials;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OrdersClient::new()?;
//! let credentials = ClientCredentials::from_encoded("bXktY2xpZW50", "czNjcmV0")?;
//! let token = client.request_token(&credentials).await?;
//!
//! let request = AssetRequest::new(token, AssetKind::Certificates, "99A456")?;
//! let result = AssetRetriever::new(client, request).get_asset().await?;
//! println!("Saved to {}", result.asset_location);
//! # Ok(())
//! # }
//! ```

pub mod cadence;
pub mod client;
pub mod coordinator;
pub mod models;
pub mod output;
pub mod retriever;

// Re-export main public API
pub use cadence::CadenceInfo;
pub use client::{ClientConfig, OrdersClient};
pub use coordinator::{fetch_all, FetchOutcome};
pub use models::{
    is_valid_order_number, AssetKind, AssetRequest, AssetResult, BearerToken, OrderNumber,
    OutputFormat,
};
pub use retriever::AssetRetriever;
