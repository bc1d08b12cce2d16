//! Client credential handling for the orders API
//!
//! Credentials are configured base64-encoded and decoded here before the
//! token exchange in [`crate::app::OrdersClient::request_token`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use viya_orders::app::OrdersClient;
//! use viya_orders::auth::ClientCredentials;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let credentials = ClientCredentials::from_encoded("bXktY2xpZW50", "czNjcmV0")?;
//! let token = OrdersClient::new()?.request_token(&credentials).await?;
//! # let _ = token;
//! # Ok(())
//! # }
//! ```

pub mod credentials;

// Re-export main public API
pub use credentials::{get_auth_status, AuthStatus, ClientCredentials};
