//! Error types for client configuration.
//!
//! All configuration constructors return `Result<T, ConfigError>` so invalid
//! values are rejected before any request is made.
//!
//! # Example
//!
//! ```rust
//! use shopify_admin::{AccessToken, ConfigError};
//!
//! let result = AccessToken::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyAccessToken)));
//! ```

use thiserror::Error;

/// Errors that can occur while building a [`ClientConfig`](crate::ClientConfig).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Access token cannot be empty.
    #[error("Access token cannot be empty. Please provide a valid Shopify Admin API access token.")]
    EmptyAccessToken,

    /// Shop URL is invalid.
    #[error("Invalid shop URL '{url}'. Expected 'shop-name', 'shop-name.myshopify.com' or an http(s) URL.")]
    InvalidShopUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}
