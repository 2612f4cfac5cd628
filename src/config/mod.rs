//! Configuration types for the Shopify Admin client.
//!
//! # Overview
//!
//! - [`ClientConfig`]: all settings needed to talk to one shop
//! - [`ClientConfigBuilder`]: a builder for constructing [`ClientConfig`] instances
//! - [`ShopUrl`]: the validated base URL requests are resolved against
//! - [`AccessToken`]: the validated access token with masked debug output
//!
//! # Example
//!
//! ```rust
//! use shopify_admin::{AccessToken, ClientConfig, ShopUrl};
//!
//! let config = ClientConfig::builder()
//!     .shop_url(ShopUrl::new("my-store").unwrap())
//!     .access_token(AccessToken::new("shpat_123").unwrap())
//!     .build()
//!     .unwrap();
//! ```

mod newtypes;

pub use newtypes::{AccessToken, ShopUrl};

use std::time::Duration;

use crate::error::ConfigError;

/// Configuration for an Admin API client.
///
/// # Thread Safety
///
/// `ClientConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    shop_url: ShopUrl,
    access_token: AccessToken,
    user_agent: Option<String>,
    debug: bool,
    timeout: Option<Duration>,
}

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Returns the shop URL.
    #[must_use]
    pub const fn shop_url(&self) -> &ShopUrl {
        &self.shop_url
    }

    /// Returns the access token.
    #[must_use]
    pub const fn access_token(&self) -> &AccessToken {
        &self.access_token
    }

    /// Returns the user agent override, if configured.
    #[must_use]
    pub fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }

    /// Returns whether request and response bodies are logged.
    #[must_use]
    pub const fn debug(&self) -> bool {
        self.debug
    }

    /// Returns the per-request transport timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

// Verify ClientConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientConfig>();
};

/// Builder for constructing [`ClientConfig`] instances.
///
/// Required fields are `shop_url` and `access_token`.
///
/// # Defaults
///
/// - `user_agent`: `None` (the client sends `shopify-admin-rust v<version>`)
/// - `debug`: `false`
/// - `timeout`: `None`
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    shop_url: Option<ShopUrl>,
    access_token: Option<AccessToken>,
    user_agent: Option<String>,
    debug: bool,
    timeout: Option<Duration>,
}

impl ClientConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the shop URL (required).
    #[must_use]
    pub fn shop_url(mut self, url: ShopUrl) -> Self {
        self.shop_url = Some(url);
        self
    }

    /// Sets the access token (required).
    #[must_use]
    pub fn access_token(mut self, token: AccessToken) -> Self {
        self.access_token = Some(token);
        self
    }

    /// Overrides the `User-Agent` header sent with every request.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Enables request and response body logging at debug level.
    #[must_use]
    pub const fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Sets the transport timeout applied to each request.
    ///
    /// Only used when the client builds its own transport via
    /// [`HttpClient::from_config`](crate::clients::HttpClient::from_config).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the [`ClientConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `shop_url` or
    /// `access_token` was not set.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let shop_url = self
            .shop_url
            .ok_or(ConfigError::MissingRequiredField { field: "shop_url" })?;
        let access_token = self
            .access_token
            .ok_or(ConfigError::MissingRequiredField {
                field: "access_token",
            })?;

        Ok(ClientConfig {
            shop_url,
            access_token,
            user_agent: self.user_agent,
            debug: self.debug,
            timeout: self.timeout,
        })
    }
}
