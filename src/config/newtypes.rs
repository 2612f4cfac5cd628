//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use reqwest::Url;
use std::fmt;

/// A validated Shopify Admin API access token.
///
/// This newtype ensures the token is non-empty and masks its value in debug
/// output to prevent accidental exposure in logs.
///
/// # Example
///
/// ```rust
/// use shopify_admin::AccessToken;
///
/// let token = AccessToken::new("shpat_123").unwrap();
/// assert_eq!(token.as_ref(), "shpat_123");
/// assert_eq!(format!("{:?}", token), "AccessToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Creates a new validated access token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAccessToken`] if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ConfigError::EmptyAccessToken);
        }
        Ok(Self(token))
    }
}

impl AsRef<str> for AccessToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(*****)")
    }
}

/// A validated base URL of the shop that requests are resolved against.
///
/// # Accepted Formats
///
/// - `shop-name` - normalized to `https://shop-name.myshopify.com/`
/// - `shop-name.myshopify.com` - normalized to `https://shop-name.myshopify.com/`
/// - any `http://` or `https://` URL with a host, used as-is
///
/// # Example
///
/// ```rust
/// use shopify_admin::ShopUrl;
///
/// let url = ShopUrl::new("my-store").unwrap();
/// assert_eq!(url.as_ref(), "https://my-store.myshopify.com/");
///
/// let url = ShopUrl::new("http://127.0.0.1:8080").unwrap();
/// assert_eq!(url.as_url().port(), Some(8080));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShopUrl(Url);

impl ShopUrl {
    const SUFFIX: &'static str = ".myshopify.com";

    /// Creates a new validated shop URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidShopUrl`] if the value is neither a valid
    /// shop name nor an http(s) URL with a host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = url.into();
        let trimmed = raw.trim();
        let invalid = || ConfigError::InvalidShopUrl { url: raw.clone() };

        if trimmed.contains("://") {
            let parsed = Url::parse(trimmed).map_err(|_| invalid())?;
            if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
                return Err(invalid());
            }
            return Ok(Self(parsed));
        }

        let domain = trimmed.to_lowercase();
        let shop_name = domain.strip_suffix(Self::SUFFIX).unwrap_or(&domain);
        if !Self::is_valid_shop_name(shop_name) {
            return Err(invalid());
        }

        Url::parse(&format!("https://{shop_name}{}", Self::SUFFIX))
            .map(Self)
            .map_err(|_| invalid())
    }

    /// Returns the parsed URL.
    #[must_use]
    pub const fn as_url(&self) -> &Url {
        &self.0
    }

    fn is_valid_shop_name(name: &str) -> bool {
        if name.is_empty() || name.starts_with('-') || name.ends_with('-') {
            return false;
        }

        name.chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    }
}

impl AsRef<str> for ShopUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ShopUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}
