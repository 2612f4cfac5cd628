//! # Shopify Admin Checkout Client
//!
//! A Rust client for the Shopify Admin checkout API.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ClientConfig`] and [`ClientConfigBuilder`]
//! - Validated newtypes for the shop URL and access token
//! - An async request executor, [`HttpClient`], that turns the API's
//!   inconsistently shaped error bodies into one typed [`ClassifiedError`]
//! - A poller for operations the API answers with `202 Accepted`
//! - Checkout, shipping rate and payment resources
//! - A card vault client for tokenizing credit cards
//!
//! Every network call takes a
//! [`CancellationToken`](tokio_util::sync::CancellationToken). There are no
//! built-in timeouts on polling and no retries.
//!
//! ## Quick Start
//!
//! ```rust
//! use shopify_admin::{AccessToken, ClientConfig, ShopUrl};
//!
//! let config = ClientConfig::builder()
//!     .shop_url(ShopUrl::new("my-store").unwrap())
//!     .access_token(AccessToken::new("shpat_xxx").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.shop_url().as_ref(), "https://my-store.myshopify.com/");
//! ```
//!
//! ## Checkout Flow
//!
//! ```rust,ignore
//! use shopify_admin::{ClassifiedError, HttpClient, HttpError};
//! use shopify_admin::resources::{Checkout, CheckoutLineItem, Payment};
//! use tokio_util::sync::CancellationToken;
//!
//! let client = HttpClient::from_config(&config)?;
//! let cancel = CancellationToken::new();
//!
//! let draft = Checkout {
//!     line_items: vec![CheckoutLineItem { variant_id: 39072856, quantity: 5 }],
//!     ..Default::default()
//! };
//!
//! match Checkout::save(&client, &draft, &cancel).await {
//!     Ok(response) => println!("created {:?}", response.data),
//!     Err(HttpError::Response(e)) if e.error.is_not_enough_in_stock() => {
//!         println!("sold out: {}", e.error);
//!     }
//!     Err(e) => return Err(e.into()),
//! }
//! ```
//!
//! ## Logging
//!
//! The crate logs through [`tracing`]. Requests, responses and poll
//! iterations are logged at `debug`; unrecognized error bodies at `error`.
//! Setting [`ClientConfigBuilder::debug`] also logs request and response
//! bodies. No subscriber is installed.

pub mod cardvault;
pub mod clients;
pub mod config;
pub mod error;
pub mod resources;

// Re-export public types at crate root for convenience
pub use config::{AccessToken, ClientConfig, ClientConfigBuilder, ShopUrl};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    classify, ApiResponse, ClassifiedError, ErrorEnvelope, HttpClient, HttpError, HttpMethod,
    HttpRequest, HttpRequestBuilder, HttpResponse, HttpResponseError, InvalidHttpRequestError,
    UnrecognizedErrorKey,
};

// Re-export resources
pub use cardvault::CardVault;
pub use resources::{Checkout, Payment, ShippingRate, Transaction};
