//! HTTP client types for Admin API communication.
//!
//! This module provides the request execution layer shared by every resource
//! operation, plus the two pieces built on top of it:
//!
//! - [`HttpClient`]: executes one authenticated request/response cycle
//! - [`HttpClient::poll`]: drives `202 Accepted` operations to completion
//! - [`classify`]: reduces an error body to a single [`ClassifiedError`]
//! - [`HttpRequest`] / [`HttpResponse`] / [`ApiResponse`]: request and response types
//! - [`HttpError`]: the unified error type
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_admin::clients::{HttpClient, HttpRequest};
//! use tokio_util::sync::CancellationToken;
//!
//! let client = HttpClient::from_config(&config)?;
//! let cancel = CancellationToken::new();
//!
//! // Plain request
//! let shop = client
//!     .request::<serde_json::Value>(HttpRequest::get("/admin/shop.json"), &cancel)
//!     .await?;
//!
//! // Asynchronous operation
//! let rates = client
//!     .poll::<serde_json::Value>(
//!         HttpRequest::get("/admin/checkouts/abc/shipping_rates.json"),
//!         &cancel,
//!     )
//!     .await?;
//! ```
//!
//! # Cancellation
//!
//! Every call takes a [`CancellationToken`](tokio_util::sync::CancellationToken).
//! Cancelling it interrupts in-flight requests and poll waits; the call then
//! returns [`HttpError::Cancelled`].

mod classifier;
mod errors;
mod http_client;
mod http_request;
mod http_response;
mod poller;

pub use classifier::{
    classify, AddressKind, ClassifiedError, ErrorDetail, ErrorEnvelope, ErrorIssue, ErrorsField,
    IssueOptions, UnrecognizedErrorKey, NOT_ENOUGH_IN_STOCK,
};
pub use errors::{HttpError, HttpResponseError, InvalidHttpRequestError};
pub use http_client::{HttpClient, ACCESS_TOKEN_HEADER, MAX_ERROR_BODY_BYTES, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::{ApiResponse, HttpResponse, STATUS_ACCEPTED, STATUS_FORBIDDEN};
pub use poller::PollState;

pub(crate) use http_client::{check_response, execute};
