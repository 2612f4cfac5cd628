//! HTTP-specific error types.
//!
//! - [`InvalidHttpRequestError`]: a request failed validation before sending
//! - [`HttpResponseError`]: a non-2xx response that was classified
//! - [`HttpError`]: unified error type for everything the executor returns
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_admin::clients::{ClassifiedError, HttpError};
//!
//! match client.request::<serde_json::Value>(request, &cancel).await {
//!     Ok(response) => println!("status {}", response.response.code),
//!     Err(HttpError::Response(e)) => match &e.error {
//!         ClassifiedError::Address { field, .. } => println!("fix the {field}"),
//!         other => println!("API error {}: {}", e.code, other),
//!     },
//!     Err(HttpError::Cancelled) => println!("gave up"),
//!     Err(e) => println!("request failed: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::clients::classifier::{ClassifiedError, UnrecognizedErrorKey};
use crate::clients::http_response::HttpResponse;

/// A non-successful response, reduced to the error it reports.
///
/// The raw response is kept so callers can still inspect its headers.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The classified error.
    pub error: ClassifiedError,
    /// The response the error was read from.
    pub response: HttpResponse,
}

impl HttpResponseError {
    /// Returns the `X-Request-Id` of the failed response, if present.
    #[must_use]
    pub fn error_reference(&self) -> Option<&str> {
        self.response.request_id()
    }
}

/// Error returned when an HTTP request fails validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A POST or PUT request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// The request path could not be resolved against the shop URL.
    #[error("Invalid request path '{path}': {reason}")]
    InvalidPath {
        /// The path that was provided.
        path: String,
        /// Why resolution failed.
        reason: String,
    },

    /// The request body could not be encoded as JSON.
    #[error("Cannot encode request body: {reason}")]
    InvalidBody {
        /// The encoder's error message.
        reason: String,
    },

    /// A resource operation needs a token the resource does not have.
    #[error("Cannot {operation} a {resource} without a token.")]
    MissingToken {
        /// The resource name, e.g. `checkout`.
        resource: &'static str,
        /// The operation, e.g. `update`.
        operation: &'static str,
    },
}

/// Unified error type for all HTTP-related errors.
///
/// None of these are retried by the client.
#[derive(Debug, Error)]
pub enum HttpError {
    /// A non-2xx response with a classified error body.
    #[error(transparent)]
    Response(Box<HttpResponseError>),

    /// The server answered 403, whatever the body said.
    #[error("forbidden")]
    Forbidden {
        /// The forbidden response.
        response: Box<HttpResponse>,
    },

    /// The error body used a shape the classifier does not know.
    #[error("{source}")]
    UnrecognizedErrorShape {
        /// The offending key and value.
        source: UnrecognizedErrorKey,
        /// The response the error was read from.
        response: Box<HttpResponse>,
    },

    /// The caller's cancellation token fired.
    #[error("request cancelled")]
    Cancelled,

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// A successful response carried a body that could not be decoded.
    #[error("Failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl HttpError {
    /// Returns the classified error, if this is an API error response.
    #[must_use]
    pub fn classified(&self) -> Option<&ClassifiedError> {
        match self {
            Self::Response(e) => Some(&e.error),
            _ => None,
        }
    }

    /// Returns the raw response, if one was received.
    #[must_use]
    pub fn response(&self) -> Option<&HttpResponse> {
        match self {
            Self::Response(e) => Some(&e.response),
            Self::Forbidden { response } | Self::UnrecognizedErrorShape { response, .. } => {
                Some(response)
            }
            _ => None,
        }
    }

    /// Returns `true` if the caller cancelled the operation.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn response(code: u16) -> HttpResponse {
        let mut headers = HashMap::new();
        headers.insert("x-request-id".to_string(), vec!["abc-123".to_string()]);
        HttpResponse::new(code, headers)
    }

    #[test]
    fn test_http_response_error_displays_classified_message() {
        let error = HttpResponseError {
            code: 422,
            error: ClassifiedError::Email {
                message: "is invalid".to_string(),
            },
            response: response(422),
        };
        assert_eq!(error.to_string(), "email is invalid");
        assert_eq!(error.error_reference(), Some("abc-123"));
    }

    #[test]
    fn test_forbidden_message() {
        let error = HttpError::Forbidden {
            response: Box::new(response(403)),
        };
        assert_eq!(error.to_string(), "forbidden");
        assert_eq!(error.response().map(|r| r.code), Some(403));
        assert!(error.classified().is_none());
    }

    #[test]
    fn test_invalid_request_error_messages() {
        let error = InvalidHttpRequestError::MissingBody {
            method: "post".to_string(),
        };
        assert_eq!(error.to_string(), "Cannot use post without specifying data.");

        let error = InvalidHttpRequestError::MissingToken {
            resource: "checkout",
            operation: "update",
        };
        assert_eq!(error.to_string(), "Cannot update a checkout without a token.");
    }

    #[test]
    fn test_cancelled_is_detectable() {
        assert!(HttpError::Cancelled.is_cancelled());
        assert!(HttpError::Cancelled.response().is_none());
    }

    #[test]
    fn test_error_types_implement_std_error() {
        let _: &dyn std::error::Error = &HttpError::Cancelled;
        let _: &dyn std::error::Error = &InvalidHttpRequestError::InvalidBody {
            reason: "test".to_string(),
        };
    }
}
