//! HTTP request types.
//!
//! This module provides the [`HttpRequest`] type and its builder for
//! constructing requests to the Admin API.

use std::fmt;

use serde::Serialize;

use crate::clients::errors::InvalidHttpRequestError;

/// HTTP methods supported by the Admin API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for updating resources.
    Put,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    pub(crate) const fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Post => write!(f, "post"),
            Self::Put => write!(f, "put"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// An HTTP request to be sent to the Admin API.
///
/// `path` is resolved against the configured shop URL, so it may be an
/// absolute path (`/admin/checkouts.json`) or a full URL such as the
/// `Location` of an asynchronous operation.
///
/// # Example
///
/// ```rust
/// use shopify_admin::clients::{HttpRequest, HttpMethod};
/// use serde_json::json;
///
/// let get_request = HttpRequest::get("/admin/checkouts/abc.json");
///
/// let post_request = HttpRequest::builder(HttpMethod::Post, "/admin/checkouts.json")
///     .body(json!({"checkout": {"email": "me@example.com"}}))
///     .build()
///     .unwrap();
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The path or URL for this request.
    pub path: String,
    /// The JSON request body, if any.
    pub body: Option<serde_json::Value>,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, path)
    }

    /// Creates a body-less GET request.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            http_method: HttpMethod::Get,
            path: path.into(),
            body: None,
        }
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError::MissingBody`] if the method is
    /// `Post` or `Put` and no body is set.
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if matches!(self.http_method, HttpMethod::Post | HttpMethod::Put) && self.body.is_none() {
            return Err(InvalidHttpRequestError::MissingBody {
                method: self.http_method.to_string(),
            });
        }

        Ok(())
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    path: String,
    body: Option<serde_json::Value>,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            http_method: method,
            path: path.into(),
            body: None,
        }
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Encodes a serializable value as the request body.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError::InvalidBody`] if the value cannot be
    /// represented as JSON.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, InvalidHttpRequestError> {
        let value = serde_json::to_value(body).map_err(|e| InvalidHttpRequestError::InvalidBody {
            reason: e.to_string(),
        })?;
        self.body = Some(value);
        Ok(self)
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            http_method: self.http_method,
            path: self.path,
            body: self.body,
        };
        request.verify()?;
        Ok(request)
    }
}
