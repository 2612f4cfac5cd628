//! HTTP response types.
//!
//! [`HttpResponse`] keeps the status code and headers of a response after its
//! body has been consumed. [`ApiResponse`] pairs it with the decoded body.

use std::collections::HashMap;
use std::time::Duration;

/// Status code the API uses for "still processing, poll again".
pub const STATUS_ACCEPTED: u16 = 202;

/// Status code that always maps to [`HttpError::Forbidden`](crate::clients::HttpError::Forbidden).
pub const STATUS_FORBIDDEN: u16 = 403;

/// Status code and headers of a response from the Admin API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, keyed by lowercase name (headers may repeat).
    pub headers: HashMap<String, Vec<String>>,
    /// Follow-up URL for asynchronous operations (from `Location` header).
    pub location: Option<String>,
    /// Seconds to wait before polling again (from `Retry-After` header).
    ///
    /// `None` when the header is absent or not a whole number of seconds.
    pub retry_after: Option<u64>,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`, parsing `Location` and `Retry-After`.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>) -> Self {
        let location = first_header(&headers, "location")
            .filter(|value| !value.is_empty())
            .map(String::from);

        let retry_after = first_header(&headers, "retry-after")
            .and_then(|value| value.trim().parse::<u64>().ok());

        Self {
            code,
            headers,
            location,
            retry_after,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns `true` if the server is still processing the operation.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        self.code == STATUS_ACCEPTED
    }

    /// Returns the first value of a header, if present.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        first_header(&self.headers, &name.to_lowercase())
    }

    /// Returns the `X-Request-Id` header value, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        first_header(&self.headers, "x-request-id")
    }

    /// Returns how long to wait before the next poll.
    ///
    /// A missing or malformed `Retry-After` header means no wait.
    #[must_use]
    pub fn poll_wait(&self) -> Duration {
        Duration::from_secs(self.retry_after.unwrap_or(0))
    }
}

fn first_header<'a>(headers: &'a HashMap<String, Vec<String>>, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|values| values.first())
        .map(String::as_str)
}

/// A decoded response body together with the raw response.
///
/// `data` is `None` when the server sent an empty body.
#[derive(Clone, Debug)]
pub struct ApiResponse<T> {
    /// The decoded body.
    pub data: Option<T>,
    /// Status code and headers.
    pub response: HttpResponse,
}

impl<T> ApiResponse<T> {
    /// Maps the decoded body, keeping the raw response.
    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            data: self.data.map(f),
            response: self.response,
        }
    }

    /// Consumes the response, returning the decoded body.
    #[must_use]
    pub fn into_data(self) -> Option<T> {
        self.data
    }
}
