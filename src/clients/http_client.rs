//! HTTP client for Admin API communication.
//!
//! This module provides the [`HttpClient`] type, which executes one
//! authenticated request/response cycle and surfaces failures uniformly.

use std::collections::HashMap;

use reqwest::Url;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use crate::clients::classifier::{classify, ErrorEnvelope};
use crate::clients::errors::{HttpError, HttpResponseError, InvalidHttpRequestError};
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::{ApiResponse, HttpResponse, STATUS_FORBIDDEN};
use crate::config::ClientConfig;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Header carrying the access token; the Admin API does not use `Authorization`.
pub const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Most bytes of an error body kept for classification. The rest is drained
/// and discarded.
pub const MAX_ERROR_BODY_BYTES: usize = 64 * 1024;

/// HTTP client for making requests to the Admin API.
///
/// The client handles:
/// - Resolving request paths against the shop URL
/// - Default headers including User-Agent and access token
/// - JSON content negotiation for requests with a body
/// - Classifying error bodies into [`ClassifiedError`](crate::clients::ClassifiedError)
/// - Cancellation through a caller-supplied [`CancellationToken`]
///
/// No retries are performed.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`; the underlying `reqwest::Client` pools
/// connections and may be shared by concurrent requests.
///
/// # Example
///
/// ```rust,ignore
/// use shopify_admin::{AccessToken, ClientConfig, ShopUrl};
/// use shopify_admin::clients::{HttpClient, HttpRequest};
/// use tokio_util::sync::CancellationToken;
///
/// let config = ClientConfig::builder()
///     .shop_url(ShopUrl::new("my-store")?)
///     .access_token(AccessToken::new("shpat_123")?)
///     .build()?;
///
/// let client = HttpClient::new(&config, reqwest::Client::new());
/// let cancel = CancellationToken::new();
///
/// let response = client
///     .request::<serde_json::Value>(HttpRequest::get("/admin/shop.json"), &cancel)
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    /// The transport, passed in explicitly.
    client: reqwest::Client,
    /// Base URL requests are resolved against.
    base_url: Url,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
    /// Whether request and response bodies are logged.
    debug: bool,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client using the given transport.
    #[must_use]
    pub fn new(config: &ClientConfig, client: reqwest::Client) -> Self {
        let user_agent = config
            .user_agent()
            .map_or_else(default_user_agent, String::from);

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert(
            ACCESS_TOKEN_HEADER.to_string(),
            config.access_token().as_ref().to_string(),
        );

        Self {
            client,
            base_url: config.shop_url().as_url().clone(),
            default_headers,
            debug: config.debug(),
        }
    }

    /// Creates a new HTTP client with its own transport.
    ///
    /// The configured timeout, if any, is applied to the transport.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the transport cannot be built
    /// (e.g., TLS initialization failure).
    pub fn from_config(config: &ClientConfig) -> Result<Self, HttpError> {
        let mut builder = reqwest::Client::builder().use_rustls_tls();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self::new(config, builder.build()?))
    }

    /// Returns the base URL for this client.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Resolves a path or URL against the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError::InvalidPath`] if the reference
    /// cannot be resolved.
    pub fn resolve(&self, path: &str) -> Result<Url, InvalidHttpRequestError> {
        self.base_url
            .join(path)
            .map_err(|e| InvalidHttpRequestError::InvalidPath {
                path: path.to_string(),
                reason: e.to_string(),
            })
    }

    /// Sends a request and decodes the response body.
    ///
    /// - 2xx responses (including `202 Accepted`) succeed; an empty body
    ///   yields `data: None`.
    /// - 403 responses fail with [`HttpError::Forbidden`].
    /// - Other responses fail with the classified error body.
    ///
    /// The response body is always read to the end so the connection can be
    /// reused.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - The token is cancelled before a response arrives (`Cancelled`)
    /// - A network error occurs (`Network`)
    /// - The response is a 403 (`Forbidden`) or other non-2xx status
    ///   (`Response`, `UnrecognizedErrorShape`)
    /// - A success body is not valid JSON for `T` (`Decode`)
    pub async fn request<T: DeserializeOwned>(
        &self,
        request: HttpRequest,
        cancel: &CancellationToken,
    ) -> Result<ApiResponse<T>, HttpError> {
        request.verify()?;
        let url = self.resolve(&request.path)?;

        tracing::debug!(method = %request.http_method, %url, "Sending Shopify request");
        if self.debug {
            if let Some(body) = &request.body {
                tracing::debug!(%url, %body, "Shopify request body");
            }
        }

        let mut builder = self
            .client
            .request(request.http_method.as_reqwest(), url.clone());
        for (key, value) in &self.default_headers {
            builder = builder.header(key, value);
        }
        if let Some(body) = &request.body {
            builder = builder
                .header("Content-Type", "application/json")
                .header("Accept", "application/json")
                .body(body.to_string());
        }

        let (response, body) = execute(builder, cancel).await?;

        tracing::debug!(%url, status = response.code, "Received Shopify response");
        if self.debug {
            tracing::debug!(%url, body = %String::from_utf8_lossy(&body), "Shopify response body");
        }

        let response = check_response(response, &body)?;
        let data = decode_body(&body)?;

        Ok(ApiResponse { data, response })
    }
}

fn default_user_agent() -> String {
    format!("shopify-admin-rust v{SDK_VERSION}")
}

/// Sends a prepared request, racing it against the cancellation token.
///
/// Returns the response metadata and the fully read body. A body that fails
/// to read on a non-2xx status is treated as empty.
pub(crate) async fn execute(
    builder: reqwest::RequestBuilder,
    cancel: &CancellationToken,
) -> Result<(HttpResponse, Vec<u8>), HttpError> {
    if cancel.is_cancelled() {
        return Err(HttpError::Cancelled);
    }

    let result = tokio::select! {
        biased;
        () = cancel.cancelled() => return Err(HttpError::Cancelled),
        result = send(builder) => result,
    };

    match result {
        Ok(sent) => Ok(sent),
        // The transport error is usually a consequence of the cancellation.
        Err(_) if cancel.is_cancelled() => Err(HttpError::Cancelled),
        Err(e) => Err(HttpError::Network(e)),
    }
}

async fn send(builder: reqwest::RequestBuilder) -> Result<(HttpResponse, Vec<u8>), reqwest::Error> {
    let res = builder.send().await?;

    let code = res.status().as_u16();
    let headers = parse_response_headers(res.headers());
    let response = HttpResponse::new(code, headers);

    // Success bodies are the decoded resource and must be read whole.
    let body = if response.is_ok() {
        res.bytes().await?.to_vec()
    } else {
        read_error_body(res).await
    };

    Ok((response, body))
}

/// Reads at most [`MAX_ERROR_BODY_BYTES`] of an error body and drains the
/// rest. A body that fails to read is treated as empty.
async fn read_error_body(mut res: reqwest::Response) -> Vec<u8> {
    let code = res.status().as_u16();
    let mut body = Vec::new();
    let mut discarded = 0usize;

    loop {
        match res.chunk().await {
            Ok(Some(chunk)) => discarded += push_bounded(&mut body, &chunk, MAX_ERROR_BODY_BYTES),
            Ok(None) => break,
            Err(e) => {
                tracing::debug!(status = code, error = %e, "Ignoring unreadable error body");
                return Vec::new();
            }
        }
    }

    if discarded > 0 {
        tracing::debug!(status = code, discarded, "Truncated oversized error body");
    }
    body
}

/// Appends as much of `chunk` as fits under `limit`, returning the number of
/// bytes dropped.
fn push_bounded(body: &mut Vec<u8>, chunk: &[u8], limit: usize) -> usize {
    let room = limit.saturating_sub(body.len());
    let kept = chunk.len().min(room);
    body.extend_from_slice(&chunk[..kept]);
    chunk.len() - kept
}

/// Parses response headers into a `HashMap`.
fn parse_response_headers(headers: &reqwest::header::HeaderMap) -> HashMap<String, Vec<String>> {
    let mut result: HashMap<String, Vec<String>> = HashMap::new();
    for (name, value) in headers {
        let key = name.as_str().to_lowercase();
        let value = value.to_str().unwrap_or_default().to_string();
        result.entry(key).or_default().push(value);
    }
    result
}

/// Turns non-success responses into errors.
///
/// `202 Accepted` is a success here; the poller interprets it.
pub(crate) fn check_response(response: HttpResponse, body: &[u8]) -> Result<HttpResponse, HttpError> {
    if response.is_ok() {
        return Ok(response);
    }

    if response.code == STATUS_FORBIDDEN {
        return Err(HttpError::Forbidden {
            response: Box::new(response),
        });
    }

    let envelope = ErrorEnvelope::from_slice(body);
    match classify(&envelope) {
        Ok(error) => Err(HttpError::Response(Box::new(HttpResponseError {
            code: response.code,
            error,
            response,
        }))),
        Err(source) => {
            tracing::error!(
                status = response.code,
                key = %source.key,
                payload = %String::from_utf8_lossy(body),
                "Unrecognized Shopify error shape"
            );
            Err(HttpError::UnrecognizedErrorShape {
                source,
                response: Box::new(response),
            })
        }
    }
}

/// Decodes a success body, treating an empty body as no data.
pub(crate) fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<Option<T>, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(body).map(Some)
}
