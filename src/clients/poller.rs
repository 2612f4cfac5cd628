//! Polling of asynchronous Admin API operations.
//!
//! Some checkout operations (shipping rate quotes, payment processing) are
//! computed asynchronously. The server answers `202 Accepted` with a
//! `Location` to poll and a `Retry-After` delay in seconds, and keeps doing so
//! until the result is ready.
//!
//! [`HttpClient::poll`] follows those hints until a terminal response arrives.
//! There is no iteration cap and no overall timeout: bound the wait by
//! cancelling the token passed in.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use crate::clients::errors::HttpError;
use crate::clients::http_client::HttpClient;
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::{ApiResponse, HttpResponse, STATUS_ACCEPTED};

/// Where and when to poll next, read from the latest response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PollState {
    /// The URL to poll next.
    pub location: String,
    /// How long to wait before polling.
    pub wait: Duration,
    /// Status code of the latest response.
    pub last_status: u16,
}

impl PollState {
    /// Reads the poll state from a response.
    ///
    /// A response without `Location` keeps polling `previous`.
    #[must_use]
    pub fn from_response(response: &HttpResponse, previous: &str) -> Self {
        Self {
            location: response
                .location
                .clone()
                .unwrap_or_else(|| previous.to_string()),
            wait: response.poll_wait(),
            last_status: response.code,
        }
    }

    /// Returns `true` while the server is still processing.
    #[must_use]
    pub const fn is_processing(&self) -> bool {
        self.last_status == STATUS_ACCEPTED
    }
}

impl HttpClient {
    /// Sends `initial` and polls until the operation completes.
    ///
    /// While responses are `202 Accepted`, waits `Retry-After` seconds and then
    /// GETs the `Location` URL. The first other response ends the loop. Its
    /// body is returned, or the most recent body decoded while polling if the
    /// final response had none.
    ///
    /// # Errors
    ///
    /// Returns the first [`HttpError`] raised by any request, and
    /// [`HttpError::Cancelled`] if the token fires before or during a wait.
    pub async fn poll<T: DeserializeOwned>(
        &self,
        initial: HttpRequest,
        cancel: &CancellationToken,
    ) -> Result<ApiResponse<T>, HttpError> {
        let initial_path = initial.path.clone();
        let mut current = self.request::<T>(initial, cancel).await?;
        let mut state = PollState::from_response(&current.response, &initial_path);
        let mut last_data = None;
        let mut iteration: u32 = 0;

        while state.is_processing() {
            if current.data.is_some() {
                last_data = current.data.take();
            }

            iteration += 1;
            tracing::debug!(
                iteration,
                location = %state.location,
                wait_secs = state.wait.as_secs(),
                "Shopify operation still processing"
            );

            wait(state.wait, cancel).await?;

            current = self
                .request::<T>(HttpRequest::get(state.location.clone()), cancel)
                .await?;
            state = PollState::from_response(&current.response, &state.location);
        }

        tracing::debug!(iterations = iteration, status = state.last_status, "Shopify operation finished");

        if current.data.is_none() {
            current.data = last_data;
        }
        Ok(current)
    }
}

async fn wait(duration: Duration, cancel: &CancellationToken) -> Result<(), HttpError> {
    if cancel.is_cancelled() {
        return Err(HttpError::Cancelled);
    }
    if duration.is_zero() {
        return Ok(());
    }

    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(HttpError::Cancelled),
        () = tokio::time::sleep(duration) => Ok(()),
    }
}
