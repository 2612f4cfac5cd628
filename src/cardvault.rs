//! Card vault client.
//!
//! Card details never go to the Admin API directly. They are posted to
//! Shopify's card vault, which returns a session ID that is then used as
//! [`Payment::session_id`](crate::resources::Payment::session_id).
//!
//! The vault is not part of the shop's Admin API: requests carry no access
//! token and go to a fixed host.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_admin::cardvault::{CardVault, CreditCard, VaultPayment, VaultPaymentRequest};
//! use shopify_admin::resources::{generate_unique_token, Checkout, Payment};
//!
//! let vault = CardVault::new(reqwest::Client::new());
//! let session_id = vault
//!     .add_card(
//!         &VaultPaymentRequest {
//!             payment: VaultPayment {
//!                 amount: "19.99".to_string(),
//!                 unique_token: generate_unique_token(),
//!                 credit_card: CreditCard {
//!                     number: "4242424242424242".to_string(),
//!                     first_name: "Jane".to_string(),
//!                     last_name: "Doe".to_string(),
//!                     month: "12".to_string(),
//!                     year: "2030".to_string(),
//!                     verification_value: "123".to_string(),
//!                 },
//!             },
//!         },
//!         &cancel,
//!     )
//!     .await?;
//!
//! let payment = Payment { session_id: Some(session_id), ..Payment::new("19.99") };
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::clients::{check_response, execute, HttpError, InvalidHttpRequestError};

/// The card vault sessions endpoint.
pub const CARD_VAULT_URL: &str = "https://elb.deposit.shopifycs.com/sessions";

/// Credit card details sent to the vault.
#[derive(Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CreditCard {
    /// The card number.
    pub number: String,
    /// The card holder's first name.
    pub first_name: String,
    /// The card holder's last name.
    pub last_name: String,
    /// Expiry month.
    pub month: String,
    /// Expiry year.
    pub year: String,
    /// The CVV.
    pub verification_value: String,
}

impl fmt::Debug for CreditCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreditCard")
            .field("number", &mask_card_number(&self.number))
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("month", &self.month)
            .field("year", &self.year)
            .field("verification_value", &"***")
            .finish()
    }
}

/// Keeps only the last four digits.
fn mask_card_number(number: &str) -> String {
    let digits: Vec<char> = number.chars().filter(char::is_ascii_digit).collect();
    let visible = digits.len().saturating_sub(4);
    digits[visible..].iter().fold("*****".to_string(), |mut s, c| {
        s.push(*c);
        s
    })
}

/// A payment to vault a card for.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct VaultPayment {
    /// The amount to charge.
    pub amount: String,
    /// Client-side idempotency token.
    pub unique_token: String,
    /// The card to vault.
    pub credit_card: CreditCard,
}

/// Request body for [`CardVault::add_card`].
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct VaultPaymentRequest {
    /// The payment to vault a card for.
    pub payment: VaultPayment,
}

#[derive(Deserialize)]
struct VaultSession {
    id: String,
}

/// Client for the card vault.
#[derive(Clone, Debug)]
pub struct CardVault {
    client: reqwest::Client,
    url: String,
}

impl CardVault {
    /// Creates a vault client posting to [`CARD_VAULT_URL`].
    #[must_use]
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            url: CARD_VAULT_URL.to_string(),
        }
    }

    /// Overrides the sessions endpoint.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Returns the sessions endpoint.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Vaults a card and returns the session ID.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Cancelled`] if `cancel` fires, the classified
    /// error for a non-2xx response, [`HttpError::Network`] on transport
    /// failure, or [`HttpError::Decode`] if the session body is malformed.
    pub async fn add_card(
        &self,
        request: &VaultPaymentRequest,
        cancel: &CancellationToken,
    ) -> Result<String, HttpError> {
        let body = serde_json::to_vec(request).map_err(|e| InvalidHttpRequestError::InvalidBody {
            reason: e.to_string(),
        })?;
        let builder = self
            .client
            .post(&self.url)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .body(body);

        tracing::debug!(url = %self.url, card = ?request.payment.credit_card, "Vaulting card");

        let (response, body) = execute(builder, cancel).await?;
        tracing::debug!(url = %self.url, status = response.code, "Received card vault response");

        check_response(response, &body)?;
        let session: VaultSession = serde_json::from_slice(&body)?;
        Ok(session.id)
    }
}
