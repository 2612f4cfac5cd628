//! Transaction type attached to checkout payments.
//!
//! A payment's transaction reports whether the gateway accepted the card. A
//! failed transaction carries a [`TransactionErrorCode`] describing why.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The status of a transaction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    /// Transaction is pending completion.
    #[default]
    Pending,
    /// Transaction completed successfully.
    Success,
    /// Transaction failed.
    Failure,
    /// Transaction encountered an error.
    Error,
}

/// Standardized gateway error codes.
///
/// Unknown codes deserialize to [`TransactionErrorCode::Unknown`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Error)]
#[serde(rename_all = "snake_case")]
pub enum TransactionErrorCode {
    /// The card number is incorrect.
    #[error("incorrect_number")]
    IncorrectNumber,
    /// The card number is not a valid number.
    #[error("invalid_number")]
    InvalidNumber,
    /// The expiry date is invalid.
    #[error("invalid_expiry_date")]
    InvalidExpiryDate,
    /// The CVC is invalid.
    #[error("invalid_cvc")]
    InvalidCvc,
    /// The card has expired.
    #[error("expired_card")]
    ExpiredCard,
    /// The CVC does not match the card.
    #[error("incorrect_cvc")]
    IncorrectCvc,
    /// The ZIP code does not match the card.
    #[error("incorrect_zip")]
    IncorrectZip,
    /// The address does not match the card.
    #[error("incorrect_address")]
    IncorrectAddress,
    /// The card was declined.
    #[error("card_declined")]
    CardDeclined,
    /// The gateway failed to process the card.
    #[error("processing_error")]
    ProcessingError,
    /// The card holder must contact the issuer.
    #[error("call_issuer")]
    CallIssuer,
    /// The card was reported lost or stolen.
    #[error("pick_up_card")]
    PickUpCard,
    /// A code this client does not know.
    #[serde(other)]
    #[error("unknown")]
    Unknown,
}

/// A payment transaction.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Transaction {
    /// The unique identifier of the transaction.
    #[serde(default)]
    pub id: u64,

    /// The amount of money included in the transaction.
    #[serde(default)]
    pub amount: String,

    /// The order this transaction belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<u64>,

    /// Gateway error code for failed transactions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<TransactionErrorCode>,

    /// The status of the transaction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TransactionStatus>,

    /// Message from the gateway.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Whether this is a test transaction.
    #[serde(default)]
    pub test: bool,

    /// The three-letter currency code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// When the transaction was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Transaction {
    /// Returns `true` if the gateway accepted the transaction.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == Some(TransactionStatus::Success)
    }

    /// Returns the gateway error for failed transactions.
    #[must_use]
    pub fn error(&self) -> Option<TransactionErrorCode> {
        match self.status {
            Some(TransactionStatus::Failure | TransactionStatus::Error) => {
                Some(self.error_code.unwrap_or(TransactionErrorCode::Unknown))
            }
            _ => None,
        }
    }
}
