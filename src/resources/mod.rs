//! Admin API checkout resources.
//!
//! Resource operations are associated functions taking the [`HttpClient`]
//! they run on and a cancellation token:
//!
//! ```rust,ignore
//! let checkout = Checkout::find(&client, "b490a9220cd14d7344024f4874f640a6", &cancel).await?;
//! ```
//!
//! [`HttpClient`]: crate::clients::HttpClient

mod address;
mod checkout;
mod transaction;

pub use address::CustomerAddress;
pub use checkout::{
    generate_unique_token, AppliedDiscount, Checkout, CheckoutLineItem, Payment, PaymentToken,
    RequestDetails, ShippingLine, ShippingRate, ShippingRateTotals, TaxLine, STRIPE_VAULT_TOKEN,
};
pub use transaction::{Transaction, TransactionErrorCode, TransactionStatus};
