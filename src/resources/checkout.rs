//! Checkout resource and its operations.
//!
//! A checkout is created from line items, updated with addresses and a
//! shipping line, quoted for shipping rates, and finally paid for. Shipping
//! rate quotes and payments are processed asynchronously by the API, so
//! [`Checkout::shipping_rates`] and [`Checkout::create_payment`] go through
//! [`HttpClient::poll`].
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_admin::resources::{Checkout, CheckoutLineItem, Payment};
//! use tokio_util::sync::CancellationToken;
//!
//! let cancel = CancellationToken::new();
//! let checkout = Checkout {
//!     line_items: vec![CheckoutLineItem { variant_id: 39072856, quantity: 1 }],
//!     email: Some("buyer@example.com".to_string()),
//!     ..Default::default()
//! };
//!
//! let checkout = Checkout::save(&client, &checkout, &cancel).await?.into_data().unwrap();
//! let token = checkout.token.as_deref().unwrap();
//!
//! let rates = Checkout::shipping_rates(&client, token, &cancel).await?;
//! let payment = Checkout::create_payment(&client, token, &Payment::new("19.99"), &cancel).await?;
//! ```

use chrono::{DateTime, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::clients::{
    ApiResponse, HttpClient, HttpError, HttpMethod, HttpRequest, InvalidHttpRequestError,
};
use crate::resources::{CustomerAddress, Transaction};

/// Payment token type for Stripe vault tokens.
pub const STRIPE_VAULT_TOKEN: &str = "stripe_vault_token";

const UNIQUE_TOKEN_LEN: usize = 32;

/// A line item in a checkout.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CheckoutLineItem {
    /// The product variant being purchased.
    pub variant_id: u64,
    /// The number of units.
    pub quantity: u64,
}

/// A tax applied to a checkout.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct TaxLine {
    /// The name of the tax.
    #[serde(default)]
    pub title: String,

    /// The tax amount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,

    /// The tax rate as a decimal fraction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
}

/// The shipping method selected for a checkout.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ShippingLine {
    /// The handle of the selected shipping rate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,

    /// The price of the shipping method.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,

    /// The title of the shipping method.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Estimated delivery window.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub delivery_range: Vec<DateTime<Utc>>,
}

/// Checkout totals recomputed for a shipping rate.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ShippingRateTotals {
    /// The checkout subtotal before shipping and taxes.
    #[serde(default)]
    pub subtotal_price: String,
    /// The total tax.
    #[serde(default)]
    pub total_tax: String,
    /// The total price including shipping and taxes.
    #[serde(default)]
    pub total_price: String,
    /// The amount still owed.
    #[serde(default)]
    pub payment_due: String,
}

/// A shipping rate available for a checkout.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ShippingRate {
    /// The unique identifier of the shipping rate.
    #[serde(default)]
    pub id: String,

    /// The price of this rate.
    #[serde(default)]
    pub price: String,

    /// The title shown to the buyer.
    #[serde(default)]
    pub title: String,

    /// Checkout totals if this rate is selected.
    #[serde(default)]
    pub checkout: Option<ShippingRateTotals>,

    /// Whether a phone number is required for this rate.
    #[serde(default)]
    pub phone_required: bool,

    /// Estimated delivery window.
    #[serde(default)]
    pub delivery_range: Vec<DateTime<Utc>>,

    /// The handle to send back as the checkout's shipping line.
    #[serde(default)]
    pub handle: String,
}

impl ShippingRate {
    /// Returns a shipping line selecting this rate.
    #[must_use]
    pub fn to_shipping_line(&self) -> ShippingLine {
        ShippingLine {
            handle: Some(self.handle.clone()),
            ..Default::default()
        }
    }
}

/// A discount applied to a checkout by the server.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppliedDiscount {
    /// The discount amount.
    #[serde(default)]
    pub amount: String,
    /// The discount title.
    #[serde(default)]
    pub title: String,
    /// The discount description.
    #[serde(default)]
    pub description: String,
    /// The discount value.
    #[serde(default)]
    pub value: String,
    /// `fixed_amount` or `percentage`.
    #[serde(default)]
    pub value_type: String,
    /// Whether the discount applies to the checkout.
    #[serde(default)]
    pub applicable: bool,
    /// Why the discount does not apply, when `applicable` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub non_applicable_reason: Option<String>,
}

/// A tokenized payment method.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PaymentToken {
    /// The provider token, e.g. a Stripe token.
    pub payment_data: String,
    /// The token type, e.g. [`STRIPE_VAULT_TOKEN`].
    #[serde(rename = "type")]
    pub token_type: String,
}

/// Details about the buyer's request, used for fraud analysis.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct RequestDetails {
    /// The buyer's IP address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    /// The buyer's `Accept-Language` header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accept_language: Option<String>,
    /// The buyer's `User-Agent` header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

/// A payment against a checkout.
///
/// Either `session_id` (from [`CardVault`](crate::cardvault::CardVault)) or
/// `payment_token` identifies the payment method.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Payment {
    /// The unique identifier of the payment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// The amount to charge.
    #[serde(default)]
    pub amount: String,

    /// Card vault session ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    /// Client-side idempotency token.
    #[serde(default)]
    pub unique_token: String,

    /// Why the payment could not be processed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_processing_error_message: Option<String>,

    /// Tokenized payment method, when not using a vault session.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_token: Option<PaymentToken>,

    /// Details about the buyer's request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_details: Option<RequestDetails>,

    /// The transaction created for this payment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction: Option<Transaction>,
}

impl Payment {
    /// Creates a payment for `amount` with a fresh idempotency token.
    #[must_use]
    pub fn new(amount: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            unique_token: generate_unique_token(),
            ..Default::default()
        }
    }
}

/// Generates a random alphanumeric idempotency token.
#[must_use]
pub fn generate_unique_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(UNIQUE_TOKEN_LEN)
        .map(char::from)
        .collect()
}

/// A checkout.
///
/// `applied_discount` is computed by the server from `discount_code` and is
/// never sent on writes. To remove a discount, set `discount_code` to an
/// empty string.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Checkout {
    /// The items being purchased.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub line_items: Vec<CheckoutLineItem>,

    /// The buyer's email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// The checkout token. Absent until the checkout is created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// The checkout name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// The customer the checkout belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<u64>,

    /// The price of the line items before shipping and taxes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtotal_price: Option<String>,
    /// The total tax.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_tax: Option<String>,
    /// The total price including shipping and taxes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_price: Option<String>,
    /// The amount still owed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_due: Option<String>,
    /// The three-letter currency code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// The order created once the checkout completes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<u64>,
    /// URL of the order status page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_status_url: Option<String>,

    /// Stripe account used to create payment tokens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shopify_payments_account_id: Option<String>,

    /// Card vault URL for direct payment providers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_url: Option<String>,
    /// URL of the checkout page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_url: Option<String>,
    /// URL shown while the checkout is processing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_processing_url: Option<String>,

    /// The discount code to apply. An empty string removes the discount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_code: Option<String>,

    /// The discount the server applied. Read-only.
    #[serde(default, skip_serializing)]
    pub applied_discount: Option<AppliedDiscount>,

    /// The shipping address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<CustomerAddress>,
    /// The billing address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<CustomerAddress>,

    /// Whether prices include taxes.
    #[serde(default)]
    pub taxes_included: bool,

    /// The selected shipping method.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_line: Option<ShippingLine>,

    /// Taxes applied to the checkout.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tax_lines: Vec<TaxLine>,

    /// Payments made against the checkout.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub payments: Vec<Payment>,

    /// When the checkout was completed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Serialize)]
struct CheckoutRequest<'a> {
    checkout: &'a Checkout,
}

#[derive(Deserialize)]
struct CheckoutResponse {
    checkout: Checkout,
}

#[derive(Serialize)]
struct PaymentRequest<'a> {
    payment: &'a Payment,
}

#[derive(Deserialize)]
struct PaymentResponse {
    payment: Payment,
}

#[derive(Deserialize)]
struct ShippingRatesResponse {
    #[serde(default)]
    shipping_rates: Vec<ShippingRate>,
}

fn checkout_path(token: &str, suffix: &str) -> String {
    format!("/admin/checkouts/{}{suffix}", urlencoding::encode(token))
}

impl Checkout {
    /// Returns `true` if the checkout has been created on the server.
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Returns `true` once the checkout has been paid and completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Fetches a checkout by token.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn find(
        client: &HttpClient,
        token: &str,
        cancel: &CancellationToken,
    ) -> Result<ApiResponse<Self>, HttpError> {
        let request = HttpRequest::get(checkout_path(token, ".json"));
        let response = client.request::<CheckoutResponse>(request, cancel).await?;
        Ok(response.map(|wrapper| wrapper.checkout))
    }

    /// Creates a checkout.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn create(
        client: &HttpClient,
        checkout: &Self,
        cancel: &CancellationToken,
    ) -> Result<ApiResponse<Self>, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Post, "/admin/checkouts.json")
            .json(&CheckoutRequest { checkout })?
            .build()?;
        let response = client.request::<CheckoutResponse>(request, cancel).await?;
        Ok(response.map(|wrapper| wrapper.checkout))
    }

    /// Updates an existing checkout.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError::MissingToken`] if the checkout has
    /// no token, or [`HttpError`] if the request fails.
    pub async fn update(
        client: &HttpClient,
        checkout: &Self,
        cancel: &CancellationToken,
    ) -> Result<ApiResponse<Self>, HttpError> {
        let token = checkout
            .token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(InvalidHttpRequestError::MissingToken {
                resource: "checkout",
                operation: "update",
            })?;

        let request = HttpRequest::builder(HttpMethod::Put, checkout_path(token, ".json"))
            .json(&CheckoutRequest { checkout })?
            .build()?;
        let response = client.request::<CheckoutResponse>(request, cancel).await?;
        Ok(response.map(|wrapper| wrapper.checkout))
    }

    /// Creates the checkout if it has no token, otherwise updates it.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn save(
        client: &HttpClient,
        checkout: &Self,
        cancel: &CancellationToken,
    ) -> Result<ApiResponse<Self>, HttpError> {
        if checkout.has_token() {
            Self::update(client, checkout, cancel).await
        } else {
            Self::create(client, checkout, cancel).await
        }
    }

    /// Lists shipping rates for a checkout, waiting for the quote to finish.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if any request fails or `cancel` fires.
    pub async fn shipping_rates(
        client: &HttpClient,
        token: &str,
        cancel: &CancellationToken,
    ) -> Result<ApiResponse<Vec<ShippingRate>>, HttpError> {
        let request = HttpRequest::get(checkout_path(token, "/shipping_rates.json"));
        let response = client.poll::<ShippingRatesResponse>(request, cancel).await?;
        Ok(response.map(|wrapper| wrapper.shipping_rates))
    }

    /// Submits a payment and waits for it to be processed.
    ///
    /// The returned payment's `transaction` reports whether the charge
    /// succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if any request fails or `cancel` fires.
    pub async fn create_payment(
        client: &HttpClient,
        token: &str,
        payment: &Payment,
        cancel: &CancellationToken,
    ) -> Result<ApiResponse<Payment>, HttpError> {
        let request =
            HttpRequest::builder(HttpMethod::Post, checkout_path(token, "/payments.json"))
                .json(&PaymentRequest { payment })?
                .build()?;
        let response = client.poll::<PaymentResponse>(request, cancel).await?;
        Ok(response.map(|wrapper| wrapper.payment))
    }
}
