//! Classification of Admin API error bodies.
//!
//! Error bodies have the general form
//!
//! ```json
//! { "errors": { "title": ["something is wrong"] } }
//! ```
//!
//! but the shape under `errors` differs between subsystems. The checkout API
//! nests per-field issue lists under `line_items`, `shipping_address` and
//! `billing_address`, reports discount problems either as a list or nested
//! under `checkout`, and sometimes sends a bare string instead of a mapping.
//!
//! [`ErrorEnvelope`] decodes those shapes into a closed set of variants and
//! [`classify`] turns an envelope into exactly one [`ClassifiedError`].
//!
//! # Example
//!
//! ```rust
//! use shopify_admin::clients::{classify, ClassifiedError, ErrorEnvelope};
//!
//! let body = br#"{"errors":{"shipping_address":{"zip":[{"code":"blank","message":"can't be blank","options":{}}]}}}"#;
//! let envelope = ErrorEnvelope::from_slice(body);
//! let error = classify(&envelope).unwrap();
//!
//! assert_eq!(error.to_string(), "shipping_address: zip can't be blank");
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Line item error code sent when the requested quantity exceeds stock.
pub const NOT_ENOUGH_IN_STOCK: &str = "not_enough_in_stock";

const UNKNOWN_ERROR: &str = "unknown, unparsed error";

/// The decoded top-level error body of a failed response.
///
/// Decoding never fails: bodies that are empty, not JSON, or missing the
/// `errors` field produce an envelope without errors.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// The `errors` field, if present and not null.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<ErrorsField>,
}

/// The shapes the `errors` field is known to take.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorsField {
    /// A mapping from error key to detail.
    Keyed(BTreeMap<String, ErrorDetail>),
    /// A bare message, e.g. `{"errors": "Not Found"}`.
    Message(String),
    /// Anything else.
    Other(Value),
}

/// The value stored under one key of a keyed `errors` mapping.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    /// A nested mapping, e.g. field name to issue list.
    Object(BTreeMap<String, Value>),
    /// A list of issues or messages.
    List(Vec<Value>),
    /// A string, number, boolean or null.
    Scalar(Value),
}

/// One validation issue as reported by the checkout API.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorIssue {
    /// Machine readable code, e.g. `blank` or `not_enough_in_stock`.
    #[serde(default)]
    pub code: String,
    /// Human readable message, e.g. `can't be blank`.
    #[serde(default)]
    pub message: String,
    /// Extra data attached to the issue.
    #[serde(default)]
    pub options: Option<IssueOptions>,
}

/// Extra data attached to an [`ErrorIssue`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct IssueOptions {
    /// Remaining stock for `not_enough_in_stock` issues.
    #[serde(default)]
    pub remaining: Option<i64>,
}

impl ErrorIssue {
    /// Reads an issue object field by field.
    ///
    /// Missing or mistyped fields are left empty so one bad value does not
    /// hide the rest of the issue. Returns `None` if `value` is not an object
    /// or carries neither a code nor a message.
    fn from_value(value: &Value) -> Option<Self> {
        let fields = value.as_object()?;
        let text = |key: &str| {
            fields
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        let (code, message) = (text("code"), text("message"));
        if code.is_empty() && message.is_empty() {
            return None;
        }

        Some(Self {
            code,
            message,
            options: fields.get("options").and_then(Value::as_object).map(|options| {
                IssueOptions {
                    remaining: options.get("remaining").and_then(Value::as_i64),
                }
            }),
        })
    }

    /// Returns the first reportable issue in a list of issues.
    fn first_in(issues: &Value) -> Option<Self> {
        issues.as_array()?.iter().find_map(Self::from_value)
    }
}

impl ErrorEnvelope {
    /// Decodes an envelope from a response body.
    ///
    /// Malformed or empty bodies yield an empty envelope.
    #[must_use]
    pub fn from_slice(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    /// Returns `true` if the envelope carries no error keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match &self.errors {
            None => true,
            Some(ErrorsField::Keyed(errors)) => errors.is_empty(),
            Some(_) => false,
        }
    }

    /// Returns the message used when no specific error could be classified.
    #[must_use]
    pub fn message(&self) -> String {
        match &self.errors {
            Some(ErrorsField::Keyed(errors)) => errors
                .iter()
                .next()
                .map_or_else(|| UNKNOWN_ERROR.to_string(), |(key, detail)| {
                    format!("{key}: {detail}")
                }),
            Some(ErrorsField::Message(message)) => message.clone(),
            Some(ErrorsField::Other(_)) | None => UNKNOWN_ERROR.to_string(),
        }
    }
}

impl fmt::Display for ErrorEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

/// Which address of a checkout failed validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AddressKind {
    /// The `shipping_address` of a checkout.
    Shipping,
    /// The `billing_address` of a checkout.
    Billing,
}

impl AddressKind {
    /// Returns the error key the API uses for this address.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Shipping => "shipping_address",
            Self::Billing => "billing_address",
        }
    }
}

impl fmt::Display for AddressKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed response reduced to the single error it reports.
///
/// The `Display` output of each variant is the message shown to end users.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ClassifiedError {
    /// A line item failed validation.
    #[error("line_items at pos({position}): {field} {message}")]
    LineItem {
        /// Index of the line item in the cart, as sent by the API.
        position: String,
        /// The failing field, e.g. `variant_id` or `quantity`.
        field: String,
        /// Machine readable code.
        code: String,
        /// Human readable message.
        message: String,
        /// Remaining stock, sent with `not_enough_in_stock`.
        remaining: Option<i64>,
    },

    /// The shipping or billing address failed validation.
    #[error("{kind}: {field} {message}")]
    Address {
        /// Which address failed.
        kind: AddressKind,
        /// The failing field, e.g. `zip`.
        field: String,
        /// Machine readable code.
        code: String,
        /// Human readable message.
        message: String,
    },

    /// The email address was rejected.
    #[error("email {message}")]
    Email {
        /// Human readable message.
        message: String,
    },

    /// The discount code was rejected.
    #[error("{}", display_reason(.reason))]
    DiscountCode {
        /// The reason as sent by the API; usually a string.
        reason: Value,
    },

    /// No specific shape matched.
    #[error("{raw}")]
    Generic {
        /// The envelope the error was classified from.
        raw: ErrorEnvelope,
    },
}

impl ClassifiedError {
    /// Returns the error key this error was classified from.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::LineItem { .. } => "line_items",
            Self::Address { kind, .. } => kind.as_str(),
            Self::Email { .. } => "email",
            Self::DiscountCode { .. } => "discount_code",
            Self::Generic { .. } => "generic",
        }
    }

    /// Returns `true` for line item errors caused by insufficient stock.
    #[must_use]
    pub fn is_not_enough_in_stock(&self) -> bool {
        matches!(self, Self::LineItem { code, .. } if code == NOT_ENOUGH_IN_STOCK)
    }
}

fn display_reason(reason: &Value) -> String {
    match reason {
        Value::String(reason) => reason.clone(),
        other => other.to_string(),
    }
}

/// An error key whose value has a shape the classifier does not handle.
///
/// This indicates the API started sending something new and should be
/// reported with the raw payload.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("unknown shopify error key {key}: {value}")]
pub struct UnrecognizedErrorKey {
    /// The top-level error key.
    pub key: String,
    /// The value stored under the key.
    pub value: Value,
}

/// Reduces an error envelope to the first error it reports.
///
/// An `email` key always yields [`ClassifiedError::Email`], whatever its
/// value and whatever other keys are present. Otherwise top-level keys are
/// visited in ascending key order and the first key that yields an error
/// wins:
///
/// 1. Object values under `line_items`, `checkout`, `shipping_address` and
///    `billing_address` yield line item, discount code and address errors.
/// 2. A list under `discount_code` yields a discount code error.
/// 3. Other object or list values are skipped.
/// 4. A scalar value fails classification with [`UnrecognizedErrorKey`].
///
/// When nothing matches, or `errors` is not a mapping, the envelope itself is
/// returned as [`ClassifiedError::Generic`].
///
/// # Errors
///
/// Returns [`UnrecognizedErrorKey`] when a key other than `email` holds a
/// scalar value.
pub fn classify(envelope: &ErrorEnvelope) -> Result<ClassifiedError, UnrecognizedErrorKey> {
    let Some(ErrorsField::Keyed(errors)) = &envelope.errors else {
        return Ok(ClassifiedError::Generic {
            raw: envelope.clone(),
        });
    };

    if errors.contains_key("email") {
        return Ok(ClassifiedError::Email {
            message: "is invalid".to_string(),
        });
    }

    for (key, detail) in errors {
        let found = match detail {
            ErrorDetail::Object(fields) => match key.as_str() {
                "line_items" => line_item_error(fields),
                "checkout" => checkout_error(fields),
                "shipping_address" => address_error(AddressKind::Shipping, fields),
                "billing_address" => address_error(AddressKind::Billing, fields),
                _ => None,
            },
            ErrorDetail::List(items) => match key.as_str() {
                "discount_code" => items.first().map(discount_code_error),
                _ => None,
            },
            ErrorDetail::Scalar(value) => {
                return Err(UnrecognizedErrorKey {
                    key: key.clone(),
                    value: value.clone(),
                })
            }
        };

        if let Some(error) = found {
            return Ok(error);
        }
    }

    Ok(ClassifiedError::Generic {
        raw: envelope.clone(),
    })
}

fn line_item_error(positions: &BTreeMap<String, Value>) -> Option<ClassifiedError> {
    let (position, fields) = positions.iter().next()?;

    let (field, issue) = fields
        .as_object()
        .and_then(|fields| {
            fields
                .iter()
                .find_map(|(field, issues)| Some((field.clone(), ErrorIssue::first_in(issues)?)))
        })
        .unwrap_or_default();

    Some(ClassifiedError::LineItem {
        position: position.clone(),
        field,
        code: issue.code,
        message: issue.message,
        remaining: issue.options.and_then(|options| options.remaining),
    })
}

fn checkout_error(fields: &BTreeMap<String, Value>) -> Option<ClassifiedError> {
    let reason = fields
        .get("discount_code")?
        .as_array()?
        .iter()
        .find_map(|item| item.as_object()?.values().next().cloned())?;

    Some(ClassifiedError::DiscountCode { reason })
}

fn address_error(kind: AddressKind, fields: &BTreeMap<String, Value>) -> Option<ClassifiedError> {
    fields.iter().find_map(|(field, issues)| {
        let issue = ErrorIssue::first_in(issues)?;

        Some(ClassifiedError::Address {
            kind,
            field: field.clone(),
            code: issue.code,
            message: issue.message,
        })
    })
}

fn discount_code_error(item: &Value) -> ClassifiedError {
    let reason = item
        .as_object()
        .map_or_else(|| item.clone(), |fields| {
            fields.get("message").cloned().unwrap_or(Value::Null)
        });

    ClassifiedError::DiscountCode { reason }
}
