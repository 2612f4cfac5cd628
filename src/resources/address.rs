//! Address type used for checkout shipping and billing addresses.

use serde::{Deserialize, Serialize};

/// A customer's shipping or billing address.
///
/// # Example
///
/// ```rust
/// use shopify_admin::resources::CustomerAddress;
///
/// let address = CustomerAddress {
///     first_name: Some("Jane".to_string()),
///     last_name: Some("Doe".to_string()),
///     address1: Some("123 Queen St W".to_string()),
///     city: Some("Toronto".to_string()),
///     province_code: Some("ON".to_string()),
///     country_code: Some("CA".to_string()),
///     zip: Some("M5H 2M9".to_string()),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CustomerAddress {
    /// The first name of the person at the address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    /// The last name of the person at the address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    /// The company name at the address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,

    /// The street address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,

    /// Apartment, suite, etc.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,

    /// The city.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    /// The province or state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,

    /// The province or state code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province_code: Option<String>,

    /// The country name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    /// The two-letter country code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,

    /// The postal or ZIP code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,

    /// The phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}
