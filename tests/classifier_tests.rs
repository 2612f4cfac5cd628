//! Integration tests for error body classification.
//!
//! These tests feed real Admin API error bodies through the classifier and
//! check the message shown to users.

use shopify_admin::clients::{classify, AddressKind, ClassifiedError, ErrorEnvelope};
use shopify_admin::UnrecognizedErrorKey;

fn classify_body(body: &str) -> Result<ClassifiedError, UnrecognizedErrorKey> {
    classify(&ErrorEnvelope::from_slice(body.as_bytes()))
}

// ============================================================================
// API Error Fixtures
// ============================================================================

#[test]
fn test_line_item_invalid_variant_id() {
    let body = r#"
{
  "errors": {
    "line_items": {
      "0": {
        "variant_id": [
          {
            "code": "invalid",
            "message": "is invalid",
            "options": {}
          }
        ]
      }
    }
  }
}"#;

    let error = classify_body(body).unwrap();
    assert_eq!(error.to_string(), "line_items at pos(0): variant_id is invalid");
    assert_eq!(error.error_type(), "line_items");
}

#[test]
fn test_blank_shipping_zip() {
    let body = r#"
{
  "errors": {
    "shipping_address": {
      "zip": [
        {
          "code": "blank",
          "message": "can't be blank",
          "options": {}
        }
      ]
    }
  }
}"#;

    let error = classify_body(body).unwrap();
    assert_eq!(error.to_string(), "shipping_address: zip can't be blank");
    assert!(matches!(
        error,
        ClassifiedError::Address {
            kind: AddressKind::Shipping,
            ref code,
            ..
        } if code == "blank"
    ));
}

#[test]
fn test_blank_billing_zip() {
    let body = r#"
{
  "errors": {
    "billing_address": {
      "zip": [
        {
          "code": "blank",
          "message": "can't be blank",
          "options": {}
        }
      ]
    }
  }
}"#;

    let error = classify_body(body).unwrap();
    assert_eq!(error.to_string(), "billing_address: zip can't be blank");
    assert_eq!(error.error_type(), "billing_address");
}

#[test]
fn test_shipping_country_not_supported() {
    let body = r#"
{
  "errors": {
	"shipping_address": {
      "country": [
        {
          "code": "not_supported",
          "message": "is not supported",
          "options": {}
        }
      ]
	}
  }
}"#;

    let error = classify_body(body).unwrap();
    assert_eq!(error.to_string(), "shipping_address: country is not supported");
}

#[test]
fn test_billing_country_not_supported() {
    let body = r#"
{
  "errors": {
    "billing_address": {
      "country": [
        {
          "code": "not_supported",
          "message": "is not supported",
          "options": {}
        }
      ]
    }
  }
}"#;

    let error = classify_body(body).unwrap();
    assert_eq!(error.to_string(), "billing_address: country is not supported");
}

#[test]
fn test_discount_code_not_found() {
    let body = r#"
{
  "errors": {
    "discount_code": [
      {
        "code": "discount_not_found",
        "message": "Unable to find a valid discount matching the code entered",
        "options": {}
      }
    ]
  }
} "#;

    let error = classify_body(body).unwrap();
    assert_eq!(
        error.to_string(),
        "Unable to find a valid discount matching the code entered"
    );
    assert_eq!(error.error_type(), "discount_code");
}

#[test]
fn test_checkout_nested_discount_code() {
    let body = r#"{"errors":{"checkout":{"discount_code":[{},{"reason":"expired"}]}}}"#;

    let error = classify_body(body).unwrap();
    assert_eq!(error.to_string(), "expired");
}

// ============================================================================
// Classification Rules
// ============================================================================

#[test]
fn test_email_is_detected_regardless_of_value() {
    for body in [
        r#"{"errors":{"email":"is invalid"}}"#,
        r#"{"errors":{"email":["is invalid"]}}"#,
        r#"{"errors":{"email":{"format":[{"code":"invalid"}]}}}"#,
        r#"{"errors":{"email":null}}"#,
    ] {
        let error = classify_body(body).unwrap();
        assert_eq!(error.to_string(), "email is invalid", "body {body}");
    }
}

#[test]
fn test_email_wins_over_other_keys() {
    let body = r#"{"errors":{
        "billing_address":{"zip":[{"code":"blank","message":"can't be blank"}]},
        "email":"is invalid"
    }}"#;
    assert_eq!(classify_body(body).unwrap().to_string(), "email is invalid");

    let body = r#"{"errors":{"base":"oops","email":["is invalid"]}}"#;
    assert_eq!(classify_body(body).unwrap().to_string(), "email is invalid");

    let body = r#"{"errors":{"checkout":{"discount_code":[{"reason":"expired"}]},"email":{}}}"#;
    assert!(matches!(
        classify_body(body).unwrap(),
        ClassifiedError::Email { .. }
    ));
}

#[test]
fn test_mistyped_issue_fields_do_not_hide_errors() {
    let body = r#"{"errors":{"shipping_address":{"zip":[{"code":null,"message":"can't be blank"}]}}}"#;
    assert_eq!(
        classify_body(body).unwrap().to_string(),
        "shipping_address: zip can't be blank"
    );

    let body = r#"{"errors":{"line_items":{"0":{
        "quantity":[{"code":1}],
        "variant_id":[{"code":"invalid","message":"is invalid"}]
    }}}}"#;
    assert_eq!(
        classify_body(body).unwrap().to_string(),
        "line_items at pos(0): variant_id is invalid"
    );
}

#[test]
fn test_not_enough_in_stock() {
    let body = r#"{"errors":{"line_items":{"2":{"quantity":[
        {"code":"not_enough_in_stock","message":"Not enough items available. Only 3 left.","options":{"remaining":3}}
    ]}}}}"#;

    let error = classify_body(body).unwrap();
    assert!(error.is_not_enough_in_stock());
    assert_eq!(
        error,
        ClassifiedError::LineItem {
            position: "2".to_string(),
            field: "quantity".to_string(),
            code: "not_enough_in_stock".to_string(),
            message: "Not enough items available. Only 3 left.".to_string(),
            remaining: Some(3),
        }
    );
}

#[test]
fn test_first_key_in_ascending_order_wins() {
    let body = r#"{"errors":{
        "shipping_address":{"zip":[{"code":"blank","message":"can't be blank"}]},
        "billing_address":{"city":[{"code":"blank","message":"can't be blank"}]}
    }}"#;

    let error = classify_body(body).unwrap();
    assert_eq!(error.to_string(), "billing_address: city can't be blank");
}

#[test]
fn test_bare_string_errors_are_generic() {
    let error = classify_body(r#"{"errors":"Not Found"}"#).unwrap();

    assert_eq!(error.to_string(), "Not Found");
    assert_eq!(error.error_type(), "generic");
}

#[test]
fn test_empty_and_malformed_bodies_are_generic() {
    for body in ["", "not json", "{}", r#"{"errors":{}}"#] {
        let error = classify_body(body).unwrap();
        assert!(
            matches!(error, ClassifiedError::Generic { .. }),
            "body {body:?}"
        );
    }
}

#[test]
fn test_scalar_under_unknown_key_is_unrecognized() {
    let error = classify_body(r#"{"errors":{"base":42}}"#).unwrap_err();

    assert_eq!(error.key, "base");
    assert!(error.to_string().contains("unknown shopify error key base"));
}

#[test]
fn test_classification_is_deterministic() {
    let body = r#"{"errors":{
        "line_items":{"1":{"quantity":[{"code":"invalid","message":"is invalid"}]}},
        "discount_code":[{"message":"expired"}],
        "shipping_address":{"zip":[{"code":"blank","message":"can't be blank"}]}
    }}"#;
    let envelope = ErrorEnvelope::from_slice(body.as_bytes());

    let first = classify(&envelope).unwrap();
    for _ in 0..10 {
        assert_eq!(classify(&envelope).unwrap(), first);
    }
    assert_eq!(first.to_string(), "expired");
}
