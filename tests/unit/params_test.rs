use d1query::error::D1Error;
use d1query::params::{parse_param, parse_params};
use serde_json::json;

#[test]
fn test_integer_param() {
    assert_eq!(parse_param("42").unwrap(), json!(42));
}

#[test]
fn test_float_param() {
    assert_eq!(parse_param("1.5").unwrap(), json!(1.5));
}

#[test]
fn test_bool_and_null_params() {
    assert_eq!(parse_param("true").unwrap(), json!(true));
    assert_eq!(parse_param("null").unwrap(), json!(null));
}

#[test]
fn test_quoted_number_stays_string() {
    assert_eq!(parse_param("\"123\"").unwrap(), json!("123"));
}

#[test]
fn test_bare_text_is_string() {
    assert_eq!(parse_param("alice@example.com").unwrap(), json!("alice@example.com"));
}

#[test]
fn test_leading_zero_is_string() {
    assert_eq!(parse_param("007").unwrap(), json!("007"));
}

#[test]
fn test_array_param_rejected() {
    assert!(matches!(parse_param("[1,2]"), Err(D1Error::Input { .. })));
}

#[test]
fn test_object_param_rejected() {
    assert!(matches!(parse_param("{\"a\":1}"), Err(D1Error::Input { .. })));
}

#[test]
fn test_params_keep_order() {
    let raw = vec!["1".to_string(), "two".to_string(), "false".to_string()];
    assert_eq!(parse_params(&raw).unwrap(), vec![json!(1), json!("two"), json!(false)]);
}
