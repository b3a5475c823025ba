use super::omise::{decode, into_charge, into_token};
use super::GatewayError;
use anyhow::Result;

#[test]
fn test_decode_token_response() -> Result<()> {
    let body = br#"{"object":"token","id":"tokn_test_5g5mep9bh0xeyzfsfzl","livemode":false,"used":false,"card":{"object":"card","last_digits":"4242"}}"#;

    let token = into_token(decode(200, body)?)?;

    assert_eq!(token.id, "tokn_test_5g5mep9bh0xeyzfsfzl");

    Ok(())
}

#[test]
fn test_decode_successful_charge_uses_reported_amount() -> Result<()> {
    let body = br#"{"object":"charge","id":"chrg_test_5g5mf1l2","amount":2879410,"currency":"thb","status":"successful","paid":true,"failure_code":null,"failure_message":null}"#;

    let charge = into_charge(decode(200, body)?)?;

    assert_eq!(charge.id, "chrg_test_5g5mf1l2");
    assert_eq!(charge.amount.subunits(), 2879410);

    Ok(())
}

#[test]
fn test_decode_error_object_becomes_rejection() {
    let body = br#"{"object":"error","location":"https://www.omise.co/api-errors#invalid-card","code":"invalid_card","message":"expiration date cannot be in the past"}"#;

    let result = decode(400, body);

    assert!(matches!(
        result,
        Err(GatewayError::Rejected { ref code, ref message }) if code == "invalid_card" && message == "expiration date cannot be in the past"
    ));
}

#[test]
fn test_failed_charge_is_not_treated_as_settled() {
    let body = br#"{"object":"charge","id":"chrg_test_failed","amount":5000,"status":"failed","failure_code":"insufficient_fund","failure_message":"insufficient funds in the account"}"#;

    let result = decode(200, body).and_then(into_charge);

    assert!(matches!(
        result,
        Err(GatewayError::Declined { ref charge_id, ref code, .. }) if charge_id == "chrg_test_failed" && code == "insufficient_fund"
    ));
}

#[test]
fn test_unknown_charge_status_without_failure_code_is_declined() {
    let body = br#"{"object":"charge","id":"chrg_test_odd","amount":5000,"status":"mystery"}"#;

    let result = decode(200, body).and_then(into_charge);

    assert!(matches!(result, Err(GatewayError::Declined { ref code, .. }) if code == "unknown"));
}

#[test]
fn test_mismatched_object_kind_is_reported() {
    let body = br#"{"object":"token","id":"tokn_test_1"}"#;

    let result = decode(200, body).and_then(into_charge);

    assert!(matches!(result, Err(GatewayError::UnexpectedObject { expected: "charge", found: "token" })));
}

#[test]
fn test_undecodable_body_keeps_http_status() {
    let result = decode(502, b"<html>Bad Gateway</html>");

    assert!(matches!(result, Err(GatewayError::Decode { status: 502, .. })));
}
