// tests/payment_tests.rs
mod common;

use common::*;
use duka::DukaError;
use serial_test::serial;

#[tokio::test]
#[serial]
async fn accepted_push_reaches_the_gateway_with_a_normalized_number() {
  setup_tracing();
  let backend = mock_backend();
  let pay = initiator(&backend);

  let response = pay.initiate(4, "0712345678", 250.0).await.unwrap();

  assert!(response.accepted());
  assert!(!response.merchant_request_id.is_empty());
  assert!(!response.checkout_request_id.is_empty());

  let requests = backend.gateway.requests();
  assert_eq!(requests.len(), 1);
  assert_eq!(requests[0].order_id, 4);
  assert_eq!(requests[0].phone_number, "254712345678");
  assert_eq!(requests[0].amount, 250.0);
}

#[tokio::test]
#[serial]
async fn rejection_code_surfaces_the_gateway_description() {
  setup_tracing();
  let backend = mock_backend();
  backend.gateway.reject_with("1032", "Request cancelled by user");
  let pay = initiator(&backend);

  let err = pay.initiate(4, "0712345678", 250.0).await.unwrap_err();

  match err {
    DukaError::PaymentInitiation { code, description } => {
      assert_eq!(code.as_deref(), Some("1032"));
      assert_eq!(description, "Request cancelled by user");
    }
    other => panic!("expected PaymentInitiation, got {other:?}"),
  }
}

#[tokio::test]
#[serial]
async fn invalid_phone_fails_before_any_network_call() {
  setup_tracing();
  let backend = mock_backend();
  let pay = initiator(&backend);

  let err = pay.initiate(4, "12345", 250.0).await.unwrap_err();
  assert!(matches!(err, DukaError::InvalidPhoneFormat { .. }));
  assert!(backend.gateway.requests().is_empty());
}

#[tokio::test]
#[serial]
async fn non_positive_amount_fails_before_any_network_call() {
  setup_tracing();
  let backend = mock_backend();
  let pay = initiator(&backend);

  for amount in [0.0, -1.0] {
    let err = pay.initiate(4, "0712345678", amount).await.unwrap_err();
    assert!(matches!(err, DukaError::PaymentInitiation { code: None, .. }));
  }
  assert!(backend.gateway.requests().is_empty());
}
