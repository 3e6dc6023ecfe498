// duka/src/payment/initiator.rs

//! One-shot STK push initiation against a previously placed order.

use std::sync::Arc;
use tracing::{info, instrument};

use crate::error::{DukaError, DukaResult};
use crate::models::{StkPushRequest, StkPushResponse};
use crate::payment::phone::format_phone_number;
use crate::services::PaymentGateway;

/// Validates and normalizes the phone number locally, submits exactly one
/// initiation request, and reports acceptance or rejection.
///
/// Fire-and-poll-elsewhere: payment completion is observed out of band by
/// the backend's callback handler, never polled from here.
pub struct PaymentInitiator {
  gateway: Arc<dyn PaymentGateway>,
}

impl PaymentInitiator {
  pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
    Self { gateway }
  }

  #[instrument(skip(self, phone_number))]
  pub async fn initiate(&self, order_id: i64, phone_number: &str, amount: f64) -> DukaResult<StkPushResponse> {
    if amount <= 0.0 {
      return Err(DukaError::PaymentInitiation {
        code: None,
        description: format!("amount must be positive, got {amount}"),
      });
    }
    let phone = format_phone_number(phone_number)?;

    let request = StkPushRequest {
      order_id,
      phone_number: phone,
      amount,
    };
    let response = self
      .gateway
      .initiate_stk_push(&request)
      .await
      .map_err(|e| match e {
        err @ DukaError::PaymentInitiation { .. } => err,
        other => DukaError::PaymentInitiation {
          code: None,
          description: other.to_string(),
        },
      })?;

    if !response.accepted() {
      let description = if response.response_description.is_empty() {
        "payment request was rejected".to_string()
      } else {
        response.response_description.clone()
      };
      return Err(DukaError::PaymentInitiation {
        code: Some(response.response_code.clone()),
        description,
      });
    }

    info!(
      order_id,
      merchant_request_id = %response.merchant_request_id,
      "stk push accepted, awaiting handset confirmation"
    );
    Ok(response)
  }
}
