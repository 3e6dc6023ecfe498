// duka/src/models/payment.rs

use serde::{Deserialize, Serialize};

/// Response code the gateway uses to signal "request accepted, check your
/// device". Anything else is a rejection. Acceptance is not completion:
/// the payer still confirms on the handset, and the backend's callback
/// handler observes the outcome.
pub const STK_ACCEPTED_CODE: &str = "0";

/// One-shot payment initiation payload. Never persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StkPushRequest {
  pub order_id: i64,
  /// Canonical `254XXXXXXXXX` form, produced by
  /// [`format_phone_number`](crate::payment::format_phone_number).
  pub phone_number: String,
  pub amount: f64,
}

/// Gateway reply. Field names are the gateway's own wire keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StkPushResponse {
  #[serde(rename = "MerchantRequestID")]
  pub merchant_request_id: String,
  #[serde(rename = "CheckoutRequestID")]
  pub checkout_request_id: String,
  #[serde(rename = "ResponseCode")]
  pub response_code: String,
  #[serde(rename = "ResponseDescription")]
  pub response_description: String,
  #[serde(rename = "CustomerMessage")]
  pub customer_message: String,
}

impl StkPushResponse {
  pub fn accepted(&self) -> bool {
    self.response_code == STK_ACCEPTED_CODE
  }
}
