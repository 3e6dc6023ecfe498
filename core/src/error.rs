// duka/src/error.rs

use anyhow::Error as AnyhowError;
use thiserror::Error;

/// Error taxonomy for the cart-to-order pipeline.
///
/// Read-side cart corruption never appears here: an unreadable or
/// unparsable cart slot is recovered locally as an empty cart.
#[derive(Debug, Error)]
pub enum DukaError {
  #[error("cart storage failure: {source}")]
  Storage {
    #[source]
    source: AnyhowError,
  },

  #[error("order creation failed: {source}")]
  OrderCreation {
    #[source]
    source: AnyhowError,
  },

  /// An item-creation call failed after the order already existed on the
  /// server. `items_created` counts the items that made it; nothing is
  /// rolled back automatically.
  #[error("order item creation failed for product {product_id} ({items_created} item(s) created before the failure): {source}")]
  OrderItemCreation {
    product_id: i64,
    items_created: usize,
    #[source]
    source: AnyhowError,
  },

  /// The delete call failed; the held order identifier is retained so the
  /// caller can retry.
  #[error("order deletion failed for order {order_id}: {source}")]
  OrderDeletion {
    order_id: i64,
    #[source]
    source: AnyhowError,
  },

  /// Local validation failure, surfaced before any network round trip.
  #[error("invalid phone number format: {input:?}")]
  InvalidPhoneFormat { input: String },

  /// The gateway rejected the request, or the call itself failed. `code`
  /// carries the gateway's response code when one was returned.
  #[error("payment initiation failed: {description}")]
  PaymentInitiation {
    code: Option<String>,
    description: String,
  },

  /// A sequencer operation was called in the wrong phase.
  #[error("checkout is {actual}, expected {expected}")]
  InvalidState {
    expected: &'static str,
    actual: &'static str,
  },

  #[error("cannot submit an empty cart")]
  EmptyCart,

  #[error("http transport error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("unexpected response from '{endpoint}': {detail}")]
  UnexpectedResponse { endpoint: String, detail: String },
}

pub type DukaResult<T, E = DukaError> = std::result::Result<T, E>;
