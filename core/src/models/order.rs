// duka/src/models/order.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::price::Price;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
  Pending,
  Completed,
  Cancelled,
}

/// A server-owned checkout record. `order_id` is assigned by the backend
/// and is authoritative; the client never invents one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
  pub order_id: i64,
  pub user_id: i64,
  pub total_amount: Price,
  pub status: OrderStatus,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub created_at: Option<DateTime<Utc>>,
}

/// Payload for the create-order call. The total is the cart subtotal at
/// the moment of submission.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
  pub user_id: i64,
  pub total_amount: Price,
}

/// Partial update for an existing order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPatch {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub status: Option<OrderStatus>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub total_amount: Option<Price>,
}
