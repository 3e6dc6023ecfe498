// duka/src/services/mod.rs

//! Seams to the remote backend. The sequencer and payment initiator only
//! see these traits; the HTTP and in-memory implementations live alongside.

pub mod http;
pub mod mock;

use async_trait::async_trait;

use crate::error::DukaResult;
use crate::models::{
  NewOrder, NewOrderItem, Order, OrderItem, OrderItemPatch, OrderPatch, StkPushRequest, StkPushResponse,
};

/// The backend's order resource.
#[async_trait]
pub trait OrderService: Send + Sync {
  async fn create_order(&self, order: &NewOrder) -> DukaResult<Order>;
  async fn order(&self, order_id: i64) -> DukaResult<Order>;
  async fn orders_for_user(&self, user_id: i64) -> DukaResult<Vec<Order>>;
  async fn all_orders(&self) -> DukaResult<Vec<Order>>;
  async fn update_order(&self, order_id: i64, patch: &OrderPatch) -> DukaResult<Order>;
  async fn delete_order(&self, order_id: i64) -> DukaResult<()>;
}

/// The backend's order-item resource.
#[async_trait]
pub trait OrderItemService: Send + Sync {
  async fn create_order_item(&self, item: &NewOrderItem) -> DukaResult<OrderItem>;
  async fn order_item(&self, order_item_id: i64) -> DukaResult<OrderItem>;
  async fn items_for_order(&self, order_id: i64) -> DukaResult<Vec<OrderItem>>;
  async fn all_order_items(&self) -> DukaResult<Vec<OrderItem>>;
  async fn update_order_item(&self, order_item_id: i64, patch: &OrderItemPatch) -> DukaResult<OrderItem>;
  async fn delete_order_item(&self, order_item_id: i64) -> DukaResult<()>;
}

/// The mobile-money gateway. One-shot: initiation only, no completion
/// polling (the backend's callback handler owns that side).
#[async_trait]
pub trait PaymentGateway: Send + Sync {
  async fn initiate_stk_push(&self, request: &StkPushRequest) -> DukaResult<StkPushResponse>;
}

pub use http::HttpBackend;
pub use mock::{MockOrderItemService, MockOrderService, MockPaymentGateway};
