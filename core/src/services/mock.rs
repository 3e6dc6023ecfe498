// duka/src/services/mock.rs

//! In-memory stand-ins for the remote backend, used by the test suite and
//! the demo binary's offline mode. Failure switches let callers script the
//! outcome of upcoming calls.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use std::time::Duration;
use tokio::time::sleep;
use uuid::Uuid;

use crate::error::{DukaError, DukaResult};
use crate::models::{
  NewOrder, NewOrderItem, Order, OrderItem, OrderItemPatch, OrderPatch, OrderStatus, StkPushRequest, StkPushResponse,
  STK_ACCEPTED_CODE,
};
use crate::services::{OrderItemService, OrderService, PaymentGateway};

const SIMULATED_LATENCY: Duration = Duration::from_millis(5);

fn backend_failure(endpoint: &str) -> DukaError {
  DukaError::UnexpectedResponse {
    endpoint: endpoint.to_string(),
    detail: "simulated backend failure".to_string(),
  }
}

fn not_found(endpoint: &str, id: i64) -> DukaError {
  DukaError::UnexpectedResponse {
    endpoint: endpoint.to_string(),
    detail: format!("no record with id {id}"),
  }
}

#[derive(Default)]
struct OrderTable {
  orders: Vec<Order>,
  next_id: i64,
  fail_next_create: bool,
  fail_next_delete: bool,
}

#[derive(Default)]
pub struct MockOrderService {
  table: Mutex<OrderTable>,
}

impl MockOrderService {
  pub fn new() -> Self {
    Self::default()
  }

  /// Makes the next create call fail.
  pub fn fail_next_create(&self) {
    self.table.lock().fail_next_create = true;
  }

  /// Makes the next delete call fail.
  pub fn fail_next_delete(&self) {
    self.table.lock().fail_next_delete = true;
  }

  /// Snapshot of the stored orders.
  pub fn orders(&self) -> Vec<Order> {
    self.table.lock().orders.clone()
  }
}

#[async_trait]
impl OrderService for MockOrderService {
  async fn create_order(&self, order: &NewOrder) -> DukaResult<Order> {
    sleep(SIMULATED_LATENCY).await;
    let mut table = self.table.lock();
    if table.fail_next_create {
      table.fail_next_create = false;
      return Err(backend_failure("create-Order"));
    }
    table.next_id += 1;
    let created = Order {
      order_id: table.next_id,
      user_id: order.user_id,
      total_amount: order.total_amount,
      status: OrderStatus::Pending,
      created_at: Some(Utc::now()),
    };
    table.orders.push(created.clone());
    Ok(created)
  }

  async fn order(&self, order_id: i64) -> DukaResult<Order> {
    sleep(SIMULATED_LATENCY).await;
    self
      .table
      .lock()
      .orders
      .iter()
      .find(|o| o.order_id == order_id)
      .cloned()
      .ok_or_else(|| not_found("Order", order_id))
  }

  async fn orders_for_user(&self, user_id: i64) -> DukaResult<Vec<Order>> {
    sleep(SIMULATED_LATENCY).await;
    Ok(
      self
        .table
        .lock()
        .orders
        .iter()
        .filter(|o| o.user_id == user_id)
        .cloned()
        .collect(),
    )
  }

  async fn all_orders(&self) -> DukaResult<Vec<Order>> {
    sleep(SIMULATED_LATENCY).await;
    Ok(self.table.lock().orders.clone())
  }

  async fn update_order(&self, order_id: i64, patch: &OrderPatch) -> DukaResult<Order> {
    sleep(SIMULATED_LATENCY).await;
    let mut table = self.table.lock();
    let order = table
      .orders
      .iter_mut()
      .find(|o| o.order_id == order_id)
      .ok_or_else(|| not_found("update-Order", order_id))?;
    if let Some(status) = patch.status {
      order.status = status;
    }
    if let Some(total) = patch.total_amount {
      order.total_amount = total;
    }
    Ok(order.clone())
  }

  async fn delete_order(&self, order_id: i64) -> DukaResult<()> {
    sleep(SIMULATED_LATENCY).await;
    let mut table = self.table.lock();
    if table.fail_next_delete {
      table.fail_next_delete = false;
      return Err(backend_failure("delete-Order"));
    }
    let before = table.orders.len();
    table.orders.retain(|o| o.order_id != order_id);
    if table.orders.len() == before {
      return Err(not_found("delete-Order", order_id));
    }
    Ok(())
  }
}

#[derive(Default)]
struct OrderItemTable {
  items: Vec<OrderItem>,
  next_id: i64,
  create_calls: usize,
  fail_create_call: Option<usize>,
}

#[derive(Default)]
pub struct MockOrderItemService {
  table: Mutex<OrderItemTable>,
}

impl MockOrderItemService {
  pub fn new() -> Self {
    Self::default()
  }

  /// Fails the nth create call, counted 1-based across the service's
  /// lifetime.
  pub fn fail_create_call(&self, nth: usize) {
    self.table.lock().fail_create_call = Some(nth);
  }

  /// Snapshot of the stored items.
  pub fn items(&self) -> Vec<OrderItem> {
    self.table.lock().items.clone()
  }

  /// How many create calls were attempted, including failed ones.
  pub fn create_calls(&self) -> usize {
    self.table.lock().create_calls
  }
}

#[async_trait]
impl OrderItemService for MockOrderItemService {
  async fn create_order_item(&self, item: &NewOrderItem) -> DukaResult<OrderItem> {
    sleep(SIMULATED_LATENCY).await;
    let mut table = self.table.lock();
    table.create_calls += 1;
    if table.fail_create_call == Some(table.create_calls) {
      return Err(backend_failure("create-OrderItem"));
    }
    table.next_id += 1;
    let created = OrderItem {
      order_item_id: table.next_id,
      order_id: item.order_id,
      product_id: item.product_id,
      quantity: item.quantity,
      price: item.price,
    };
    table.items.push(created.clone());
    Ok(created)
  }

  async fn order_item(&self, order_item_id: i64) -> DukaResult<OrderItem> {
    sleep(SIMULATED_LATENCY).await;
    self
      .table
      .lock()
      .items
      .iter()
      .find(|i| i.order_item_id == order_item_id)
      .cloned()
      .ok_or_else(|| not_found("OrderItem", order_item_id))
  }

  async fn items_for_order(&self, order_id: i64) -> DukaResult<Vec<OrderItem>> {
    sleep(SIMULATED_LATENCY).await;
    Ok(
      self
        .table
        .lock()
        .items
        .iter()
        .filter(|i| i.order_id == order_id)
        .cloned()
        .collect(),
    )
  }

  async fn all_order_items(&self) -> DukaResult<Vec<OrderItem>> {
    sleep(SIMULATED_LATENCY).await;
    Ok(self.table.lock().items.clone())
  }

  async fn update_order_item(&self, order_item_id: i64, patch: &OrderItemPatch) -> DukaResult<OrderItem> {
    sleep(SIMULATED_LATENCY).await;
    let mut table = self.table.lock();
    let item = table
      .items
      .iter_mut()
      .find(|i| i.order_item_id == order_item_id)
      .ok_or_else(|| not_found("update-OrderItem", order_item_id))?;
    if let Some(quantity) = patch.quantity {
      item.quantity = quantity;
    }
    if let Some(price) = patch.price {
      item.price = price;
    }
    Ok(item.clone())
  }

  async fn delete_order_item(&self, order_item_id: i64) -> DukaResult<()> {
    sleep(SIMULATED_LATENCY).await;
    let mut table = self.table.lock();
    let before = table.items.len();
    table.items.retain(|i| i.order_item_id != order_item_id);
    if table.items.len() == before {
      return Err(not_found("delete-OrderItem", order_item_id));
    }
    Ok(())
  }
}

#[derive(Default)]
struct GatewayState {
  requests: Vec<StkPushRequest>,
  rejection: Option<(String, String)>,
}

#[derive(Default)]
pub struct MockPaymentGateway {
  state: Mutex<GatewayState>,
}

impl MockPaymentGateway {
  pub fn new() -> Self {
    Self::default()
  }

  /// Answers subsequent pushes with the given non-zero response code and
  /// description.
  pub fn reject_with(&self, code: impl Into<String>, description: impl Into<String>) {
    self.state.lock().rejection = Some((code.into(), description.into()));
  }

  /// All requests that reached the gateway.
  pub fn requests(&self) -> Vec<StkPushRequest> {
    self.state.lock().requests.clone()
  }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
  async fn initiate_stk_push(&self, request: &StkPushRequest) -> DukaResult<StkPushResponse> {
    sleep(SIMULATED_LATENCY).await;
    let mut state = self.state.lock();
    state.requests.push(request.clone());

    let merchant_request_id = format!("mock_mr_{}", Uuid::new_v4());
    let checkout_request_id = format!("ws_CO_{}", Uuid::new_v4().simple());

    if let Some((code, description)) = state.rejection.clone() {
      return Ok(StkPushResponse {
        merchant_request_id,
        checkout_request_id,
        response_code: code,
        response_description: description.clone(),
        customer_message: description,
      });
    }

    Ok(StkPushResponse {
      merchant_request_id,
      checkout_request_id,
      response_code: STK_ACCEPTED_CODE.to_string(),
      response_description: "Success. Request accepted for processing".to_string(),
      customer_message: "Success. Request accepted for processing".to_string(),
    })
  }
}
