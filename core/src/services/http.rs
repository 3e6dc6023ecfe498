// duka/src/services/http.rs

//! reqwest-backed implementations of the service traits.
//!
//! The backend's list endpoints have shipped both bare arrays and wrapped
//! objects across versions; the payload adapters below accept either shape
//! and hand the canonical model to the caller.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DukaError, DukaResult};
use crate::models::{
  NewOrder, NewOrderItem, Order, OrderItem, OrderItemPatch, OrderPatch, StkPushRequest, StkPushResponse,
};
use crate::services::{OrderItemService, OrderService, PaymentGateway};
use crate::session::SessionContext;

/// One HTTP client over the whole backend API surface. Implements all
/// three service traits, so a single `Arc<HttpBackend>` can be handed to
/// the sequencer and the payment initiator.
pub struct HttpBackend {
  client: Client,
  base_url: String,
  session: SessionContext,
}

impl HttpBackend {
  /// `base_url` is the API root, e.g. `https://backend.example.com/api/`.
  pub fn new(base_url: impl Into<String>, session: SessionContext) -> DukaResult<Self> {
    let client = Client::builder().build()?;
    Ok(Self::with_client(client, base_url, session))
  }

  pub fn with_client(client: Client, base_url: impl Into<String>, session: SessionContext) -> Self {
    let mut base_url = base_url.into();
    if !base_url.ends_with('/') {
      base_url.push('/');
    }
    Self {
      client,
      base_url,
      session,
    }
  }

  pub fn session(&self) -> &SessionContext {
    &self.session
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.base_url, path)
  }

  fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
    // The backend expects the raw token, no scheme prefix.
    match &self.session.token {
      Some(token) => builder.header(AUTHORIZATION, token.as_str()),
      None => builder,
    }
  }

  async fn request_json<T: DeserializeOwned>(&self, path: &str, builder: RequestBuilder) -> DukaResult<T> {
    let response = self.authorize(builder).send().await?.error_for_status()?;
    let body = response.text().await?;
    debug!(endpoint = path, bytes = body.len(), "backend response received");
    serde_json::from_str(&body).map_err(|e| DukaError::UnexpectedResponse {
      endpoint: path.to_string(),
      detail: e.to_string(),
    })
  }

  async fn get_json<T: DeserializeOwned>(&self, path: &str) -> DukaResult<T> {
    self.request_json(path, self.client.get(self.url(path))).await
  }

  async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(&self, path: &str, body: &B) -> DukaResult<T> {
    self.request_json(path, self.client.post(self.url(path)).json(body)).await
  }

  async fn put_json<T: DeserializeOwned, B: Serialize + ?Sized>(&self, path: &str, body: &B) -> DukaResult<T> {
    self.request_json(path, self.client.put(self.url(path)).json(body)).await
  }

  async fn delete(&self, path: &str) -> DukaResult<()> {
    let envelope: DeleteEnvelope = self.request_json(path, self.client.delete(self.url(path))).await?;
    if envelope.success {
      Ok(())
    } else {
      Err(DukaError::UnexpectedResponse {
        endpoint: path.to_string(),
        detail: "backend reported success: false".to_string(),
      })
    }
  }
}

#[derive(Debug, Deserialize)]
struct DeleteEnvelope {
  success: bool,
}

/// Orders arrive either bare or wrapped in `{"allOrders": [...]}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OrderListPayload {
  Bare(Vec<Order>),
  Wrapped {
    #[serde(rename = "allOrders")]
    all_orders: Vec<Order>,
  },
}

impl OrderListPayload {
  fn into_orders(self) -> Vec<Order> {
    match self {
      OrderListPayload::Bare(orders) => orders,
      OrderListPayload::Wrapped { all_orders } => all_orders,
    }
  }
}

/// Order items arrive either bare or wrapped in `{"items": [...]}` with a
/// message alongside.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OrderItemListPayload {
  Bare(Vec<OrderItem>),
  Wrapped { items: Vec<OrderItem> },
}

impl OrderItemListPayload {
  fn into_items(self) -> Vec<OrderItem> {
    match self {
      OrderItemListPayload::Bare(items) => items,
      OrderItemListPayload::Wrapped { items } => items,
    }
  }
}

/// The gateway's error bodies carry the useful description under either
/// `details` or `error`.
#[derive(Debug, Deserialize)]
struct GatewayErrorBody {
  error: Option<String>,
  details: Option<String>,
}

#[async_trait]
impl OrderService for HttpBackend {
  async fn create_order(&self, order: &NewOrder) -> DukaResult<Order> {
    self.post_json("create-Order", order).await
  }

  async fn order(&self, order_id: i64) -> DukaResult<Order> {
    self.get_json(&format!("Order/{order_id}")).await
  }

  async fn orders_for_user(&self, user_id: i64) -> DukaResult<Vec<Order>> {
    let payload: OrderListPayload = self.get_json(&format!("UserOrders/{user_id}")).await?;
    Ok(payload.into_orders())
  }

  async fn all_orders(&self) -> DukaResult<Vec<Order>> {
    let payload: OrderListPayload = self.get_json("AllOrders").await?;
    Ok(payload.into_orders())
  }

  async fn update_order(&self, order_id: i64, patch: &OrderPatch) -> DukaResult<Order> {
    self.put_json(&format!("update-Order/{order_id}"), patch).await
  }

  async fn delete_order(&self, order_id: i64) -> DukaResult<()> {
    self.delete(&format!("delete-Order/{order_id}")).await
  }
}

#[async_trait]
impl OrderItemService for HttpBackend {
  async fn create_order_item(&self, item: &NewOrderItem) -> DukaResult<OrderItem> {
    self.post_json("create-OrderItem", item).await
  }

  async fn order_item(&self, order_item_id: i64) -> DukaResult<OrderItem> {
    self.get_json(&format!("OrderItem/{order_item_id}")).await
  }

  async fn items_for_order(&self, order_id: i64) -> DukaResult<Vec<OrderItem>> {
    let payload: OrderItemListPayload = self.get_json(&format!("OrderItemsByOrder/{order_id}")).await?;
    Ok(payload.into_items())
  }

  async fn all_order_items(&self) -> DukaResult<Vec<OrderItem>> {
    let payload: OrderItemListPayload = self.get_json("AllOrderItems").await?;
    Ok(payload.into_items())
  }

  async fn update_order_item(&self, order_item_id: i64, patch: &OrderItemPatch) -> DukaResult<OrderItem> {
    self.put_json(&format!("update-OrderItem/{order_item_id}"), patch).await
  }

  async fn delete_order_item(&self, order_item_id: i64) -> DukaResult<()> {
    self.delete(&format!("delete-OrderItem/{order_item_id}")).await
  }
}

#[async_trait]
impl PaymentGateway for HttpBackend {
  async fn initiate_stk_push(&self, request: &StkPushRequest) -> DukaResult<StkPushResponse> {
    let path = "initiate-payment";
    let response = self
      .authorize(self.client.post(self.url(path)).json(request))
      .send()
      .await?;
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
      let description = serde_json::from_str::<GatewayErrorBody>(&body)
        .ok()
        .and_then(|b| b.details.or(b.error))
        .unwrap_or_else(|| format!("payment gateway returned {status}"));
      return Err(DukaError::PaymentInitiation {
        code: None,
        description,
      });
    }

    serde_json::from_str(&body).map_err(|e| DukaError::UnexpectedResponse {
      endpoint: path.to_string(),
      detail: e.to_string(),
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn order_list_accepts_wrapped_shape() {
    let body = r#"{"allOrders":[{"orderId":4,"userId":7,"totalAmount":"250.00","status":"pending"}]}"#;
    let payload: OrderListPayload = serde_json::from_str(body).unwrap();
    let orders = payload.into_orders();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].order_id, 4);
    assert_eq!(orders[0].total_amount.get(), 250.0);
  }

  #[test]
  fn order_list_accepts_bare_shape() {
    let body = r#"[{"orderId":4,"userId":7,"totalAmount":250,"status":"pending"}]"#;
    let payload: OrderListPayload = serde_json::from_str(body).unwrap();
    assert_eq!(payload.into_orders().len(), 1);
  }

  #[test]
  fn order_item_list_accepts_wrapped_shape_with_message() {
    let body = r#"{"items":[{"orderItemId":1,"orderId":4,"productId":9,"quantity":2,"price":"100.00"}],"message":"ok"}"#;
    let payload: OrderItemListPayload = serde_json::from_str(body).unwrap();
    let items = payload.into_items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].price.get(), 100.0);
  }

  #[test]
  fn order_item_list_accepts_bare_shape() {
    let body = r#"[{"orderItemId":1,"orderId":4,"productId":9,"quantity":2,"price":50}]"#;
    let payload: OrderItemListPayload = serde_json::from_str(body).unwrap();
    assert_eq!(payload.into_items().len(), 1);
  }

  #[test]
  fn stk_push_response_parses_gateway_keys() {
    let body = r#"{
      "MerchantRequestID": "29115-34620561-1",
      "CheckoutRequestID": "ws_CO_191220191020363925",
      "ResponseCode": "0",
      "ResponseDescription": "Success. Request accepted for processing",
      "CustomerMessage": "Success. Request accepted for processing"
    }"#;
    let response: StkPushResponse = serde_json::from_str(body).unwrap();
    assert!(response.accepted());
    assert_eq!(response.merchant_request_id, "29115-34620561-1");
  }
}
