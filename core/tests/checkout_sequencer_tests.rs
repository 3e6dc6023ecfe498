// tests/checkout_sequencer_tests.rs
mod common;

use common::*;
use duka::{CheckoutPhase, DukaError};
use serial_test::serial;

#[tokio::test]
#[serial]
async fn places_order_then_items_in_cart_line_order() {
  setup_tracing();
  let backend = mock_backend();
  let seq = sequencer(&backend);

  // String and number prices on purpose; subtotal must be 250.
  let cart = serde_json::from_str::<Vec<duka::CartLine>>(
    r#"[
      {"productId":1,"title":"A","image":"a.png","price":"100.00","quantity":2},
      {"productId":2,"title":"B","image":"b.png","price":50,"quantity":1}
    ]"#,
  )
  .unwrap();

  let order_id = seq.create_order(7, &cart).await.unwrap();

  let orders = backend.orders.orders();
  assert_eq!(orders.len(), 1);
  assert_eq!(orders[0].order_id, order_id);
  assert_eq!(orders[0].user_id, 7);
  assert_eq!(orders[0].total_amount.get(), 250.0);

  let items = backend.items.items();
  assert_eq!(items.len(), 2);
  assert_eq!(items[0].product_id, 1);
  assert_eq!(items[0].quantity, 2);
  assert_eq!(items[0].price.get(), 100.0);
  assert_eq!(items[1].product_id, 2);
  assert_eq!(items[1].quantity, 1);
  assert_eq!(items[1].price.get(), 50.0);
  assert!(items.iter().all(|i| i.order_id == order_id));

  assert_eq!(seq.phase(), CheckoutPhase::Placed { order_id });
  assert_eq!(seq.order_id(), Some(order_id));
}

#[tokio::test]
#[serial]
async fn halts_item_submission_on_first_failure() {
  setup_tracing();
  let backend = mock_backend();
  backend.items.fail_create_call(2);
  let seq = sequencer(&backend);

  let cart = vec![line(10, 100.0, 1), line(20, 50.0, 2), line(30, 25.0, 3)];
  let err = seq.create_order(7, &cart).await.unwrap_err();

  match err {
    DukaError::OrderItemCreation {
      product_id,
      items_created,
      ..
    } => {
      assert_eq!(product_id, 20);
      assert_eq!(items_created, 1);
    }
    other => panic!("expected OrderItemCreation, got {other:?}"),
  }

  // Exactly one item made it, and the third line was never attempted.
  assert_eq!(backend.items.items().len(), 1);
  assert_eq!(backend.items.items()[0].product_id, 10);
  assert_eq!(backend.items.create_calls(), 2);

  // The partial order stays on the server, still deletable.
  assert_eq!(backend.orders.orders().len(), 1);
  let order_id = backend.orders.orders()[0].order_id;
  assert_eq!(seq.phase(), CheckoutPhase::Placed { order_id });
}

#[tokio::test]
#[serial]
async fn empty_cart_is_rejected_before_any_call() {
  setup_tracing();
  let backend = mock_backend();
  let seq = sequencer(&backend);

  let err = seq.create_order(7, &[]).await.unwrap_err();
  assert!(matches!(err, DukaError::EmptyCart));
  assert!(backend.orders.orders().is_empty());
  assert_eq!(seq.phase(), CheckoutPhase::Idle);
}

#[tokio::test]
#[serial]
async fn order_creation_failure_returns_to_idle() {
  setup_tracing();
  let backend = mock_backend();
  backend.orders.fail_next_create();
  let seq = sequencer(&backend);

  let err = seq.create_order(7, &[line(1, 100.0, 1)]).await.unwrap_err();
  assert!(matches!(err, DukaError::OrderCreation { .. }));

  // No partial state: no order, no items, and a retry is possible.
  assert!(backend.orders.orders().is_empty());
  assert!(backend.items.items().is_empty());
  assert_eq!(seq.phase(), CheckoutPhase::Idle);

  let order_id = seq.create_order(7, &[line(1, 100.0, 1)]).await.unwrap();
  assert_eq!(seq.phase(), CheckoutPhase::Placed { order_id });
}

#[tokio::test]
#[serial]
async fn second_checkout_while_placed_is_rejected() {
  setup_tracing();
  let backend = mock_backend();
  let seq = sequencer(&backend);

  seq.create_order(7, &[line(1, 100.0, 1)]).await.unwrap();
  let err = seq.create_order(7, &[line(2, 50.0, 1)]).await.unwrap_err();

  match err {
    DukaError::InvalidState { expected, actual } => {
      assert_eq!(expected, "idle");
      assert_eq!(actual, "placed");
    }
    other => panic!("expected InvalidState, got {other:?}"),
  }
  assert_eq!(backend.orders.orders().len(), 1);
}

#[tokio::test]
#[serial]
async fn delete_order_returns_to_idle_and_leaves_cart_alone() {
  setup_tracing();
  let backend = mock_backend();
  let seq = sequencer(&backend);

  let store = memory_store();
  store.add_to_cart(line(1, 100.0, 2)).unwrap();
  let cart = store.get_cart();

  let order_id = seq.create_order(7, &cart).await.unwrap();
  assert_eq!(seq.order_id(), Some(order_id));

  seq.delete_order().await.unwrap();

  assert_eq!(seq.phase(), CheckoutPhase::Idle);
  assert_eq!(seq.order_id(), None);
  assert!(backend.orders.orders().is_empty());
  // Deleting the order must not destroy the cart; the user may resubmit.
  assert_eq!(store.get_cart().len(), 1);

  let second = seq.create_order(7, &cart).await.unwrap();
  assert_ne!(second, order_id);
}

#[tokio::test]
#[serial]
async fn failed_delete_retains_the_identifier_for_retry() {
  setup_tracing();
  let backend = mock_backend();
  let seq = sequencer(&backend);

  let order_id = seq.create_order(7, &[line(1, 100.0, 1)]).await.unwrap();

  backend.orders.fail_next_delete();
  let err = seq.delete_order().await.unwrap_err();
  match err {
    DukaError::OrderDeletion { order_id: held, .. } => assert_eq!(held, order_id),
    other => panic!("expected OrderDeletion, got {other:?}"),
  }
  assert_eq!(seq.phase(), CheckoutPhase::Placed { order_id });

  // Manual retry succeeds.
  seq.delete_order().await.unwrap();
  assert_eq!(seq.phase(), CheckoutPhase::Idle);
}

#[tokio::test]
#[serial]
async fn delete_without_a_placed_order_is_rejected() {
  setup_tracing();
  let backend = mock_backend();
  let seq = sequencer(&backend);

  let err = seq.delete_order().await.unwrap_err();
  assert!(matches!(
    err,
    DukaError::InvalidState {
      expected: "placed",
      ..
    }
  ));
}
