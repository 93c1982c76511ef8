// tests/inventory_tests.rs
mod common;

use common::*;
use mercato::{CheckoutError, CheckoutWorkflow, Store};
use serial_test::serial;
use uuid::Uuid;

#[tokio::test]
#[serial]
async fn test_out_of_stock_leaves_everything_untouched() {
  setup_tracing();
  let fixture = seeded_store();
  let workflow = CheckoutWorkflow::new(fixture.store.clone(), TestGateway::accepting());

  // Stock is 1, request asks for 2.
  let request = base_request(&fixture, vec![line(fixture.scarce_product, 2)]);
  let err = workflow.create_order(&request).await.unwrap_err();

  assert!(matches!(
    err,
    CheckoutError::OutOfStock { product_id } if product_id == fixture.scarce_product
  ));
  assert_eq!(fixture.store.product_stock(fixture.scarce_product), Some(1));
  assert_eq!(fixture.store.order_count(), 0);
}

#[tokio::test]
#[serial]
async fn test_earlier_lines_are_rolled_back_when_a_later_line_fails() {
  setup_tracing();
  let fixture = seeded_store();
  let workflow = CheckoutWorkflow::new(fixture.store.clone(), TestGateway::accepting());

  // First line reserves fine, second line overshoots its stock.
  let request = base_request(
    &fixture,
    vec![line(fixture.vat_product, 2), line(fixture.scarce_product, 2)],
  );
  let err = workflow.create_order(&request).await.unwrap_err();

  assert!(matches!(err, CheckoutError::OutOfStock { .. }));
  assert_eq!(fixture.store.product_stock(fixture.vat_product), Some(5));
  assert_eq!(fixture.store.product_stock(fixture.scarce_product), Some(1));
}

#[tokio::test]
#[serial]
async fn test_failed_reservation_is_repeatable_without_drift() {
  setup_tracing();
  let fixture = seeded_store();
  let workflow = CheckoutWorkflow::new(fixture.store.clone(), TestGateway::accepting());

  let request = base_request(&fixture, vec![line(fixture.scarce_product, 2)]);
  for _ in 0..2 {
    let err = workflow.create_order(&request).await.unwrap_err();
    assert!(matches!(err, CheckoutError::OutOfStock { .. }));
    assert_eq!(fixture.store.product_stock(fixture.scarce_product), Some(1));
  }
}

#[tokio::test]
#[serial]
async fn test_duplicate_lines_reserve_cumulatively() {
  setup_tracing();
  let fixture = seeded_store();
  let workflow = CheckoutWorkflow::new(fixture.store.clone(), TestGateway::accepting());

  // 3 + 3 exceeds the stock of 5 even though each line alone fits.
  let request = base_request(
    &fixture,
    vec![line(fixture.vat_product, 3), line(fixture.vat_product, 3)],
  );
  let err = workflow.create_order(&request).await.unwrap_err();
  assert!(matches!(err, CheckoutError::OutOfStock { .. }));
  assert_eq!(fixture.store.product_stock(fixture.vat_product), Some(5));

  // 2 + 2 fits and both lines decrement.
  let request = base_request(
    &fixture,
    vec![line(fixture.vat_product, 2), line(fixture.vat_product, 2)],
  );
  let summary = workflow.create_order(&request).await.unwrap();
  assert_eq!(summary.sub_total, 4000);
  assert_eq!(fixture.store.product_stock(fixture.vat_product), Some(1));
}

#[tokio::test]
#[serial]
async fn test_missing_product_is_not_reported_as_out_of_stock() {
  setup_tracing();
  let fixture = seeded_store();
  let workflow = CheckoutWorkflow::new(fixture.store.clone(), TestGateway::accepting());

  let unknown = Uuid::new_v4();
  let request = base_request(&fixture, vec![line(unknown, 1)]);
  let err = workflow.create_order(&request).await.unwrap_err();

  assert!(matches!(err, CheckoutError::ProductNotFound { product_id } if product_id == unknown));
  assert_eq!(err.field(), "product_id");
}

#[tokio::test]
#[serial]
async fn test_product_lookup_is_store_scoped() {
  setup_tracing();
  let fixture = seeded_store();
  let workflow = CheckoutWorkflow::new(fixture.store.clone(), TestGateway::accepting());

  // A second store exists, but the product belongs to the first one.
  let other_store = Uuid::new_v4();
  fixture.store.insert_store(Store {
    id: other_store,
    name: "Other Store".to_string(),
  });

  let mut request = base_request(&fixture, vec![line(fixture.vat_product, 1)]);
  request.store_id = other_store;

  let err = workflow.create_order(&request).await.unwrap_err();
  assert!(matches!(err, CheckoutError::ProductNotFound { .. }));
  assert_eq!(fixture.store.product_stock(fixture.vat_product), Some(5));
}
