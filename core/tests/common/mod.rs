// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use async_trait::async_trait;
use mercato::{
  AdditionalCharge, Address, ChargeType, ChargeValue, MemoryCheckoutStore, OrderCreateRequest, OrderLineRequest,
  OrderSummary, PaymentGateway, PaymentInitiation, PaymentMethod, Product, ShippingMethod, Store,
};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Once};
use uuid::Uuid;

pub fn setup_tracing() {
  static INIT: Once = Once::new();
  INIT.call_once(|| {
    let _ = tracing_subscriber::fmt()
      .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
      .with_test_writer()
      .try_init();
  });
}

// --- Test payment gateway ---

/// Records every `pay` call and can be flipped to decline, so tests can pin
/// both the happy path and the rollback-after-gateway-failure path.
pub struct TestGateway {
  decline: AtomicBool,
  calls: AtomicUsize,
  pub seen_grand_totals: Mutex<Vec<i64>>,
}

impl TestGateway {
  pub fn accepting() -> Arc<Self> {
    Arc::new(TestGateway {
      decline: AtomicBool::new(false),
      calls: AtomicUsize::new(0),
      seen_grand_totals: Mutex::new(Vec::new()),
    })
  }

  pub fn declining() -> Arc<Self> {
    let gateway = TestGateway::accepting();
    gateway.decline.store(true, Ordering::SeqCst);
    gateway
  }

  pub fn calls(&self) -> usize {
    self.calls.load(Ordering::SeqCst)
  }
}

#[async_trait]
impl PaymentGateway for TestGateway {
  fn name(&self) -> &str {
    "test_gateway"
  }

  async fn pay(&self, summary: &OrderSummary) -> Result<PaymentInitiation, anyhow::Error> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    self.seen_grand_totals.lock().push(summary.grand_total);
    if self.decline.load(Ordering::SeqCst) {
      return Err(anyhow::anyhow!("card declined by test gateway"));
    }
    Ok(PaymentInitiation {
      reference_id: format!("test_ref_{}", summary.id.simple()),
    })
  }
}

// --- Seeded world ---

pub struct Fixture {
  pub store: MemoryCheckoutStore,
  pub store_id: Uuid,
  pub user_id: Uuid,
  /// price 1000, stock 5, not shippable, one 10% VAT rule.
  pub vat_product: Uuid,
  /// price 500, stock 10, shippable, no charge rules.
  pub shippable_product: Uuid,
  /// price 700, stock 1, not shippable, no charge rules.
  pub scarce_product: Uuid,
  pub billing_address: Uuid,
  pub shipping_address: Uuid,
  /// base charge 150, nothing per distance unit.
  pub shipping_method: Uuid,
  /// flat 2% processing fee.
  pub payment_method: Uuid,
}

fn test_address(id: Uuid, name: &str) -> Address {
  Address {
    id,
    name: name.to_string(),
    address: "1 Test Lane".to_string(),
    city: "Testville".to_string(),
    state: None,
    postcode: "0000".to_string(),
    country_id: 1,
    email: Some("buyer@example.com".to_string()),
    phone: None,
  }
}

pub fn seeded_store() -> Fixture {
  let store = MemoryCheckoutStore::new();

  let store_id = Uuid::new_v4();
  store.insert_store(Store {
    id: store_id,
    name: "Fixture Store".to_string(),
  });

  let vat_product = Uuid::new_v4();
  store.insert_product(Product {
    id: vat_product,
    store_id,
    name: "Download Bundle".to_string(),
    price: 1000,
    stock: 5,
    is_shippable: false,
    additional_charges: vec![AdditionalCharge {
      name: "vat".to_string(),
      charge_type: ChargeType::Vat,
      value: ChargeValue::Percent { basis_points: 1000 },
    }],
  });

  let shippable_product = Uuid::new_v4();
  store.insert_product(Product {
    id: shippable_product,
    store_id,
    name: "Boxed Widget".to_string(),
    price: 500,
    stock: 10,
    is_shippable: true,
    additional_charges: vec![],
  });

  let scarce_product = Uuid::new_v4();
  store.insert_product(Product {
    id: scarce_product,
    store_id,
    name: "Last One".to_string(),
    price: 700,
    stock: 1,
    is_shippable: false,
    additional_charges: vec![],
  });

  let billing_address = Uuid::new_v4();
  store.insert_address(test_address(billing_address, "Billing"));
  let shipping_address = Uuid::new_v4();
  store.insert_address(test_address(shipping_address, "Shipping"));

  let shipping_method = Uuid::new_v4();
  store.insert_shipping_method(ShippingMethod {
    id: shipping_method,
    name: "standard".to_string(),
    base_charge: 150,
    per_distance_unit: 0,
    approximate_delivery_days: 5,
  });

  let payment_method = Uuid::new_v4();
  store.insert_payment_method(PaymentMethod {
    id: payment_method,
    name: "card".to_string(),
    processing_fee: ChargeValue::Percent { basis_points: 200 },
  });

  Fixture {
    store,
    store_id,
    user_id: Uuid::new_v4(),
    vat_product,
    shippable_product,
    scarce_product,
    billing_address,
    shipping_address,
    shipping_method,
    payment_method,
  }
}

pub fn line(product_id: Uuid, quantity: i64) -> OrderLineRequest {
  OrderLineRequest { id: product_id, quantity }
}

/// A valid non-shippable request against the fixture; tests adjust fields from
/// here.
pub fn base_request(fixture: &Fixture, products: Vec<OrderLineRequest>) -> OrderCreateRequest {
  OrderCreateRequest {
    user_id: fixture.user_id,
    store_id: fixture.store_id,
    products,
    shipping_method_id: None,
    shipping_address_id: None,
    billing_address_id: fixture.billing_address,
    payment_method_id: fixture.payment_method,
  }
}
