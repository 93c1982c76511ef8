// mercato/src/store/memory.rs

//! Deterministic in-memory storage implementing the same transactional
//! contract as the Postgres backend: writes stage inside the transaction and
//! only land on `commit`; `rollback` (or dropping the transaction) discards
//! them, including stock decrements. Used by the integration tests and by
//! embeddings that want a fake.

use crate::error::{CheckoutError, CheckoutResult};
use crate::models::{Address, Order, OrderedProduct, PaymentMethod, Product, ShippingMethod, Store};
use crate::store::{CheckoutStore, CheckoutTx};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Default)]
struct MemoryState {
  stores: HashMap<Uuid, Store>,
  products: HashMap<Uuid, Product>,
  shipping_methods: HashMap<Uuid, ShippingMethod>,
  payment_methods: HashMap<Uuid, PaymentMethod>,
  addresses: HashMap<Uuid, Address>,
  orders: HashMap<Uuid, Order>,
  ordered_products: Vec<OrderedProduct>,
}

#[derive(Clone, Default)]
pub struct MemoryCheckoutStore {
  inner: Arc<RwLock<MemoryState>>,
}

impl MemoryCheckoutStore {
  pub fn new() -> Self {
    Self::default()
  }

  // --- Seeding ---

  pub fn insert_store(&self, store: Store) {
    self.inner.write().stores.insert(store.id, store);
  }

  pub fn insert_product(&self, product: Product) {
    self.inner.write().products.insert(product.id, product);
  }

  pub fn insert_shipping_method(&self, method: ShippingMethod) {
    self.inner.write().shipping_methods.insert(method.id, method);
  }

  pub fn insert_payment_method(&self, method: PaymentMethod) {
    self.inner.write().payment_methods.insert(method.id, method);
  }

  pub fn insert_address(&self, address: Address) {
    self.inner.write().addresses.insert(address.id, address);
  }

  // --- Committed-state inspection ---

  pub fn product_stock(&self, product_id: Uuid) -> Option<i64> {
    self.inner.read().products.get(&product_id).map(|p| p.stock)
  }

  pub fn order_count(&self) -> usize {
    self.inner.read().orders.len()
  }

  pub fn order(&self, order_id: Uuid) -> Option<Order> {
    self.inner.read().orders.get(&order_id).cloned()
  }

  pub fn lines_for_order(&self, order_id: Uuid) -> Vec<OrderedProduct> {
    self
      .inner
      .read()
      .ordered_products
      .iter()
      .filter(|line| line.order_id == order_id)
      .cloned()
      .collect()
  }
}

#[async_trait]
impl CheckoutStore for MemoryCheckoutStore {
  type Tx = MemoryCheckoutTx;

  async fn begin(&self) -> CheckoutResult<Self::Tx> {
    Ok(MemoryCheckoutTx {
      inner: Arc::clone(&self.inner),
      stock_decrements: HashMap::new(),
      staged_orders: Vec::new(),
      staged_lines: Vec::new(),
    })
  }
}

pub struct MemoryCheckoutTx {
  inner: Arc<RwLock<MemoryState>>,
  /// Reservations made inside this transaction, keyed by product id. Applied
  /// to committed stock on commit, discarded on rollback.
  stock_decrements: HashMap<Uuid, i64>,
  staged_orders: Vec<Order>,
  staged_lines: Vec<OrderedProduct>,
}

impl MemoryCheckoutTx {
  fn staged_decrement(&self, product_id: Uuid) -> i64 {
    self.stock_decrements.get(&product_id).copied().unwrap_or(0)
  }
}

#[async_trait]
impl CheckoutTx for MemoryCheckoutTx {
  async fn store_by_id(&mut self, store_id: Uuid) -> CheckoutResult<Option<Store>> {
    Ok(self.inner.read().stores.get(&store_id).cloned())
  }

  async fn product_by_store_and_id(&mut self, store_id: Uuid, product_id: Uuid) -> CheckoutResult<Option<Product>> {
    let state = self.inner.read();
    Ok(
      state
        .products
        .get(&product_id)
        .filter(|p| p.store_id == store_id)
        .cloned()
        .map(|mut p| {
          // Reads inside the transaction observe its own reservations.
          p.stock -= self.staged_decrement(product_id);
          p
        }),
    )
  }

  async fn reserve_stock(&mut self, product_id: Uuid, store_id: Uuid, quantity: i64) -> CheckoutResult<u64> {
    let available = {
      let state = self.inner.read();
      match state.products.get(&product_id).filter(|p| p.store_id == store_id) {
        Some(product) => product.stock - self.staged_decrement(product_id),
        None => return Ok(0),
      }
    };

    if available < quantity {
      return Ok(0);
    }
    *self.stock_decrements.entry(product_id).or_insert(0) += quantity;
    Ok(1)
  }

  async fn shipping_method_by_id(&mut self, shipping_method_id: Uuid) -> CheckoutResult<Option<ShippingMethod>> {
    Ok(self.inner.read().shipping_methods.get(&shipping_method_id).cloned())
  }

  async fn payment_method_by_id(&mut self, payment_method_id: Uuid) -> CheckoutResult<Option<PaymentMethod>> {
    Ok(self.inner.read().payment_methods.get(&payment_method_id).cloned())
  }

  async fn address_by_id(&mut self, address_id: Uuid) -> CheckoutResult<Option<Address>> {
    Ok(self.inner.read().addresses.get(&address_id).cloned())
  }

  async fn insert_order(&mut self, order: &Order) -> CheckoutResult<()> {
    self.staged_orders.push(order.clone());
    Ok(())
  }

  async fn insert_ordered_product(&mut self, line: &OrderedProduct) -> CheckoutResult<()> {
    self.staged_lines.push(line.clone());
    Ok(())
  }

  async fn attach_gateway_reference(&mut self, order_id: Uuid, reference: &str) -> CheckoutResult<()> {
    if let Some(order) = self.staged_orders.iter_mut().find(|o| o.id == order_id) {
      order.payment_gateway_reference = Some(reference.to_string());
      return Ok(());
    }
    if let Some(order) = self.inner.write().orders.get_mut(&order_id) {
      order.payment_gateway_reference = Some(reference.to_string());
      return Ok(());
    }
    Err(CheckoutError::PersistenceFailure {
      source: anyhow::anyhow!("attach_gateway_reference: unknown order {}", order_id),
    })
  }

  async fn commit(self) -> CheckoutResult<()> {
    let mut state = self.inner.write();

    // Re-validate reservations at commit so a concurrent transaction that
    // landed first cannot drive stock negative.
    for (product_id, quantity) in &self.stock_decrements {
      let stock = state
        .products
        .get(product_id)
        .map(|p| p.stock)
        .ok_or_else(|| CheckoutError::PersistenceFailure {
          source: anyhow::anyhow!("commit: product {} disappeared", product_id),
        })?;
      if stock < *quantity {
        return Err(CheckoutError::PersistenceFailure {
          source: anyhow::anyhow!("commit: write conflict on product {} stock", product_id),
        });
      }
    }

    for (product_id, quantity) in self.stock_decrements {
      if let Some(product) = state.products.get_mut(&product_id) {
        product.stock -= quantity;
      }
    }
    for order in self.staged_orders {
      state.orders.insert(order.id, order);
    }
    state.ordered_products.extend(self.staged_lines);
    Ok(())
  }

  async fn rollback(self) -> CheckoutResult<()> {
    // Staged writes are simply dropped.
    Ok(())
  }
}
