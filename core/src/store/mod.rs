// mercato/src/store/mod.rs

//! Storage boundary for the order workflow.
//!
//! The orchestrator owns exactly one [`CheckoutTx`] for the duration of a
//! workflow execution and always resolves it before returning: `commit` on
//! success, `rollback` on any failure. Both consume the transaction, so the
//! type system rules out a workflow that leaves one open.

pub mod memory;
pub mod postgres;

use crate::error::CheckoutResult;
use crate::models::{Address, Order, OrderedProduct, PaymentMethod, Product, ShippingMethod, Store};
use async_trait::async_trait;
use uuid::Uuid;

/// Entry point to transactional storage.
#[async_trait]
pub trait CheckoutStore: Send + Sync {
  type Tx: CheckoutTx;

  async fn begin(&self) -> CheckoutResult<Self::Tx>;
}

/// All reads and writes the order workflow performs, scoped to one
/// transaction. Lookups return `None` for absent rows; mapping that to the
/// right taxonomy error is the orchestrator's job.
#[async_trait]
pub trait CheckoutTx: Send {
  async fn store_by_id(&mut self, store_id: Uuid) -> CheckoutResult<Option<Store>>;

  /// Store-scoped product lookup, the same one the catalog uses: a product id
  /// that exists under a different store is a miss.
  async fn product_by_store_and_id(&mut self, store_id: Uuid, product_id: Uuid) -> CheckoutResult<Option<Product>>;

  /// Atomic conditional decrement: subtracts `quantity` from the product's
  /// stock only if the row matches (id, store) and has at least `quantity` in
  /// stock, as a single conditional write. Returns the number of rows
  /// affected; 0 means the reservation failed and nothing was decremented.
  /// Implementations must not read-then-write.
  async fn reserve_stock(&mut self, product_id: Uuid, store_id: Uuid, quantity: i64) -> CheckoutResult<u64>;

  async fn shipping_method_by_id(&mut self, shipping_method_id: Uuid) -> CheckoutResult<Option<ShippingMethod>>;

  async fn payment_method_by_id(&mut self, payment_method_id: Uuid) -> CheckoutResult<Option<PaymentMethod>>;

  async fn address_by_id(&mut self, address_id: Uuid) -> CheckoutResult<Option<Address>>;

  async fn insert_order(&mut self, order: &Order) -> CheckoutResult<()>;

  async fn insert_ordered_product(&mut self, line: &OrderedProduct) -> CheckoutResult<()>;

  /// Records the gateway's reference on an already-inserted order.
  async fn attach_gateway_reference(&mut self, order_id: Uuid, reference: &str) -> CheckoutResult<()>;

  async fn commit(self) -> CheckoutResult<()>;

  async fn rollback(self) -> CheckoutResult<()>;
}
