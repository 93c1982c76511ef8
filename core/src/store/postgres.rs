// mercato/src/store/postgres.rs

//! Postgres-backed storage. `schema.sql` at the crate root describes the
//! tables these queries expect.
//!
//! The reservation is the load-bearing query here: a single conditional
//! `UPDATE` whose row count tells the workflow whether the decrement happened.
//! Concurrent order creations against the same product serialize on that row
//! write; there is no application-level lock and no read-then-write.

use crate::config::CheckoutConfig;
use crate::error::CheckoutResult;
use crate::models::{Address, Order, OrderedProduct, PaymentMethod, Product, ShippingMethod, Store};
use crate::store::{CheckoutStore, CheckoutTx};
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

pub struct PgCheckoutStore {
  pool: PgPool,
}

impl PgCheckoutStore {
  pub fn new(pool: PgPool) -> Self {
    PgCheckoutStore { pool }
  }

  pub async fn connect(config: &CheckoutConfig) -> CheckoutResult<Self> {
    let pool = PgPool::connect(&config.database_url).await?;
    Ok(PgCheckoutStore::new(pool))
  }
}

#[async_trait]
impl CheckoutStore for PgCheckoutStore {
  type Tx = PgCheckoutTx;

  async fn begin(&self) -> CheckoutResult<Self::Tx> {
    let tx = self.pool.begin().await?;
    Ok(PgCheckoutTx { tx })
  }
}

pub struct PgCheckoutTx {
  tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl CheckoutTx for PgCheckoutTx {
  async fn store_by_id(&mut self, store_id: Uuid) -> CheckoutResult<Option<Store>> {
    let store = sqlx::query_as::<_, Store>("SELECT id, name FROM stores WHERE id = $1")
      .bind(store_id)
      .fetch_optional(&mut *self.tx)
      .await?;
    Ok(store)
  }

  async fn product_by_store_and_id(&mut self, store_id: Uuid, product_id: Uuid) -> CheckoutResult<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(
      "SELECT id, store_id, name, price, stock, is_shippable, additional_charges \
       FROM products WHERE id = $1 AND store_id = $2",
    )
    .bind(product_id)
    .bind(store_id)
    .fetch_optional(&mut *self.tx)
    .await?;
    Ok(product)
  }

  async fn reserve_stock(&mut self, product_id: Uuid, store_id: Uuid, quantity: i64) -> CheckoutResult<u64> {
    let result = sqlx::query(
      "UPDATE products SET stock = stock - $3 \
       WHERE id = $1 AND store_id = $2 AND stock >= $3",
    )
    .bind(product_id)
    .bind(store_id)
    .bind(quantity)
    .execute(&mut *self.tx)
    .await?;
    Ok(result.rows_affected())
  }

  async fn shipping_method_by_id(&mut self, shipping_method_id: Uuid) -> CheckoutResult<Option<ShippingMethod>> {
    let method = sqlx::query_as::<_, ShippingMethod>(
      "SELECT id, name, base_charge, per_distance_unit, approximate_delivery_days \
       FROM shipping_methods WHERE id = $1",
    )
    .bind(shipping_method_id)
    .fetch_optional(&mut *self.tx)
    .await?;
    Ok(method)
  }

  async fn payment_method_by_id(&mut self, payment_method_id: Uuid) -> CheckoutResult<Option<PaymentMethod>> {
    let method =
      sqlx::query_as::<_, PaymentMethod>("SELECT id, name, processing_fee FROM payment_methods WHERE id = $1")
        .bind(payment_method_id)
        .fetch_optional(&mut *self.tx)
        .await?;
    Ok(method)
  }

  async fn address_by_id(&mut self, address_id: Uuid) -> CheckoutResult<Option<Address>> {
    let address = sqlx::query_as::<_, Address>(
      "SELECT id, name, address, city, state, postcode, country_id, email, phone \
       FROM addresses WHERE id = $1",
    )
    .bind(address_id)
    .fetch_optional(&mut *self.tx)
    .await?;
    Ok(address)
  }

  async fn insert_order(&mut self, order: &Order) -> CheckoutResult<()> {
    sqlx::query(
      "INSERT INTO orders ( \
         id, hash, status, sub_total, total_tax, total_vat, shipping_charge, \
         payment_processing_fee, grand_total, is_paid, store_id, user_id, \
         billing_address_id, shipping_address_id, shipping_method_id, \
         payment_method_id, payment_gateway, payment_gateway_reference, \
         created_at, confirmed_at, paid_at, completed_at \
       ) VALUES ( \
         $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, \
         $13, $14, $15, $16, $17, $18, $19, $20, $21, $22 \
       )",
    )
    .bind(order.id)
    .bind(&order.hash)
    .bind(order.status)
    .bind(order.sub_total)
    .bind(order.total_tax)
    .bind(order.total_vat)
    .bind(order.shipping_charge)
    .bind(order.payment_processing_fee)
    .bind(order.grand_total)
    .bind(order.is_paid)
    .bind(order.store_id)
    .bind(order.user_id)
    .bind(order.billing_address_id)
    .bind(order.shipping_address_id)
    .bind(order.shipping_method_id)
    .bind(order.payment_method_id)
    .bind(&order.payment_gateway)
    .bind(&order.payment_gateway_reference)
    .bind(order.created_at)
    .bind(order.confirmed_at)
    .bind(order.paid_at)
    .bind(order.completed_at)
    .execute(&mut *self.tx)
    .await?;
    Ok(())
  }

  async fn insert_ordered_product(&mut self, line: &OrderedProduct) -> CheckoutResult<()> {
    sqlx::query(
      "INSERT INTO ordered_products ( \
         order_id, product_id, name, quantity, price, sub_total, total_tax, total_vat \
       ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
    )
    .bind(line.order_id)
    .bind(line.product_id)
    .bind(&line.name)
    .bind(line.quantity)
    .bind(line.price)
    .bind(line.sub_total)
    .bind(line.total_tax)
    .bind(line.total_vat)
    .execute(&mut *self.tx)
    .await?;
    Ok(())
  }

  async fn attach_gateway_reference(&mut self, order_id: Uuid, reference: &str) -> CheckoutResult<()> {
    sqlx::query("UPDATE orders SET payment_gateway_reference = $2 WHERE id = $1")
      .bind(order_id)
      .bind(reference)
      .execute(&mut *self.tx)
      .await?;
    Ok(())
  }

  async fn commit(self) -> CheckoutResult<()> {
    self.tx.commit().await?;
    Ok(())
  }

  async fn rollback(self) -> CheckoutResult<()> {
    self.tx.rollback().await?;
    Ok(())
  }
}
