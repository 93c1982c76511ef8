// mercato/src/checkout/workflow.rs

//! The order-assembly control core.
//!
//! One call to [`CheckoutWorkflow::create_order`] runs the whole sequence
//! (resolve store, process lines: reserve stock, snapshot prices, evaluate
//! charges; resolve shipping and billing, price the payment method, persist,
//! initiate payment) inside a single storage transaction. Any failure at any
//! step rolls that transaction back before the error is returned; rollback is
//! the sole recovery mechanism, there are no compensating writes and no
//! automatic retries.

use crate::checkout::summary::OrderSummary;
use crate::error::{CheckoutError, CheckoutResult};
use crate::gateway::PaymentGateway;
use crate::models::{Order, OrderStatus, OrderedProduct};
use crate::pricing::evaluate_line_charges;
use crate::request::OrderCreateRequest;
use crate::store::{CheckoutStore, CheckoutTx};
use chrono::Utc;
use std::sync::Arc;
use tracing::{event, instrument, Level};
use uuid::Uuid;

/// Orchestrates order creation against a storage backend and a payment
/// gateway, both injected at construction. The gateway is fixed for the
/// workflow's lifetime; swapping gateways is a deployment decision, not a
/// per-request one.
pub struct CheckoutWorkflow<S: CheckoutStore> {
  store: S,
  gateway: Arc<dyn PaymentGateway>,
  shipping_distance: i64,
}

impl<S: CheckoutStore> CheckoutWorkflow<S> {
  pub fn new(store: S, gateway: Arc<dyn PaymentGateway>) -> Self {
    CheckoutWorkflow {
      store,
      gateway,
      shipping_distance: 0,
    }
  }

  /// Overrides the distance parameter passed to shipping-charge calculations.
  /// Zero (the default) means every shipping method charges its base rate.
  pub fn with_shipping_distance(mut self, distance: i64) -> Self {
    self.shipping_distance = distance;
    self
  }

  /// Creates an order from a cart-like request.
  ///
  /// On success the transaction is committed and the returned summary carries
  /// the gateway's payment reference. On any failure the transaction is rolled
  /// back first: no order rows, no line items, no stock decrements survive.
  #[instrument(
    name = "CheckoutWorkflow::create_order",
    skip_all,
    fields(
      store_id = %request.store_id,
      user_id = %request.user_id,
      lines = request.products.len(),
    ),
    err(Display)
  )]
  pub async fn create_order(&self, request: &OrderCreateRequest) -> CheckoutResult<OrderSummary> {
    request.validate()?;

    let mut tx = self.store.begin().await?;

    match self.assemble(&mut tx, request).await {
      Ok(summary) => {
        tx.commit().await?;
        event!(
          Level::INFO,
          order_id = %summary.id,
          grand_total = summary.grand_total,
          gateway = %summary.payment_gateway,
          "Order created."
        );
        Ok(summary)
      }
      Err(err) => {
        event!(Level::WARN, error = %err, "Order assembly failed, rolling back.");
        if let Err(rollback_err) = tx.rollback().await {
          event!(Level::ERROR, error = %rollback_err, "Rollback after failed order assembly also failed.");
        }
        Err(err)
      }
    }
  }

  /// Every step between `begin` and `commit`. Errors propagate to the caller,
  /// which owns the rollback.
  async fn assemble(&self, tx: &mut S::Tx, request: &OrderCreateRequest) -> CheckoutResult<OrderSummary> {
    let store = tx
      .store_by_id(request.store_id)
      .await?
      .ok_or(CheckoutError::StoreNotFound {
        store_id: request.store_id,
      })?;

    let mut order = Order {
      id: Uuid::new_v4(),
      hash: Order::new_hash(),
      status: OrderStatus::Pending,
      sub_total: 0,
      total_tax: 0,
      total_vat: 0,
      shipping_charge: 0,
      payment_processing_fee: 0,
      grand_total: 0,
      is_paid: false,
      store_id: store.id,
      user_id: request.user_id,
      billing_address_id: request.billing_address_id,
      shipping_address_id: None,
      shipping_method_id: None,
      payment_method_id: request.payment_method_id,
      payment_gateway: Some(self.gateway.name().to_string()),
      payment_gateway_reference: None,
      created_at: Utc::now(),
      confirmed_at: None,
      paid_at: None,
      completed_at: None,
    };

    // Lines are processed strictly in request order; the first failing line
    // determines the reported error.
    let mut ordered_products: Vec<OrderedProduct> = Vec::with_capacity(request.products.len());
    let mut has_shippable_product = false;

    for line in &request.products {
      let product = tx
        .product_by_store_and_id(store.id, line.id)
        .await?
        .ok_or(CheckoutError::ProductNotFound { product_id: line.id })?;

      event!(Level::DEBUG, product_id = %product.id, quantity = line.quantity, "Got product details.");

      // The conditional decrement alone cannot distinguish a missing product
      // from insufficient stock; the fetch above already settled existence.
      let affected = tx.reserve_stock(product.id, store.id, line.quantity).await?;
      if affected == 0 {
        return Err(CheckoutError::OutOfStock { product_id: product.id });
      }

      if product.is_shippable {
        has_shippable_product = true;
      }

      let sub_total = line.quantity * product.price;
      let charges = evaluate_line_charges(&product.additional_charges, sub_total);

      ordered_products.push(OrderedProduct {
        order_id: order.id,
        product_id: product.id,
        name: product.name,
        quantity: line.quantity,
        price: product.price,
        sub_total,
        total_tax: charges.tax,
        total_vat: charges.vat,
      });

      order.sub_total += sub_total;
      order.total_tax += charges.tax;
      order.total_vat += charges.vat;
    }

    let shipping_method = if has_shippable_product {
      let shipping_method_id = request.shipping_method_id.ok_or(CheckoutError::ShippingMethodRequired)?;
      let shipping_address_id = request
        .shipping_address_id
        .ok_or(CheckoutError::ShippingAddressRequired)?;

      let method = tx
        .shipping_method_by_id(shipping_method_id)
        .await?
        .ok_or(CheckoutError::ShippingMethodNotFound { shipping_method_id })?;

      order.shipping_address_id = Some(shipping_address_id);
      order.shipping_method_id = Some(shipping_method_id);
      order.shipping_charge = method.delivery_charge(self.shipping_distance);
      Some(method)
    } else {
      None
    };

    let billing_address =
      tx.address_by_id(request.billing_address_id)
        .await?
        .ok_or(CheckoutError::BillingAddressNotFound {
          address_id: request.billing_address_id,
        })?;

    // Intermediate grand total, deliberately excluding the processing fee:
    // the fee is a function of this value and is added afterwards.
    order.grand_total = order.sub_total + order.total_tax + order.total_vat + order.shipping_charge;

    let payment_method =
      tx.payment_method_by_id(request.payment_method_id)
        .await?
        .ok_or(CheckoutError::PaymentMethodNotFound {
          payment_method_id: request.payment_method_id,
        })?;

    order.payment_processing_fee = payment_method.processing_fee_for(order.grand_total);
    order.grand_total += order.payment_processing_fee;

    tx.insert_order(&order).await?;
    for line in &ordered_products {
      tx.insert_ordered_product(line).await?;
    }

    let mut summary = OrderSummary {
      id: order.id,
      hash: order.hash.clone(),
      status: order.status,
      sub_total: order.sub_total,
      total_tax: order.total_tax,
      total_vat: order.total_vat,
      shipping_charge: order.shipping_charge,
      payment_processing_fee: order.payment_processing_fee,
      grand_total: order.grand_total,
      is_paid: order.is_paid,
      store_id: order.store_id,
      user_id: order.user_id,
      billing_address,
      shipping_address_id: order.shipping_address_id,
      shipping_method,
      payment_method,
      products: ordered_products,
      payment_gateway: self.gateway.name().to_string(),
      payment_gateway_reference: None,
      created_at: order.created_at,
      confirmed_at: order.confirmed_at,
      paid_at: order.paid_at,
      completed_at: order.completed_at,
    };

    event!(
      Level::DEBUG,
      order_id = %order.id,
      grand_total = order.grand_total,
      "Order persisted, initiating payment."
    );

    let initiation = self
      .gateway
      .pay(&summary)
      .await
      .map_err(|source| CheckoutError::GatewayFailure {
        gateway: self.gateway.name().to_string(),
        source,
      })?;

    tx.attach_gateway_reference(order.id, &initiation.reference_id).await?;
    summary.payment_gateway_reference = Some(initiation.reference_id);

    Ok(summary)
  }
}
