// mercato/src/checkout/summary.rs

use crate::models::{Address, OrderStatus, OrderedProduct, PaymentMethod, ShippingMethod};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Immutable snapshot of a fully assembled order: every computed total plus
/// the resolved payment/billing/shipping entities and line items.
///
/// Built strictly after the grand total is final, because the payment gateway
/// receives this snapshot and may depend on the final amount. The only field
/// written after construction is `payment_gateway_reference`, filled in once
/// the gateway accepts.
#[derive(Debug, Clone, Serialize)]
pub struct OrderSummary {
  pub id: Uuid,
  pub hash: String,
  pub status: OrderStatus,
  pub sub_total: i64,
  pub total_tax: i64,
  pub total_vat: i64,
  pub shipping_charge: i64,
  pub payment_processing_fee: i64,
  pub grand_total: i64,
  pub is_paid: bool,
  pub store_id: Uuid,
  pub user_id: Uuid,
  pub billing_address: Address,
  pub shipping_address_id: Option<Uuid>,
  pub shipping_method: Option<ShippingMethod>,
  pub payment_method: PaymentMethod,
  pub products: Vec<OrderedProduct>,
  pub payment_gateway: String,
  pub payment_gateway_reference: Option<String>,
  pub created_at: DateTime<Utc>,
  pub confirmed_at: Option<DateTime<Utc>>,
  pub paid_at: Option<DateTime<Utc>>,
  pub completed_at: Option<DateTime<Utc>>,
}
