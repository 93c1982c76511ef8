// mercato/src/models/order.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, Type as SqlxType};
use uuid::Uuid;

/// Order lifecycle. This workflow only ever creates orders in `Pending`;
/// the later transitions (and their timestamps) belong to fulfillment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, SqlxType)]
#[sqlx(type_name = "order_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
  Pending,
  Confirmed,
  Completed,
  Cancelled,
}

/// A persisted order. The monetary invariant, fixed at creation time and
/// never silently recomputed:
/// `grand_total = sub_total + total_tax + total_vat + shipping_charge + payment_processing_fee`.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Order {
  pub id: Uuid,
  /// Short human-readable identifier shown on receipts.
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
  pub billing_address_id: Uuid,
  pub shipping_address_id: Option<Uuid>,
  pub shipping_method_id: Option<Uuid>,
  pub payment_method_id: Uuid,
  /// Name of the gateway the payment was initiated through.
  pub payment_gateway: Option<String>,
  /// Opaque reference from the gateway; null until payment initiation succeeds.
  pub payment_gateway_reference: Option<String>,
  pub created_at: DateTime<Utc>,
  pub confirmed_at: Option<DateTime<Utc>>,
  pub paid_at: Option<DateTime<Utc>>,
  pub completed_at: Option<DateTime<Utc>>,
}

impl Order {
  /// Receipt-friendly short id: the first 12 hex digits of a fresh v4 UUID.
  pub fn new_hash() -> String {
    let id = Uuid::new_v4();
    id.simple().to_string()[..12].to_string()
  }
}

/// One line of an order: quantity plus a snapshot of the product's name and
/// unit price at order time. Immutable after creation, even if the catalog
/// product changes later.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct OrderedProduct {
  pub order_id: Uuid,
  pub product_id: Uuid,
  pub name: String,
  pub quantity: i64,
  /// Unit price snapshot in minor currency units.
  pub price: i64,
  /// `quantity * price`.
  pub sub_total: i64,
  pub total_tax: i64,
  pub total_vat: i64,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn order_hash_is_short_and_unique() {
    let a = Order::new_hash();
    let b = Order::new_hash();
    assert_eq!(a.len(), 12);
    assert_ne!(a, b);
    assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
  }
}
