// mercato/src/models/product.rs

use crate::pricing::AdditionalCharge;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Catalog product as the workflow sees it: price and shippability are read,
/// stock is the one field this workflow mutates (through the conditional
/// reservation, never directly).
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Product {
  pub id: Uuid,
  pub store_id: Uuid,
  pub name: String,
  /// Unit price in minor currency units.
  pub price: i64,
  /// Never negative; only ever decremented through `reserve_stock`.
  pub stock: i64,
  pub is_shippable: bool,
  /// Configured charge rules, applied in order to each line subtotal.
  #[sqlx(json)]
  pub additional_charges: Vec<AdditionalCharge>,
}
