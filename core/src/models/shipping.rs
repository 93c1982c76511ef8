// mercato/src/models/shipping.rs

use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A delivery option with a charge keyed by a distance/cost parameter.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ShippingMethod {
  pub id: Uuid,
  pub name: String,
  /// Charge applied even at distance zero, in minor currency units.
  pub base_charge: i64,
  /// Added per distance unit on top of the base charge.
  pub per_distance_unit: i64,
  /// Advertised delivery window, informational only.
  pub approximate_delivery_days: i32,
}

impl ShippingMethod {
  /// A distance of zero means "use the base charge"; the order workflow passes
  /// whatever its configuration carries, zero by default.
  pub fn delivery_charge(&self, distance: i64) -> i64 {
    self.base_charge + self.per_distance_unit * distance
  }
}
