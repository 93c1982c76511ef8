// mercato/src/models/address.rs

use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Flat contact/location record. The workflow only verifies existence and
/// embeds it into the order summary; it never mutates addresses.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Address {
  pub id: Uuid,
  pub name: String,
  pub address: String,
  pub city: String,
  pub state: Option<String>,
  pub postcode: String,
  pub country_id: i64,
  pub email: Option<String>,
  pub phone: Option<String>,
}
