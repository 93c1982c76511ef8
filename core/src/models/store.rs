// mercato/src/models/store.rs

use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A merchant storefront. Every order is scoped to exactly one store.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Store {
  pub id: Uuid,
  pub name: String,
}
