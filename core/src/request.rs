// mercato/src/request.rs

use crate::error::{CheckoutError, CheckoutResult};
use serde::Deserialize;
use uuid::Uuid;

/// One product-and-quantity entry in an order request. Duplicate product ids
/// are allowed and reserve stock cumulatively.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderLineRequest {
  pub id: Uuid,
  pub quantity: i64,
}

/// The cart-like payload the orchestrator consumes.
///
/// `shipping_method_id` and `shipping_address_id` may be omitted; they become
/// mandatory only when at least one requested product is shippable, which the
/// workflow discovers while processing lines.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderCreateRequest {
  pub user_id: Uuid,
  pub store_id: Uuid,
  pub products: Vec<OrderLineRequest>,
  pub shipping_method_id: Option<Uuid>,
  pub shipping_address_id: Option<Uuid>,
  pub billing_address_id: Uuid,
  pub payment_method_id: Uuid,
}

impl OrderCreateRequest {
  /// Structural validation, run before any transaction is opened. Entity
  /// existence is checked later, inside the transaction.
  pub fn validate(&self) -> CheckoutResult<()> {
    if self.products.is_empty() {
      return Err(CheckoutError::InvalidRequest {
        field: "products",
        reason: "must contain at least one line".to_string(),
      });
    }
    for line in &self.products {
      if line.quantity <= 0 {
        return Err(CheckoutError::InvalidRequest {
          field: "products",
          reason: format!("quantity for product {} must be greater than zero", line.id),
        });
      }
    }
    Ok(())
  }
}
