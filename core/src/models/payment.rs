// mercato/src/models/payment.rs

use crate::pricing::ChargeValue;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A payment option with its processing-fee rule. The fee is a function of the
/// intermediate grand total (subtotal + tax + VAT + shipping), computed before
/// the fee itself is added in.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PaymentMethod {
  pub id: Uuid,
  pub name: String,
  #[sqlx(json)]
  pub processing_fee: ChargeValue,
}

impl PaymentMethod {
  pub fn processing_fee_for(&self, grand_total: i64) -> i64 {
    self.processing_fee.apply(grand_total)
  }
}
