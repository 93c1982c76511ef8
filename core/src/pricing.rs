// mercato/src/pricing.rs

//! Charge-rule evaluation: the pure arithmetic behind per-line tax/VAT and the
//! fee calculations reused by shipping and payment methods.
//!
//! All amounts are exact integers in minor currency units. Percentages are
//! expressed in basis points and truncate toward zero, so evaluating the same
//! rule twice over the same subtotal can never drift.

use serde::{Deserialize, Serialize};

/// Classification of a configured charge rule. Only `Tax` and `Vat` feed the
/// order totals; anything else on a product is catalog metadata this workflow
/// ignores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargeType {
  Tax,
  Vat,
  Other,
}

/// How a charge is computed from a base amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChargeValue {
  /// `base * basis_points / 10_000`, truncating. 10% is 1000 basis points.
  Percent { basis_points: i64 },
  /// A fixed amount regardless of the base.
  Flat { amount: i64 },
}

impl ChargeValue {
  pub fn apply(&self, base: i64) -> i64 {
    match *self {
      ChargeValue::Percent { basis_points } => base * basis_points / 10_000,
      ChargeValue::Flat { amount } => amount,
    }
  }
}

/// One configured charge rule attached to a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalCharge {
  pub name: String,
  pub charge_type: ChargeType,
  pub value: ChargeValue,
}

impl AdditionalCharge {
  pub fn amount_for(&self, sub_total: i64) -> i64 {
    self.value.apply(sub_total)
  }
}

/// Tax and VAT accumulated for a single line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineCharges {
  pub tax: i64,
  pub vat: i64,
}

/// Evaluates a product's charge rules against a line subtotal.
///
/// Rules are applied in their configured order; `Tax` and `Vat` rules sum into
/// their respective buckets independently, every other type is skipped.
pub fn evaluate_line_charges(rules: &[AdditionalCharge], sub_total: i64) -> LineCharges {
  let mut charges = LineCharges::default();
  for rule in rules {
    match rule.charge_type {
      ChargeType::Tax => charges.tax += rule.amount_for(sub_total),
      ChargeType::Vat => charges.vat += rule.amount_for(sub_total),
      ChargeType::Other => {}
    }
  }
  charges
}
