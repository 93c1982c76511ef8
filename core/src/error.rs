// mercato/src/error.rs

use anyhow::Error as AnyhowError;
use thiserror::Error;
use uuid::Uuid;

/// One variant per failure the order-creation workflow can surface.
///
/// Every variant is terminal for the current attempt: the workflow rolls the
/// enclosing transaction back before returning any of these, so callers never
/// observe partially created orders or partially decremented stock. Nothing is
/// retried here; resubmission is the caller's decision.
#[derive(Debug, Error)]
pub enum CheckoutError {
  #[error("store not found: {store_id}")]
  StoreNotFound { store_id: Uuid },

  #[error("product not found: {product_id}")]
  ProductNotFound { product_id: Uuid },

  #[error("product out of stock: {product_id}")]
  OutOfStock { product_id: Uuid },

  #[error("shipping_method_id is required when the order contains shippable products")]
  ShippingMethodRequired,

  #[error("shipping_address_id is required when the order contains shippable products")]
  ShippingAddressRequired,

  #[error("shipping method not found: {shipping_method_id}")]
  ShippingMethodNotFound { shipping_method_id: Uuid },

  #[error("billing address not found: {address_id}")]
  BillingAddressNotFound { address_id: Uuid },

  #[error("payment method not found: {payment_method_id}")]
  PaymentMethodNotFound { payment_method_id: Uuid },

  #[error("payment gateway '{gateway}' rejected the order. Source: {source}")]
  GatewayFailure {
    gateway: String,
    #[source]
    source: AnyhowError,
  },

  #[error("persistence failure. Source: {source}")]
  PersistenceFailure {
    #[source]
    source: AnyhowError,
  },

  #[error("invalid order request: {field} {reason}")]
  InvalidRequest { field: &'static str, reason: String },

  #[error("configuration error: {0}")]
  Config(String),
}

impl CheckoutError {
  /// The machine-readable field name a boundary layer should attach this error
  /// to when building a response. Mirrors the field/reason pairs the REST
  /// layer reports, so callers never have to parse the display string.
  pub fn field(&self) -> &'static str {
    match self {
      CheckoutError::StoreNotFound { .. } => "store_id",
      CheckoutError::ProductNotFound { .. } | CheckoutError::OutOfStock { .. } => "product_id",
      CheckoutError::ShippingMethodRequired | CheckoutError::ShippingMethodNotFound { .. } => "shipping_method_id",
      CheckoutError::ShippingAddressRequired => "shipping_address_id",
      CheckoutError::BillingAddressNotFound { .. } => "billing_address_id",
      CheckoutError::PaymentMethodNotFound { .. } => "payment_method_id",
      CheckoutError::GatewayFailure { .. } => "payment_gateway",
      CheckoutError::PersistenceFailure { .. } | CheckoutError::Config(_) => "internal",
      CheckoutError::InvalidRequest { field, .. } => *field,
    }
  }

  /// True when resubmitting the same request could plausibly succeed without
  /// any change on the caller's side (transient storage/gateway trouble).
  pub fn is_transient(&self) -> bool {
    matches!(
      self,
      CheckoutError::GatewayFailure { .. } | CheckoutError::PersistenceFailure { .. }
    )
  }
}

// Storage-level errors all collapse into PersistenceFailure; the workflow
// detects "row absent" through fetch_optional, never through this conversion.
impl From<sqlx::Error> for CheckoutError {
  fn from(err: sqlx::Error) -> Self {
    CheckoutError::PersistenceFailure { source: err.into() }
  }
}

pub type CheckoutResult<T, E = CheckoutError> = std::result::Result<T, E>;
