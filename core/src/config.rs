// mercato/src/config.rs

use crate::error::{CheckoutError, CheckoutResult};
use dotenvy::dotenv;
use std::env;

/// Deployment configuration for the checkout core.
///
/// The active gateway is a deployment-time decision: it is resolved once from
/// here against a `GatewayRegistry` and injected into the workflow, never
/// consulted again mid-flight.
#[derive(Debug, Clone)]
pub struct CheckoutConfig {
  pub database_url: String,
  /// Name of the payment gateway to resolve from the registry.
  pub active_gateway: String,
  /// Distance parameter handed to shipping-charge calculations. Zero means
  /// "use the base charge".
  pub shipping_distance: i64,
}

impl CheckoutConfig {
  pub fn from_env() -> CheckoutResult<Self> {
    dotenv().ok(); // Load .env file if present

    let database_url = env::var("DATABASE_URL")
      .map_err(|e| CheckoutError::Config(format!("Missing environment variable 'DATABASE_URL': {}", e)))?;
    let active_gateway = env::var("ACTIVE_PAYMENT_GATEWAY").unwrap_or_else(|_| "mock".to_string());
    let shipping_distance = env::var("SHIPPING_DISTANCE")
      .unwrap_or_else(|_| "0".to_string())
      .parse::<i64>()
      .map_err(|e| CheckoutError::Config(format!("Invalid SHIPPING_DISTANCE: {}", e)))?;

    Ok(CheckoutConfig {
      database_url,
      active_gateway,
      shipping_distance,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serial_test::serial;

  #[test]
  #[serial]
  fn from_env_reads_overrides() {
    std::env::set_var("DATABASE_URL", "postgres://localhost/mercato_test");
    std::env::set_var("ACTIVE_PAYMENT_GATEWAY", "stripe_mock");
    std::env::set_var("SHIPPING_DISTANCE", "12");

    let config = CheckoutConfig::from_env().unwrap();
    assert_eq!(config.database_url, "postgres://localhost/mercato_test");
    assert_eq!(config.active_gateway, "stripe_mock");
    assert_eq!(config.shipping_distance, 12);

    std::env::remove_var("ACTIVE_PAYMENT_GATEWAY");
    std::env::remove_var("SHIPPING_DISTANCE");
  }

  #[test]
  #[serial]
  fn missing_database_url_is_a_config_error() {
    std::env::remove_var("DATABASE_URL");
    let err = CheckoutConfig::from_env().unwrap_err();
    assert!(matches!(err, CheckoutError::Config(_)));
  }
}
