// mercato/src/gateway/mod.rs

//! Payment-initiation boundary.
//!
//! The workflow talks to exactly one gateway per deployment. Which one is a
//! configuration decision: gateways register under a name in a
//! [`GatewayRegistry`], and the deployment resolves its configured name once
//! at startup and injects the result into the workflow. There is no global
//! mutable "active gateway" anywhere.

use crate::checkout::OrderSummary;
use crate::error::{CheckoutError, CheckoutResult};
use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{event, Level};

/// What a gateway hands back when it accepts an order: an opaque reference
/// identifying the initiated payment on the processor's side.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentInitiation {
  pub reference_id: String,
}

/// A payment processor integration.
///
/// `pay` runs inside the order transaction: a rejection rolls back the whole
/// attempt, including the already-inserted rows and inventory decrements.
/// Errors come back as plain `anyhow::Error`; the workflow wraps them into
/// `CheckoutError::GatewayFailure` tagged with the gateway's name.
/// Cancellation/timeout policy is the implementation's responsibility; the
/// workflow imposes none.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
  fn name(&self) -> &str;

  async fn pay(&self, summary: &OrderSummary) -> Result<PaymentInitiation, anyhow::Error>;
}

/// Name-keyed set of available gateway integrations.
#[derive(Default)]
pub struct GatewayRegistry {
  gateways: HashMap<String, Arc<dyn PaymentGateway>>,
}

impl GatewayRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn register(&mut self, gateway: Arc<dyn PaymentGateway>) {
    let name = gateway.name().to_string();
    event!(Level::DEBUG, gateway = %name, "Registering payment gateway.");
    self.gateways.insert(name, gateway);
  }

  /// Resolves the deployment's configured gateway. Called once at startup.
  pub fn active(&self, name: &str) -> CheckoutResult<Arc<dyn PaymentGateway>> {
    self
      .gateways
      .get(name)
      .cloned()
      .ok_or_else(|| CheckoutError::Config(format!("no payment gateway registered under '{}'", name)))
  }
}
