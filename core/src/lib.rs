// src/lib.rs

//! Mercato: the transactional order-creation core of an e-commerce backend.
//!
//! One call assembles an order end to end inside a single storage transaction:
//!  - store-scoped product resolution with price/name snapshots,
//!  - atomic conditional inventory reservation (no oversell, no partials),
//!  - per-line tax/VAT from configured charge rules, exact integer arithmetic,
//!  - shipping and billing resolution, conditional on shippable lines,
//!  - the two-phase grand total (processing fee computed from the
//!    fee-exclusive total, then added in),
//!  - payment initiation through an injected gateway, inside the atomic unit.
//!
//! Any failure rolls the whole transaction back; callers decide about retries.

pub mod checkout;
pub mod config;
pub mod error;
pub mod gateway;
pub mod models;
pub mod pricing;
pub mod request;
pub mod store;

// --- Re-exports for the Public API ---

// The orchestrator and the summary it returns
pub use crate::checkout::{CheckoutWorkflow, OrderSummary};

// Request/response boundary types
pub use crate::request::{OrderCreateRequest, OrderLineRequest};

// Entity models
pub use crate::models::{Address, Order, OrderStatus, OrderedProduct, PaymentMethod, Product, ShippingMethod, Store};

// Pricing rules
pub use crate::pricing::{AdditionalCharge, ChargeType, ChargeValue, LineCharges};

// Storage boundary and the bundled implementations
pub use crate::store::memory::MemoryCheckoutStore;
pub use crate::store::postgres::PgCheckoutStore;
pub use crate::store::{CheckoutStore, CheckoutTx};

// Payment boundary
pub use crate::gateway::{GatewayRegistry, PaymentGateway, PaymentInitiation};

pub use crate::config::CheckoutConfig;
pub use crate::error::{CheckoutError, CheckoutResult};
