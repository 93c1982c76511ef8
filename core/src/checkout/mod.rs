// mercato/src/checkout/mod.rs

//! The order-assembly orchestrator and the summary it produces.

pub mod summary;
pub mod workflow;

pub use summary::OrderSummary;
pub use workflow::CheckoutWorkflow;
