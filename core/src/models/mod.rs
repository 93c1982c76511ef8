// mercato/src/models/mod.rs

//! Entity types shared across the workflow and the store implementations.

pub mod address;
pub mod order;
pub mod payment;
pub mod product;
pub mod shipping;
pub mod store;

pub use address::Address;
pub use order::{Order, OrderStatus, OrderedProduct};
pub use payment::PaymentMethod;
pub use product::Product;
pub use shipping::ShippingMethod;
pub use store::Store;
