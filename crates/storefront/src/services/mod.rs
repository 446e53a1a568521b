//! Business logic services for storefront.
//!
//! # Services
//!
//! - `cart` - Cart loading (dedupe, concurrent lookup, quantity aggregation)

pub mod cart;
