//! Core types for Shopfront.
//!
//! This module provides type-safe wrappers for the storefront's domain concepts.

pub mod cart;
pub mod id;
pub mod price;
pub mod product;

pub use cart::{CART_COOKIE_NAME, Cart, CartLine, CartSummary};
pub use id::{ProductId, ProductIdError};
pub use price::{CurrencyCode, Price};
pub use product::Product;
