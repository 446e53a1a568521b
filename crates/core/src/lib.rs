//! Shopfront Core - Shared types library.
//!
//! This crate provides the domain types used by the storefront:
//! - Product records as served by the catalog API
//! - The typed cart and its cookie encoding
//! - Cart lines and subtotal arithmetic
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O and no
//! HTTP clients. This keeps the cart arithmetic testable without a server.
//!
//! # Modules
//!
//! - [`types`] - Identifiers, prices, products, and the cart

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
