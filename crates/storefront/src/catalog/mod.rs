//! Product catalog API client.
//!
//! # Architecture
//!
//! - Plain JSON over HTTP via `reqwest`
//! - The catalog is the source of truth - no local copy, direct API calls
//! - Every request is bounded by the configured timeout
//!
//! # Endpoints
//!
//! ```text
//! GET {api}/products/all    - Every product (catalog page)
//! GET {api}/products/{id}   - One product (cart lines, details page)
//! GET {assets}/{filename}   - Product image bytes (linked, never fetched here)
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use shopfront_storefront::catalog::CatalogClient;
//!
//! let client = CatalogClient::new(&config.catalog)?;
//! let products = client.list_products().await?;
//! let lines = client.get_products(&cart.distinct_ids()).await?;
//! ```

mod client;

pub use client::CatalogClient;

use thiserror::Error;

/// Errors that can occur when talking to the catalog API.
///
/// `Http`, `Status` and `NotFound` are fetch failures; `Parse` is a parse
/// failure.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Transport failed (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("Catalog returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    /// The requested product does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The response body was not the expected JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl CatalogError {
    /// Returns `true` for a missing product.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
