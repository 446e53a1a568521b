//! Cart loading.
//!
//! Turns the identifier sequence stored in the browser into rendered cart
//! lines: one catalog lookup per distinct identifier, all issued at once and
//! joined all-or-nothing, then quantities re-attached from the sequence.

use shopfront_core::{Cart, CartSummary};
use tracing::instrument;

use crate::catalog::{CatalogClient, CatalogError};

/// Terminal outcome of loading the cart for one page view.
///
/// The cart page moves `loading -> {Empty | Loaded, Failed}`. Loading is the
/// in-flight request itself and is never rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartState {
    /// Nothing stored; no lookups were made.
    Empty,
    /// Every lookup succeeded.
    Loaded(CartSummary),
    /// At least one lookup failed; nothing is shown.
    Failed,
}

/// Fetch the products referenced by `cart` and aggregate quantities.
///
/// An empty cart returns an empty summary without touching the network.
///
/// # Errors
///
/// Returns the first lookup or parse failure; no partial summary is built.
#[instrument(skip_all, fields(units = cart.len()))]
pub async fn load_cart(catalog: &CatalogClient, cart: &Cart) -> Result<CartSummary, CatalogError> {
    if cart.is_empty() {
        return Ok(CartSummary::default());
    }

    let ids = cart.distinct_ids();
    tracing::debug!(distinct = ids.len(), "Fetching cart products");

    let fetched = catalog.get_products(&ids).await?;
    Ok(CartSummary::assemble(cart, fetched))
}

/// Load the cart and fold the result into a [`CartState`].
///
/// Failures are logged and reported to Sentry, then collapsed into
/// [`CartState::Failed`]; fetch and parse failures are not distinguished.
pub async fn cart_state(catalog: &CatalogClient, cart: &Cart) -> CartState {
    if cart.is_empty() {
        return CartState::Empty;
    }

    match load_cart(catalog, cart).await {
        Ok(summary) => CartState::Loaded(summary),
        Err(e) => {
            let event_id = sentry::capture_error(&e);
            tracing::error!(
                error = %e,
                sentry_event_id = %event_id,
                "Error fetching cart products"
            );
            CartState::Failed
        }
    }
}
