//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Catalog page (all products)
//! GET  /details/{id}           - Product detail
//!
//! # Cart (cookie-backed)
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add one unit, redirect to /cart
//! ```
//!
//! `/login`, `/logout` and `/checkout` are linked from the pages but served
//! elsewhere.

pub mod cart;
pub mod home;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
}

/// Create all page routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Catalog page
        .route("/", get(home::home))
        // Product detail
        .route("/details/{id}", get(products::show))
        // Cart routes
        .nest("/cart", cart_routes())
}
