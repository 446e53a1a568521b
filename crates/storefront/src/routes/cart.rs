//! Cart route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::{StatusCode, header::SET_COOKIE},
    response::{AppendHeaders, IntoResponse, Redirect},
};
use serde::Deserialize;
use shopfront_core::{CartLine, Price, ProductId};
use tracing::instrument;

use super::products::{detail_url, image_url};
use crate::catalog::CatalogClient;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::middleware::{CartCookie, cart_set_cookie};
use crate::services::cart::{CartState, cart_state};
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartLineView {
    pub name: String,
    pub price: String,
    pub quantity: u32,
    pub line_total: String,
    pub image_url: String,
    pub detail_url: String,
}

impl CartLineView {
    fn new(line: &CartLine, catalog: &CatalogClient) -> Self {
        Self {
            name: line.product.name.clone(),
            price: line.product.price().to_string(),
            quantity: line.quantity,
            line_total: Price::usd(line.line_total()).to_string(),
            image_url: image_url(&line.product, catalog),
            detail_url: detail_url(&line.product.product_id),
        }
    }
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart.html")]
pub struct CartShowTemplate {
    pub lines: Vec<CartLineView>,
    pub subtotal: String,
    pub failed: bool,
    pub cart_count: usize,
}

impl CartShowTemplate {
    fn from_state(state: CartState, catalog: &CatalogClient, cart_count: usize) -> Self {
        match state {
            CartState::Empty => Self {
                lines: Vec::new(),
                subtotal: Price::zero().to_string(),
                failed: false,
                cart_count,
            },
            CartState::Loaded(summary) => Self {
                lines: summary
                    .lines
                    .iter()
                    .map(|line| CartLineView::new(line, catalog))
                    .collect(),
                subtotal: summary.subtotal_price().to_string(),
                failed: false,
                cart_count,
            },
            CartState::Failed => Self {
                lines: Vec::new(),
                subtotal: Price::zero().to_string(),
                failed: true,
                cart_count,
            },
        }
    }
}

/// Display the cart page.
///
/// Answers 502 with the error message when any product lookup fails.
#[instrument(skip(state, cart))]
pub async fn show(State(state): State<AppState>, CartCookie(cart): CartCookie) -> impl IntoResponse {
    let loaded = cart_state(state.catalog(), &cart).await;
    let status = if matches!(loaded, CartState::Failed) {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::OK
    };

    (
        status,
        CartShowTemplate::from_state(loaded, state.catalog(), cart.len()),
    )
}

/// Form data for adding to cart.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
}

/// Add one unit of a product to the cart cookie, then show the cart.
#[instrument(skip(state, cart))]
pub async fn add(
    State(state): State<AppState>,
    CartCookie(mut cart): CartCookie,
    Form(form): Form<AddToCartForm>,
) -> Result<impl IntoResponse> {
    let id = ProductId::parse(&form.product_id).map_err(|e| AppError::BadRequest(e.to_string()))?;

    // Only known products go into the cookie
    let product = state.catalog().get_product(&id).await?;

    add_breadcrumb(
        "cart",
        "Added product to cart",
        Some(&[("product_id", id.as_str())]),
    );
    tracing::info!(product_id = %id, name = %product.name, "Added to cart");

    cart.push(id);
    let cookie = cart_set_cookie(&cart).map_err(|e| AppError::Internal(e.to_string()))?;

    Ok((AppendHeaders([(SET_COOKIE, cookie)]), Redirect::to("/cart")))
}
