//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use shopfront_core::{Product, ProductId};
use tracing::instrument;

use crate::catalog::CatalogClient;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::CartCookie;
use crate::state::AppState;

/// Shown when a product has no image.
pub const PLACEHOLDER_IMAGE: &str = "/static/images/placeholder.svg";

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image_url: String,
    pub detail_url: String,
}

impl ProductView {
    /// Build the view, resolving the image against the asset host.
    #[must_use]
    pub fn new(product: &Product, catalog: &CatalogClient) -> Self {
        Self {
            id: product.product_id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price().to_string(),
            image_url: image_url(product, catalog),
            detail_url: detail_url(&product.product_id),
        }
    }
}

/// Absolute image URL for a product, or the placeholder.
#[must_use]
pub fn image_url(product: &Product, catalog: &CatalogClient) -> String {
    product
        .image_filename
        .as_deref()
        .filter(|filename| !filename.trim().is_empty())
        .map_or_else(|| PLACEHOLDER_IMAGE.to_string(), |f| catalog.image_url(f))
}

/// Link to a product's detail page.
#[must_use]
pub fn detail_url(id: &ProductId) -> String {
    format!("/details/{}", urlencoding::encode(id.as_str()))
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductView,
    pub in_cart: u32,
    pub cart_count: usize,
}

/// Display product detail page.
#[instrument(skip(state, cart))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
    CartCookie(cart): CartCookie,
) -> Result<ProductShowTemplate> {
    let id = ProductId::parse(&id).map_err(|e| AppError::NotFound(e.to_string()))?;
    let product = state.catalog().get_product(&id).await?;

    Ok(ProductShowTemplate {
        product: ProductView::new(&product, state.catalog()),
        in_cart: cart.quantity_of(&id),
        cart_count: cart.len(),
    })
}
