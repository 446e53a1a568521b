//! Catalog page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use super::products::ProductView;
use crate::filters;
use crate::middleware::CartCookie;
use crate::state::AppState;

/// Catalog page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub products: Vec<ProductView>,
    pub cart_count: usize,
}

/// Display the catalog page.
///
/// A failed product listing is logged and reported, and the page renders with
/// no products rather than an error.
#[instrument(skip(state, cart))]
pub async fn home(State(state): State<AppState>, CartCookie(cart): CartCookie) -> impl IntoResponse {
    let products = match state.catalog().list_products().await {
        Ok(products) => products
            .iter()
            .map(|product| ProductView::new(product, state.catalog()))
            .collect(),
        Err(e) => {
            let event_id = sentry::capture_error(&e);
            tracing::error!(
                error = %e,
                sentry_event_id = %event_id,
                "Failed to fetch products"
            );
            Vec::new()
        }
    };

    HomeTemplate {
        products,
        cart_count: cart.len(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use crate::test_support::{FakeCatalog, body_text};

    #[tokio::test]
    async fn test_home_lists_products() {
        let fake = FakeCatalog::builder()
            .product("1", "Mango Soap", 10)
            .product("2", "Coconut Balm", 5)
            .spawn()
            .await;
        let app = crate::app(fake.app_state());

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("Our Products"));
        assert!(body.contains("Mango Soap"));
        assert!(body.contains("About Coconut Balm"));
        assert!(body.contains("$5.00"));
        assert!(body.contains("/details/1"));
        assert!(body.contains(&format!("{}/images/2.png", fake.url().as_str().trim_end_matches('/'))));
        assert_eq!(fake.requests(), vec!["all".to_string()]);
    }

    #[tokio::test]
    async fn test_home_listing_failure_renders_empty_page() {
        let fake = FakeCatalog::builder()
            .product("1", "Mango Soap", 10)
            .fail_listing()
            .spawn()
            .await;
        let app = crate::app(fake.app_state());

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("Our Products"));
        assert!(!body.contains("Mango Soap"));
        assert!(!body.contains("product-item"));
    }

    #[tokio::test]
    async fn test_home_sets_security_and_request_id_headers() {
        let fake = FakeCatalog::builder().spawn().await;
        let app = crate::app(fake.app_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header("x-request-id", "req-42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let headers = response.headers();
        assert_eq!(headers.get("x-request-id").unwrap(), "req-42");
        assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
        let csp = headers.get("content-security-policy").unwrap().to_str().unwrap();
        assert!(csp.contains(&fake.catalog_config().asset_origin()));
    }
}
