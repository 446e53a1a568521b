//! Catalog API client implementation.

use std::sync::Arc;

use futures::future::try_join_all;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use shopfront_core::{Product, ProductId};
use tracing::{debug, instrument};

use super::CatalogError;
use crate::config::CatalogConfig;

/// Longest body excerpt written to logs when a response is rejected.
const LOG_BODY_LIMIT: usize = 500;

/// Client for the product catalog API.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    api_base: String,
    asset_base: String,
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                api_base: config.api_url.as_str().trim_end_matches('/').to_string(),
                asset_base: config.asset_url.as_str().trim_end_matches('/').to_string(),
            }),
        })
    }

    /// Issue a GET and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, CatalogError> {
        let response = self
            .inner
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if status == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(url.to_string()));
        }

        if !status.is_success() {
            tracing::error!(
                status = %status,
                url = %url,
                body = %response_text.chars().take(LOG_BODY_LIMIT).collect::<String>(),
                "Catalog API returned non-success status"
            );
            return Err(CatalogError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                url = %url,
                body = %response_text.chars().take(LOG_BODY_LIMIT).collect::<String>(),
                "Failed to parse catalog response"
            );
            CatalogError::Parse(e)
        })
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Get every product in the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a product list.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        let url = format!("{}/products/all", self.inner.api_base);
        let products: Vec<Product> = self.get_json(&url).await?;
        debug!(count = products.len(), "Fetched product list");
        Ok(products)
    }

    /// Get a single product by identifier.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the API answers 404, or another
    /// error if the request fails or the body is not a product.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: &ProductId) -> Result<Product, CatalogError> {
        let url = format!(
            "{}/products/{}",
            self.inner.api_base,
            urlencoding::encode(id.as_str())
        );
        self.get_json(&url).await
    }

    /// Fetch several products concurrently, all or nothing.
    ///
    /// Issues exactly one request per element of `ids`; callers dedupe. The
    /// first failure resolves the whole call and drops the requests still in
    /// flight. On success each product is paired with the identifier it was
    /// requested under, in the order of `ids`.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by any of the lookups.
    #[instrument(skip(self, ids), fields(count = ids.len()))]
    pub async fn get_products(
        &self,
        ids: &[ProductId],
    ) -> Result<Vec<(ProductId, Product)>, CatalogError> {
        try_join_all(ids.iter().map(|id| async move {
            let product = self.get_product(id).await?;
            Ok::<_, CatalogError>((id.clone(), product))
        }))
        .await
    }

    /// Absolute URL for a product image path.
    #[must_use]
    pub fn image_url(&self, filename: &str) -> String {
        format!(
            "{}/{}",
            self.inner.asset_base,
            filename.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use rust_decimal::Decimal;
    use url::Url;

    use super::*;
    use crate::test_support::FakeCatalog;

    fn id(s: &str) -> ProductId {
        ProductId::parse(s).unwrap()
    }

    #[tokio::test]
    async fn test_list_products() {
        let fake = FakeCatalog::builder()
            .product("1", "Mango Soap", 10)
            .product("2", "Coconut Balm", 5)
            .spawn()
            .await;

        let products = fake.client().list_products().await.unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "Mango Soap");
        assert_eq!(products[1].cost, Decimal::new(5, 0));
        assert_eq!(fake.requests(), vec!["all".to_string()]);
    }

    #[tokio::test]
    async fn test_list_products_server_error() {
        let fake = FakeCatalog::builder().fail_listing().spawn().await;

        let err = fake.client().list_products().await.unwrap_err();
        assert!(matches!(err, CatalogError::Status { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_get_product() {
        let fake = FakeCatalog::builder()
            .product("7", "Papaya Scrub", 12)
            .spawn()
            .await;

        let product = fake.client().get_product(&id("7")).await.unwrap();
        assert_eq!(product.product_id, id("7"));
        assert_eq!(product.name, "Papaya Scrub");
    }

    #[tokio::test]
    async fn test_get_product_not_found() {
        let fake = FakeCatalog::builder().spawn().await;

        let err = fake.client().get_product(&id("404")).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_get_product_malformed_body() {
        let fake = FakeCatalog::builder().malformed("3").spawn().await;

        let err = fake.client().get_product(&id("3")).await.unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[tokio::test]
    async fn test_get_product_encodes_path_segment() {
        let fake = FakeCatalog::builder()
            .product("a b", "Spaced", 1)
            .spawn()
            .await;

        let product = fake.client().get_product(&id("a b")).await.unwrap();
        assert_eq!(product.name, "Spaced");
        assert_eq!(fake.requests(), vec!["a b".to_string()]);
    }

    #[tokio::test]
    async fn test_get_products_one_request_per_id() {
        let fake = FakeCatalog::builder()
            .product("1", "Mango Soap", 10)
            .product("2", "Coconut Balm", 5)
            .spawn()
            .await;

        let fetched = fake
            .client()
            .get_products(&[id("2"), id("1")])
            .await
            .unwrap();

        let ids: Vec<_> = fetched.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);
        assert_eq!(fake.product_requests().len(), 2);
    }

    #[tokio::test]
    async fn test_get_products_fails_when_any_lookup_fails() {
        let fake = FakeCatalog::builder()
            .product("1", "Mango Soap", 10)
            .failing("2")
            .spawn()
            .await;

        let err = fake
            .client()
            .get_products(&[id("1"), id("2")])
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Status { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_request_timeout() {
        let fake = FakeCatalog::builder().slow("9").spawn().await;

        let mut config = fake.catalog_config();
        config.request_timeout = Duration::from_millis(100);
        let client = CatalogClient::new(&config).unwrap();

        let err = client.get_product(&id("9")).await.unwrap_err();
        assert!(matches!(err, CatalogError::Http(ref e) if e.is_timeout()));
    }

    #[tokio::test]
    async fn test_unreachable_catalog() {
        // Reserve a free port, then release it so nothing is listening
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = CatalogConfig::new(Url::parse(&format!("http://{addr}")).unwrap());
        let client = CatalogClient::new(&config).unwrap();

        let err = client.list_products().await.unwrap_err();
        assert!(matches!(err, CatalogError::Http(_)));
    }

    #[test]
    fn test_image_url() {
        let config = CatalogConfig::new(Url::parse("http://localhost:3000/").unwrap());
        let client = CatalogClient::new(&config).unwrap();

        assert_eq!(
            client.image_url("images/mango.png"),
            "http://localhost:3000/images/mango.png"
        );
        assert_eq!(
            client.image_url("/images/mango.png"),
            "http://localhost:3000/images/mango.png"
        );
    }
}
