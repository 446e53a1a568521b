//! In-process fake of the catalog API for tests.
//!
//! Serves `GET /products/all` and `GET /products/{id}` from a fixed product
//! table on an ephemeral port and records every product path it was asked for.

#![allow(clippy::unwrap_used)]

use std::collections::HashSet;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    body::to_bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};
use url::Url;

use crate::catalog::CatalogClient;
use crate::config::{CatalogConfig, StorefrontConfig};
use crate::state::AppState;

/// Builder for a [`FakeCatalog`].
#[derive(Default)]
pub struct FakeCatalogBuilder {
    products: Vec<(String, Value)>,
    failing: HashSet<String>,
    malformed: HashSet<String>,
    slow: HashSet<String>,
    fail_listing: bool,
}

impl FakeCatalogBuilder {
    /// Add a product with the given id, name and whole-dollar cost.
    pub fn product(mut self, id: &str, name: &str, cost: i64) -> Self {
        let record = json!({
            "product_id": id,
            "name": name,
            "description": format!("About {name}"),
            "cost": cost,
            "image_filename": format!("images/{id}.png"),
        });
        self.products.push((id.to_string(), record));
        self
    }

    /// Answer 500 for this id.
    pub fn failing(mut self, id: &str) -> Self {
        self.failing.insert(id.to_string());
        self
    }

    /// Answer 200 with a body that is not JSON for this id.
    pub fn malformed(mut self, id: &str) -> Self {
        self.malformed.insert(id.to_string());
        self
    }

    /// Stall for several seconds before answering this id.
    pub fn slow(mut self, id: &str) -> Self {
        self.slow.insert(id.to_string());
        self
    }

    /// Answer 500 for the product listing.
    pub const fn fail_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    /// Start serving on an ephemeral local port.
    pub async fn spawn(self) -> FakeCatalog {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = FakeState {
            products: Arc::new(self.products),
            failing: Arc::new(self.failing),
            malformed: Arc::new(self.malformed),
            slow: Arc::new(self.slow),
            fail_listing: self.fail_listing,
            requests: Arc::clone(&requests),
        };

        let app = Router::new()
            .route("/products/{id}", get(product_route))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        FakeCatalog { addr, requests }
    }
}

#[derive(Clone)]
struct FakeState {
    products: Arc<Vec<(String, Value)>>,
    failing: Arc<HashSet<String>>,
    malformed: Arc<HashSet<String>>,
    slow: Arc<HashSet<String>>,
    fail_listing: bool,
    requests: Arc<Mutex<Vec<String>>>,
}

async fn product_route(State(state): State<FakeState>, Path(id): Path<String>) -> Response {
    state.requests.lock().unwrap().push(id.clone());

    if id == "all" {
        if state.fail_listing {
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
        let all: Vec<Value> = state.products.iter().map(|(_, v)| v.clone()).collect();
        return Json(all).into_response();
    }

    if state.slow.contains(&id) {
        tokio::time::sleep(Duration::from_secs(5)).await;
    }

    if state.failing.contains(&id) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
    }

    if state.malformed.contains(&id) {
        return (StatusCode::OK, "{\"product_id\": ").into_response();
    }

    state
        .products
        .iter()
        .find(|(key, _)| *key == id)
        .map_or_else(
            || StatusCode::NOT_FOUND.into_response(),
            |(_, record)| Json(record.clone()).into_response(),
        )
}

/// A running fake catalog API.
pub struct FakeCatalog {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
}

impl FakeCatalog {
    pub fn builder() -> FakeCatalogBuilder {
        FakeCatalogBuilder::default()
    }

    /// Base URL of the fake API.
    pub fn url(&self) -> Url {
        Url::parse(&format!("http://{}", self.addr)).unwrap()
    }

    /// Every `{id}` path segment requested so far, `all` included.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Requests for individual products only.
    pub fn product_requests(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .filter(|id| id != "all")
            .collect()
    }

    pub fn catalog_config(&self) -> CatalogConfig {
        CatalogConfig::new(self.url())
    }

    pub fn client(&self) -> CatalogClient {
        CatalogClient::new(&self.catalog_config()).unwrap()
    }

    /// Application state wired to this fake.
    pub fn app_state(&self) -> AppState {
        let config = StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 0,
            static_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/static")),
            catalog: self.catalog_config(),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        };
        AppState::new(config).unwrap()
    }
}

/// Collect a response body as UTF-8 text.
pub async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
