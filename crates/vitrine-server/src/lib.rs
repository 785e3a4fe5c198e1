#![forbid(unsafe_code)]

use axum::body::Body;
use axum::extract::{DefaultBodyLimit, Path, Query, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use vitrine_api::{
    parse_list_products_params_with_limit, parse_sort_spec, ApiError, ApiErrorCode, ProductPageDto,
};
use vitrine_model::Catalog;
use vitrine_query::{query_products, ProductFilter, ProductQueryRequest, QueryLimits};

mod config;
mod http_handlers;
mod telemetry;

pub use config::{validate_startup_config, ApiConfig, CONFIG_SCHEMA_VERSION};
pub use telemetry::RequestMetrics;

pub const CRATE_NAME: &str = "vitrine-server";

#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub api: ApiConfig,
    pub limits: QueryLimits,
    pub metrics: Arc<RequestMetrics>,
    pub request_id_seed: Arc<AtomicU64>,
    pub ready: Arc<AtomicBool>,
}

impl AppState {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self::with_config(catalog, ApiConfig::default(), QueryLimits::default())
    }

    #[must_use]
    pub fn with_config(catalog: Arc<Catalog>, api: ApiConfig, limits: QueryLimits) -> Self {
        Self {
            catalog,
            api,
            limits,
            metrics: Arc::new(RequestMetrics::default()),
            request_id_seed: Arc::new(AtomicU64::new(1)),
            ready: Arc::new(AtomicBool::new(true)),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(http_handlers::landing_handler))
        .route("/healthz", get(http_handlers::healthz_handler))
        .route("/readyz", get(http_handlers::readyz_handler))
        .route("/metrics", get(http_handlers::metrics_handler))
        .route("/version", get(http_handlers::version_handler))
        .route("/products", get(http_handlers::products_handler))
        .route("/products/:id", get(http_handlers::product_handler))
        .layer(DefaultBodyLimit::max(state.api.max_body_bytes))
        .with_state(state)
}
