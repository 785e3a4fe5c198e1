use serde::Serialize;
use std::time::Duration;
use vitrine_query::QueryLimits;

pub const CONFIG_SCHEMA_VERSION: &str = "1";

#[derive(Debug, Clone, Serialize)]
pub struct ApiConfig {
    pub max_body_bytes: usize,
    pub response_max_bytes: usize,
    /// Default page size when the client omits `limit`.
    pub default_limit: usize,
    pub list_ttl: Duration,
    pub product_ttl: Duration,
    pub slow_query_threshold: Duration,
    pub readiness_requires_catalog: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 16 * 1024,
            response_max_bytes: 512 * 1024,
            default_limit: 8,
            list_ttl: Duration::from_secs(30),
            product_ttl: Duration::from_secs(300),
            slow_query_threshold: Duration::from_millis(50),
            readiness_requires_catalog: true,
        }
    }
}

pub fn validate_startup_config(api: &ApiConfig, limits: &QueryLimits) -> Result<(), String> {
    if api.max_body_bytes == 0 || api.response_max_bytes == 0 {
        return Err("api size limits must be > 0".to_string());
    }
    if limits.max_limit == 0 || limits.max_term_len == 0 {
        return Err("query limits must be > 0".to_string());
    }
    if api.default_limit == 0 || api.default_limit > limits.max_limit {
        return Err(format!(
            "default_limit must be between 1 and max_limit {}",
            limits.max_limit
        ));
    }
    Ok(())
}
