#![forbid(unsafe_code)]

use std::env;
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use vitrine_query::QueryLimits;
use vitrine_server::{build_router, validate_startup_config, ApiConfig, AppState};

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| match v.as_str() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(default)
}

fn env_duration_ms(name: &str, default_ms: u64) -> Duration {
    Duration::from_millis(env_u64(name, default_ms))
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate()).expect("register SIGTERM");
        let mut sigint = signal(SignalKind::interrupt()).expect("register SIGINT");
        tokio::select! {
            _ = sigterm.recv() => {}
            _ = sigint.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if env_bool("VITRINE_LOG_JSON", false) {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    init_tracing();

    let bind_addr = env::var("VITRINE_BIND").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let fixture_path = PathBuf::from(
        env::var("VITRINE_FIXTURE_PATH").unwrap_or_else(|_| "fixtures/products.json".to_string()),
    );

    let api_cfg = ApiConfig {
        max_body_bytes: env_usize("VITRINE_MAX_BODY_BYTES", 16 * 1024),
        response_max_bytes: env_usize("VITRINE_RESPONSE_MAX_BYTES", 512 * 1024),
        default_limit: env_usize("VITRINE_DEFAULT_LIMIT", 8),
        list_ttl: env_duration_ms("VITRINE_LIST_TTL_MS", 30_000),
        product_ttl: env_duration_ms("VITRINE_PRODUCT_TTL_MS", 300_000),
        slow_query_threshold: env_duration_ms("VITRINE_SLOW_QUERY_THRESHOLD_MS", 50),
        readiness_requires_catalog: env_bool("VITRINE_READINESS_REQUIRES_CATALOG", true),
    };
    let limits = QueryLimits {
        max_limit: env_usize("VITRINE_MAX_LIMIT", 100),
        max_term_len: env_usize("VITRINE_MAX_TERM_LEN", 128),
    };
    validate_startup_config(&api_cfg, &limits)?;

    let catalog = vitrine_store::load_fixture(&fixture_path)
        .map_err(|e| format!("fixture load failed ({}): {e}", fixture_path.display()))?;
    info!(
        products = catalog.len(),
        path = %fixture_path.display(),
        "catalog loaded"
    );

    let state = AppState::with_config(Arc::new(catalog), api_cfg, limits);
    state.ready.store(true, Ordering::Relaxed);
    let app = build_router(state.clone());

    let addr: std::net::SocketAddr = bind_addr
        .parse()
        .map_err(|e| format!("invalid bind addr {bind_addr}: {e}"))?;
    let socket = if addr.is_ipv4() {
        tokio::net::TcpSocket::new_v4().map_err(|e| format!("socket v4 failed: {e}"))?
    } else {
        tokio::net::TcpSocket::new_v6().map_err(|e| format!("socket v6 failed: {e}"))?
    };
    socket
        .set_reuseaddr(true)
        .map_err(|e| format!("set_reuseaddr failed: {e}"))?;
    socket
        .set_keepalive(env_bool("VITRINE_TCP_KEEPALIVE_ENABLED", true))
        .map_err(|e| format!("set_keepalive failed: {e}"))?;
    socket.bind(addr).map_err(|e| format!("bind failed: {e}"))?;
    let listener: TcpListener = socket
        .listen(1024)
        .map_err(|e| format!("listen failed: {e}"))?;
    info!("vitrine-server listening on {bind_addr}");

    let ready = state.ready.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            wait_for_shutdown_signal().await;
            ready.store(false, Ordering::Relaxed);
            let drain_ms = env_u64("VITRINE_SHUTDOWN_DRAIN_MS", 2000);
            tokio::time::sleep(Duration::from_millis(drain_ms)).await;
        })
        .await
        .map_err(|e| format!("server failed: {e}"))
}
