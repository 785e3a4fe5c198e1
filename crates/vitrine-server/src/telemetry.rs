use axum::http::StatusCode;
use std::collections::BTreeMap;
use std::time::Duration;
use tokio::sync::Mutex;

const METRIC_SUBSYSTEM: &str = "vitrine";
const METRIC_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Per-route request counters and latency samples, rendered as Prometheus
/// text exposition on `/metrics`.
#[derive(Debug, Default)]
pub struct RequestMetrics {
    counts: Mutex<BTreeMap<(String, u16), u64>>,
    latency_ns: Mutex<BTreeMap<String, Vec<u64>>>,
}

impl RequestMetrics {
    pub async fn observe_request(&self, route: &str, status: StatusCode, elapsed: Duration) {
        let mut counts = self.counts.lock().await;
        *counts
            .entry((route.to_string(), status.as_u16()))
            .or_insert(0) += 1;
        drop(counts);
        let mut latency = self.latency_ns.lock().await;
        latency
            .entry(route.to_string())
            .or_default()
            .push(elapsed.as_nanos() as u64);
    }

    pub async fn render_prometheus(&self) -> String {
        let counts = self.counts.lock().await.clone();
        let latency = self.latency_ns.lock().await.clone();
        let mut body = String::new();
        for ((route, status), count) in counts {
            body.push_str(&format!(
                "vitrine_http_requests_total{{subsystem=\"{METRIC_SUBSYSTEM}\",version=\"{METRIC_VERSION}\",route=\"{route}\",status=\"{status}\"}} {count}\n"
            ));
        }
        for (route, samples) in latency {
            body.push_str(&format!(
                "vitrine_http_request_latency_p95_seconds{{subsystem=\"{METRIC_SUBSYSTEM}\",version=\"{METRIC_VERSION}\",route=\"{route}\"}} {:.6}\n",
                percentile_ns(&samples, 0.95) as f64 / 1_000_000_000.0
            ));
        }
        body
    }
}

fn percentile_ns(values: &[u64], pct: f64) -> u64 {
    if values.is_empty() {
        return 0;
    }
    let mut v = values.to_vec();
    v.sort_unstable();
    let idx = ((v.len() as f64 - 1.0) * pct).round() as usize;
    v[idx]
}
