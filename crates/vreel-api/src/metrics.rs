//! Prometheus metrics.

use std::time::Instant;

use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::IntoResponse;
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus recorder and return its render handle.
pub fn init_metrics() -> PrometheusHandle {
    PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install Prometheus recorder")
}

/// Count requests and record latency per method/status.
pub async fn metrics_middleware(req: Request<Body>, next: Next) -> impl IntoResponse {
    let method = req.method().to_string();
    let start = Instant::now();

    let response = next.run(req).await;

    let status = response.status().as_u16().to_string();
    counter!("http_requests_total", "method" => method.clone(), "status" => status).increment(1);
    histogram!("http_request_duration_seconds", "method" => method)
        .record(start.elapsed().as_secs_f64());

    response
}
