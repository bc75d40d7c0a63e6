//! Worker binary.

use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vreel_queue::JobQueue;
use vreel_worker::{JobExecutor, WorkerConfig};

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env().add_directive("vreel=info".parse().unwrap());

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(true).with_target(true))
            .with(env_filter)
            .init();
    }

    info!("Starting vreel-worker");

    // Expose Prometheus metrics when enabled
    let metrics_enabled = std::env::var("METRICS_ENABLED")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false);
    if metrics_enabled {
        let port: u16 = std::env::var("METRICS_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(9090);
        let addr: std::net::SocketAddr = ([0, 0, 0, 0], port).into();
        if let Err(e) = metrics_exporter_prometheus::PrometheusBuilder::new()
            .with_http_listener(addr)
            .install()
        {
            error!("Failed to install metrics exporter: {}", e);
        } else {
            info!("Prometheus metrics on {}", addr);
        }
    }

    let config = WorkerConfig::from_env();
    info!(
        "Worker config: max_jobs={}, work_dir={}",
        config.max_concurrent_jobs, config.work_dir
    );

    let queue = match JobQueue::from_env() {
        Ok(q) => q,
        Err(e) => {
            error!("Failed to create job queue: {}", e);
            std::process::exit(1);
        }
    };

    let executor = std::sync::Arc::new(JobExecutor::new(config, queue));

    // Shut down gracefully on CTRL+C
    let executor_signal = std::sync::Arc::clone(&executor);
    tokio::spawn(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C handler");
        info!("Received shutdown signal");
        executor_signal.shutdown();
    });

    if let Err(e) = executor.run().await {
        error!("Executor failed: {}", e);
        std::process::exit(1);
    }

    info!("Worker shutdown complete");
}
