//! Mini LRU soak driver
//!
//! Hammers a shared cache from concurrent workers and prints a JSON report.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mini_lru::tasks::{run_workload, spawn_stats_reporter};
use mini_lru::{Config, LruCache};

/// Main entry point for the soak driver.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the shared cache
/// 4. Start the background stats reporter
/// 5. Run the workload until it finishes or a shutdown signal stops the workers
/// 6. Print the final report as JSON
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mini_lru=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Mini LRU soak driver");

    let config = Config::from_env();
    info!(
        capacity = config.capacity,
        workers = config.workers,
        ops_per_worker = config.ops_per_worker,
        key_space = config.key_space,
        report_interval = config.report_interval,
        "Configuration loaded"
    );

    let cache: Arc<LruCache<u64, u64>> =
        Arc::new(LruCache::new(config.capacity).context("Failed to create cache")?);

    let reporter = spawn_stats_reporter(cache.clone(), config.report_every());
    info!("Background stats reporter started");

    let stop = Arc::new(AtomicBool::new(false));
    let workload = run_workload(cache.clone(), &config, stop.clone());
    tokio::pin!(workload);

    let result = tokio::select! {
        result = &mut workload => result,
        _ = shutdown_signal() => {
            stop.store(true, Ordering::Relaxed);
            warn!("Stopping workers early");
            workload.await
        }
    };

    reporter.abort();
    warn!("Stats reporter aborted");

    let report = result.context("Workload worker failed")?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    info!("Soak run complete");

    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
