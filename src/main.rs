//! changelog-relay — Binary Entrypoint
//! Boots the Axum HTTP server: baseline load, cache + orchestrator wiring,
//! Prometheus recorder, routes.

use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use changelog_relay::api::{create_router, AppState};
use changelog_relay::baseline::load_baseline;
use changelog_relay::cache::FetchCache;
use changelog_relay::config::RelayConfig;
use changelog_relay::fetch::{FetchOrchestrator, HttpChangelogSource};
use changelog_relay::metrics;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("changelog_relay=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cfg = RelayConfig::from_env();

    // A missing or malformed baseline must not keep the service down; the
    // page degrades to an empty baseline plus whatever the live fetch finds.
    let baseline = match load_baseline(Path::new(&cfg.baseline_path)) {
        Ok(days) => days,
        Err(e) => {
            tracing::warn!(error = ?e, "baseline load failed; starting with empty baseline");
            Vec::new()
        }
    };

    let metrics_handle = metrics::install(cfg.cache_ttl);

    let cache = Arc::new(FetchCache::new());
    let source = HttpChangelogSource::new(&cfg.repo_base);
    let orchestrator = Arc::new(FetchOrchestrator::new(Box::new(source), cache));

    let state = AppState {
        baseline: Arc::new(baseline),
        orchestrator,
        cache_ttl: cfg.cache_ttl,
    };
    let router = create_router(state).merge(metrics::router(metrics_handle));

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    tracing::info!(addr = %cfg.bind_addr, "changelog-relay listening");
    axum::serve(listener, router).await?;
    Ok(())
}
