// src/metrics.rs
//! Prometheus wiring: recorder install, relay series descriptions, and the
//! `/metrics` exposition route.

use std::time::Duration;

use axum::{routing::get, Router};
use metrics::{describe_gauge, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the global recorder and seed the static TTL gauge. Called once at
/// startup, before any fetch runs; the fetch/outcome series describe
/// themselves on first use in `telemetry`.
pub fn install(cache_ttl: Duration) -> PrometheusHandle {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .expect("prometheus recorder already installed");

    describe_gauge!(
        "changelog_cache_ttl_seconds",
        "Configured freshness window for cached payloads."
    );
    gauge!("changelog_cache_ttl_seconds").set(cache_ttl.as_secs_f64());

    handle
}

/// Router serving the Prometheus exposition format from `handle`.
pub fn router(handle: PrometheusHandle) -> Router {
    Router::new().route(
        "/metrics",
        get(move || {
            let handle = handle.clone();
            async move { handle.render() }
        }),
    )
}
