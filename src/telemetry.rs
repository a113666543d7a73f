// src/telemetry.rs
//! Observability sink for fetch outcomes.
//!
//! `track_outcome` records which data source actually ended up on screen.
//! It returns nothing, affects no control flow, and every call in it is
//! infallible — rendering must never be disturbed by telemetry.

use chrono::Utc;
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge};
use once_cell::sync::OnceCell;

use crate::fetch::FetchOutcome;

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "changelog_fetch_outcomes_total",
            "Fetch attempts by resulting outcome kind."
        );
        describe_histogram!("changelog_fetch_ms", "Live changelog fetch time in milliseconds.");
        describe_gauge!(
            "changelog_cache_age_seconds",
            "Age of the payload backing the last resolved render."
        );
    });
}

/// Invoked once per fetch attempt with the classified outcome.
pub fn track_outcome(outcome: &FetchOutcome) {
    ensure_metrics_described();

    counter!("changelog_fetch_outcomes_total", "outcome" => outcome.kind()).increment(1);

    match outcome {
        FetchOutcome::Success { cached_at, .. } | FetchOutcome::StaleCache { cached_at, .. } => {
            let age = Utc::now()
                .signed_duration_since(*cached_at)
                .num_seconds()
                .max(0);
            gauge!("changelog_cache_age_seconds").set(age as f64);
            tracing::info!(outcome = outcome.kind(), age_secs = age, "changelog resolved");
        }
        FetchOutcome::Fallback { error } => {
            tracing::info!(outcome = "fallback", %error, "changelog resolved from baseline");
        }
    }
}
