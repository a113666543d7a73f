// src/api.rs
//! HTTP surface over the changelog pipeline.
//!
//! `/changelog` serves the baseline-phase HTML (the server-rendered output);
//! `/changelog/live` runs the resolve transition and returns the upgraded
//! fragment the client swaps in; `/changelog/outcome` exposes the raw fetch
//! classification for diagnostics.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Query, State},
    response::Html,
    routing::get,
    Json, Router,
};
use tower_http::cors::CorsLayer;

use crate::fetch::{FetchOrchestrator, FetchOutcome};
use crate::model::{locale_from_tag, ChangeDay};
use crate::render::ChangelogView;
use crate::telemetry;

#[derive(Clone)]
pub struct AppState {
    pub baseline: Arc<Vec<ChangeDay>>,
    pub orchestrator: Arc<FetchOrchestrator>,
    /// Freshness window the cached-data banner is judged by.
    pub cache_ttl: Duration,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/changelog", get(changelog_baseline))
        .route("/changelog/live", get(changelog_live))
        .route("/changelog/outcome", get(changelog_outcome))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// Baseline phase only: embedded display dates verbatim, no fetch.
async fn changelog_baseline(State(state): State<AppState>) -> Html<String> {
    let view = ChangelogView::new((*state.baseline).clone());
    Html(view.render())
}

/// Query params: `refresh=1` for a caller-driven manual refresh,
/// `locale=<bcp47>` for the viewer's locale (default en-US).
async fn changelog_live(
    State(state): State<AppState>,
    Query(q): Query<HashMap<String, String>>,
) -> Html<String> {
    let force_refresh = q
        .get("refresh")
        .is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true"));
    let locale = locale_from_tag(q.get("locale").map(String::as_str).unwrap_or("en-US"));

    let mut view = ChangelogView::new((*state.baseline).clone()).with_ttl(state.cache_ttl);
    view.resolve(&state.orchestrator, locale, force_refresh).await;
    Html(view.render())
}

/// Runs one fetch attempt and reports its classification as JSON.
async fn changelog_outcome(State(state): State<AppState>) -> Json<FetchOutcome> {
    let outcome = state.orchestrator.fetch_toolkit_changelog(false).await;
    telemetry::track_outcome(&outcome);
    Json(outcome)
}
