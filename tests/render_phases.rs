// tests/render_phases.rs
//! The two-phase view: hydration identity in the Baseline phase, banner
//! mapping and baseline preservation after resolve.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{Locale, NaiveDate, TimeDelta, Utc};

use changelog_relay::cache::{FetchCache, TOOLKIT_CACHE_KEY};
use changelog_relay::fetch::{ChangelogSource, FetchOrchestrator};
use changelog_relay::model::{ChangeDay, ChangeEntry, ChangeKind, ChangeSource};
use changelog_relay::render::ChangelogView;

fn baseline() -> Vec<ChangeDay> {
    vec![ChangeDay {
        date: NaiveDate::from_ymd_opt(2026, 2, 22).unwrap(),
        // deliberately not what the locale formatter would produce, so tests
        // can tell verbatim output from recomputed output
        display_date: "22 Feb 2026 (build)".into(),
        changes: vec![ChangeEntry {
            kind: ChangeKind::Feat,
            description: "agent workflows page".into(),
            source: ChangeSource::Website,
        }],
    }]
}

struct OkSource;

#[async_trait]
impl ChangelogSource for OkSource {
    async fn fetch_days(&self) -> Result<Vec<ChangeDay>> {
        Ok(vec![ChangeDay {
            date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            display_date: "March 1, 2026".into(),
            changes: vec![ChangeEntry {
                kind: ChangeKind::Fix,
                description: "broken anchors".into(),
                source: ChangeSource::Toolkit,
            }],
        }])
    }
    fn name(&self) -> &'static str {
        "ok"
    }
}

struct EmptySource;

#[async_trait]
impl ChangelogSource for EmptySource {
    async fn fetch_days(&self) -> Result<Vec<ChangeDay>> {
        Ok(vec![])
    }
    fn name(&self) -> &'static str {
        "empty"
    }
}

struct DownSource;

#[async_trait]
impl ChangelogSource for DownSource {
    async fn fetch_days(&self) -> Result<Vec<ChangeDay>> {
        anyhow::bail!("dns failure")
    }
    fn name(&self) -> &'static str {
        "down"
    }
}

fn orch(source: impl ChangelogSource + 'static, cache: Arc<FetchCache>) -> FetchOrchestrator {
    FetchOrchestrator::new(Box::new(source), cache)
}

#[test]
fn first_render_shows_embedded_display_dates_verbatim() {
    let view = ChangelogView::new(baseline());
    let html = view.render();
    // No locale reformatting before resolve, regardless of environment.
    assert!(html.contains("22 Feb 2026 (build)"));
    assert!(html.contains("data-phase=\"baseline\""));
    assert!(!view.is_resolved());
}

#[tokio::test]
async fn success_shows_live_banner_and_merged_days() {
    let mut view = ChangelogView::new(baseline());
    let orch = orch(OkSource, Arc::new(FetchCache::new()));

    view.resolve(&orch, Locale::en_US, false).await;
    let html = view.render();

    assert!(view.is_resolved());
    assert!(html.contains("Live data"));
    assert!(html.contains("data-phase=\"resolved\""));
    // baseline content remains visible after the upgrade
    assert!(html.contains("agent workflows page"));
    assert!(html.contains("broken anchors"));
    // display dates recomputed for the viewer's locale, most recent first
    assert_eq!(view.days()[0].display_date, "March 1, 2026");
    assert_eq!(view.days()[1].display_date, "February 22, 2026");
}

#[tokio::test]
async fn stale_cache_shows_cached_banner_with_age() {
    let cache = Arc::new(FetchCache::new());
    let fetched_at = Utc::now() - TimeDelta::minutes(20);
    cache.write(
        TOOLKIT_CACHE_KEY,
        vec![ChangeDay {
            date: NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(),
            display_date: "January 10, 2026".into(),
            changes: vec![],
        }],
        fetched_at,
    );

    let mut view = ChangelogView::new(baseline());
    let orch = orch(DownSource, cache);
    view.resolve(&orch, Locale::en_US, false).await;
    let html = view.render();

    assert!(html.contains("Using cached data (20 min old)"));
    // 20 min exceeds the 15-minute freshness window
    assert!(html.contains("class=\"status stale\""));
}

#[tokio::test]
async fn fallback_preserves_baseline_changes() {
    let mut view = ChangelogView::new(baseline());
    let before: Vec<ChangeDay> = view.days().to_vec();

    let orch = orch(DownSource, Arc::new(FetchCache::new()));
    view.resolve(&orch, Locale::en_US, false).await;
    let html = view.render();

    assert!(html.contains("Showing build-time data"));
    // same days and entries as before the attempt; only display dates are
    // recomputed for the viewer's locale
    assert_eq!(view.days().len(), before.len());
    assert_eq!(view.days()[0].changes, before[0].changes);
    assert_eq!(view.days()[0].display_date, "February 22, 2026");
}

#[tokio::test]
async fn empty_baseline_and_empty_live_render_empty_state() {
    let mut view = ChangelogView::new(vec![]);
    assert!(view.render().contains("No changelog entries yet"));

    let orch = orch(EmptySource, Arc::new(FetchCache::new()));
    view.resolve(&orch, Locale::en_US, false).await;
    let html = view.render();
    assert!(html.contains("No changelog entries yet"));
    assert!(html.contains("Live data"));
}

#[tokio::test]
async fn resolve_again_reruns_the_same_transition() {
    let mut view = ChangelogView::new(baseline());
    let orch = orch(OkSource, Arc::new(FetchCache::new()));

    view.resolve(&orch, Locale::en_US, false).await;
    let first = view.render();
    // a manual force-refresh is a re-run, not a new phase
    view.resolve(&orch, Locale::en_US, true).await;
    let second = view.render();
    assert_eq!(first, second);
}
