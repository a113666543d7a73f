// src/render.rs
//! Hydration-safe changelog rendering.
//!
//! The view is an explicit two-phase state machine rather than framework
//! lifecycle magic: the Baseline phase paints exactly the build-time dataset
//! (embedded display dates verbatim, no locale work, no network), and the
//! Resolved phase — entered only by awaiting [`ChangelogView::resolve`] —
//! paints merged live data with viewer-locale dates and a status banner.
//! Server output and the first client paint both come from the Baseline
//! phase, which is what makes them byte-identical.

use std::time::Duration;

use chrono::{Locale, Utc};

use crate::cache::{CacheRecord, FetchCache, DEFAULT_TTL};
use crate::fetch::{FetchOrchestrator, FetchOutcome};
use crate::merge::merge_changelogs;
use crate::model::{format_display_date, ChangeDay};
use crate::telemetry;

/// Status banner shown once a fetch attempt has resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiveStatus {
    /// Fresh network data on screen.
    Live,
    /// A previously cached payload is on screen; `stale` marks records
    /// older than the freshness TTL.
    Cached { age_minutes: i64, stale: bool },
    /// Network and cache both unavailable; baseline data is on screen.
    BuildTime,
}

impl LiveStatus {
    fn from_outcome(outcome: &FetchOutcome, ttl: Duration) -> Self {
        match outcome {
            FetchOutcome::Success { .. } => LiveStatus::Live,
            FetchOutcome::StaleCache { cached_at, .. } => {
                let now = Utc::now();
                let record = CacheRecord {
                    data: Vec::new(),
                    cached_at: *cached_at,
                };
                LiveStatus::Cached {
                    age_minutes: now.signed_duration_since(*cached_at).num_minutes().max(0),
                    stale: FetchCache::is_stale(&record, now, ttl),
                }
            }
            FetchOutcome::Fallback { .. } => LiveStatus::BuildTime,
        }
    }

    fn banner(&self) -> String {
        match self {
            LiveStatus::Live => "Live data".to_string(),
            LiveStatus::Cached { age_minutes, .. } => {
                format!("Using cached data ({age_minutes} min old)")
            }
            LiveStatus::BuildTime => "Showing build-time data".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Phase {
    Baseline,
    Resolved { status: LiveStatus },
}

/// Two-phase changelog view. Constructed in the Baseline phase; one or more
/// `resolve` calls move it to (or re-run) the Resolved phase.
#[derive(Debug)]
pub struct ChangelogView {
    baseline: Vec<ChangeDay>,
    days: Vec<ChangeDay>,
    phase: Phase,
    ttl: Duration,
}

impl ChangelogView {
    /// Baseline phase: `render` paints exactly `baseline`, including its
    /// pre-computed display strings.
    pub fn new(baseline: Vec<ChangeDay>) -> Self {
        let days = baseline.clone();
        Self {
            baseline,
            days,
            phase: Phase::Baseline,
            ttl: DEFAULT_TTL,
        }
    }

    /// Override the freshness window the cached-data banner is judged by.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.phase, Phase::Resolved { .. })
    }

    /// The dataset the next `render` call will paint.
    pub fn days(&self) -> &[ChangeDay] {
        &self.days
    }

    /// The Baseline → Resolved transition: fetch, merge, reformat dates for
    /// the viewer's locale, track the outcome. Resolved is terminal for a
    /// view; calling this again (a manual force-refresh) re-runs the same
    /// transition, it does not introduce a new phase.
    ///
    /// All state updates happen after the await point, so dropping the
    /// future before the fetch resolves leaves the view untouched — the
    /// "ignore late resolution after teardown" rule.
    pub async fn resolve(
        &mut self,
        orchestrator: &FetchOrchestrator,
        locale: Locale,
        force_refresh: bool,
    ) -> FetchOutcome {
        let outcome = orchestrator.fetch_toolkit_changelog(force_refresh).await;

        let mut merged = merge_changelogs(&self.baseline, outcome.data());
        // The only locale-aware point in the pipeline. Never runs for the
        // first paint, so server/client locale differences cannot diverge
        // the markup.
        for day in &mut merged {
            day.display_date = format_display_date(day.date, locale);
        }

        telemetry::track_outcome(&outcome);

        self.days = merged;
        self.phase = Phase::Resolved {
            status: LiveStatus::from_outcome(&outcome, self.ttl),
        };
        outcome
    }

    /// Render the current phase as an HTML fragment.
    pub fn render(&self) -> String {
        let (phase_attr, status) = match &self.phase {
            Phase::Baseline => ("baseline", None),
            Phase::Resolved { status } => ("resolved", Some(status)),
        };

        let mut html = String::with_capacity(1024);
        html.push_str(&format!(
            "<section class=\"changelog\" data-phase=\"{phase_attr}\">\n"
        ));

        if let Some(status) = status {
            let stale_class = match status {
                LiveStatus::Cached { stale: true, .. } => " stale",
                _ => "",
            };
            html.push_str(&format!(
                "  <div class=\"status{stale_class}\">{}</div>\n",
                escape(&status.banner())
            ));
        }

        if self.days.is_empty() {
            html.push_str("  <p class=\"empty\">No changelog entries yet</p>\n");
        } else {
            for day in &self.days {
                html.push_str(&format!(
                    "  <article class=\"day\" data-date=\"{}\">\n    <h2>{}</h2>\n    <ul>\n",
                    day.date,
                    escape(&day.display_date)
                ));
                for entry in &day.changes {
                    html.push_str(&format!(
                        "      <li class=\"change {kind}\"><span class=\"tag\">{kind}</span> \
                         {desc} <span class=\"source\">{src}</span></li>\n",
                        kind = entry.kind.label(),
                        desc = escape(&entry.description),
                        src = entry.source.label(),
                    ));
                }
                html.push_str("    </ul>\n  </article>\n");
            }
        }

        html.push_str("</section>\n");
        html
    }
}

fn escape(s: &str) -> String {
    html_escape::encode_text(s).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::model::{ChangeEntry, ChangeKind, ChangeSource};

    fn baseline() -> Vec<ChangeDay> {
        vec![ChangeDay {
            date: NaiveDate::from_ymd_opt(2026, 2, 22).unwrap(),
            display_date: "February 22, 2026".into(),
            changes: vec![ChangeEntry {
                kind: ChangeKind::Feat,
                description: "agent workflows <guide>".into(),
                source: ChangeSource::Website,
            }],
        }]
    }

    #[test]
    fn baseline_phase_renders_display_date_verbatim() {
        let view = ChangelogView::new(baseline());
        let html = view.render();
        assert!(html.contains("data-phase=\"baseline\""));
        assert!(html.contains("February 22, 2026"));
        assert!(!html.contains("class=\"status\""));
    }

    #[test]
    fn descriptions_are_html_escaped() {
        let view = ChangelogView::new(baseline());
        let html = view.render();
        assert!(html.contains("agent workflows &lt;guide&gt;"));
    }

    #[test]
    fn empty_baseline_renders_empty_state() {
        let view = ChangelogView::new(vec![]);
        assert!(view.render().contains("No changelog entries yet"));
    }

    #[test]
    fn status_banners_map_by_outcome_kind() {
        assert_eq!(LiveStatus::Live.banner(), "Live data");
        assert_eq!(
            LiveStatus::Cached {
                age_minutes: 12,
                stale: false
            }
            .banner(),
            "Using cached data (12 min old)"
        );
        assert_eq!(LiveStatus::BuildTime.banner(), "Showing build-time data");
    }

    #[test]
    fn cached_status_flags_records_beyond_ttl() {
        let old = Utc::now() - chrono::TimeDelta::minutes(30);
        let outcome = FetchOutcome::StaleCache {
            data: vec![],
            cached_at: old,
        };
        let status = LiveStatus::from_outcome(&outcome, DEFAULT_TTL);
        assert_eq!(
            status,
            LiveStatus::Cached {
                age_minutes: 30,
                stale: true
            }
        );
    }

    #[test]
    fn configured_ttl_drives_the_stale_flag() {
        let old = Utc::now() - chrono::TimeDelta::minutes(30);
        let outcome = FetchOutcome::StaleCache {
            data: vec![],
            cached_at: old,
        };
        let status = LiveStatus::from_outcome(&outcome, Duration::from_secs(45 * 60));
        assert_eq!(
            status,
            LiveStatus::Cached {
                age_minutes: 30,
                stale: false
            }
        );
    }
}
