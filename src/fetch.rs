// src/fetch.rs
//! Fetch orchestration for the live toolkit changelog.
//!
//! `fetch_toolkit_changelog` produces exactly one [`FetchOutcome`] per call
//! and never returns an error: transport failures, non-2xx statuses, and
//! payload-shape mismatches are all absorbed into the outcome variants, so
//! the render path can call it with no error handling of its own.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use metrics::histogram;
use serde::Serialize;

use crate::cache::{CacheRecord, FetchCache, TOOLKIT_CACHE_KEY};
use crate::model::{ChangeDay, ChangeSource, WireDay};

/// A source of changelog days. HTTP in production; tests swap in mocks.
#[async_trait]
pub trait ChangelogSource: Send + Sync {
    async fn fetch_days(&self) -> Result<Vec<ChangeDay>>;
    fn name(&self) -> &'static str;
}

/// GET against the toolkit-hosted changelog JSON, derived from the repo base.
pub struct HttpChangelogSource {
    url: String,
    client: reqwest::Client,
}

impl HttpChangelogSource {
    pub fn new(repo_base: &str) -> Self {
        let url = format!("{}/changelog.json", repo_base.trim_end_matches('/'));
        Self {
            url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ChangelogSource for HttpChangelogSource {
    async fn fetch_days(&self) -> Result<Vec<ChangeDay>> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .context("changelog http get")?;
        let resp = resp.error_for_status().context("changelog http status")?;
        let wire: Vec<WireDay> = resp.json().await.context("changelog json body")?;
        // The wire format omits `source`; the live endpoint only ever
        // supplies toolkit entries.
        Ok(wire
            .into_iter()
            .map(|d| d.into_day(ChangeSource::Toolkit))
            .collect())
    }

    fn name(&self) -> &'static str {
        "toolkit"
    }
}

/// Closed set of results a fetch attempt can produce. Callers must handle
/// all three; there is no error path outside this type.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum FetchOutcome {
    /// Fresh network fetch succeeded; `cached_at` is the write time.
    Success {
        data: Vec<ChangeDay>,
        cached_at: DateTime<Utc>,
    },
    /// Network failed but a previously cached payload exists. `cached_at`
    /// reflects when that payload was originally fetched, not now.
    StaleCache {
        data: Vec<ChangeDay>,
        cached_at: DateTime<Utc>,
    },
    /// Network failed and no cache exists; the caller must fall back to its
    /// own baseline.
    Fallback { error: String },
}

impl FetchOutcome {
    /// Stable discriminant, used for metric labels and banner selection.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchOutcome::Success { .. } => "success",
            FetchOutcome::StaleCache { .. } => "stale-cache",
            FetchOutcome::Fallback { .. } => "fallback",
        }
    }

    /// The fetched dataset, absent for `Fallback`.
    pub fn data(&self) -> Option<&[ChangeDay]> {
        match self {
            FetchOutcome::Success { data, .. } | FetchOutcome::StaleCache { data, .. } => {
                Some(data)
            }
            FetchOutcome::Fallback { .. } => None,
        }
    }

    pub fn cached_at(&self) -> Option<DateTime<Utc>> {
        match self {
            FetchOutcome::Success { cached_at, .. }
            | FetchOutcome::StaleCache { cached_at, .. } => Some(*cached_at),
            FetchOutcome::Fallback { .. } => None,
        }
    }
}

/// Performs the network fetch, consults/updates the cache, and classifies
/// the result. The cache is dependency-injected so tests can construct
/// isolated instances.
pub struct FetchOrchestrator {
    source: Box<dyn ChangelogSource>,
    cache: Arc<FetchCache>,
    key: String,
}

impl FetchOrchestrator {
    pub fn new(source: Box<dyn ChangelogSource>, cache: Arc<FetchCache>) -> Self {
        Self::with_key(source, cache, TOOLKIT_CACHE_KEY)
    }

    pub fn with_key(
        source: Box<dyn ChangelogSource>,
        cache: Arc<FetchCache>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            source,
            cache,
            key: key.into(),
        }
    }

    /// One fetch attempt, one outcome. The network is attempted regardless
    /// of cache freshness; the cache is the fallback, not a substitute for
    /// a fresh fetch. `force_refresh` marks caller-driven manual refreshes
    /// (callers serialize those; no dedup of concurrent calls here).
    pub async fn fetch_toolkit_changelog(&self, force_refresh: bool) -> FetchOutcome {
        let started = Instant::now();
        tracing::debug!(
            source = self.source.name(),
            force_refresh,
            "fetching live changelog"
        );

        let outcome = match self.source.fetch_days().await {
            Ok(data) => {
                let now = Utc::now();
                // Success is the only path that writes the cache.
                self.cache.write(&self.key, data.clone(), now);
                FetchOutcome::Success {
                    data,
                    cached_at: now,
                }
            }
            Err(e) => {
                tracing::warn!(
                    error = ?e,
                    source = self.source.name(),
                    "live changelog fetch failed"
                );
                match self.cache.read(&self.key) {
                    Some(CacheRecord { data, cached_at }) => {
                        FetchOutcome::StaleCache { data, cached_at }
                    }
                    None => FetchOutcome::Fallback {
                        error: format!("{e:#}"),
                    },
                }
            }
        };

        histogram!("changelog_fetch_ms").record(started.elapsed().as_secs_f64() * 1_000.0);
        outcome
    }

    /// Drops the cached record for this orchestrator's key; the next fetch
    /// failure will report `Fallback` instead of `StaleCache`.
    pub fn clear_cache(&self) {
        self.cache.clear(&self.key);
    }
}
