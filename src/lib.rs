// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod api;
pub mod baseline;
pub mod cache;
pub mod config;
pub mod fetch;
pub mod merge;
pub mod metrics;
pub mod model;
pub mod render;
pub mod telemetry;

// ---- Re-exports for stable public API ----
// The functions other code may depend on, plus the types they exchange.
pub use crate::api::{create_router, AppState};
pub use crate::cache::{CacheRecord, FetchCache, DEFAULT_TTL, TOOLKIT_CACHE_KEY};
pub use crate::fetch::{ChangelogSource, FetchOrchestrator, FetchOutcome, HttpChangelogSource};
pub use crate::merge::merge_changelogs;
pub use crate::model::{ChangeDay, ChangeEntry, ChangeKind, ChangeSource};
pub use crate::render::{ChangelogView, LiveStatus};
pub use crate::telemetry::track_outcome;
