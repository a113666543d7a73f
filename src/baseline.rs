// src/baseline.rs
//! Loader for the build-time (SSR) baseline dataset.
//!
//! The loader that *produces* the baseline is an external concern; this is
//! only the seam that hands its JSON output to the pipeline. The dataset is
//! expected to already satisfy the date-uniqueness invariant — violations
//! are logged, not repaired.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};

use crate::model::ChangeDay;

pub fn load_baseline(path: &Path) -> Result<Vec<ChangeDay>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading baseline from {}", path.display()))?;
    let days: Vec<ChangeDay> = serde_json::from_str(&content)
        .with_context(|| format!("parsing baseline {}", path.display()))?;

    let mut seen = HashSet::new();
    for day in &days {
        if !seen.insert(day.date) {
            tracing::warn!(date = %day.date, "duplicate date in baseline dataset");
        }
    }
    Ok(days)
}
