// src/merge.rs
//! Deterministic reconciliation of the baseline dataset with a freshly
//! fetched one. Pure and total: never throws, never mutates its inputs,
//! and `merge(merge(a, b), b) == merge(a, b)`.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::model::ChangeDay;

/// Combine `baseline` (always present, possibly stale) with `incoming`
/// (possibly absent) into one dataset, losing nothing from either side.
///
/// - `incoming = None` (the fallback outcome): baseline returned unchanged.
/// - Days are unioned by `date`; a date on both sides merges entry lists by
///   structural identity, baseline order first, unseen incoming entries
///   appended. The incoming `display_date` wins when present — the live
///   payload is the authoritative source once a merge happens, and this only
///   affects the post-resolve render, never the first paint.
/// - Result is sorted by date descending (most recent first).
///
/// Callers uphold the date-uniqueness invariant within each input.
pub fn merge_changelogs(baseline: &[ChangeDay], incoming: Option<&[ChangeDay]>) -> Vec<ChangeDay> {
    let Some(incoming) = incoming else {
        return baseline.to_vec();
    };

    let mut by_date: BTreeMap<NaiveDate, ChangeDay> = BTreeMap::new();
    for day in baseline {
        by_date.insert(day.date, day.clone());
    }

    for day in incoming {
        match by_date.entry(day.date) {
            Entry::Vacant(slot) => {
                slot.insert(day.clone());
            }
            Entry::Occupied(mut slot) => {
                let merged = slot.get_mut();
                if !day.display_date.is_empty() {
                    merged.display_date = day.display_date.clone();
                }
                for entry in &day.changes {
                    if !merged.changes.contains(entry) {
                        merged.changes.push(entry.clone());
                    }
                }
            }
        }
    }

    by_date.into_values().rev().collect()
}
