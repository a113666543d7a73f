// src/model.rs
//! Shared changelog data shapes.
//!
//! Both the build-time baseline and the live toolkit fetch must conform to
//! these types. `ChangeDay.date` is the identity key for a day; the embedded
//! `display_date` is a pre-rendered human string so the baseline can be
//! painted without any locale work.

use chrono::{Locale, NaiveDate};
use serde::{Deserialize, Serialize};

/// Conventional-commit style category. Used purely for display grouping;
/// carries no behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Feat,
    Fix,
    Docs,
    Chore,
    Refactor,
    Perf,
    Test,
    Style,
    Ci,
}

impl ChangeKind {
    pub fn label(self) -> &'static str {
        match self {
            ChangeKind::Feat => "feat",
            ChangeKind::Fix => "fix",
            ChangeKind::Docs => "docs",
            ChangeKind::Chore => "chore",
            ChangeKind::Refactor => "refactor",
            ChangeKind::Perf => "perf",
            ChangeKind::Test => "test",
            ChangeKind::Style => "style",
            ChangeKind::Ci => "ci",
        }
    }
}

/// Where an entry came from. The live endpoint only ever supplies `toolkit`;
/// the baseline may carry both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeSource {
    Toolkit,
    Website,
}

impl ChangeSource {
    pub fn label(self) -> &'static str {
        match self {
            ChangeSource::Toolkit => "toolkit",
            ChangeSource::Website => "website",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChangeEntry {
    #[serde(rename = "type")]
    pub kind: ChangeKind,
    pub description: String,
    pub source: ChangeSource,
}

/// One day of changes. `date` values are unique within a dataset; entry
/// order within `changes` is preserved on round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeDay {
    pub date: NaiveDate,
    #[serde(rename = "displayDate")]
    pub display_date: String,
    pub changes: Vec<ChangeEntry>,
}

// --- wire shapes for the live endpoint ---
// The toolkit endpoint omits `source`; the fetch path tags every incoming
// entry with a fixed source on conversion.

#[derive(Debug, Clone, Deserialize)]
pub struct WireEntry {
    #[serde(rename = "type")]
    pub kind: ChangeKind,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireDay {
    pub date: NaiveDate,
    #[serde(rename = "displayDate", default)]
    pub display_date: String,
    #[serde(default)]
    pub changes: Vec<WireEntry>,
}

impl WireDay {
    pub fn into_day(self, source: ChangeSource) -> ChangeDay {
        ChangeDay {
            date: self.date,
            display_date: self.display_date,
            changes: self
                .changes
                .into_iter()
                .map(|e| ChangeEntry {
                    kind: e.kind,
                    description: e.description,
                    source,
                })
                .collect(),
        }
    }
}

/// Render a date for the viewer's locale, e.g. "February 22, 2026" for en_US.
///
/// Only the resolved render phase calls this; the baseline phase shows the
/// embedded `display_date` verbatim so server and first client paint match.
pub fn format_display_date(date: NaiveDate, locale: Locale) -> String {
    date.format_localized("%B %-d, %Y", locale).to_string()
}

/// Map a BCP-47 tag ("en-US", "cs-CZ") onto a chrono locale. Unknown tags
/// fall back to en_US rather than erroring.
pub fn locale_from_tag(tag: &str) -> Locale {
    let normalized = tag.trim().replace('-', "_");
    Locale::try_from(normalized.as_str()).unwrap_or(Locale::en_US)
}
