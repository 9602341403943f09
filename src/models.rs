//! Data models for scraped rankings and the report built from them.
//!
//! This module defines the core data structures used throughout the application:
//! - [`RankedEntry`]: One (rank, language) observation from a single source
//! - [`SourceResult`]: The terminal outcome of extracting one source
//! - [`CombinedRow`]: One row of a side-by-side comparison table
//! - [`ReportModel`]: The renderer-agnostic document handed to an output format
//!
//! The report types serialize with camelCase keys, which is the shape
//! renderers consume (`showLogo`, `columnA`, ...).

use crate::error::ScrapeError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder used when one side of a comparison row has no entry.
pub const NOT_AVAILABLE: &str = "N/A";

/// The external sources rankings are scraped from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceId {
    Pypl,
    Tiobe,
    GeeksForGeeks,
    WithCodeExample,
    Digitalogy,
    LinkedIn,
}

impl SourceId {
    /// Human readable name, used for logging and table column labels.
    pub fn display_name(self) -> &'static str {
        match self {
            SourceId::Pypl => "PYPL",
            SourceId::Tiobe => "TIOBE",
            SourceId::GeeksForGeeks => "GeeksforGeeks",
            SourceId::WithCodeExample => "WithCodeExample",
            SourceId::Digitalogy => "Digitalogy",
            SourceId::LinkedIn => "LinkedIn",
        }
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A single ranked language as reported (or implied) by one source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    /// 1-based rank.
    pub rank: u32,
    /// Language name, trimmed, case as scraped.
    pub label: String,
}

impl RankedEntry {
    pub fn new(rank: u32, label: impl Into<String>) -> Self {
        Self {
            rank,
            label: label.into(),
        }
    }
}

/// Outcome of one source's extraction.
#[derive(Debug)]
pub enum SourceResult {
    Ok {
        source: SourceId,
        entries: Vec<RankedEntry>,
    },
    Failed {
        source: SourceId,
        cause: ScrapeError,
    },
}

impl SourceResult {
    pub fn source(&self) -> SourceId {
        match self {
            SourceResult::Ok { source, .. } | SourceResult::Failed { source, .. } => *source,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, SourceResult::Ok { .. })
    }

    /// Extracted entries; a failed source contributes nothing.
    pub fn entries(&self) -> &[RankedEntry] {
        match self {
            SourceResult::Ok { entries, .. } => entries,
            SourceResult::Failed { .. } => &[],
        }
    }
}

/// One row of a two-source comparison table, aligned by position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedRow {
    pub position: u32,
    pub column_a: String,
    pub column_b: String,
}

/// Header block of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportHeader {
    pub title: String,
    pub subtitle: String,
    pub show_logo: bool,
    pub show_date: bool,
}

/// A titled comparison table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSection {
    pub heading: String,
    /// Column labels: position, left source, right source.
    pub columns: [String; 3],
    pub rows: Vec<CombinedRow>,
}

/// The complete document model handed to a renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportModel {
    pub header: ReportHeader,
    pub sections: Vec<ReportSection>,
}
