//! Ranking extraction from external sources.
//!
//! Every source is described by a [`SourceDescriptor`] and read by the same
//! [`extract`] routine:
//!
//! 1. **Navigation**: load the source URL in a browser session
//! 2. **Readiness**: wait for the selector (or body) the source needs
//! 3. **Parsing**: apply the source's [`Strategy`] to the loaded content
//! 4. **Policy**: optionally reverse and renumber, then keep the top 10
//!
//! # Supported Sources
//!
//! | Source | Strategy | Top 10 only | Notes |
//! |--------|----------|-------------|-------|
//! | PYPL | table | yes | |
//! | TIOBE | table | yes | rows need at least 6 cells |
//! | GeeksforGeeks | numbered list | yes | |
//! | WithCodeExample | numbered list | yes | listed bottom-to-top, reversed |
//! | Digitalogy | numbered list | no | easiest languages |
//! | LinkedIn | numbered list | no | hardest languages |
//!
//! A markup change on one site only ever touches that site's descriptor or
//! strategy; the orchestrator and the merger never look inside.

pub mod pattern;
pub mod sources;
pub mod table;

use crate::browser::{Readiness, Session};
use crate::error::ScrapeError;
use crate::models::{RankedEntry, SourceId};
use crate::utils::truncate_for_log;
use std::time::Duration;
use table::TableLayout;
use tokio::time::timeout;
use tracing::{debug, info, instrument, warn};

/// Highest rank kept for sources under the top-N policy.
pub const TOP_N: u32 = 10;

/// How entries are pulled out of a loaded page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Read rank and label from fixed columns of a table in the page HTML.
    Table(TableLayout),
    /// Match `"<n>. <Language>"` in the rendered body text.
    NumberedList,
}

/// Everything needed to scrape one source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceDescriptor {
    pub id: SourceId,
    pub url: &'static str,
    pub readiness: Readiness,
    pub strategy: Strategy,
    /// Keep only entries ranked `<= TOP_N`.
    pub top_n: bool,
    /// The page lists its ranking bottom-to-top.
    pub reverse: bool,
}

/// Scrape one source through an already opened session.
///
/// Navigation and the readiness wait are each bounded by `limit`. The
/// session is left open; closing it is the caller's job.
#[instrument(level = "info", skip_all, fields(source = %source.id, url = source.url))]
pub async fn extract(
    session: &mut dyn Session,
    source: &SourceDescriptor,
    limit: Duration,
) -> Result<Vec<RankedEntry>, ScrapeError> {
    match timeout(limit, session.navigate(source.url)).await {
        Ok(result) => result?,
        Err(_) => {
            return Err(ScrapeError::NavigationTimeout {
                url: source.url.to_string(),
                timeout: limit,
            });
        }
    }
    debug!("Navigation finished");

    match timeout(limit, session.wait_ready(source.readiness)).await {
        Ok(result) => result?,
        Err(_) => {
            return Err(ScrapeError::NotReady {
                readiness: source.readiness.to_string(),
                timeout: limit,
            });
        }
    }

    let raw = match source.strategy {
        Strategy::Table(layout) => {
            let html = session.html().await?;
            let entries = table::parse_table(&html, &layout);
            if entries.is_empty() {
                warn!(html_preview = %truncate_for_log(&html, 300), "Ranking table had no usable rows");
            }
            entries
        }
        Strategy::NumberedList => {
            let text = session.body_text().await?;
            let entries = pattern::parse_numbered_list(&text);
            if entries.is_empty() {
                warn!(text_preview = %truncate_for_log(&text, 300), "No numbered list items in page text");
            }
            entries
        }
    };

    let entries = apply_policy(raw, source);
    if entries.is_empty() {
        return Err(ScrapeError::NoEntries {
            url: source.url.to_string(),
        });
    }

    info!(count = entries.len(), "Extracted ranking");
    Ok(entries)
}

/// Apply the source's ordering and filtering rules to freshly parsed entries.
pub fn apply_policy(entries: Vec<RankedEntry>, source: &SourceDescriptor) -> Vec<RankedEntry> {
    let entries = if source.reverse {
        reverse_and_renumber(entries)
    } else {
        entries
    };

    if source.top_n {
        entries.into_iter().filter(|e| e.rank <= TOP_N).collect()
    } else {
        entries
    }
}

/// Reverse `entries` and assign contiguous ranks starting at 1.
pub fn reverse_and_renumber(entries: Vec<RankedEntry>) -> Vec<RankedEntry> {
    entries
        .into_iter()
        .rev()
        .zip(1u32..)
        .map(|(entry, rank)| RankedEntry { rank, ..entry })
        .collect()
}
