//! Structured-table extraction.
//!
//! Reads rank and language from fixed cell offsets of each body row of a
//! ranking table. Rows that are too short, or whose rank cell is not a
//! positive integer (ad rows, spacer rows), are skipped.

use crate::models::RankedEntry;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

/// Where the ranking lives inside a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLayout {
    /// Selector for the body rows of the ranking table.
    pub rows: &'static str,
    /// Zero-based cell offset of the rank.
    pub rank_col: usize,
    /// Zero-based cell offset of the language name.
    pub label_col: usize,
    /// Rows with fewer cells than this are ignored.
    pub min_cols: usize,
}

/// Extract ranked entries from `html` according to `layout`.
pub fn parse_table(html: &str, layout: &TableLayout) -> Vec<RankedEntry> {
    let document = Html::parse_document(html);
    let (Ok(row_selector), Ok(cell_selector)) = (Selector::parse(layout.rows), Selector::parse("td"))
    else {
        debug!(selector = layout.rows, "Invalid row selector");
        return Vec::new();
    };

    let mut entries = Vec::new();
    for row in document.select(&row_selector) {
        let cells: Vec<ElementRef> = row.select(&cell_selector).collect();
        if cells.len() < layout.min_cols {
            continue;
        }
        let (Some(rank_cell), Some(label_cell)) =
            (cells.get(layout.rank_col), cells.get(layout.label_col))
        else {
            continue;
        };
        let rank = match cell_text(rank_cell).parse::<u32>() {
            Ok(rank) if rank > 0 => rank,
            _ => continue,
        };
        let label = cell_text(label_cell);
        if label.is_empty() {
            continue;
        }
        entries.push(RankedEntry { rank, label });
    }
    entries
}

fn cell_text(cell: &ElementRef) -> String {
    cell.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
