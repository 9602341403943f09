//! Positional merge of two rankings into one comparison table.
//!
//! Rows are aligned strictly by index: row `i` pairs the `i`-th entry of each
//! side, whatever their labels. Two sources ranking the same language at
//! different positions stay on different rows.

use crate::models::{CombinedRow, NOT_AVAILABLE, RankedEntry, SourceId, SourceResult};
use itertools::{EitherOrBoth, Itertools};
use tracing::debug;

/// The three comparisons in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Popularity,
    /// GeeksforGeeks on the left, WithCodeExample on the right. Older
    /// editions of the report printed these two the other way round.
    Compensation,
    LearningDifficulty,
}

impl Axis {
    /// Sources shown in the left and right columns.
    pub fn sources(self) -> (SourceId, SourceId) {
        match self {
            Axis::Popularity => (SourceId::Pypl, SourceId::Tiobe),
            Axis::Compensation => (SourceId::GeeksForGeeks, SourceId::WithCodeExample),
            Axis::LearningDifficulty => (SourceId::Digitalogy, SourceId::LinkedIn),
        }
    }
}

/// Merged tables for every axis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparisonTables {
    pub popularity: Vec<CombinedRow>,
    pub compensation: Vec<CombinedRow>,
    pub learning_difficulty: Vec<CombinedRow>,
}

/// Align `left` and `right` by index, padding the shorter side with `"N/A"`.
pub fn merge(left: &[RankedEntry], right: &[RankedEntry]) -> Vec<CombinedRow> {
    left.iter()
        .zip_longest(right.iter())
        .zip(1u32..)
        .map(|(pair, position)| {
            let (a, b) = match pair {
                EitherOrBoth::Both(a, b) => (a.label.clone(), b.label.clone()),
                EitherOrBoth::Left(a) => (a.label.clone(), NOT_AVAILABLE.to_string()),
                EitherOrBoth::Right(b) => (NOT_AVAILABLE.to_string(), b.label.clone()),
            };
            CombinedRow {
                position,
                column_a: a,
                column_b: b,
            }
        })
        .collect()
}

/// Merge the results of a run into the three comparison tables.
///
/// Failed or missing sources count as empty rankings, so an axis whose
/// sources all failed yields an empty table.
pub fn tabulate(results: &[SourceResult]) -> ComparisonTables {
    let table_for = |axis: Axis| {
        let (left, right) = axis.sources();
        let rows = merge(entries_of(results, left), entries_of(results, right));
        debug!(?axis, rows = rows.len(), "Merged comparison table");
        rows
    };

    ComparisonTables {
        popularity: table_for(Axis::Popularity),
        compensation: table_for(Axis::Compensation),
        learning_difficulty: table_for(Axis::LearningDifficulty),
    }
}

fn entries_of(results: &[SourceResult], id: SourceId) -> &[RankedEntry] {
    results
        .iter()
        .find(|r| r.source() == id)
        .map(SourceResult::entries)
        .unwrap_or(&[])
}
