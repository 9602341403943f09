//! Assembly of the renderer-agnostic report model.
//!
//! Pure transformation: the merged tables plus header options in, a
//! [`ReportModel`] out. Missing header fields fall back to defaults.

use crate::merge::{Axis, ComparisonTables};
use crate::models::{CombinedRow, ReportHeader, ReportModel, ReportSection};
use tracing::debug;

pub const DEFAULT_TITLE: &str = "Programming Languages Report";
pub const DEFAULT_SUBTITLE: &str = "Popularity, Salaries and Learning Difficulty";

/// Header settings as supplied by the caller; `None` or blank means default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderOptions {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub show_logo: Option<bool>,
    pub show_date: Option<bool>,
}

/// Build the report. Sections always come in the order popularity,
/// compensation, learning difficulty.
pub fn assemble(options: &HeaderOptions, tables: ComparisonTables) -> ReportModel {
    let header = ReportHeader {
        title: text_or_default("title", options.title.as_deref(), DEFAULT_TITLE),
        subtitle: text_or_default("subtitle", options.subtitle.as_deref(), DEFAULT_SUBTITLE),
        show_logo: options.show_logo.unwrap_or(true),
        show_date: options.show_date.unwrap_or(true),
    };

    let ComparisonTables {
        popularity,
        compensation,
        learning_difficulty,
    } = tables;

    ReportModel {
        header,
        sections: vec![
            section(Axis::Popularity, popularity),
            section(Axis::Compensation, compensation),
            section(Axis::LearningDifficulty, learning_difficulty),
        ],
    }
}

fn section(axis: Axis, rows: Vec<CombinedRow>) -> ReportSection {
    let heading = match axis {
        Axis::Popularity => "Popularity Ranking",
        Axis::Compensation => "Highest Paying Ranking",
        Axis::LearningDifficulty => "Learning Difficulty Ranking",
    };
    let (left, right) = axis.sources();
    ReportSection {
        heading: heading.to_string(),
        columns: [
            "Position".to_string(),
            left.display_name().to_string(),
            right.display_name().to_string(),
        ],
        rows,
    }
}

fn text_or_default(field: &str, value: Option<&str>, default: &str) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => {
            debug!(field, default, "Header field missing; using default");
            default.to_string()
        }
    }
}
