//! Markdown rendering of the report.
//!
//! Layout: optional logo, title, subtitle, optional date, then one pipe table
//! per section in model order.

use super::ReportRenderer;
use crate::error::RenderError;
use crate::models::{ReportModel, ReportSection};
use chrono::NaiveDate;
use std::fmt::Write;

#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    /// Image referenced when the header shows a logo.
    pub logo_path: String,
    /// Date printed when the header shows a date.
    pub date: NaiveDate,
}

impl MarkdownRenderer {
    pub fn new(logo_path: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            logo_path: logo_path.into(),
            date,
        }
    }
}

impl ReportRenderer for MarkdownRenderer {
    fn extension(&self) -> &'static str {
        "md"
    }

    fn render(&self, report: &ReportModel) -> Result<Vec<u8>, RenderError> {
        let header = &report.header;
        let mut md = String::new();

        if header.show_logo {
            writeln!(md, "![logo]({})\n", self.logo_path)?;
        }
        writeln!(md, "# {}\n", header.title)?;
        writeln!(md, "## {}\n", header.subtitle)?;
        if header.show_date {
            writeln!(md, "_{}_\n", self.date.format("%Y-%m-%d"))?;
        }

        for section in &report.sections {
            write_section(&mut md, section)?;
        }

        Ok(md.into_bytes())
    }
}

fn write_section(md: &mut String, section: &ReportSection) -> std::fmt::Result {
    writeln!(md, "### {}\n", section.heading)?;
    let [position, left, right] = &section.columns;
    writeln!(md, "| {} | {} | {} |", cell(position), cell(left), cell(right))?;
    writeln!(md, "|---:|---|---|")?;
    for row in &section.rows {
        writeln!(
            md,
            "| {} | {} | {} |",
            row.position,
            cell(&row.column_a),
            cell(&row.column_b)
        )?;
    }
    if section.rows.is_empty() {
        writeln!(md, "\n_No data available._")?;
    }
    writeln!(md)
}

fn cell(text: &str) -> String {
    text.replace('|', "\\|")
}
