//! Renderers that turn a [`ReportModel`] into bytes.
//!
//! # Submodules
//!
//! - [`json`]: The report model as pretty-printed JSON
//! - [`markdown`]: A readable document with one table per section
//!
//! Renderers never touch the filesystem; [`write_report`] does.
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! └── language_rankings.md   (or .json)
//! ```

pub mod json;
pub mod markdown;

use crate::error::RenderError;
use crate::models::ReportModel;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};

/// File stem of the rendered report.
pub const REPORT_STEM: &str = "language_rankings";

/// Converts a report model into a finished document.
pub trait ReportRenderer {
    /// File extension for documents produced by this renderer.
    fn extension(&self) -> &'static str;
    /// Render the whole document.
    fn render(&self, report: &ReportModel) -> Result<Vec<u8>, RenderError>;
}

/// Path the report is written to inside `output_dir`.
pub fn report_path(output_dir: &Path, renderer: &dyn ReportRenderer) -> PathBuf {
    output_dir.join(format!("{REPORT_STEM}.{}", renderer.extension()))
}

/// Write rendered bytes to `path`.
#[instrument(level = "info", skip_all, fields(path = %path.display(), bytes = bytes.len()))]
pub async fn write_report(path: &Path, bytes: &[u8]) -> io::Result<()> {
    fs::write(path, bytes).await?;
    info!("Wrote report");
    Ok(())
}
