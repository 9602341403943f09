//! JSON rendering of the report model.
//!
//! The document is the model itself, serialized with camelCase keys:
//!
//! ```text
//! {"header": {"title", "subtitle", "showLogo", "showDate"},
//!  "sections": [{"heading", "columns", "rows": [{"position", "columnA", "columnB"}]}]}
//! ```

use super::ReportRenderer;
use crate::error::RenderError;
use crate::models::ReportModel;

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl ReportRenderer for JsonRenderer {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn render(&self, report: &ReportModel) -> Result<Vec<u8>, RenderError> {
        let mut bytes = serde_json::to_vec_pretty(report)?;
        bytes.push(b'\n');
        Ok(bytes)
    }
}
