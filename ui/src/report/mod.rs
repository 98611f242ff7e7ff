//! Offline artefacts built from a validation payload: the standalone HTML
//! dashboard, the plain-text report and the raw JSON, plus the panel that
//! hands them to the user.

mod export;
pub use export::{ExportError, ExportPanel};

pub mod html;
pub use html::standalone_html;

pub mod text;
pub use text::text_report;

use crate::core::payload::ValidationPayload;

/// Pretty-printed payload, keys in their original order.
pub fn json_export(payload: &ValidationPayload) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(payload)
}
