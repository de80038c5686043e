//! Report rendering.

use std::fmt::Write as _;

use patterndex_types::ValidationReport;

/// How findings are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// `path: rule: reason` per line.
    #[default]
    Text,
    /// One compact JSON object per line.
    Json,
}

/// Render `report` in `format`; an empty report renders as an empty string.
#[must_use]
pub fn render_report(report: &ValidationReport, format: ReportFormat) -> String {
    let mut out = String::new();
    for finding in report.iter() {
        match format {
            ReportFormat::Text => {
                let _ = writeln!(out, "{finding}");
            }
            ReportFormat::Json => match serde_json::to_string(finding) {
                Ok(line) => {
                    out.push_str(&line);
                    out.push('\n');
                }
                Err(error) => {
                    tracing::error!(error = %error, "failed to serialize finding");
                }
            },
        }
    }
    out
}
