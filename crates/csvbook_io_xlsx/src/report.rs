//! Compose report models.

use std::fmt;
use std::path::PathBuf;

/// One populated sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecSheetSummary {
    /// Name the sheet was created with.
    pub sheet_name: String,
    /// Documents painted on this sheet.
    pub cnt_documents: usize,
    /// Final row cursor (1-based), including trailing separators.
    pub row_last: usize,
}

/// Outcome of one compose run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReportCompose {
    /// Written workbook; `None` when nothing was written.
    pub path_file_out: Option<PathBuf>,
    /// Documents handed to the composer.
    pub cnt_documents: usize,
    /// Sheets in creation order.
    pub sheets: Vec<SpecSheetSummary>,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

impl ReportCompose {
    /// Add a warning message.
    pub fn warn(&mut self, msg: impl AsRef<str>) {
        self.warnings.push(msg.as_ref().to_string());
    }

    /// Whether a workbook file was written.
    pub fn is_written(&self) -> bool {
        self.path_file_out.is_some()
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        let c_path = self
            .path_file_out
            .as_ref()
            .map_or_else(|| "-".to_string(), |path| path.display().to_string());
        format!(
            "{prefix} documents={} sheets={} warnings={} out={c_path}",
            self.cnt_documents,
            self.sheets.len(),
            self.warnings.len()
        )
    }
}

impl fmt::Display for ReportCompose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[COMPOSE]"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_compose_format_lists_counts_and_path() {
        let mut report = ReportCompose {
            path_file_out: Some(PathBuf::from("out/book.xlsx")),
            cnt_documents: 2,
            sheets: vec![SpecSheetSummary {
                sheet_name: "Data".to_string(),
                cnt_documents: 2,
                row_last: 9,
            }],
            warnings: vec![],
        };
        report.warn("w");

        assert_eq!(
            report.to_string(),
            "[COMPOSE] documents=2 sheets=1 warnings=1 out=out/book.xlsx"
        );
        assert!(report.is_written());
        assert_eq!(
            ReportCompose::default().format("[X]"),
            "[X] documents=0 sheets=0 warnings=0 out=-"
        );
    }
}
