//! Workbook composition: documents to sheets, then a single save.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use csvbook_io_csv::SpecTabularDocument;
use rust_xlsxwriter::{Workbook, XlsxError};
use tracing::{debug, info, warn};

use crate::canvas::WorkbookCanvas;
use crate::conf::C_NAME_SHEET_SINGLE;
use crate::report::{ReportCompose, SpecSheetSummary};
use crate::spec::{SpecCursor, SpecLayoutConfig, XlsxComposeError};
use crate::util::{derive_title, derive_unique_sheet_name, sanitize_sheet_name};
use crate::writer::SheetWriter;

/// Orchestrates documents into one workbook according to a layout definition.
#[derive(Debug, Clone)]
pub struct WorkbookComposer<'a> {
    config: &'a SpecLayoutConfig,
    writer: SheetWriter<'a>,
}

impl<'a> WorkbookComposer<'a> {
    pub fn new(config: &'a SpecLayoutConfig) -> Self {
        Self {
            config,
            writer: SheetWriter::new(config),
        }
    }

    /// Compose `documents` and save the workbook to `path_file_out`.
    ///
    /// An empty document list is a no-op: no workbook is built and no file is
    /// created. The file is only written once the whole workbook has been
    /// assembled, so a failed run never leaves a partial output.
    pub fn compose<P: AsRef<Path>>(
        &self,
        documents: &[SpecTabularDocument],
        path_file_out: P,
    ) -> Result<ReportCompose, XlsxComposeError> {
        let path_file_out = path_file_out.as_ref();
        if documents.is_empty() {
            info!(path = %path_file_out.display(), "no documents; workbook not written");
            return Ok(ReportCompose::default());
        }

        let mut workbook = Workbook::new();
        let mut report = self.compose_into(&mut workbook, documents)?;

        // Assemble in memory first; rejected workbooks leave no file behind.
        let map_persist_err = |err: XlsxError| XlsxComposeError::Persistence {
            path: path_file_out.to_path_buf(),
            source: err,
        };
        let v_bytes = workbook.save_to_buffer().map_err(map_persist_err)?;
        fs::write(path_file_out, &v_bytes)
            .map_err(|err| map_persist_err(XlsxError::IoError(err)))?;
        report.path_file_out = Some(path_file_out.to_path_buf());

        info!(
            path = %path_file_out.display(),
            cnt_documents = report.cnt_documents,
            cnt_sheets = report.sheets.len(),
            "workbook saved"
        );
        Ok(report)
    }

    /// Paint `documents` into `workbook` without saving.
    pub fn compose_into<W>(
        &self,
        workbook: &mut W,
        documents: &[SpecTabularDocument],
    ) -> Result<ReportCompose, XlsxComposeError>
    where
        W: WorkbookCanvas + ?Sized,
    {
        let mut report = ReportCompose {
            cnt_documents: documents.len(),
            ..ReportCompose::default()
        };
        if documents.is_empty() {
            return Ok(report);
        }

        if self.config.if_multiple_sheets {
            self.compose_sheet_per_document(workbook, documents, &mut report)?;
        } else {
            self.compose_single_sheet(workbook, documents, &mut report)?;
        }
        Ok(report)
    }

    fn compose_single_sheet<W>(
        &self,
        workbook: &mut W,
        documents: &[SpecTabularDocument],
        report: &mut ReportCompose,
    ) -> Result<(), XlsxComposeError>
    where
        W: WorkbookCanvas + ?Sized,
    {
        let sheet = workbook.add_sheet(C_NAME_SHEET_SINGLE)?;
        let mut cursor = self.config.cursor_origin();

        for document in documents {
            let title = derive_title(document, self.config);
            let cursor_before = cursor;
            cursor = self
                .writer
                .paint_document(sheet, document, &title, cursor)?;
            check_painted(document, cursor_before, cursor, report);

            // Blank separator row after every document.
            cursor = cursor.next_row();
        }

        debug!(
            sheet_name = C_NAME_SHEET_SINGLE,
            row_last = cursor.row,
            "single sheet composed"
        );
        report.sheets.push(SpecSheetSummary {
            sheet_name: C_NAME_SHEET_SINGLE.to_string(),
            cnt_documents: documents.len(),
            row_last: cursor.row,
        });
        Ok(())
    }

    fn compose_sheet_per_document<W>(
        &self,
        workbook: &mut W,
        documents: &[SpecTabularDocument],
        report: &mut ReportCompose,
    ) -> Result<(), XlsxComposeError>
    where
        W: WorkbookCanvas + ?Sized,
    {
        let mut set_sheet_names_existing = BTreeSet::new();

        for document in documents {
            let title = derive_title(document, self.config);
            // Titles are used verbatim unless sanitizing is enabled; the
            // writer rejects over-long or illegal names.
            let sheet_name = if self.config.if_sanitize_sheet_names {
                derive_unique_sheet_name(
                    &sanitize_sheet_name(&title, "_"),
                    &mut set_sheet_names_existing,
                )
            } else {
                title.clone()
            };

            let sheet = workbook.add_sheet(&sheet_name)?;
            let cursor_origin = self.config.cursor_origin();
            let cursor = self
                .writer
                .paint_document(sheet, document, &title, cursor_origin)?;
            check_painted(document, cursor_origin, cursor, report);

            debug!(sheet_name = %sheet_name, row_last = cursor.row, "sheet composed");
            report.sheets.push(SpecSheetSummary {
                sheet_name,
                cnt_documents: 1,
                row_last: cursor.row,
            });
        }
        Ok(())
    }
}

/// Compose `documents` with `config` and save to `path_file_out`.
pub fn compose<P: AsRef<Path>>(
    documents: &[SpecTabularDocument],
    config: &SpecLayoutConfig,
    path_file_out: P,
) -> Result<ReportCompose, XlsxComposeError> {
    WorkbookComposer::new(config).compose(documents, path_file_out)
}

fn check_painted(
    document: &SpecTabularDocument,
    cursor_before: SpecCursor,
    cursor_after: SpecCursor,
    report: &mut ReportCompose,
) {
    if cursor_after.row == cursor_before.row {
        warn!(file_name = document.file_name(), "document painted no rows");
        report.warn(format!("{}: no rows painted", document.file_name()));
    }
}
