//! Workbook/sheet capabilities the painter writes through.
//!
//! `rust_xlsxwriter` types implement them for real output; the recording
//! types keep painted cells in memory for layout inspection.

use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook, Worksheet};

use crate::spec::{EnumFillColor, SpecRegionStyle, XlsxComposeError};
use crate::util::{cast_col_num, cast_row_num};

/// A sheet that accepts styled text cells at 1-based positions.
pub trait SheetCanvas {
    fn write_text(
        &mut self,
        row: usize,
        col: usize,
        text: &str,
        style: &SpecRegionStyle,
    ) -> Result<(), XlsxComposeError>;
}

/// A workbook that can append named sheets.
pub trait WorkbookCanvas {
    type Sheet: SheetCanvas;

    /// Append a sheet named `name` and return it for painting.
    fn add_sheet(&mut self, name: &str) -> Result<&mut Self::Sheet, XlsxComposeError>;
}

////////////////////////////////////////////////////////////////////////////////
// #region RustXlsxWriter

impl SheetCanvas for Worksheet {
    fn write_text(
        &mut self,
        row: usize,
        col: usize,
        text: &str,
        style: &SpecRegionStyle,
    ) -> Result<(), XlsxComposeError> {
        let format = derive_rust_xlsx_format(style);
        self.write_string_with_format(cast_row_num(row)?, cast_col_num(col)?, text, &format)
            .map_err(|err| XlsxComposeError::CellRejected {
                row,
                col,
                source: err,
            })?;
        Ok(())
    }
}

impl WorkbookCanvas for Workbook {
    type Sheet = Worksheet;

    fn add_sheet(&mut self, name: &str) -> Result<&mut Worksheet, XlsxComposeError> {
        let worksheet = self.add_worksheet();
        worksheet
            .set_name(name)
            .map_err(|err| XlsxComposeError::SheetRejected {
                name: name.to_string(),
                source: err,
            })?;
        Ok(worksheet)
    }
}

/// Translate a region style into a writer format.
pub fn derive_rust_xlsx_format(style: &SpecRegionStyle) -> Format {
    let mut format = Format::new();

    if let Some(val) = &style.font_name {
        format = format.set_font_name(val.as_str());
    }
    if let Some(val) = style.font_size {
        format = format.set_font_size(val);
    }
    if style.if_bold {
        format = format.set_bold();
    }
    if let EnumFillColor::Rgb(val) = style.fill {
        format = format.set_background_color(Color::RGB(val));
    }
    if style.if_border {
        format = format.set_border(FormatBorder::Thin);
    }

    format
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Recording

/// One painted cell captured by [`RecordingSheet`].
#[derive(Debug, Clone, PartialEq)]
pub struct SpecRecordedCell {
    pub row: usize,
    pub col: usize,
    pub text: String,
    pub style: SpecRegionStyle,
}

/// In-memory sheet keeping cells in paint order.
#[derive(Debug, Clone, Default)]
pub struct RecordingSheet {
    pub name: String,
    pub cells: Vec<SpecRecordedCell>,
}

impl RecordingSheet {
    /// Last cell painted at (`row`, `col`).
    pub fn cell(&self, row: usize, col: usize) -> Option<&SpecRecordedCell> {
        self.cells
            .iter()
            .rev()
            .find(|cell| cell.row == row && cell.col == col)
    }

    /// Texts of one row ordered by column.
    pub fn row_texts(&self, row: usize) -> Vec<&str> {
        let mut l_cells: Vec<&SpecRecordedCell> =
            self.cells.iter().filter(|cell| cell.row == row).collect();
        l_cells.sort_by_key(|cell| cell.col);
        l_cells.iter().map(|cell| cell.text.as_str()).collect()
    }

    /// Highest painted row, if any.
    pub fn row_max(&self) -> Option<usize> {
        self.cells.iter().map(|cell| cell.row).max()
    }
}

impl SheetCanvas for RecordingSheet {
    fn write_text(
        &mut self,
        row: usize,
        col: usize,
        text: &str,
        style: &SpecRegionStyle,
    ) -> Result<(), XlsxComposeError> {
        cast_row_num(row)?;
        cast_col_num(col)?;
        self.cells.push(SpecRecordedCell {
            row,
            col,
            text: text.to_string(),
            style: style.clone(),
        });
        Ok(())
    }
}

/// In-memory workbook of [`RecordingSheet`]s.
#[derive(Debug, Clone, Default)]
pub struct RecordingWorkbook {
    pub sheets: Vec<RecordingSheet>,
}

impl WorkbookCanvas for RecordingWorkbook {
    type Sheet = RecordingSheet;

    fn add_sheet(&mut self, name: &str) -> Result<&mut RecordingSheet, XlsxComposeError> {
        let n_idx = self.sheets.len();
        self.sheets.push(RecordingSheet {
            name: name.to_string(),
            cells: Vec::new(),
        });
        Ok(&mut self.sheets[n_idx])
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
