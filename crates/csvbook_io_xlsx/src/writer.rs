//! Region painter: lays one document out as title/header/data/footer lines.

use csvbook_io_csv::SpecTabularDocument;
use tracing::{debug, trace};

use crate::canvas::SheetCanvas;
use crate::spec::{EnumRegion, SpecCursor, SpecLayoutConfig, SpecRegionStyle, XlsxComposeError};

/// Stateless painter bound to one layout definition.
///
/// Region styles are resolved once on construction.
#[derive(Debug, Clone)]
pub struct SheetWriter<'a> {
    config: &'a SpecLayoutConfig,
    style_title: SpecRegionStyle,
    style_header: SpecRegionStyle,
    style_data: SpecRegionStyle,
    style_footer: SpecRegionStyle,
}

impl<'a> SheetWriter<'a> {
    pub fn new(config: &'a SpecLayoutConfig) -> Self {
        Self {
            config,
            style_title: config.style_for(EnumRegion::Title),
            style_header: config.style_for(EnumRegion::Header),
            style_data: config.style_for(EnumRegion::Data),
            style_footer: config.style_for(EnumRegion::Footer),
        }
    }

    /// Paint `document` below `cursor` and return the cursor at its last row.
    ///
    /// Every painted line first moves the cursor down one row, so the row the
    /// cursor starts on is never written. Absent or empty header/footer and
    /// empty data rows are skipped without moving the cursor.
    pub fn paint_document<S>(
        &self,
        sheet: &mut S,
        document: &SpecTabularDocument,
        title: &str,
        cursor: SpecCursor,
    ) -> Result<SpecCursor, XlsxComposeError>
    where
        S: SheetCanvas + ?Sized,
    {
        let mut cursor = cursor;

        if self.config.if_has_title {
            cursor = cursor.next_row();
            paint_line(sheet, cursor.row, cursor.col, [title], &self.style_title)?;
        }

        if let Some(l_header) = document.header()
            && !l_header.is_empty()
        {
            cursor = cursor.next_row();
            paint_line(sheet, cursor.row, cursor.col, l_header, &self.style_header)?;
        }

        let mut cnt_rows_skipped = 0usize;
        for l_row in document.data_rows() {
            if l_row.is_empty() {
                cnt_rows_skipped += 1;
                continue;
            }
            cursor = cursor.next_row();
            paint_line(sheet, cursor.row, cursor.col, l_row, &self.style_data)?;
        }

        if let Some(l_footer) = document.footer()
            && !l_footer.is_empty()
        {
            cursor = cursor.next_row();
            paint_line(sheet, cursor.row, cursor.col, l_footer, &self.style_footer)?;
        }

        debug!(
            file_name = document.file_name(),
            row_last = cursor.row,
            cnt_rows_skipped,
            "painted document"
        );
        Ok(cursor)
    }
}

/// Paint one line of `cells` on `row`, the first cell at `col_start + 1`.
///
/// Values are written verbatim as text.
pub fn paint_line<S, I, T>(
    sheet: &mut S,
    row: usize,
    col_start: usize,
    cells: I,
    style: &SpecRegionStyle,
) -> Result<(), XlsxComposeError>
where
    S: SheetCanvas + ?Sized,
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    let mut col = col_start;
    for cell in cells {
        col += 1;
        sheet.write_text(row, col, cell.as_ref(), style)?;
    }
    trace!(row, cnt_cells = col - col_start, "painted line");
    Ok(())
}
