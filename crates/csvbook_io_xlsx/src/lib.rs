//! `csvbook_io_xlsx` v1:
//! Workbook composer painting tabular documents into styled XLSX sheets.
//!
//! Module layout:
//! - `conf`     : constants and named colors
//! - `spec`     : layout models, cursor, errors
//! - `load`     : `ExcelDef.xml` definition loading
//! - `util`     : pure helpers (titles, colors, sheet names, positions)
//! - `canvas`   : sheet/workbook capabilities and their implementations
//! - `writer`   : region painter for one document
//! - `composer` : documents to sheets, then one save
//! - `report`   : compose report models
pub mod canvas;
pub mod composer;
pub mod conf;
pub mod load;
pub mod report;
pub mod spec;
pub mod util;
pub mod writer;

pub use canvas::{RecordingSheet, RecordingWorkbook, SheetCanvas, WorkbookCanvas};
pub use composer::{WorkbookComposer, compose};
pub use conf::{
    C_EXTENSION_XLSX, C_NAME_FILE_LAYOUT_DEF, C_NAME_SHEET_SINGLE, N_LEN_EXCEL_SHEET_NAME_MAX,
    N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX, TUP_EXCEL_ILLEGAL,
};
pub use csvbook_io_csv::EnumErrorKind;
pub use load::{load_layout_config, parse_layout_config};
pub use report::{ReportCompose, SpecSheetSummary};
pub use spec::{
    EnumFillColor, EnumRegion, SpecCursor, SpecLayoutConfig, SpecLayoutConfigOptions,
    SpecRegionStyle, XlsxComposeError,
};
pub use util::{derive_fill_color, derive_title, sanitize_sheet_name};
pub use writer::{SheetWriter, paint_line};
