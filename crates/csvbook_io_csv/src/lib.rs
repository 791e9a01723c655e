//! `csvbook_io_csv` v1:
//! Delimited-text reader feeding the workbook composer.
//!
//! Module layout:
//! - `conf`   : constants
//! - `spec`   : document model, definition options, errors
//! - `load`   : `CsvDef.xml` definition loading
//! - `util`   : pure line/field helpers
//! - `reader` : file discovery and parsing
pub mod conf;
pub mod load;
pub mod reader;
pub mod spec;
pub mod util;

pub use conf::{
    C_ENCODING_DEFAULT, C_NAME_FILE_CSV_DEF, C_PATTERN_FILE_DEFAULT, C_SEPARATOR_DEFAULT,
};
pub use load::{load_csv_def, parse_csv_def};
pub use reader::{parse_csv_text, read_all_csv, read_csv_file};
pub use spec::{
    CsvReadError, EnumErrorKind, SpecCsvDef, SpecCsvDefOptions, SpecTabularDocument,
};
pub use util::{derive_separator_token, split_line, split_physical_lines};
