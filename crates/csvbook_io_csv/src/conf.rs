//! CSV definition constants.

/// Definition file name looked up inside the config directory.
pub const C_NAME_FILE_CSV_DEF: &str = "CsvDef.xml";
/// Field separator used when the definition names none.
pub const C_SEPARATOR_DEFAULT: &str = "\t";
/// Text encoding label used when the definition names none.
pub const C_ENCODING_DEFAULT: &str = "utf-8";
/// File-name glob selecting source files inside the input directory.
pub const C_PATTERN_FILE_DEFAULT: &str = "*.csv";
/// Escape accepted in `<Separator>` for a horizontal tab.
pub const C_ESCAPE_TAB: &str = "\\t";

