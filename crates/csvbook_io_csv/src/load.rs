//! `CsvDef.xml` loading.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::spec::{CsvReadError, SpecCsvDef, SpecCsvDefOptions};

/// Parse and validate a CSV definition from XML text.
///
/// `origin` only labels error messages.
pub fn parse_csv_def(xml: &str, origin: &str) -> Result<SpecCsvDef, CsvReadError> {
    let options: SpecCsvDefOptions =
        quick_xml::de::from_str(xml).map_err(|err| CsvReadError::DefinitionMalformed {
            origin: origin.to_string(),
            message: err.to_string(),
        })?;
    SpecCsvDef::from_options(options)
}

/// Read, parse, and validate a CSV definition file.
pub fn load_csv_def<P: AsRef<Path>>(path_file_def: P) -> Result<SpecCsvDef, CsvReadError> {
    let path_file_def = path_file_def.as_ref();
    let c_xml =
        fs::read_to_string(path_file_def).map_err(|err| CsvReadError::DefinitionUnreadable {
            path: path_file_def.to_path_buf(),
            source: err,
        })?;

    let csv_def = parse_csv_def(&c_xml, &path_file_def.display().to_string())?;
    debug!(
        path = %path_file_def.display(),
        encoding = csv_def.encoding().name(),
        if_has_header = csv_def.if_has_header(),
        if_has_footer = csv_def.if_has_footer(),
        "loaded csv definition"
    );
    Ok(csv_def)
}
