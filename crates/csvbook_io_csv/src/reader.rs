//! Source discovery and text-to-document parsing.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::spec::{CsvReadError, SpecCsvDef, SpecTabularDocument};
use crate::util::{split_line, split_physical_lines};

/// Read every matching source file in `dir_source` (non-recursive).
///
/// Files are selected by the definition's file pattern and returned sorted by
/// file name. Any unreadable file aborts the whole read.
pub fn read_all_csv<P: AsRef<Path>>(
    dir_source: P,
    csv_def: &SpecCsvDef,
) -> Result<Vec<SpecTabularDocument>, CsvReadError> {
    let path_dir_src = dir_source.as_ref();
    if !path_dir_src.is_dir() {
        return Err(CsvReadError::DirectoryNotFound(path_dir_src.to_path_buf()));
    }

    let map_io_err = |err| CsvReadError::Io {
        path: path_dir_src.to_path_buf(),
        source: err,
    };

    let mut l_paths_file = Vec::new();
    for entry in fs::read_dir(path_dir_src).map_err(map_io_err)? {
        let entry = entry.map_err(map_io_err)?;
        let path_entry = entry.path();
        if !path_entry.is_file() {
            continue;
        }
        let name_file = entry.file_name().to_string_lossy().to_string();
        if csv_def.is_source_file_name(&name_file) {
            l_paths_file.push((name_file, path_entry));
        }
    }
    l_paths_file.sort();

    let mut l_documents = Vec::with_capacity(l_paths_file.len());
    for (_, path_file) in l_paths_file {
        l_documents.push(read_csv_file(&path_file, csv_def)?);
    }

    info!(
        dir = %path_dir_src.display(),
        cnt_documents = l_documents.len(),
        "read source files"
    );
    Ok(l_documents)
}

/// Read one source file with the configured encoding.
pub fn read_csv_file<P: AsRef<Path>>(
    path_file: P,
    csv_def: &SpecCsvDef,
) -> Result<SpecTabularDocument, CsvReadError> {
    let path_file = path_file.as_ref();
    if !path_file.is_file() {
        return Err(CsvReadError::FileNotFound(path_file.to_path_buf()));
    }

    let v_bytes = fs::read(path_file).map_err(|err| CsvReadError::Io {
        path: path_file.to_path_buf(),
        source: err,
    })?;
    let (c_text, _, if_had_errors) = csv_def.encoding().decode(&v_bytes);
    if if_had_errors {
        debug!(
            path = %path_file.display(),
            encoding = csv_def.encoding().name(),
            "malformed byte sequences replaced while decoding"
        );
    }

    let name_file = path_file
        .file_name()
        .map(|c_name| c_name.to_string_lossy().to_string())
        .unwrap_or_default();
    Ok(parse_csv_text(&name_file, &c_text, csv_def))
}

/// Classify decoded text into header, data rows, and footer.
///
/// Per physical line (1-based): skipped lines are dropped first; then the first
/// remaining line becomes the header (when enabled), the last physical line the
/// footer (when enabled), and every other line a data row.
pub fn parse_csv_text(file_name: &str, text: &str, csv_def: &SpecCsvDef) -> SpecTabularDocument {
    let l_lines = split_physical_lines(text);
    let n_lines = l_lines.len();

    let mut header: Option<Vec<String>> = None;
    let mut footer: Option<Vec<String>> = None;
    let mut l_data_rows = Vec::new();

    for (n_idx, line) in l_lines.into_iter().enumerate() {
        let n_row_number = n_idx + 1;
        if csv_def.skip_row_numbers().contains(&n_row_number) {
            continue;
        }

        let l_items = split_line(line, csv_def.matcher_separator());

        if csv_def.if_has_header() && header.is_none() {
            header = Some(l_items);
            continue;
        }
        if csv_def.if_has_footer() && n_row_number == n_lines {
            footer = Some(l_items);
            continue;
        }
        l_data_rows.push(l_items);
    }

    debug!(
        file_name,
        cnt_data_rows = l_data_rows.len(),
        if_has_header = header.is_some(),
        if_has_footer = footer.is_some(),
        "parsed source file"
    );
    SpecTabularDocument::new(file_name, header, l_data_rows, footer)
}
