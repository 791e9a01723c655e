//! Stateless helpers used by the sheet writer and composer.

use std::collections::BTreeSet;

use csvbook_io_csv::SpecTabularDocument;

use crate::conf::{
    C_NAME_SHEET_FALLBACK, N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX,
    TUP_COLOR_NAMED, TUP_COLOR_NONE, TUP_EXCEL_ILLEGAL,
};
use crate::spec::{EnumFillColor, SpecLayoutConfig, XlsxComposeError};

////////////////////////////////////////////////////////////////////////////////
// #region TitleDerivation

/// Title text (and multi-sheet sheet name) for one document.
pub fn derive_title(document: &SpecTabularDocument, config: &SpecLayoutConfig) -> String {
    if config.if_title_with_ext {
        return document.file_name().to_string();
    }
    strip_file_extension(document.file_name()).to_string()
}

/// Drop the text from the last `.` onwards; names without a `.` are unchanged.
pub fn strip_file_extension(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(n_idx) => &file_name[..n_idx],
        None => file_name,
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ColorResolution

/// Resolve a configured color: `NoColor`/`None`/`Transparent`/empty, a known
/// name, or `#RRGGBB`.
///
/// Returns `None` when the value is not recognised.
pub fn derive_fill_color(value: &str) -> Option<EnumFillColor> {
    let c_key = value.trim().to_ascii_lowercase();
    if TUP_COLOR_NONE.contains(&c_key.as_str()) {
        return Some(EnumFillColor::NoColor);
    }

    if let Some(c_hex) = c_key.strip_prefix('#') {
        if c_hex.len() != 6 || !c_hex.chars().all(|chr| chr.is_ascii_hexdigit()) {
            return None;
        }
        return u32::from_str_radix(c_hex, 16).ok().map(EnumFillColor::Rgb);
    }

    TUP_COLOR_NAMED
        .iter()
        .find(|(c_name, _)| *c_name == c_key)
        .map(|(_, n_rgb)| EnumFillColor::Rgb(*n_rgb))
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetNormalization

/// Replace illegal characters with `replace_to`, trim spaces and apostrophes,
/// and cap the length. Empty results fall back to `Sheet`.
pub fn sanitize_sheet_name(name: &str, replace_to: &str) -> String {
    let mut c_name = String::with_capacity(name.len());
    for chr in name.chars() {
        if TUP_EXCEL_ILLEGAL.contains(&chr) {
            c_name.push_str(replace_to);
        } else {
            c_name.push(chr);
        }
    }

    let c_trimmed = c_name.trim().trim_matches('\'');
    if c_trimmed.is_empty() {
        return C_NAME_SHEET_FALLBACK.to_string();
    }
    c_trimmed.chars().take(N_LEN_EXCEL_SHEET_NAME_MAX).collect()
}

/// Return `name`, or `name__2`, `name__3`, ... when already taken.
///
/// Comparison is case-insensitive, as in Excel. The chosen name is recorded in
/// `set_names_existing` (lower-cased).
pub fn derive_unique_sheet_name(name: &str, set_names_existing: &mut BTreeSet<String>) -> String {
    if set_names_existing.insert(name.to_lowercase()) {
        return name.to_string();
    }

    let base_name: String = name
        .chars()
        .take(usize::max(1, N_LEN_EXCEL_SHEET_NAME_MAX - 3))
        .collect();

    let mut n_idx = 2usize;
    loop {
        let candidate: String = format!("{base_name}__{n_idx}")
            .chars()
            .take(N_LEN_EXCEL_SHEET_NAME_MAX)
            .collect();
        if set_names_existing.insert(candidate.to_lowercase()) {
            return candidate;
        }
        n_idx += 1;
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region PositionCasting

/// 1-based sheet row to the writer's 0-based row index.
pub fn cast_row_num(row: usize) -> Result<u32, XlsxComposeError> {
    if row == 0 || row > N_NROWS_EXCEL_MAX {
        return Err(XlsxComposeError::PositionOverflow(format!(
            "row {row} outside 1..={N_NROWS_EXCEL_MAX}"
        )));
    }
    u32::try_from(row - 1)
        .map_err(|_| XlsxComposeError::PositionOverflow(format!("row index overflow: {row}")))
}

/// 1-based sheet column to the writer's 0-based column index.
pub fn cast_col_num(col: usize) -> Result<u16, XlsxComposeError> {
    if col == 0 || col > N_NCOLS_EXCEL_MAX {
        return Err(XlsxComposeError::PositionOverflow(format!(
            "column {col} outside 1..={N_NCOLS_EXCEL_MAX}"
        )));
    }
    u16::try_from(col - 1)
        .map_err(|_| XlsxComposeError::PositionOverflow(format!("column index overflow: {col}")))
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
