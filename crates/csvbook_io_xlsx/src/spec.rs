//! Layout configuration, styling, cursor, and error models.

use std::io;
use std::path::PathBuf;

use csvbook_io_csv::EnumErrorKind;
use rust_xlsxwriter::XlsxError;
use serde::Deserialize;
use thiserror::Error;

use crate::util::derive_fill_color;

////////////////////////////////////////////////////////////////////////////////
// #region Styling

/// Background fill of a painted cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnumFillColor {
    /// Leave the cell unfilled.
    #[default]
    NoColor,
    /// Solid fill with `0xRRGGBB`.
    Rgb(u32),
}

/// Painted region kinds, in paint order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumRegion {
    Title,
    Header,
    Data,
    Footer,
}

/// Resolved style applied to every cell of one region line.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecRegionStyle {
    /// Bold font.
    pub if_bold: bool,
    /// Background fill.
    pub fill: EnumFillColor,
    /// Thin outside border on each cell.
    pub if_border: bool,
    /// Font family override.
    pub font_name: Option<String>,
    /// Font size override in points.
    pub font_size: Option<f64>,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Cursor

/// 1-based sheet position of the last painted row and the base column.
///
/// `row` only grows; `col` is the column left of each line's first cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpecCursor {
    pub row: usize,
    pub col: usize,
}

impl SpecCursor {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Cursor moved down by one row.
    pub fn next_row(self) -> Self {
        Self {
            row: self.row + 1,
            col: self.col,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region LayoutConfig

/// Raw `ExcelDef.xml` content, before validation.
///
/// Missing elements fall back to [`Default`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename = "ExcelDef", default)]
pub struct SpecLayoutConfigOptions {
    /// One sheet per document instead of one shared sheet.
    #[serde(rename = "IsMultipleSheets")]
    pub if_multiple_sheets: bool,
    /// Paint a title line before each document.
    #[serde(rename = "HasTitle")]
    pub if_has_title: bool,
    /// Keep the file extension in the title.
    #[serde(rename = "HasTitleExt")]
    pub if_title_with_ext: bool,
    #[serde(rename = "IsTitleBold")]
    pub if_title_bold: bool,
    #[serde(rename = "IsHeaderBold")]
    pub if_header_bold: bool,
    #[serde(rename = "IsDataBold")]
    pub if_data_bold: bool,
    #[serde(rename = "IsFooterBold")]
    pub if_footer_bold: bool,
    #[serde(rename = "HeaderBgColor")]
    pub bg_color_header: String,
    #[serde(rename = "DataBgColor")]
    pub bg_color_data: String,
    #[serde(rename = "FooterBgColor")]
    pub bg_color_footer: String,
    /// Blank columns left of every line.
    #[serde(rename = "LeadingColumns")]
    pub leading_columns: i64,
    /// Blank rows above the first line of each sheet.
    #[serde(rename = "LeadingRows")]
    pub leading_rows: i64,
    #[serde(rename = "FontName")]
    pub font_name: Option<String>,
    #[serde(rename = "FontSize")]
    pub font_size: Option<f64>,
    /// Make multi-sheet names valid and unique instead of using titles verbatim.
    #[serde(rename = "SanitizeSheetNames")]
    pub if_sanitize_sheet_names: bool,
}

impl Default for SpecLayoutConfigOptions {
    fn default() -> Self {
        Self {
            if_multiple_sheets: false,
            if_has_title: false,
            if_title_with_ext: false,
            if_title_bold: false,
            if_header_bold: false,
            if_data_bold: false,
            if_footer_bold: false,
            bg_color_header: "NoColor".to_string(),
            bg_color_data: "NoColor".to_string(),
            bg_color_footer: "NoColor".to_string(),
            leading_columns: 0,
            leading_rows: 0,
            font_name: None,
            font_size: None,
            if_sanitize_sheet_names: false,
        }
    }
}

/// Validated layout definition, shared read-only by one compose run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecLayoutConfig {
    pub if_multiple_sheets: bool,
    pub if_has_title: bool,
    pub if_title_with_ext: bool,
    pub if_title_bold: bool,
    pub if_header_bold: bool,
    pub if_data_bold: bool,
    pub if_footer_bold: bool,
    pub bg_color_header: EnumFillColor,
    pub bg_color_data: EnumFillColor,
    pub bg_color_footer: EnumFillColor,
    pub leading_columns: usize,
    pub leading_rows: usize,
    pub font_name: Option<String>,
    pub font_size: Option<f64>,
    pub if_sanitize_sheet_names: bool,
}

impl SpecLayoutConfig {
    /// Validate raw options once; the result is never re-checked.
    pub fn from_options(options: SpecLayoutConfigOptions) -> Result<Self, XlsxComposeError> {
        let leading_columns = validate_leading("LeadingColumns", options.leading_columns)?;
        let leading_rows = validate_leading("LeadingRows", options.leading_rows)?;

        if let Some(n_size) = options.font_size
            && !(n_size.is_finite() && n_size > 0.0)
        {
            return Err(XlsxComposeError::InvalidDefinition(format!(
                "FontSize must be > 0, got {n_size}."
            )));
        }
        let font_name = options
            .font_name
            .map(|c_name| c_name.trim().to_string())
            .filter(|c_name| !c_name.is_empty());

        Ok(Self {
            if_multiple_sheets: options.if_multiple_sheets,
            if_has_title: options.if_has_title,
            if_title_with_ext: options.if_title_with_ext,
            if_title_bold: options.if_title_bold,
            if_header_bold: options.if_header_bold,
            if_data_bold: options.if_data_bold,
            if_footer_bold: options.if_footer_bold,
            bg_color_header: resolve_color("HeaderBgColor", &options.bg_color_header)?,
            bg_color_data: resolve_color("DataBgColor", &options.bg_color_data)?,
            bg_color_footer: resolve_color("FooterBgColor", &options.bg_color_footer)?,
            leading_columns,
            leading_rows,
            font_name,
            font_size: options.font_size,
            if_sanitize_sheet_names: options.if_sanitize_sheet_names,
        })
    }

    /// Cursor every sheet starts from.
    pub fn cursor_origin(&self) -> SpecCursor {
        SpecCursor::new(self.leading_rows, self.leading_columns)
    }

    /// Style for one region. Title never has fill or border.
    pub fn style_for(&self, region: EnumRegion) -> SpecRegionStyle {
        let (if_bold, fill, if_border) = match region {
            EnumRegion::Title => (self.if_title_bold, EnumFillColor::NoColor, false),
            EnumRegion::Header => (self.if_header_bold, self.bg_color_header, true),
            EnumRegion::Data => (self.if_data_bold, self.bg_color_data, true),
            EnumRegion::Footer => (self.if_footer_bold, self.bg_color_footer, true),
        };
        SpecRegionStyle {
            if_bold,
            fill,
            if_border,
            font_name: self.font_name.clone(),
            font_size: self.font_size,
        }
    }
}

fn validate_leading(field: &str, value: i64) -> Result<usize, XlsxComposeError> {
    usize::try_from(value).map_err(|_| {
        XlsxComposeError::InvalidDefinition(format!("{field} must be >= 0, got {value}."))
    })
}

fn resolve_color(field: &'static str, value: &str) -> Result<EnumFillColor, XlsxComposeError> {
    derive_fill_color(value).ok_or_else(|| XlsxComposeError::InvalidColor {
        field,
        value: value.to_string(),
    })
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Layout definition and workbook composition errors.
#[derive(Debug, Error)]
pub enum XlsxComposeError {
    /// Definition file could not be opened.
    #[error("Failed to read definition file {}: {source}", path.display())]
    DefinitionUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Definition file is not valid XML for the expected shape.
    #[error("Malformed definition {origin}: {message}")]
    DefinitionMalformed { origin: String, message: String },
    /// Invalid numeric or font setting.
    #[error("Invalid definition: {0}")]
    InvalidDefinition(String),
    /// Color name neither known nor `#RRGGBB`.
    #[error("Invalid color for {field}: {value:?}")]
    InvalidColor { field: &'static str, value: String },
    /// Writer refused the sheet name (length, characters, or duplicate).
    #[error("Sheet name rejected: {name:?}: {source}")]
    SheetRejected {
        name: String,
        #[source]
        source: XlsxError,
    },
    /// Writer refused a cell write.
    #[error("Cell write failed at row {row}, column {col}: {source}")]
    CellRejected {
        row: usize,
        col: usize,
        #[source]
        source: XlsxError,
    },
    /// Cursor moved past the worksheet limits.
    #[error("Cell position out of range: {0}")]
    PositionOverflow(String),
    /// Workbook could not be saved.
    #[error("Failed to save workbook {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: XlsxError,
    },
}

impl XlsxComposeError {
    pub fn kind(&self) -> EnumErrorKind {
        match self {
            Self::DefinitionUnreadable { .. }
            | Self::DefinitionMalformed { .. }
            | Self::InvalidDefinition(_)
            | Self::InvalidColor { .. } => EnumErrorKind::Configuration,
            Self::SheetRejected { .. }
            | Self::CellRejected { .. }
            | Self::PositionOverflow(_)
            | Self::Persistence { .. } => EnumErrorKind::Persistence,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_config_resolves_colors_and_offsets() {
        let config = SpecLayoutConfig::from_options(SpecLayoutConfigOptions {
            bg_color_header: "LightGray".to_string(),
            bg_color_data: "#00ff00".to_string(),
            leading_rows: 2,
            leading_columns: 1,
            ..SpecLayoutConfigOptions::default()
        })
        .expect("valid");

        assert_eq!(config.bg_color_header, EnumFillColor::Rgb(0xD3D3D3));
        assert_eq!(config.bg_color_data, EnumFillColor::Rgb(0x00FF00));
        assert_eq!(config.bg_color_footer, EnumFillColor::NoColor);
        assert_eq!(config.cursor_origin(), SpecCursor::new(2, 1));
    }

    #[test]
    fn layout_config_rejects_negative_offsets() {
        let err = SpecLayoutConfig::from_options(SpecLayoutConfigOptions {
            leading_rows: -1,
            ..SpecLayoutConfigOptions::default()
        })
        .expect_err("must fail");
        assert!(matches!(err, XlsxComposeError::InvalidDefinition(_)));
        assert_eq!(err.kind(), EnumErrorKind::Configuration);
    }

    #[test]
    fn layout_config_rejects_unknown_color() {
        let err = SpecLayoutConfig::from_options(SpecLayoutConfigOptions {
            bg_color_footer: "Ultraviolet".to_string(),
            ..SpecLayoutConfigOptions::default()
        })
        .expect_err("must fail");
        assert!(matches!(
            err,
            XlsxComposeError::InvalidColor {
                field: "FooterBgColor",
                ..
            }
        ));
    }

    #[test]
    fn layout_config_rejects_non_positive_font_size() {
        let err = SpecLayoutConfig::from_options(SpecLayoutConfigOptions {
            font_size: Some(0.0),
            ..SpecLayoutConfigOptions::default()
        })
        .expect_err("must fail");
        assert!(matches!(err, XlsxComposeError::InvalidDefinition(_)));
    }

    #[test]
    fn style_for_title_has_no_fill_or_border() {
        let config = SpecLayoutConfig {
            if_title_bold: true,
            bg_color_header: EnumFillColor::Rgb(0x123456),
            font_name: Some("Meiryo".to_string()),
            ..SpecLayoutConfig::default()
        };

        let style_title = config.style_for(EnumRegion::Title);
        assert!(style_title.if_bold);
        assert_eq!(style_title.fill, EnumFillColor::NoColor);
        assert!(!style_title.if_border);
        assert_eq!(style_title.font_name.as_deref(), Some("Meiryo"));

        let style_header = config.style_for(EnumRegion::Header);
        assert!(!style_header.if_bold);
        assert_eq!(style_header.fill, EnumFillColor::Rgb(0x123456));
        assert!(style_header.if_border);
    }

    #[test]
    fn cursor_next_row_keeps_column() {
        let cursor = SpecCursor::new(3, 2).next_row();
        assert_eq!(cursor, SpecCursor::new(4, 2));
    }
}
