//! Document model, definition options, and error types.

use std::collections::BTreeSet;
use std::io;
use std::path::PathBuf;

use aho_corasick::{AhoCorasick, MatchKind};
use encoding_rs::Encoding;
use globset::{GlobBuilder, GlobMatcher};
use serde::Deserialize;
use thiserror::Error;

use crate::conf::{C_ENCODING_DEFAULT, C_PATTERN_FILE_DEFAULT, C_SEPARATOR_DEFAULT};
use crate::util::derive_separator_token;

////////////////////////////////////////////////////////////////////////////////
// #region TabularDocument

/// One fully parsed source file.
///
/// Built once by the reader and only read afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecTabularDocument {
    file_name: String,
    header: Option<Vec<String>>,
    data_rows: Vec<Vec<String>>,
    footer: Option<Vec<String>>,
}

impl SpecTabularDocument {
    pub fn new(
        file_name: impl Into<String>,
        header: Option<Vec<String>>,
        data_rows: Vec<Vec<String>>,
        footer: Option<Vec<String>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            header,
            data_rows,
            footer,
        }
    }

    /// Source file name including its extension.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn header(&self) -> Option<&[String]> {
        self.header.as_deref()
    }

    pub fn data_rows(&self) -> &[Vec<String>] {
        &self.data_rows
    }

    pub fn footer(&self) -> Option<&[String]> {
        self.footer.as_deref()
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region DefinitionOptions

/// Raw `CsvDef.xml` content, before validation.
///
/// Missing elements fall back to [`Default`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename = "CsvDef", default)]
pub struct SpecCsvDefOptions {
    /// First non-skipped line is a header.
    #[serde(rename = "HasHeader")]
    pub if_has_header: bool,
    /// Last physical line is a footer.
    #[serde(rename = "HasFooter")]
    pub if_has_footer: bool,
    /// 1-based physical line numbers dropped before classification.
    #[serde(rename = "SkipRowNumber")]
    pub skip_row_numbers: Vec<usize>,
    /// Text encoding label (WHATWG, e.g. `utf-8`, `shift_jis`).
    #[serde(rename = "Encoding")]
    pub encoding: String,
    /// Field separator tokens; `\t` is read as a tab.
    #[serde(rename = "Separator")]
    pub separators: Vec<String>,
    /// File-name glob for source discovery.
    #[serde(rename = "FilePattern")]
    pub pattern_file: String,
}

impl Default for SpecCsvDefOptions {
    fn default() -> Self {
        Self {
            if_has_header: false,
            if_has_footer: false,
            skip_row_numbers: vec![],
            encoding: C_ENCODING_DEFAULT.to_string(),
            separators: vec![C_SEPARATOR_DEFAULT.to_string()],
            pattern_file: C_PATTERN_FILE_DEFAULT.to_string(),
        }
    }
}

/// Validated CSV definition.
#[derive(Debug, Clone)]
pub struct SpecCsvDef {
    if_has_header: bool,
    if_has_footer: bool,
    skip_row_numbers: BTreeSet<usize>,
    encoding: &'static Encoding,
    separators: Vec<String>,
    matcher_separator: AhoCorasick,
    matcher_file: GlobMatcher,
}

impl SpecCsvDef {
    /// Validate raw options once; the result is never re-checked.
    pub fn from_options(options: SpecCsvDefOptions) -> Result<Self, CsvReadError> {
        if options.skip_row_numbers.contains(&0) {
            return Err(CsvReadError::InvalidDefinition(
                "SkipRowNumber is 1-based; 0 is not allowed.".to_string(),
            ));
        }

        let encoding = Encoding::for_label(options.encoding.trim().as_bytes())
            .ok_or_else(|| CsvReadError::InvalidEncoding(options.encoding.clone()))?;

        let mut separators: Vec<String> = options
            .separators
            .iter()
            .map(|c_raw| derive_separator_token(c_raw))
            .collect();
        if separators.is_empty() {
            separators.push(C_SEPARATOR_DEFAULT.to_string());
        }
        if separators.iter().any(String::is_empty) {
            return Err(CsvReadError::InvalidDefinition(
                "Separator must not be empty.".to_string(),
            ));
        }

        // Leftmost match, earlier token wins on ties.
        let matcher_separator = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostFirst)
            .build(&separators)
            .map_err(|err| CsvReadError::InvalidDefinition(format!("Separator: {err}")))?;

        let matcher_file = GlobBuilder::new(options.pattern_file.trim())
            .case_insensitive(true)
            .literal_separator(true)
            .build()
            .map_err(|err| CsvReadError::InvalidDefinition(format!("FilePattern: {err}")))?
            .compile_matcher();

        Ok(Self {
            if_has_header: options.if_has_header,
            if_has_footer: options.if_has_footer,
            skip_row_numbers: options.skip_row_numbers.into_iter().collect(),
            encoding,
            separators,
            matcher_separator,
            matcher_file,
        })
    }

    pub fn if_has_header(&self) -> bool {
        self.if_has_header
    }

    pub fn if_has_footer(&self) -> bool {
        self.if_has_footer
    }

    pub fn skip_row_numbers(&self) -> &BTreeSet<usize> {
        &self.skip_row_numbers
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// Decoded separator tokens, in priority order.
    pub fn separators(&self) -> &[String] {
        &self.separators
    }

    pub(crate) fn matcher_separator(&self) -> &AhoCorasick {
        &self.matcher_separator
    }

    /// Whether `file_name` is selected by the definition's file pattern.
    pub fn is_source_file_name(&self, file_name: &str) -> bool {
        self.matcher_file.is_match(file_name)
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Failure category shared by every csvbook crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumErrorKind {
    /// Definition file missing, malformed, or holding invalid values.
    Configuration,
    /// Source/output directory or source file missing or unreadable.
    InputNotFound,
    /// Wrong command-line usage.
    Argument,
    /// Workbook could not be assembled or written.
    Persistence,
}

/// Reader and CSV definition errors.
#[derive(Debug, Error)]
pub enum CsvReadError {
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
    /// Encoding label unknown to the decoder.
    #[error("Invalid Encoding setting: {0:?}")]
    InvalidEncoding(String),
    /// Any other invalid definition value.
    #[error("Invalid definition: {0}")]
    InvalidDefinition(String),
    /// Input directory does not exist.
    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),
    /// Source file does not exist.
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),
    /// Source file or directory exists but could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CsvReadError {
    pub fn kind(&self) -> EnumErrorKind {
        match self {
            Self::DefinitionUnreadable { .. }
            | Self::DefinitionMalformed { .. }
            | Self::InvalidEncoding(_)
            | Self::InvalidDefinition(_) => EnumErrorKind::Configuration,
            Self::DirectoryNotFound(_) | Self::FileNotFound(_) | Self::Io { .. } => {
                EnumErrorKind::InputNotFound
            }
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
