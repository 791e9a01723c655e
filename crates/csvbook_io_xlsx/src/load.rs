//! `ExcelDef.xml` loading.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::spec::{SpecLayoutConfig, SpecLayoutConfigOptions, XlsxComposeError};

/// Parse and validate a layout definition from XML text.
pub fn parse_layout_config(xml: &str, origin: &str) -> Result<SpecLayoutConfig, XlsxComposeError> {
    let options: SpecLayoutConfigOptions =
        quick_xml::de::from_str(xml).map_err(|err| XlsxComposeError::DefinitionMalformed {
            origin: origin.to_string(),
            message: err.to_string(),
        })?;
    SpecLayoutConfig::from_options(options)
}

/// Read, parse, and validate a layout definition file.
pub fn load_layout_config<P: AsRef<Path>>(
    path_file_def: P,
) -> Result<SpecLayoutConfig, XlsxComposeError> {
    let path_file_def = path_file_def.as_ref();
    let c_xml =
        fs::read_to_string(path_file_def).map_err(|err| XlsxComposeError::DefinitionUnreadable {
            path: path_file_def.to_path_buf(),
            source: err,
        })?;

    let config = parse_layout_config(&c_xml, &path_file_def.display().to_string())?;
    debug!(
        path = %path_file_def.display(),
        if_multiple_sheets = config.if_multiple_sheets,
        if_has_title = config.if_has_title,
        leading_rows = config.leading_rows,
        leading_columns = config.leading_columns,
        "loaded layout definition"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::EnumFillColor;
    use csvbook_io_csv::EnumErrorKind;

    #[test]
    fn parse_layout_config_reads_all_elements() {
        let c_xml = r#"<?xml version="1.0" encoding="utf-8"?>
<ExcelDef>
  <IsMultipleSheets>true</IsMultipleSheets>
  <HasTitle>true</HasTitle>
  <HasTitleExt>true</HasTitleExt>
  <IsTitleBold>true</IsTitleBold>
  <IsHeaderBold>true</IsHeaderBold>
  <IsDataBold>false</IsDataBold>
  <IsFooterBold>true</IsFooterBold>
  <HeaderBgColor>LightGray</HeaderBgColor>
  <DataBgColor>NoColor</DataBgColor>
  <FooterBgColor>#ADD8E6</FooterBgColor>
  <LeadingColumns>1</LeadingColumns>
  <LeadingRows>2</LeadingRows>
  <FontName>Arial</FontName>
  <FontSize>10.5</FontSize>
</ExcelDef>"#;

        let config = parse_layout_config(c_xml, "inline").expect("parse");
        assert!(config.if_multiple_sheets);
        assert!(config.if_has_title);
        assert!(config.if_title_with_ext);
        assert!(config.if_title_bold);
        assert!(config.if_header_bold);
        assert!(!config.if_data_bold);
        assert!(config.if_footer_bold);
        assert_eq!(config.bg_color_header, EnumFillColor::Rgb(0xD3D3D3));
        assert_eq!(config.bg_color_data, EnumFillColor::NoColor);
        assert_eq!(config.bg_color_footer, EnumFillColor::Rgb(0xADD8E6));
        assert_eq!(config.leading_columns, 1);
        assert_eq!(config.leading_rows, 2);
        assert_eq!(config.font_name.as_deref(), Some("Arial"));
        assert_eq!(config.font_size, Some(10.5));
        assert!(!config.if_sanitize_sheet_names);
    }

    #[test]
    fn parse_layout_config_empty_root_is_default() {
        let config = parse_layout_config("<ExcelDef></ExcelDef>", "inline").expect("parse");
        assert_eq!(config, SpecLayoutConfig::default());
    }

    #[test]
    fn parse_layout_config_rejects_negative_offset() {
        let err = parse_layout_config("<ExcelDef><LeadingRows>-1</LeadingRows></ExcelDef>", "inline")
            .expect_err("must fail");
        assert!(matches!(err, XlsxComposeError::InvalidDefinition(_)));
        assert_eq!(err.kind(), EnumErrorKind::Configuration);
    }

    #[test]
    fn parse_layout_config_rejects_unknown_color() {
        let err = parse_layout_config(
            "<ExcelDef><DataBgColor>Blurple</DataBgColor></ExcelDef>",
            "inline",
        )
        .expect_err("must fail");
        assert!(matches!(
            err,
            XlsxComposeError::InvalidColor { field: "DataBgColor", .. }
        ));
    }

    #[test]
    fn parse_layout_config_rejects_non_boolean_flag() {
        let err = parse_layout_config("<ExcelDef><HasTitle>maybe</HasTitle></ExcelDef>", "inline")
            .expect_err("must fail");
        assert!(matches!(err, XlsxComposeError::DefinitionMalformed { .. }));
    }

    #[test]
    fn load_layout_config_reads_file() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path_file = tmp.path().join("ExcelDef.xml");
        std::fs::write(&path_file, "<ExcelDef><HasTitle>true</HasTitle></ExcelDef>")
            .expect("write");

        let config = load_layout_config(&path_file).expect("load");
        assert!(config.if_has_title);

        let err = load_layout_config(tmp.path().join("missing.xml")).expect_err("must fail");
        assert!(matches!(err, XlsxComposeError::DefinitionUnreadable { .. }));
        assert_eq!(err.kind(), EnumErrorKind::Configuration);
    }
}
