//! `csvbook`: bundle a directory of delimited text files into one styled XLSX workbook.
//!
//! Definitions are read from `CsvDef.xml` and `ExcelDef.xml` in `--config-dir`,
//! or by default from a `Config/` directory next to the executable. Deployments
//! copy `crates/csvbook_cli/Config/` there. Debug builds fall back to that
//! source directory when the executable has no `Config/` beside it.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use clap::Parser;
use csvbook_io_csv::{C_NAME_FILE_CSV_DEF, CsvReadError, EnumErrorKind, load_csv_def, read_all_csv};
use csvbook_io_xlsx::{
    C_EXTENSION_XLSX, C_NAME_FILE_LAYOUT_DEF, XlsxComposeError, compose, load_layout_config,
};
use csvbook_log::{EnumLogLevel, init_logging};
use tracing::{debug, error, info};

const C_NAME_DIR_CONFIG: &str = "Config";
const C_FORMAT_TIMESTAMP: &str = "%Y%m%d%H%M%S";

const EXIT_RUNTIME_ERROR: u8 = 1;
const EXIT_ARGS_ERROR: u8 = 2;
const EXIT_CONFIG_ERROR: u8 = 3;
const EXIT_INPUT_ERROR: u8 = 4;
const EXIT_PERSIST_ERROR: u8 = 5;

#[derive(Parser, Debug)]
#[command(name = "csvbook", version)]
#[command(about = "Bundle every CSV file in a directory into one styled XLSX workbook")]
struct Cli {
    /// Directory holding the source CSV files
    #[arg(value_name = "CSV_DIR")]
    dir_csv: PathBuf,

    /// Directory the workbook is written to
    #[arg(value_name = "OUT_DIR")]
    dir_out: PathBuf,

    /// Output file name prefix; a timestamp and `.xlsx` are appended
    #[arg(value_name = "BASE_NAME")]
    name_base: String,

    /// Directory holding `CsvDef.xml` and `ExcelDef.xml` [default: <exe dir>/Config]
    #[arg(long, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return ExitCode::from(derive_parse_exit_code(&err));
        }
    };
    init_logging(EnumLogLevel::from_verbosity(cli.verbose));

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::from(derive_exit_code(&err))
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    ensure_dir(&cli.dir_csv)?;
    ensure_dir(&cli.dir_out)?;

    let now = Local::now().naive_local();
    let path_file_out = derive_output_path(&cli.dir_out, &cli.name_base, &now);
    let path_dir_config = match &cli.config_dir {
        Some(path) => path.clone(),
        None => derive_default_config_dir()?,
    };

    let csv_def = load_csv_def(path_dir_config.join(C_NAME_FILE_CSV_DEF))
        .context("loading CSV definition")?;
    let layout_config = load_layout_config(path_dir_config.join(C_NAME_FILE_LAYOUT_DEF))
        .context("loading layout definition")?;

    let documents = read_all_csv(&cli.dir_csv, &csv_def).context("reading source files")?;
    let report = compose(&documents, &layout_config, &path_file_out)
        .with_context(|| format!("composing {}", path_file_out.display()))?;

    for c_warning in &report.warnings {
        info!(warning = %c_warning, "compose warning");
    }
    info!("{report}");
    Ok(())
}

fn ensure_dir(path: &Path) -> Result<(), CsvReadError> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(CsvReadError::DirectoryNotFound(path.to_path_buf()))
    }
}

/// `{dir_out}/{name_base}{yyyyMMddHHmmss}.xlsx`
fn derive_output_path(dir_out: &Path, name_base: &str, now: &NaiveDateTime) -> PathBuf {
    dir_out.join(format!(
        "{name_base}{}{C_EXTENSION_XLSX}",
        now.format(C_FORMAT_TIMESTAMP)
    ))
}

fn derive_default_config_dir() -> Result<PathBuf> {
    let path_exe = std::env::current_exe().context("locating executable")?;
    let path_dir_exe = path_exe
        .parent()
        .context("executable has no parent directory")?;
    let path_dir_fallback = cfg!(debug_assertions)
        .then(|| Path::new(env!("CARGO_MANIFEST_DIR")).join(C_NAME_DIR_CONFIG));
    Ok(select_config_dir(
        path_dir_exe.join(C_NAME_DIR_CONFIG),
        path_dir_fallback,
    ))
}

/// Prefer `path_dir_primary`; use `path_dir_fallback` only when the primary is
/// missing and the fallback exists.
fn select_config_dir(path_dir_primary: PathBuf, path_dir_fallback: Option<PathBuf>) -> PathBuf {
    if path_dir_primary.is_dir() {
        return path_dir_primary;
    }
    match path_dir_fallback {
        Some(path_dir) if path_dir.is_dir() => {
            debug!(path = %path_dir.display(), "using fallback config directory");
            path_dir
        }
        _ => path_dir_primary,
    }
}

fn derive_error_kind(err: &anyhow::Error) -> Option<EnumErrorKind> {
    if let Some(err_csv) = err.downcast_ref::<CsvReadError>() {
        return Some(err_csv.kind());
    }
    err.downcast_ref::<XlsxComposeError>().map(XlsxComposeError::kind)
}

fn derive_exit_code(err: &anyhow::Error) -> u8 {
    derive_exit_code_for_kind(derive_error_kind(err))
}

/// Help and version requests exit cleanly; any other parse failure is a usage error.
fn derive_parse_exit_code(err: &clap::Error) -> u8 {
    if err.use_stderr() {
        derive_exit_code_for_kind(Some(EnumErrorKind::Argument))
    } else {
        0
    }
}

fn derive_exit_code_for_kind(kind: Option<EnumErrorKind>) -> u8 {
    match kind {
        Some(EnumErrorKind::Configuration) => EXIT_CONFIG_ERROR,
        Some(EnumErrorKind::InputNotFound) => EXIT_INPUT_ERROR,
        Some(EnumErrorKind::Argument) => EXIT_ARGS_ERROR,
        Some(EnumErrorKind::Persistence) => EXIT_PERSIST_ERROR,
        None => EXIT_RUNTIME_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::fs;

    fn build_cli(dir_csv: &Path, dir_out: &Path, dir_config: &Path) -> Cli {
        Cli {
            dir_csv: dir_csv.to_path_buf(),
            dir_out: dir_out.to_path_buf(),
            name_base: "book_".to_string(),
            config_dir: Some(dir_config.to_path_buf()),
            verbose: 0,
        }
    }

    fn write_config(dir_config: &Path, c_layout: &str) {
        fs::create_dir_all(dir_config).expect("mkdir");
        fs::write(
            dir_config.join(C_NAME_FILE_CSV_DEF),
            "<CsvDef><HasHeader>true</HasHeader><Separator>,</Separator></CsvDef>",
        )
        .expect("write");
        fs::write(dir_config.join(C_NAME_FILE_LAYOUT_DEF), c_layout).expect("write");
    }

    fn list_files(dir: &Path) -> Vec<String> {
        let mut l_names: Vec<String> = fs::read_dir(dir)
            .expect("read_dir")
            .map(|entry| entry.expect("entry").file_name().to_string_lossy().into_owned())
            .collect();
        l_names.sort();
        l_names
    }

    #[test]
    fn cli_parses_positionals_and_flags() {
        let cli = Cli::try_parse_from([
            "csvbook", "in", "out", "book", "--config-dir", "cfg", "-vv",
        ])
        .expect("parse");
        assert_eq!(cli.dir_csv, PathBuf::from("in"));
        assert_eq!(cli.dir_out, PathBuf::from("out"));
        assert_eq!(cli.name_base, "book");
        assert_eq!(cli.config_dir, Some(PathBuf::from("cfg")));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn cli_rejects_wrong_arity() {
        assert!(Cli::try_parse_from(["csvbook", "in", "out"]).is_err());
        assert!(Cli::try_parse_from(["csvbook", "in", "out", "book", "extra"]).is_err());
    }

    #[test]
    fn parse_failure_maps_to_args_exit_code() {
        let err = Cli::try_parse_from(["csvbook", "in", "out"]).expect_err("must fail");
        assert_eq!(derive_parse_exit_code(&err), EXIT_ARGS_ERROR);

        let err = Cli::try_parse_from(["csvbook", "--help"]).expect_err("help exits early");
        assert_eq!(derive_parse_exit_code(&err), 0);
    }

    #[test]
    fn select_config_dir_prefers_primary_then_existing_fallback() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path_primary = tmp.path().join("exe").join("Config");
        let path_fallback = tmp.path().join("src").join("Config");

        assert_eq!(
            select_config_dir(path_primary.clone(), Some(path_fallback.clone())),
            path_primary
        );

        fs::create_dir_all(&path_fallback).expect("mkdir");
        assert_eq!(
            select_config_dir(path_primary.clone(), Some(path_fallback.clone())),
            path_fallback
        );
        assert_eq!(select_config_dir(path_primary.clone(), None), path_primary);

        fs::create_dir_all(&path_primary).expect("mkdir");
        assert_eq!(
            select_config_dir(path_primary.clone(), Some(path_fallback)),
            path_primary
        );
    }

    #[test]
    fn shipped_config_definitions_load() {
        let path_dir_config = Path::new(env!("CARGO_MANIFEST_DIR")).join(C_NAME_DIR_CONFIG);
        load_csv_def(path_dir_config.join(C_NAME_FILE_CSV_DEF)).expect("csv def");
        load_layout_config(path_dir_config.join(C_NAME_FILE_LAYOUT_DEF)).expect("layout");
    }

    #[test]
    fn derive_output_path_appends_timestamp_and_extension() {
        let now = NaiveDate::from_ymd_opt(2024, 3, 9)
            .and_then(|date| date.and_hms_opt(7, 5, 2))
            .expect("datetime");
        let path = derive_output_path(Path::new("out"), "report_", &now);
        assert_eq!(path, Path::new("out").join("report_20240309070502.xlsx"));
    }

    #[test]
    fn run_writes_one_workbook() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let dir_csv = tmp.path().join("csv");
        let dir_out = tmp.path().join("out");
        let dir_config = tmp.path().join("Config");
        fs::create_dir_all(&dir_csv).expect("mkdir");
        fs::create_dir_all(&dir_out).expect("mkdir");
        write_config(
            &dir_config,
            "<ExcelDef><HasTitle>true</HasTitle><HeaderBgColor>LightGray</HeaderBgColor></ExcelDef>",
        );
        fs::write(dir_csv.join("a.csv"), "A,B\n1,2\n").expect("write");
        fs::write(dir_csv.join("b.csv"), "C\n3\n").expect("write");

        run(&build_cli(&dir_csv, &dir_out, &dir_config)).expect("run");

        let l_names = list_files(&dir_out);
        assert_eq!(l_names.len(), 1);
        assert!(l_names[0].starts_with("book_"));
        assert!(l_names[0].ends_with(".xlsx"));
    }

    #[test]
    fn run_without_sources_writes_nothing() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let dir_csv = tmp.path().join("csv");
        let dir_out = tmp.path().join("out");
        let dir_config = tmp.path().join("Config");
        fs::create_dir_all(&dir_csv).expect("mkdir");
        fs::create_dir_all(&dir_out).expect("mkdir");
        write_config(&dir_config, "<ExcelDef></ExcelDef>");

        run(&build_cli(&dir_csv, &dir_out, &dir_config)).expect("run");
        assert!(list_files(&dir_out).is_empty());
    }

    #[test]
    fn run_missing_directory_maps_to_input_exit_code() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let dir_config = tmp.path().join("Config");
        write_config(&dir_config, "<ExcelDef></ExcelDef>");

        let err = run(&build_cli(&tmp.path().join("nope"), tmp.path(), &dir_config))
            .expect_err("must fail");
        assert_eq!(derive_error_kind(&err), Some(EnumErrorKind::InputNotFound));
        assert_eq!(derive_exit_code(&err), EXIT_INPUT_ERROR);
    }

    #[test]
    fn run_invalid_color_maps_to_config_exit_code() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let dir_config = tmp.path().join("Config");
        write_config(
            &dir_config,
            "<ExcelDef><DataBgColor>Blurple</DataBgColor></ExcelDef>",
        );

        let err = run(&build_cli(tmp.path(), tmp.path(), &dir_config)).expect_err("must fail");
        assert_eq!(derive_error_kind(&err), Some(EnumErrorKind::Configuration));
        assert_eq!(derive_exit_code(&err), EXIT_CONFIG_ERROR);
        assert!(format!("{err:#}").contains("loading layout definition"));
    }

    #[test]
    fn unrelated_error_maps_to_runtime_exit_code() {
        let err = anyhow::anyhow!("boom");
        assert_eq!(derive_exit_code(&err), EXIT_RUNTIME_ERROR);
    }
}
