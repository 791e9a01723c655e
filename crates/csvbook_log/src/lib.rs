//! `csvbook_log` v1:
//! Process-wide structured logging setup shared by the binaries.

use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Env var consulted before the fallback level.
pub const C_ENV_LOG_FILTER: &str = "RUST_LOG";

/// Fallback verbosity when no filter is set in the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnumLogLevel {
    #[default]
    Info,
    Debug,
    Trace,
}

impl EnumLogLevel {
    /// Map a `-v` repeat count to a level.
    pub fn from_verbosity(n_verbose: u8) -> Self {
        match n_verbose {
            0 => Self::Info,
            1 => Self::Debug,
            _ => Self::Trace,
        }
    }

    pub fn as_level(self) -> Level {
        match self {
            Self::Info => Level::INFO,
            Self::Debug => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }
}

/// Build the filter: `RUST_LOG` if present and valid, otherwise `level` for
/// the `csvbook*` crates and `warn` for everything else.
pub fn derive_env_filter(level: EnumLogLevel) -> EnvFilter {
    EnvFilter::try_from_env(C_ENV_LOG_FILTER).unwrap_or_else(|_| {
        let c_level = level.as_level().as_str().to_ascii_lowercase();
        EnvFilter::new(format!(
            "warn,csvbook={c_level},csvbook_cli={c_level},csvbook_io_csv={c_level},csvbook_io_xlsx={c_level}"
        ))
    })
}

/// Install the global subscriber writing to stderr.
///
/// Returns `false` when a subscriber was already installed; the existing one
/// stays in place.
pub fn init_logging(level: EnumLogLevel) -> bool {
    tracing_subscriber::registry()
        .with(derive_env_filter(level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init()
        .is_ok()
}
