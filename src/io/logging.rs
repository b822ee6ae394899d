//! Global logger setup for the command-line tool

use std::sync::Once;

/// Logger configuration
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "halftile=debug"). When absent, `RUST_LOG` is consulted before falling
/// back to `default_level`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Explicit filter overriding `RUST_LOG`
    pub env_filter: Option<String>,
    /// Level used when neither filter source is set
    pub default_level: log::LevelFilter,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            default_level: log::LevelFilter::Warn,
        }
    }
}

impl LoggingConfig {
    /// Configuration for a verbosity count from the command line
    ///
    /// Zero keeps warnings only, one enables info (benchmark spans), two or
    /// more enable debug output.
    pub const fn from_verbosity(verbose: u8) -> Self {
        let default_level = match verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        };
        Self {
            env_filter: None,
            default_level,
        }
    }
}

static INIT: Once = Once::new();

/// Initialize the global logger once; later calls are ignored
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = config.env_filter {
            builder.parse_filters(&filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(config.default_level);
        }

        // A second logger may already be installed by a host application
        if builder.try_init().is_ok() {
            log::debug!("logging initialized");
        }
    });
}
