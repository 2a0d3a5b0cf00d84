//! Subscriber installation and logging configuration.
//!
//! # Design
//! - One entry point installs the global fmt subscriber (JSON or pretty).
//! - `RUST_LOG` overrides the configured level when present.
//! - The installed format is recorded once so later callers can inspect it.

use std::str::FromStr;

use once_cell::sync::OnceCell;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{Result, TelemetryError};

/// Level used when neither the configuration nor `RUST_LOG` provide one.
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Environment variable read by [`LoggingConfig::from_env`] for the level.
pub const LOG_LEVEL_ENV: &str = "NEODASH_LOG_LEVEL";
/// Environment variable read by [`LoggingConfig::from_env`] for the format.
pub const LOG_FORMAT_ENV: &str = "NEODASH_LOG_FORMAT";

static ACTIVE_FORMAT: OnceCell<LogFormat> = OnceCell::new();
static TEST_LOGGING: OnceCell<()> = OnceCell::new();

/// Configure and install the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if the level is not a valid filter directive or a global
/// subscriber has already been installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = build_env_filter(&config.level)?;
    let installed = match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_target(false)
                    .with_thread_ids(false),
            )
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_thread_ids(false))
            .try_init(),
    };
    installed.map_err(|source| TelemetryError::SubscriberInstall { source })?;
    let _ = ACTIVE_FORMAT.set(config.format);
    Ok(())
}

/// Install a test-writer subscriber for the current test binary.
///
/// Safe to call from every test; only the first call installs anything and
/// a subscriber installed elsewhere is left in place.
pub fn init_test_logging() {
    TEST_LOGGING.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_test_writer().with_target(true))
            .try_init();
    });
}

/// Format installed by [`init_logging`], if it has run successfully.
#[must_use]
pub fn active_format() -> Option<LogFormat> {
    ACTIVE_FORMAT.get().copied()
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `neodash_hooks=debug,info`.
    pub level: String,
    /// Output format selection for the tracing subscriber.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            format: LogFormat::infer(),
        }
    }
}

impl LoggingConfig {
    /// Read [`LOG_LEVEL_ENV`] and [`LOG_FORMAT_ENV`], defaulting what is unset.
    ///
    /// # Errors
    ///
    /// Returns an error when the format variable holds an unknown value.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`LoggingConfig::from_env`] with a caller-provided variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error when the format variable holds an unknown value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let level = lookup(LOG_LEVEL_ENV)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or(defaults.level);
        let format = match lookup(LOG_FORMAT_ENV).filter(|value| !value.trim().is_empty()) {
            Some(value) => value.parse()?,
            None => defaults.format,
        };
        Ok(Self { level, format })
    }
}

/// Available output formats for the logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Emit logs as structured JSON objects.
    Json,
    /// Emit human-readable logs.
    Pretty,
}

impl LogFormat {
    /// Choose a sensible default for the current build.
    #[must_use]
    pub const fn infer() -> Self {
        if cfg!(debug_assertions) {
            Self::Pretty
        } else {
            Self::Json
        }
    }
}

impl FromStr for LogFormat {
    type Err = TelemetryError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            _ => Err(TelemetryError::UnknownFormat {
                value: value.to_string(),
            }),
        }
    }
}

fn build_env_filter(level: &str) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(level).map_err(|source| TelemetryError::InvalidLevel {
        level: level.to_string(),
        source,
    })
}
