//! Discovery configuration parsed from environment variables.
//!
//! Every setting can be overridden via environment variables prefixed with
//! `BDD_DISCOVERY_`; command-line flags take precedence over both.

use std::env;
use std::str::FromStr;

use crate::error::DiscoveryError;

/// Environment variable selecting the log level.
pub const LOG_LEVEL_VAR: &str = "BDD_DISCOVERY_LOG_LEVEL";
/// Environment variable holding the default tag expression.
pub const TAGS_VAR: &str = "BDD_DISCOVERY_TAGS";
/// Environment variable selecting the Gherkin dialect.
pub const DIALECT_VAR: &str = "BDD_DISCOVERY_DIALECT";

/// Log level enumeration matching tracing crate levels.
///
/// Defaults to `Warn` so that discovery output stays quiet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Per-pickle filtering decisions.
    Trace,
    /// Specifier resolution and parsed documents.
    Debug,
    /// Standard informational messages.
    Info,
    /// Warning messages for potentially problematic situations.
    #[default]
    Warn,
    /// Error messages for failures.
    Error,
}

impl FromStr for LogLevel {
    type Err = DiscoveryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(DiscoveryError::InvalidConfig(format!(
                "unknown log level '{s}', expected one of: trace, debug, info, warn, error"
            ))),
        }
    }
}

impl LogLevel {
    /// Convert to a tracing filter directive string.
    #[must_use]
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Settings for a discovery run.
///
/// # Environment Variables
///
/// - `BDD_DISCOVERY_LOG_LEVEL`: log level (trace, debug, info, warn, error)
/// - `BDD_DISCOVERY_TAGS`: tag expression applied when none is given
/// - `BDD_DISCOVERY_DIALECT`: Gherkin dialect; empty selects English
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryConfig {
    /// Log level for the stderr subscriber.
    pub log_level: LogLevel,
    /// Tag expression; empty keeps every pickle.
    pub tags: String,
    /// Gherkin dialect; empty selects the default.
    pub dialect: String,
}

impl DiscoveryConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `DiscoveryError::InvalidConfig` if a variable holds an invalid
    /// value.
    pub fn from_env() -> Result<Self, DiscoveryError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns `DiscoveryError::InvalidConfig` if a variable holds an invalid
    /// value.
    pub fn from_lookup<L>(lookup: L) -> Result<Self, DiscoveryError>
    where
        L: Fn(&str) -> Option<String>,
    {
        let log_level = lookup(LOG_LEVEL_VAR)
            .map(|val| val.parse::<LogLevel>())
            .transpose()?
            .unwrap_or_default();
        let dialect = lookup(DIALECT_VAR).unwrap_or_default();
        if dialect.chars().any(char::is_whitespace) {
            return Err(DiscoveryError::InvalidConfig(format!(
                "invalid dialect '{dialect}', expected a language code such as 'en'"
            )));
        }

        Ok(Self {
            log_level,
            tags: lookup(TAGS_VAR).unwrap_or_default(),
            dialect,
        })
    }

    /// Apply optional overrides to an existing configuration.
    ///
    /// This is intended for CLI overrides that should take precedence over
    /// environment-based defaults.
    #[must_use]
    pub fn apply_overrides(
        mut self,
        log_level: Option<LogLevel>,
        tags: Option<String>,
        dialect: Option<String>,
    ) -> Self {
        if let Some(level) = log_level {
            self.log_level = level;
        }
        if let Some(tags) = tags {
            self.tags = tags;
        }
        if let Some(dialect) = dialect {
            self.dialect = dialect;
        }
        self
    }

    /// Create a new configuration with the specified log level.
    #[must_use]
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }
}
