//! Structured logging for the discovery binary.
//!
//! Logs go to stderr so that the feature listing on stdout stays
//! machine-readable.

use tracing_subscriber::EnvFilter;

use crate::config::DiscoveryConfig;

fn filter_from_config(config: &DiscoveryConfig) -> EnvFilter {
    EnvFilter::new(config.log_level.as_filter_str())
}

/// Initialise the logging subsystem based on configuration.
///
/// Log level precedence (highest to lowest):
///
/// 1. CLI `--log-level` (parsed into `config.log_level`)
/// 2. `BDD_DISCOVERY_LOG_LEVEL` (parsed into `config.log_level`)
/// 3. Default configuration value
///
/// If a global subscriber is already set, this function silently ignores
/// the error, so calling it twice is harmless.
pub fn init_logging(config: &DiscoveryConfig) {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter_from_config(config))
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .finish();

    // The first subscriber wins.
    let _ = tracing::subscriber::set_global_default(subscriber);
}
