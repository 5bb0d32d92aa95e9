//! Argument parsing and dispatch for the `bdd-discover` entrypoint.

use std::io::{self, Read};

use bdd_discovery::config::{DiscoveryConfig, LogLevel};
use bdd_discovery::logging::init_logging;
use bdd_discovery::{AmbientFs, Feature, FeatureContent, FeatureDiscovery};
use camino::Utf8PathBuf;
use clap::Parser;
use eyre::{Context, Result};
use tracing::info;

use crate::output::write_features;

/// List the Gherkin features and scenarios a test run would select.
#[derive(Parser, Debug)]
#[command(name = "bdd-discover", version, about)]
pub(crate) struct Cli {
    /// Directory that relative specifiers are resolved against; absolute
    /// specifiers ignore it.
    #[arg(long, default_value = ".")]
    root: Utf8PathBuf,
    /// Tag expression, e.g. "@smoke and not @wip".
    #[arg(long)]
    tags: Option<String>,
    /// Gherkin dialect used for files without a `# language:` header.
    #[arg(long)]
    dialect: Option<String>,
    /// Log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<LogLevel>,
    /// Read a single feature from stdin and report it under this name.
    #[arg(long, value_name = "NAME", conflicts_with = "paths")]
    stdin_name: Option<String>,
    /// Feature files or directories, optionally suffixed with `:<line>`.
    #[arg(value_name = "PATH", required_unless_present = "stdin_name")]
    paths: Vec<String>,
}

/// Parse arguments, run discovery and print the listing to stdout.
pub(crate) fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = DiscoveryConfig::from_env()?.apply_overrides(
        cli.log_level,
        cli.tags.clone(),
        cli.dialect.clone(),
    );
    init_logging(&config);
    info!(version = env!("CARGO_PKG_VERSION"), "starting bdd-discover");

    let features = discover(&cli, &config)?;
    let mut stdout = io::stdout().lock();
    write_features(&mut stdout, &features)
}

fn discover(cli: &Cli, config: &DiscoveryConfig) -> Result<Vec<Feature>> {
    let discovery = FeatureDiscovery::default().with_dialect(config.dialect.as_str());
    if let Some(name) = &cli.stdin_name {
        let mut contents = Vec::new();
        io::stdin()
            .read_to_end(&mut contents)
            .wrap_err("failed to read feature from stdin")?;
        let content = FeatureContent::new(name.as_str(), contents);
        return Ok(discovery.parse_from_bytes(&config.tags, &[content])?);
    }

    let metadata = std::fs::metadata(&cli.root)
        .wrap_err_with(|| format!("failed to open root directory {}", cli.root))?;
    eyre::ensure!(metadata.is_dir(), "root {} is not a directory", cli.root);
    let fs = AmbientFs::new(cli.root.clone());
    Ok(discovery.parse_features(&fs, &config.tags, &cli.paths)?)
}
