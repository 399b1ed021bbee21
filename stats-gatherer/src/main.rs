//! # Conviva Integration - Main Entry Point
//!
//! 1. Loads the YAML configuration and the API client credentials
//! 2. Queries the Conviva Insights API for every configured metric request
//! 3. Publishes the collected points as one JSON document on stdout
//!
//! Nothing is published when any step fails.

use clap::Parser;
use color_eyre::Result;
use conviva_api::ConvivaClient;
use conviva_collector_config::{
    Config,
    Credentials,
};
use eyre::bail;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
    Layer,
};

#[derive(Parser, Debug)]
#[command(name = "nri-conviva")]
#[command(about = "Conviva Insights metrics integration")]
struct Cli {
    /// Conviva API client ID
    #[arg(long, env = "CONVIVA_CLIENT_ID", default_value = "")]
    client_id: String,

    /// Conviva API client secret
    #[arg(long, env = "CONVIVA_CLIENT_SECRET", default_value = "", hide_env_values = true)]
    client_secret: String,

    /// Path to the YAML configuration
    #[arg(long, env = "CONVIVA_CONFIG_PATH")]
    config_path: Option<PathBuf>,

    /// Pretty-print the published JSON
    #[arg(long)]
    pretty: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Collect metrics (always on)
    #[arg(long)]
    metrics: bool,

    /// Print build information and exit
    #[arg(long)]
    show_version: bool,
}

fn init_logging(verbose: bool) -> Result<()> {
    color_eyre::install()?;
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_filter(filter))
        .with(tracing_error::ErrorLayer::default())
        .init();
    Ok(())
}

fn version_line() -> String {
    format!(
        "New Relic Conviva integration Version: {}, Platform: {}/{}",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH,
    )
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_version {
        println!("{}", version_line());
        return Ok(());
    }

    init_logging(cli.verbose)?;
    debug!("{}", version_line());

    let Some(config_path) = cli.config_path.as_deref() else {
        bail!("no config path specified");
    };
    let credentials = Credentials::new(cli.client_id, cli.client_secret);
    let config = Config::load(config_path, credentials)?;

    if cli.metrics {
        debug!("metric collection enabled");
    }

    let client = ConvivaClient::http(config.collector)?;
    conviva_stats_gatherer::run(client, &config.metrics, std::io::stdout().lock(), cli.pretty)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn metrics_flag_is_accepted() {
        let cli = Cli::try_parse_from(["nri-conviva", "--metrics", "--config-path", "conviva.yml"]).unwrap();
        assert!(cli.metrics);
        let help = Cli::command().render_long_help().to_string();
        assert!(help.contains("Collect metrics (always on)"));
    }
}
