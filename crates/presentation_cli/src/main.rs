//! PlotGuard CLI entry point

#![allow(clippy::print_stdout)]

use clap::Parser;
use infrastructure::{TelemetryConfig, init_telemetry};
use presentation_cli::{Cli, Commands, commands};

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_telemetry(&TelemetryConfig {
        log_filter: log_filter_from_verbosity(cli.verbose).to_string(),
        ..TelemetryConfig::default()
    })?;

    let output = match cli.command {
        Commands::Authorize {
            principal,
            resource,
            action,
        } => commands::authorize(&principal, &resource, action)?,
        Commands::Scope { principal, kind } => commands::scope(&principal, kind)?,
        Commands::Visible {
            principal,
            resources,
        } => commands::visible(&principal, &resources)?,
        Commands::Placement(command) => {
            let config = commands::load_config(cli.config.as_deref())?;
            commands::placement(&config, command)?
        },
        Commands::Boundary { target, geojson } => {
            let config = commands::load_config(cli.config.as_deref())?;
            commands::boundary(&config, target, geojson)?
        },
        Commands::Grants { role } => commands::grants(role),
        Commands::Status { url } => commands::status(&reqwest::Client::new(), &url).await?,
        Commands::Config => {
            let config = commands::load_config(cli.config.as_deref())?;
            commands::config(&config)?
        },
    };

    println!("{}", output.trim_end());
    Ok(())
}
