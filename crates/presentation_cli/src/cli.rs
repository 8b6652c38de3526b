//! Command-line definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use domain::{Action, Coordinates, ResourceKind, Role};

pub const DEFAULT_SERVER_URL: &str = "http://localhost:3000";

/// PlotGuard CLI
#[derive(Debug, Parser)]
#[command(name = "plotguard-cli")]
#[command(author, version, about = "PlotGuard policy and placement CLI", long_about = None)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (defaults to ./config.toml when present)
    #[arg(short, long, global = true, env = "PLOTGUARD_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Decide whether a principal may act on a resource
    ///
    /// Principal and resource are JSON, inline or `@path/to/file.json`.
    /// Example: plotguard-cli authorize --principal @admin.json --resource '{"kind":"plot","id":"p1"}' --action delete
    Authorize {
        #[arg(short, long)]
        principal: String,

        #[arg(short, long)]
        resource: String,

        #[arg(short, long, value_parser = parse_action)]
        action: Action,
    },

    /// Show the read scope of a principal over one resource kind
    Scope {
        #[arg(short, long)]
        principal: String,

        #[arg(short, long, value_parser = parse_kind)]
        kind: ResourceKind,
    },

    /// Filter a JSON array of resources down to those a principal may read
    Visible {
        #[arg(short, long)]
        principal: String,

        /// JSON array, inline or `@file`
        #[arg(short, long)]
        resources: String,
    },

    /// Check a location against its parent boundary
    #[command(subcommand)]
    Placement(PlacementCommand),

    /// Print a boundary polygon
    Boundary {
        #[command(subcommand)]
        target: BoundaryCommand,

        /// Emit a GeoJSON Feature instead of the boundary document
        #[arg(long, global = true)]
        geojson: bool,
    },

    /// Print the grant table
    Grants {
        /// Only rows for this role
        #[arg(short, long, value_parser = parse_role)]
        role: Option<Role>,
    },

    /// Query a running server's readiness
    Status {
        /// Server URL
        #[arg(short, long, default_value = DEFAULT_SERVER_URL)]
        url: String,
    },

    /// Print the effective configuration as TOML
    Config,
}

#[derive(Debug, Subcommand)]
pub enum PlacementCommand {
    /// A plant inside its plot
    Plant {
        /// `lat,lng` of the plant
        #[arg(value_parser = parse_coordinates, allow_hyphen_values = true)]
        point: Coordinates,

        /// `lat,lng` of the plot center
        #[arg(long, value_parser = parse_coordinates, allow_hyphen_values = true)]
        plot_center: Coordinates,

        /// Plot area in square meters
        #[arg(long)]
        plot_size: Option<f64>,
    },

    /// A plot inside its domain
    Plot {
        #[arg(value_parser = parse_coordinates, allow_hyphen_values = true)]
        point: Coordinates,

        #[arg(long, value_parser = parse_coordinates, allow_hyphen_values = true)]
        domain_center: Coordinates,

        /// Area of each plot already in the domain, repeatable
        #[arg(long = "plot-size")]
        plot_sizes: Vec<f64>,
    },

    /// A domain inside the configured region
    Domain {
        #[arg(value_parser = parse_coordinates, allow_hyphen_values = true)]
        point: Coordinates,
    },
}

#[derive(Debug, Subcommand)]
pub enum BoundaryCommand {
    /// Square around a plot center
    Plot {
        #[arg(value_parser = parse_coordinates, allow_hyphen_values = true)]
        center: Coordinates,

        #[arg(long)]
        size: Option<f64>,
    },

    /// Circle around a domain center sized by its plots
    Domain {
        #[arg(value_parser = parse_coordinates, allow_hyphen_values = true)]
        center: Coordinates,

        #[arg(long = "plot-size")]
        plot_sizes: Vec<f64>,
    },

    /// The configured region
    Region,
}

/// Parse `lat,lng`
///
/// Range checks are left to the placement service so out-of-range points
/// get the same answer as over HTTP.
pub fn parse_coordinates(value: &str) -> Result<Coordinates, String> {
    let (lat, lng) = value
        .split_once(',')
        .ok_or_else(|| format!("expected `lat,lng`, got `{value}`"))?;
    let latitude = lat
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid latitude `{lat}`: {e}"))?;
    let longitude = lng
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid longitude `{lng}`: {e}"))?;
    Ok(Coordinates::new(latitude, longitude))
}

fn parse_role(value: &str) -> Result<Role, String> {
    value.parse().map_err(|e: domain::DomainError| e.to_string())
}

fn parse_kind(value: &str) -> Result<ResourceKind, String> {
    value.parse().map_err(|e: domain::DomainError| e.to_string())
}

fn parse_action(value: &str) -> Result<Action, String> {
    Action::ALL
        .into_iter()
        .find(|action| action.as_str().eq_ignore_ascii_case(value))
        .ok_or_else(|| format!("unknown action `{value}` (create, read, update, delete)"))
}
