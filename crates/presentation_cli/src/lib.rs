//! PlotGuard CLI
//!
//! Offline policy and placement checks against the same services the
//! server runs, plus a readiness probe for a running server.

pub mod cli;
pub mod commands;
pub mod geojson;

pub use cli::{BoundaryCommand, Cli, Commands, PlacementCommand};
