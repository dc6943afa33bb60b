mod export;
mod serve;

use crate::error::DashboardError;
use crate::util::parse_port;
use clap::Parser;
use ridership_core::config::DashboardConfig;
use std::path::PathBuf;
use tracing::{debug, warn};

pub use export::export;
pub use serve::serve;

#[derive(Parser, Debug)]
#[command(
    name = "ridership-dashboard",
    version,
    about = "Serve the route ridership segment dashboard.",
    long_about = "Loads the ridership spreadsheet, serves the interactive route and segment maps, \
                  and writes a static copy of the initial dashboard after the server stops."
)]
pub struct DashboardCli {
    /// Port to serve the dashboard on.
    #[arg(
        long_help = "Port to serve the dashboard on. A missing or unparseable value falls back to the configured port (8050 by default)."
    )]
    pub port: Option<String>,

    /// Path to a TOML config file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Ridership records, as a CSV export or an xlsx workbook.
    #[arg(short, long, env = "RIDERSHIP_DATA_FILE")]
    pub data_file: Option<PathBuf>,

    /// Address to bind the server to.
    #[arg(long, env = "RIDERSHIP_HOST")]
    pub host: Option<String>,

    /// Where to write the static dashboard after the server stops.
    #[arg(short, long)]
    pub export_file: Option<PathBuf>,

    /// Skip writing the static dashboard on shutdown.
    #[arg(long)]
    pub no_export: bool,

    /// Open the dashboard in the default browser once the server is listening.
    #[arg(long)]
    pub open: bool,

    /// Emit logs as JSON.
    #[arg(long)]
    pub log_json: bool,
}

impl DashboardCli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Merges the config file (if any) with flags and environment variables.
    /// Flags win over the file; the file wins over built-in defaults.
    pub fn resolve_config(&self) -> Result<DashboardConfig, DashboardError> {
        let mut config = match &self.config {
            Some(path) => {
                debug!("reading config from {}", path.display());
                DashboardConfig::from_file(path)?
            }
            None => DashboardConfig::default(),
        };

        if let Some(data_file) = &self.data_file {
            config.data_file = data_file.to_owned();
        }
        if let Some(host) = &self.host {
            config.host = host.to_owned();
        }
        if let Some(export_file) = &self.export_file {
            config.export_file = export_file.to_owned();
        }
        if let Some(raw) = &self.port {
            match parse_port(raw) {
                Some(port) => config.port = port,
                None => warn!(
                    "invalid port {raw:?}; falling back to port {}",
                    config.port
                ),
            }
        }

        Ok(config)
    }
}
