use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::config::{ConfigOverrides, ENDPOINT_ENV};
use super::logging::LogDestination;

#[derive(Debug, Parser)]
#[command(name = "contact_app", version, about = "Formulaire de contact AMO DATA & IA")]
pub struct Cli {
    /// Configuration file (ron). Defaults to ./contact_app.ron when present.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// URL of the /send-email endpoint.
    #[arg(long, env = ENDPOINT_ENV, value_name = "URL")]
    pub endpoint: Option<String>,

    #[arg(long, value_enum, value_name = "DEST")]
    pub log: Option<LogDestination>,

    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Fill in and send the form interactively (default).
    Interactive,
    /// Send one message and exit: 0 on success, 1 on failure, 2 on missing fields.
    Send {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
    },
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            endpoint: self.endpoint.clone(),
            log_destination: self.log,
            log_level: self.log_level.clone(),
        }
    }
}
