use crate::config::toml_config::TomlConfig;
use crate::config::{Overrides, Settings};
use crate::utils::error::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "venue-trends")]
#[command(about = "Rank venues by their restroom reviews")]
pub struct CliConfig {
    /// JSON file with venues and reviews (defaults to the bundled sample)
    #[arg(long)]
    pub data: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Reference time for recency, RFC 3339 or YYYY-MM-DD (defaults to now)
    #[arg(long)]
    pub now: Option<String>,

    /// Show at most this many venues
    #[arg(long)]
    pub limit: Option<usize>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List venues by trend score (default)
    Trending,
    /// Show one venue with its dimension scores and reviews
    Details { id: String },
    /// Find venues by name
    Search {
        #[arg(default_value = "")]
        query: String,
    },
}

impl CliConfig {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Trending)
    }

    /// Loads the config file if one was given and applies the flags on top.
    pub fn settings(&self) -> Result<Settings> {
        let base = match &self.config {
            Some(path) => {
                tracing::info!("Loading configuration from {}", path);
                Settings::from_toml(&TomlConfig::from_file(path)?)?
            }
            None => Settings::default(),
        };

        base.apply(&Overrides {
            data: self.data.clone(),
            now: self.now.clone(),
            limit: self.limit,
        })
    }
}
