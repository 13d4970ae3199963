//! Launch flags
//!
//! cinelist is interactive only; flags just point it at files and a region.
//!
//! ```bash
//! cinelist
//! cinelist --region us --watchlist ./watchlist.json -vv
//! ```

use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "cinelist")]
#[command(author, version, about = "Search movies & shows, check streaming, keep a watchlist")]
pub struct Cli {
    /// Config file (default: ~/.config/cinelist/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Watchlist JSON file (overrides the config)
    #[arg(long, value_name = "PATH")]
    pub watchlist: Option<PathBuf>,

    /// Streaming region code, e.g. "in" or "us" (overrides the config)
    #[arg(long, value_name = "CODE")]
    pub region: Option<String>,

    /// Log file (default: ~/.local/share/cinelist/cinelist.log)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Apply flag overrides on top of a loaded config
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(region) = self.region.as_deref().map(str::trim) {
            if !region.is_empty() {
                config.region = region.to_lowercase();
            }
        }
        if let Some(path) = &self.watchlist {
            config.watchlist_path = Some(path.clone());
        }
    }
}
