//! CLI for the EPIC imagery mirror.

mod commands;

use anyhow::Result;
use clap::Parser;
use epic_core::config;
use std::path::PathBuf;

use commands::run_sync;

/// Mirror NASA EPIC natural-color imagery into `<DIR>/EPIC/`.
///
/// Quality, metadata persistence and the API base URL are read from
/// `~/.config/epic-mirror/config.toml` (created with defaults on first run).
#[derive(Debug, Parser)]
#[command(name = "epic-mirror")]
#[command(about = "Incrementally mirror NASA EPIC imagery to local disk", long_about = None)]
pub struct Cli {
    /// Base directory under which `EPIC/` is created (default: current directory).
    pub dir: Option<PathBuf>,
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        let base_dir = match cli.dir {
            Some(dir) => dir,
            None => std::env::current_dir()?,
        };
        run_sync(&cfg, &base_dir)
    }
}
