//! CLI argument parsing and command dispatch

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::LevelFilter;

use vendor_fetch::config::Config;
use vendor_fetch::process::SystemRunner;
use vendor_fetch::repository::VcsEnv;
use vendor_fetch::vendor::Vendorer;

use crate::commands;

/// Vendor Fetch - Copy remote dependencies into a project's vendor tree
#[derive(Parser, Debug)]
#[command(name = "vendor-fetch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "info")]
    log_level: String,

    /// Project root holding the vendor directory and manifest
    #[arg(long, global = true, value_name = "DIR", default_value = ".")]
    project: PathBuf,

    /// Directory temporary working copies are checked out under.
    ///
    /// Overrides `temp_root` in `.vendor-fetch.yaml`; defaults to the system
    /// temp directory.
    #[arg(long, global = true, value_name = "DIR", env = "VENDOR_FETCH_TEMP")]
    temp_root: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show which repository an import path resolves to
    Resolve(commands::resolve::ResolveArgs),

    /// Vendor an import path into the project
    Fetch(commands::fetch::FetchArgs),

    /// Remove a vendored import path from the project
    Delete(commands::delete::DeleteArgs),

    /// List vendored dependencies
    List(commands::list::ListArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level)?;

        let config = Config::load(&self.project)
            .with_context(|| format!("loading configuration in {}", self.project.display()))?;
        let temp_root = self.temp_root.unwrap_or_else(|| config.temp_root());
        let env = VcsEnv::new(Arc::new(SystemRunner), temp_root);
        let vendorer = Vendorer::new(&self.project, &config, env)?;

        match self.command {
            Commands::Resolve(args) => commands::resolve::execute(&vendorer, args),
            Commands::Fetch(args) => commands::fetch::execute(&vendorer, args),
            Commands::Delete(args) => commands::delete::execute(&vendorer, args),
            Commands::List(args) => commands::list::execute(&vendorer, args),
        }
    }
}

fn init_logging(level: &str) -> Result<()> {
    let filter: LevelFilter = level
        .parse()
        .with_context(|| format!("invalid log level {:?}", level))?;
    env_logger::Builder::new()
        .filter_level(filter)
        .format_target(false)
        .format_timestamp(None)
        .parse_default_env()
        .try_init()?;
    Ok(())
}
