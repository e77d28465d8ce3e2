//! Command-line interface.
use clap::Parser;
use std::path::PathBuf;

use crate::config::{DEFAULT_SETTINGS_PATH, Settings};
use crate::error::SettingsError;

/// Version reported by `--version`: the packaging or `git describe` string
/// when available, else the crate version.
pub const VERSION: &str = match option_env!("REPO_PRIORITY_VERSION") {
    Some(version) => version,
    None => env!("CARGO_PKG_VERSION"),
};

/// Top-level CLI entry point.
#[derive(Parser, Debug)]
#[command(
    name = "repo-priority",
    about = "Keeps the antergos repository ahead of the Arch repositories in pacman.conf",
    version = VERSION
)]
pub struct Cli {
    /// Ignored. Older package hooks pass a positional argument.
    #[arg(hide = true)]
    pub legacy: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Preview changes without writing
    #[arg(short = 'd', long)]
    pub dry_run: bool,

    /// Settings file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// pacman configuration to inspect
    #[arg(long, value_name = "PATH")]
    pub pacman_conf: Option<PathBuf>,
}

impl Cli {
    /// Load the settings file and apply command-line overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file exists but is unreadable or
    /// invalid.
    pub fn settings(&self) -> Result<Settings, SettingsError> {
        let path = self
            .config
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH));
        let mut settings = Settings::load(&path)?;
        if let Some(conf) = &self.pacman_conf {
            settings.pacman_conf.clone_from(conf);
        }
        Ok(settings)
    }
}
