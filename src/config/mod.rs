//! Run settings: which file to edit and which sections to order.
pub mod toml_loader;

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::SettingsError;
use crate::resources::helpers::fs::append_suffix;

/// Settings file read when `--config` is not given. Its absence is normal.
pub const DEFAULT_SETTINGS_PATH: &str = "/etc/repo-priority.toml";

/// Tunable parameters of a run.
///
/// Every field has a default matching a stock Antergos install, so an empty
/// or missing settings file is valid.
///
/// ```toml
/// pacman-conf = "/etc/pacman.conf"
/// output-suffix = ".pacnew"
/// backup-suffix = ".old"
/// target-section = "antergos"
/// boundary-section = "core"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct Settings {
    /// The pacman configuration that is inspected. Never written.
    pub pacman_conf: PathBuf,
    /// Suffix appended to `pacman_conf` to name the rewritten copy.
    pub output_suffix: String,
    /// Suffix appended to a pending rewritten copy before it is replaced.
    pub backup_suffix: String,
    /// Section that must come first.
    pub target_section: String,
    /// Section the target must precede.
    pub boundary_section: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pacman_conf: PathBuf::from("/etc/pacman.conf"),
            output_suffix: ".pacnew".to_string(),
            backup_suffix: ".old".to_string(),
            target_section: "antergos".to_string(),
            boundary_section: "core".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, falling back to defaults for a missing file
    /// or missing keys.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        toml_loader::load_config(path)
    }

    /// Path of the rewritten copy, e.g. `/etc/pacman.conf.pacnew`.
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        append_suffix(&self.pacman_conf, &self.output_suffix)
    }
}
