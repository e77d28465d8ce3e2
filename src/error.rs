//! Domain-specific error types for repo-priority.
//!
//! Library modules return these typed errors. The binary converts them to
//! [`anyhow::Error`] at the command boundary with the `?` operator.
//!
//! ```text
//! ReorderError   : reading, rotating and writing pacman.conf files
//! SettingsError  : loading the optional TOML settings file
//! ```
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reordering a pacman configuration file.
#[derive(Error, Debug)]
pub enum ReorderError {
    /// The source configuration could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A pending output file could not be moved aside.
    #[error("failed to rotate {} to {}: {source}", .from.display(), .to.display())]
    Rotate {
        /// Existing output file.
        from: PathBuf,
        /// Backup destination.
        to: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The rewritten configuration could not be written.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        /// Output file that was being written.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The target section exists but there is no boundary section to move it
    /// in front of.
    #[error("section [{boundary}] not found; refusing to drop section [{target}]")]
    BoundaryMissing {
        /// Section that was to be moved.
        target: String,
        /// Section it should have been moved in front of.
        boundary: String,
    },
}

/// Errors raised while loading the settings file.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The settings file exists but could not be read.
    #[error("failed to read settings file {}: {source}", .path.display())]
    Read {
        /// Settings file path.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The settings file is not valid TOML or has unexpected keys.
    #[error("invalid settings file {}: {source}", .path.display())]
    Parse {
        /// Settings file path.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },
}
