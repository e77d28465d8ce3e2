//! Repository priority resource: the target section of pacman.conf must come
//! before the boundary section.
use anyhow::Result;
use std::path::{Path, PathBuf};

use super::helpers::fs::{rotate_existing, write_text};
use super::{Applicable, Resource, ResourceChange, ResourceState};
use crate::config::Settings;
use crate::error::ReorderError;
use crate::reorder::{ConfigReorderer, ConfigText};

/// A pacman.conf whose target repository should be listed ahead of the
/// boundary repository.
///
/// Applying the resource never touches the source file. The rewritten
/// configuration goes to a side file; a pending side file from an earlier
/// run is moved aside first. A configuration without the target or the
/// boundary section is reported as [`ResourceState::Invalid`] and skipped by
/// [`Applicable::apply`].
#[derive(Debug)]
pub struct RepoPriorityResource {
    conf: ConfigReorderer,
    output: PathBuf,
    backup_suffix: String,
}

impl RepoPriorityResource {
    /// Create a resource that reads through `conf` and writes to `output`.
    #[must_use]
    pub fn new(
        conf: ConfigReorderer,
        output: impl Into<PathBuf>,
        backup_suffix: impl Into<String>,
    ) -> Self {
        Self {
            conf,
            output: output.into(),
            backup_suffix: backup_suffix.into(),
        }
    }

    /// Build the resource described by `settings`, choosing the source file.
    ///
    /// A pending rewritten copy (e.g. `pacman.conf.pacnew` left by pacman or
    /// by an earlier run) that mentions the target section is newer than
    /// pacman.conf, so it becomes the source. Otherwise pacman.conf is read.
    ///
    /// # Errors
    ///
    /// Returns [`ReorderError::Read`] if the pending copy exists but cannot be
    /// read.
    pub fn open(settings: &Settings) -> Result<Self, ReorderError> {
        let output = settings.output_path();
        let pending = ConfigReorderer::new(
            &output,
            &settings.target_section,
            &settings.boundary_section,
        );
        let conf = if output.is_file() && pending.has_target_section()? {
            pending
        } else {
            ConfigReorderer::new(
                &settings.pacman_conf,
                &settings.target_section,
                &settings.boundary_section,
            )
        };
        Ok(Self::new(conf, output, &settings.backup_suffix))
    }

    /// The reorderer this resource reads through.
    #[must_use]
    pub const fn reorderer(&self) -> &ConfigReorderer {
        &self.conf
    }

    /// Where the rewritten configuration is written.
    #[must_use]
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Compute the rewritten configuration, or `None` if it would be
    /// byte-identical to the current one.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read or the boundary section
    /// is missing.
    pub fn pending_change(&self) -> Result<Option<ConfigText>, ReorderError> {
        let current = self.conf.load()?;
        let reordered = self.conf.reorder()?;
        Ok((reordered != *current).then_some(reordered))
    }
}

impl Applicable for RepoPriorityResource {
    fn description(&self) -> String {
        format!(
            "[{}] before [{}] in {}",
            self.conf.target(),
            self.conf.boundary(),
            self.conf.source().display()
        )
    }

    fn apply(&self) -> Result<ResourceChange> {
        if !self.conf.has_target_section()? {
            return Ok(ResourceChange::Skipped {
                reason: format!(
                    "no [{}] section in {}",
                    self.conf.target(),
                    self.conf.source().display()
                ),
            });
        }
        if !self.conf.has_boundary_section()? {
            return Ok(ResourceChange::Skipped {
                reason: format!(
                    "no [{}] section in {}",
                    self.conf.boundary(),
                    self.conf.source().display()
                ),
            });
        }
        let Some(reordered) = self.pending_change()? else {
            return Ok(ResourceChange::AlreadyCorrect);
        };
        rotate_existing(&self.output, &self.backup_suffix)?;
        write_text(&self.output, &reordered.render())?;
        Ok(ResourceChange::Applied)
    }
}

impl Resource for RepoPriorityResource {
    fn current_state(&self) -> Result<ResourceState> {
        let target = self.conf.target();
        let boundary = self.conf.boundary();
        let source = self.conf.source().display();

        if !self.conf.has_target_section()? {
            return Ok(ResourceState::Invalid {
                reason: format!("no [{target}] section in {source}"),
            });
        }
        if self.conf.is_target_before_boundary()? {
            return Ok(ResourceState::Correct);
        }
        if !self.conf.has_boundary_section()? {
            return Ok(ResourceState::Invalid {
                reason: format!("no [{boundary}] section in {source}"),
            });
        }
        Ok(ResourceState::Incorrect {
            current: format!("[{boundary}] is listed before [{target}] in {source}"),
        })
    }
}
