//! Update command implementation: reorder the repositories and tell the user.
use anyhow::Result;
use std::path::PathBuf;

use crate::config::Settings;
use crate::exec::Executor;
use crate::logging::Log;
use crate::notify::{self, Session};
use crate::resources::repo_priority::RepoPriorityResource;
use crate::resources::{Applicable, ResourceChange};

/// How a run ended. Every variant is a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The configuration does not mention the target repository.
    NoTargetSection,
    /// The boundary repository is not configured; nothing is reordered.
    NoBoundarySection,
    /// The target repository already comes first.
    AlreadyOrdered,
    /// Reordering would not change a single byte.
    Unchanged,
    /// `--dry-run`: the rewrite was computed but not written.
    DryRun {
        /// File that would have been written.
        output: PathBuf,
    },
    /// The rewritten configuration was written.
    Rewritten {
        /// File that was written.
        output: PathBuf,
    },
}

/// Run the update command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be read or the output cannot
/// be rotated or written.
pub fn run(
    settings: &Settings,
    dry_run: bool,
    log: &dyn Log,
    executor: &dyn Executor,
    session: Session,
) -> Result<Outcome> {
    let target = settings.target_section.as_str();
    let boundary = settings.boundary_section.as_str();

    log.stage("Checking repository order");
    let resource = RepoPriorityResource::open(settings)?;
    let conf = resource.reorderer();
    log.info(&format!("reading {}", conf.source().display()));

    if !conf.has_target_section()? {
        log.info(&format!("no [{target}] repository configured, nothing to do"));
        return Ok(Outcome::NoTargetSection);
    }
    if conf.is_target_before_boundary()? {
        log.info(&format!("[{target}] already comes before [{boundary}]"));
        return Ok(Outcome::AlreadyOrdered);
    }
    if !conf.has_boundary_section()? {
        log.warn(&format!(
            "no [{boundary}] repository configured, leaving [{target}] where it is"
        ));
        return Ok(Outcome::NoBoundarySection);
    }

    let output = resource.output().to_path_buf();
    if dry_run {
        return Ok(match resource.pending_change()? {
            Some(text) => {
                log.dry_run(&format!(
                    "would move [{target}] above [{boundary}] and write {} lines to {}",
                    text.len(),
                    output.display()
                ));
                Outcome::DryRun { output }
            }
            None => {
                log.info("reordering would not change the file");
                Outcome::Unchanged
            }
        });
    }

    log.stage(&format!(
        "Changing {target} repo priority in {}",
        output.display()
    ));
    log.debug(&resource.description());
    match resource.apply()? {
        ResourceChange::Applied => {}
        ResourceChange::AlreadyCorrect => {
            log.info("reordering would not change the file");
            return Ok(Outcome::Unchanged);
        }
        ResourceChange::Skipped { reason } => {
            log.info(&reason);
            return Ok(Outcome::NoTargetSection);
        }
    }
    log.info(&format!("wrote {}", output.display()));

    notify::print_notice(log, target, &settings.pacman_conf, &output);
    if session.wants_desktop_notification() {
        notify::send_desktop_notification(executor, log);
    } else {
        log.debug("no graphical session or installer running, skipping desktop notification");
    }

    Ok(Outcome::Rewritten { output })
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::error::ReorderError;
    use crate::exec::MockExecutor;
    use crate::logging::{LogEntry, RecordingLog};
    use std::path::Path;

    const OUT_OF_ORDER: &str = "[options]\nArchitecture = auto\n\n[core]\nInclude = /etc/pacman.d/mirrorlist\n\n[antergos]\nInclude = /etc/pacman.d/antergos-mirrorlist\n";

    const DESKTOP: Session = Session {
        graphical: true,
        installer: false,
    };

    fn settings_with(dir: &Path, content: &str) -> Settings {
        let settings = Settings {
            pacman_conf: dir.join("pacman.conf"),
            ..Settings::default()
        };
        std::fs::write(&settings.pacman_conf, content).unwrap();
        settings
    }

    fn silent_executor() -> MockExecutor {
        let mut executor = MockExecutor::new();
        executor.expect_run().times(0);
        executor
    }

    // -----------------------------------------------------------------------
    // Early exits
    // -----------------------------------------------------------------------

    #[test]
    fn no_target_section_is_a_noop() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_with(dir.path(), "[core]\nInclude = m\n");
        let log = RecordingLog::default();

        let outcome = run(&settings, false, &log, &silent_executor(), DESKTOP).unwrap();

        assert_eq!(outcome, Outcome::NoTargetSection);
        assert!(!settings.output_path().exists());
    }

    #[test]
    fn already_ordered_is_a_noop() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_with(dir.path(), "[antergos]\nInclude = a\n\n[core]\nInclude = m\n");
        let log = RecordingLog::default();

        let outcome = run(&settings, false, &log, &silent_executor(), DESKTOP).unwrap();

        assert_eq!(outcome, Outcome::AlreadyOrdered);
        assert!(log.contains("already comes before [core]"));
        assert!(!settings.output_path().exists());
    }

    #[test]
    fn commented_target_only_is_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_with(dir.path(), "[core]\nInclude = m\n\n#[antergos]\n");
        let log = RecordingLog::default();

        let outcome = run(&settings, false, &log, &silent_executor(), DESKTOP).unwrap();

        assert_eq!(outcome, Outcome::Unchanged);
        assert!(!settings.output_path().exists());
    }

    #[test]
    fn missing_source_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            pacman_conf: dir.path().join("pacman.conf"),
            ..Settings::default()
        };
        let log = RecordingLog::default();

        let err = run(&settings, false, &log, &silent_executor(), DESKTOP).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ReorderError>(),
            Some(ReorderError::Read { .. })
        ));
    }

    #[test]
    fn missing_boundary_is_left_alone() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_with(
            dir.path(),
            "[options]\n[antergos]\nServer=x\n[extra]\nServer=z\n",
        );
        let log = RecordingLog::default();

        for dry_run in [true, false] {
            let outcome = run(&settings, dry_run, &log, &silent_executor(), DESKTOP).unwrap();
            assert_eq!(outcome, Outcome::NoBoundarySection, "dry_run: {dry_run}");
        }
        assert!(!settings.output_path().exists());
        assert!(
            log.entries()
                .iter()
                .any(|e| matches!(e, LogEntry::Warn(m) if m.contains("no [core] repository")))
        );
    }

    // -----------------------------------------------------------------------
    // Rewrite
    // -----------------------------------------------------------------------

    #[test]
    fn dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_with(dir.path(), OUT_OF_ORDER);
        let log = RecordingLog::default();

        let outcome = run(&settings, true, &log, &silent_executor(), DESKTOP).unwrap();

        assert_eq!(
            outcome,
            Outcome::DryRun {
                output: settings.output_path()
            }
        );
        assert!(!settings.output_path().exists());
        assert!(
            log.entries()
                .iter()
                .any(|e| matches!(e, LogEntry::DryRun(m) if m.contains("would move [antergos]")))
        );
    }

    #[test]
    fn rewrite_writes_output_and_notifies() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_with(dir.path(), OUT_OF_ORDER);
        let log = RecordingLog::default();
        let mut executor = MockExecutor::new();
        executor
            .expect_run()
            .withf(|program, _| program == notify::NOTIFIER)
            .times(1)
            .returning(|_, _| Err(anyhow::anyhow!("no notifier here")));

        let outcome = run(&settings, false, &log, &executor, DESKTOP).unwrap();

        assert_eq!(
            outcome,
            Outcome::Rewritten {
                output: settings.output_path()
            }
        );
        let written = std::fs::read_to_string(settings.output_path()).unwrap();
        assert!(written.find("[antergos]").unwrap() < written.find("[core]").unwrap());
        assert_eq!(
            std::fs::read_to_string(&settings.pacman_conf).unwrap(),
            OUT_OF_ORDER,
            "pacman.conf must never be modified"
        );
        assert!(log.contains("The antergos repo priority has been updated."));
        assert!(log.contains("desktop notification failed"));
    }

    #[test]
    fn installer_session_skips_notifier() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_with(dir.path(), OUT_OF_ORDER);
        let log = RecordingLog::default();
        let session = Session {
            graphical: true,
            installer: true,
        };

        let outcome = run(&settings, false, &log, &silent_executor(), session).unwrap();

        assert!(matches!(outcome, Outcome::Rewritten { .. }));
        assert!(log.contains("skipping desktop notification"));
    }

    #[test]
    fn pending_output_is_reordered_and_rotated() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_with(dir.path(), "[core]\n");
        std::fs::write(settings.output_path(), OUT_OF_ORDER).unwrap();
        let log = RecordingLog::default();

        run(&settings, false, &log, &silent_executor(), Session::default()).unwrap();

        let backup = dir.path().join("pacman.conf.pacnew.old");
        assert_eq!(std::fs::read_to_string(backup).unwrap(), OUT_OF_ORDER);
        let written = std::fs::read_to_string(settings.output_path()).unwrap();
        assert!(written.starts_with("[options]\nArchitecture = auto\n\n[antergos]\n"));
    }

    #[test]
    fn second_run_is_already_ordered() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_with(dir.path(), OUT_OF_ORDER);
        let log = RecordingLog::default();

        run(&settings, false, &log, &silent_executor(), Session::default()).unwrap();
        let again = run(&settings, false, &log, &silent_executor(), Session::default()).unwrap();

        assert_eq!(again, Outcome::AlreadyOrdered);
        assert!(!dir.path().join("pacman.conf.pacnew.old").exists());
    }
}
