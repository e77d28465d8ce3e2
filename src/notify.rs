//! User notification after the configuration was rewritten.
use std::path::Path;

use crate::exec::Executor;
use crate::logging::Log;

/// Desktop notifier shipped with the distribution.
pub const NOTIFIER: &str = "/usr/bin/antergos-notify.sh";

/// Set by the system installer while it runs; no desktop exists yet.
pub const INSTALLER_ENV: &str = "CNCHI_RUNNING";

/// Variables that indicate a graphical session.
const DISPLAY_ENV: [&str; 2] = ["DISPLAY", "WAYLAND_DISPLAY"];

/// Title line of the notice banner.
pub const NOTICE_SUBJECT: &str = "ATTENTION: Antergos System Message";

const WIKI_URL: &str = "https://antergos.com/wiki/antergos-repo-priority";

/// What the process environment says about how it was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Session {
    /// A graphical display is available.
    pub graphical: bool,
    /// The system installer is running.
    pub installer: bool,
}

impl Session {
    /// Inspect the current process environment.
    #[must_use]
    pub fn detect() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a session from an arbitrary variable lookup. Empty values count
    /// as unset.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let set = |key: &str| lookup(key).is_some_and(|value| !value.is_empty());
        Self {
            graphical: DISPLAY_ENV.iter().any(|key| set(key)),
            installer: set(INSTALLER_ENV),
        }
    }

    /// Whether the desktop notifier should be launched.
    #[must_use]
    pub const fn wants_desktop_notification(&self) -> bool {
        self.graphical && !self.installer
    }
}

/// Body of the notice banner shown after a rewrite. Empty strings are
/// spacer lines.
#[must_use]
pub fn notice_lines(target: &str, source: &Path, output: &Path) -> Vec<String> {
    let conf_name = source
        .file_name()
        .map_or_else(|| source.display().to_string(), |name| name.to_string_lossy().into_owned());
    vec![
        format!("The {target} repo priority has been updated."),
        format!("You should review the change in {}", output.display()),
        format!("and then update your {conf_name} accordingly."),
        String::new(),
        "For more information see:".to_string(),
        WIKI_URL.to_string(),
    ]
}

/// Print the notice banner through `log`.
pub fn print_notice(log: &dyn Log, target: &str, source: &Path, output: &Path) {
    log.stage(NOTICE_SUBJECT);
    for line in notice_lines(target, source, output) {
        log.notice(&line);
    }
}

/// Launch the desktop notifier. A failure is reported as a warning and
/// otherwise ignored.
pub fn send_desktop_notification(executor: &dyn Executor, log: &dyn Log) {
    log.debug(&format!("running {NOTIFIER}"));
    if let Err(e) = executor.run(NOTIFIER, &[]) {
        log.warn(&format!("desktop notification failed: {e:#}"));
    }
}
