//! Console and file logger used by the command driver.
use std::path::PathBuf;

use super::subscriber::{DRY_RUN_TARGET, NOTICE_TARGET, STAGE_TARGET};
use super::types::Log;
use super::utils::log_file_path;

/// Implement [`Log`] methods as `tracing` events, optionally on a dedicated
/// target that the formatters render specially.
macro_rules! tracing_log_methods {
    ($($method:ident => $macro:ident $(($target:expr))?),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                tracing::$macro!($(target: $target,)? "{msg}");
            }
        )+
    };
}

/// Structured logger that routes every message through [`tracing`].
///
/// All messages are also written to a persistent log file at
/// `$XDG_CACHE_HOME/repo-priority/<command>.log` as plain timestamped lines,
/// regardless of the verbose flag.
#[derive(Debug)]
pub struct Logger {
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a new logger.
    ///
    /// The log file itself is created by
    /// [`init_subscriber`](super::subscriber::init_subscriber); this
    /// constructor only remembers where it lives.
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self {
            log_file: log_file_path(command),
        }
    }

    /// Return the log file path, if available.
    #[must_use]
    pub const fn log_path(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }
}

impl Log for Logger {
    tracing_log_methods! {
        error   => error,
        warn    => warn,
        stage   => info(STAGE_TARGET),
        info    => info,
        debug   => debug,
        dry_run => info(DRY_RUN_TARGET),
        notice  => info(NOTICE_TARGET),
    }
}
