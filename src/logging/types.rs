//! The [`Log`] trait shared by the console logger and test recorders.

/// Abstraction over logging backends.
///
/// [`Logger`](super::logger::Logger) sends every message through `tracing`.
/// Code that reports progress takes `&dyn Log` so tests can capture the
/// messages instead.
pub trait Log: Send + Sync {
    /// Log a stage header (major step of the run).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (suppressed on console unless verbose).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Log an action that was skipped because of `--dry-run`.
    fn dry_run(&self, msg: &str);
    /// Log one line of the user-facing notice banner.
    fn notice(&self, msg: &str);
}
