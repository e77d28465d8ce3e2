// Shared helpers for integration tests.
//
// Provides a temporary directory holding a pacman.conf, a fluent builder for
// the optional pending `.pacnew` copy and settings file, and in-memory stand-ins
// for the logger and process executor.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use repo_priority::config::Settings;
use repo_priority::exec::{ExecResult, Executor};
use repo_priority::logging::Log;

/// A stock Antergos pacman.conf with `[antergos]` listed last.
pub const STOCK_PACMAN_CONF: &str = include_str!("../fixtures/pacman.conf");

/// An isolated system root backed by a [`tempfile::TempDir`].
pub struct IntegrationTestContext {
    /// Temporary directory standing in for `/etc`.
    pub root: tempfile::TempDir,
}

impl IntegrationTestContext {
    /// Create a context whose pacman.conf is [`STOCK_PACMAN_CONF`].
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        std::fs::write(root.path().join("pacman.conf"), STOCK_PACMAN_CONF)
            .expect("write pacman.conf");
        Self { root }
    }

    /// Path to the temporary root.
    pub fn root_path(&self) -> &Path {
        self.root.path()
    }

    /// Path of the inspected pacman.conf.
    pub fn pacman_conf(&self) -> PathBuf {
        self.root.path().join("pacman.conf")
    }

    /// Default settings pointed at this context's pacman.conf.
    pub fn settings(&self) -> Settings {
        Settings {
            pacman_conf: self.pacman_conf(),
            ..Settings::default()
        }
    }

    /// Path of the rewritten copy.
    pub fn output(&self) -> PathBuf {
        self.settings().output_path()
    }

    /// Path the pending copy is moved to before it is replaced.
    pub fn backup(&self) -> PathBuf {
        self.root.path().join("pacman.conf.pacnew.old")
    }

    /// Read a file under the root.
    pub fn read(&self, path: &Path) -> String {
        std::fs::read_to_string(path).expect("read file")
    }
}

/// Fluent builder for [`IntegrationTestContext`].
pub struct TestContextBuilder {
    ctx: IntegrationTestContext,
}

impl TestContextBuilder {
    /// Begin building a context with the stock pacman.conf.
    pub fn new() -> Self {
        Self {
            ctx: IntegrationTestContext::new(),
        }
    }

    /// Replace pacman.conf with `content`.
    pub fn with_pacman_conf(self, content: &str) -> Self {
        std::fs::write(self.ctx.pacman_conf(), content).expect("write pacman.conf");
        self
    }

    /// Leave a pending `pacman.conf.pacnew` with `content`.
    pub fn with_pending(self, content: &str) -> Self {
        std::fs::write(self.ctx.output(), content).expect("write pacman.conf.pacnew");
        self
    }

    /// Write a settings file named `repo-priority.toml` into the root.
    pub fn with_settings_file(self, content: &str) -> Self {
        std::fs::write(self.ctx.root.path().join("repo-priority.toml"), content)
            .expect("write settings file");
        self
    }

    /// Finish building and return the configured context.
    pub fn build(self) -> IntegrationTestContext {
        self.ctx
    }
}

/// [`Log`] that keeps `(level, message)` pairs for assertions.
#[derive(Debug, Default)]
pub struct CapturedLog {
    lines: Mutex<Vec<(&'static str, String)>>,
}

impl CapturedLog {
    /// All captured messages of `level` in order.
    pub fn at(&self, level: &str) -> Vec<String> {
        self.lines
            .lock()
            .expect("log mutex")
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    fn push(&self, level: &'static str, msg: &str) {
        self.lines
            .lock()
            .expect("log mutex")
            .push((level, msg.to_string()));
    }
}

impl Log for CapturedLog {
    fn stage(&self, msg: &str) {
        self.push("stage", msg);
    }
    fn info(&self, msg: &str) {
        self.push("info", msg);
    }
    fn debug(&self, msg: &str) {
        self.push("debug", msg);
    }
    fn warn(&self, msg: &str) {
        self.push("warn", msg);
    }
    fn error(&self, msg: &str) {
        self.push("error", msg);
    }
    fn dry_run(&self, msg: &str) {
        self.push("dry_run", msg);
    }
    fn notice(&self, msg: &str) {
        self.push("notice", msg);
    }
}

/// [`Executor`] that records the programs it was asked to run.
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    programs: Mutex<Vec<String>>,
    calls: AtomicUsize,
    fail: bool,
}

impl RecordingExecutor {
    /// An executor whose every run fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Number of runs requested so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Programs requested so far, in order.
    pub fn programs(&self) -> Vec<String> {
        self.programs.lock().expect("executor mutex").clone()
    }
}

impl Executor for RecordingExecutor {
    fn run(&self, program: &str, _: &[&str]) -> anyhow::Result<ExecResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.programs
            .lock()
            .expect("executor mutex")
            .push(program.to_string());
        if self.fail {
            anyhow::bail!("{program} failed (exit 1): not installed");
        }
        Ok(ExecResult {
            stdout: String::new(),
            stderr: String::new(),
            success: true,
            code: Some(0),
        })
    }
}
