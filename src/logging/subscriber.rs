//! Tracing subscriber setup: console formatter, file layer, and initialisation.
use std::fmt::Write as _;
use std::fs;
use std::io::Write as _;
use std::path::Path;
use std::sync::Mutex;

use tracing::{Level, Metadata};

use super::utils::{format_utc_datetime, format_utc_time, log_file_path};

/// Target for stage headers.
pub(super) const STAGE_TARGET: &str = "repo_priority::stage";
/// Target for actions suppressed by `--dry-run`.
pub(super) const DRY_RUN_TARGET: &str = "repo_priority::dry_run";
/// Target for the user-facing notice banner.
pub(super) const NOTICE_TARGET: &str = "repo_priority::notice";

/// Environment variable holding an `EnvFilter` directive for the console,
/// e.g. `REPO_PRIORITY_LOG=debug`.
const FILTER_ENV: &str = "REPO_PRIORITY_LOG";

/// How an event is rendered, decided once from its level and target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Error,
    Warn,
    Stage,
    DryRun,
    Notice,
    Info,
    Debug,
}

impl Kind {
    fn of(metadata: &Metadata<'_>) -> Self {
        match (*metadata.level(), metadata.target()) {
            (Level::ERROR, _) => Self::Error,
            (Level::WARN, _) => Self::Warn,
            (Level::INFO, STAGE_TARGET) => Self::Stage,
            (Level::INFO, DRY_RUN_TARGET) => Self::DryRun,
            (Level::INFO, NOTICE_TARGET) => Self::Notice,
            (Level::INFO, _) => Self::Info,
            _ => Self::Debug,
        }
    }

    /// Plain-text prefix used in the log file.
    const fn file_prefix(self) -> &'static str {
        match self {
            Self::Error => "    [error] ",
            Self::Warn => "    [warn] ",
            Self::Stage => "==> ",
            Self::DryRun => "    [dry run] ",
            Self::Notice => "    [notice] ",
            Self::Info => "    ",
            Self::Debug => "    [debug] ",
        }
    }

    /// Colored console line for `msg`.
    fn console_line(self, msg: &str) -> String {
        match self {
            Self::Error => format!("\x1b[31mERROR\x1b[0m {msg}"),
            Self::Warn => format!("\x1b[33mWARN\x1b[0m  {msg}"),
            Self::Stage => format!("\x1b[1;34m==>\x1b[0m \x1b[1m{msg}\x1b[0m"),
            Self::DryRun => format!("  \x1b[33m[DRY RUN]\x1b[0m {msg}"),
            Self::Notice if msg.is_empty() => "\x1b[1;31m*\x1b[0m".to_string(),
            Self::Notice => format!("\x1b[1;31m*\x1b[0m {msg}"),
            Self::Info => format!("  {msg}"),
            Self::Debug => format!("  \x1b[2m{msg}\x1b[0m"),
        }
    }
}

/// Extracts the `message` field from a [`tracing::Event`].
#[derive(Default)]
struct MessageExtractor {
    message: String,
}

impl MessageExtractor {
    fn extract(event: &tracing::Event<'_>) -> String {
        let mut extractor = Self::default();
        event.record(&mut extractor);
        extractor.message
    }
}

impl tracing::field::Visit for MessageExtractor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message.clear();
            let _ = write!(self.message, "{value:?}");
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            value.clone_into(&mut self.message);
        }
    }
}

/// A [`tracing_subscriber::Layer`] that appends every event to the run's log
/// file, timestamped. Colour is only added by [`ConsoleFormatter`], so file
/// lines are plain text.
#[derive(Debug)]
pub(super) struct FileLayer {
    file: Mutex<fs::File>,
}

impl FileLayer {
    /// Start a fresh log file for `command` under the cache directory.
    ///
    /// Returns `None` if the cache directory cannot be created or the file
    /// cannot be opened; logging then goes to the console only.
    pub(super) fn new(command: &str) -> Option<Self> {
        Self::create(&log_file_path(command)?)
    }

    /// Truncate `path`, write the run header and keep the file open for
    /// appending.
    fn create(path: &Path) -> Option<Self> {
        let version = option_env!("REPO_PRIORITY_VERSION")
            .unwrap_or(concat!("dev-", env!("CARGO_PKG_VERSION")));
        let rule = "=".repeat(42);
        let header = format!(
            "{rule}\nrepo-priority {version} {}\n{rule}\n",
            format_utc_datetime()
        );
        fs::write(path, header).ok()?;
        let file = fs::OpenOptions::new().append(true).open(path).ok()?;
        Some(Self {
            file: Mutex::new(file),
        })
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for FileLayer {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let kind = Kind::of(event.metadata());
        let msg = MessageExtractor::extract(event);
        let line = format!("[{}] {}{msg}", format_utc_time(), kind.file_prefix());

        if let Ok(mut f) = self.file.lock() {
            writeln!(f, "{}", line.trim_end()).ok();
        }
    }
}

/// A [`tracing_subscriber::fmt::FormatEvent`] for terminal output.
struct ConsoleFormatter;

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for ConsoleFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let kind = Kind::of(event.metadata());
        let msg = MessageExtractor::extract(event);
        writeln!(writer, "{}", kind.console_line(&msg))
    }
}

/// Initialise the global [`tracing`] subscriber.
///
/// Console output shows `info` and above (`debug` with `verbose`, or whatever
/// `REPO_PRIORITY_LOG` asks for); warnings and errors go to stderr. The log
/// file at `$XDG_CACHE_HOME/repo-priority/<command>.log` always receives
/// `debug` and above. Call once at startup, before any logging.
pub fn init_subscriber(verbose: bool, command: &str) {
    use tracing_subscriber::fmt::writer::MakeWriterExt as _;
    use tracing_subscriber::{
        EnvFilter, Layer as _, filter::LevelFilter, fmt, layer::SubscriberExt as _,
        util::SubscriberInitExt as _,
    };

    let default_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let console_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .with_env_var(FILTER_ENV)
        .from_env_lossy();

    let make_writer = std::io::stderr
        .with_max_level(Level::WARN)
        .and(std::io::stdout.with_min_level(Level::INFO));

    let console_layer = fmt::layer()
        .event_format(ConsoleFormatter)
        .with_writer(make_writer)
        .with_filter(console_filter);

    let file_layer = FileLayer::new(command).map(|l| l.with_filter(LevelFilter::DEBUG));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}
