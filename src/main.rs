//! `repo-priority` binary entry point.
use std::process::ExitCode;

use clap::Parser;

use repo_priority::exec::SystemExecutor;
use repo_priority::logging::{self, Log as _};
use repo_priority::notify::Session;
use repo_priority::{cli, commands};

const COMMAND: &str = "repo-priority";

fn main() -> ExitCode {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    logging::init_subscriber(args.verbose, COMMAND);
    let log = logging::Logger::new(COMMAND);

    let result = args.settings().map_err(anyhow::Error::from).and_then(|settings| {
        commands::update::run(
            &settings,
            args.dry_run,
            &log,
            &SystemExecutor,
            Session::detect(),
        )
    });
    match result {
        Ok(_) => ExitCode::SUCCESS,
        // Reported once through the logger; returning the error would print it again.
        Err(e) => {
            log.error(&format!("{e:#}"));
            if let Some(path) = log.log_path() {
                log.info(&format!("log written to {}", path.display()));
            }
            ExitCode::FAILURE
        }
    }
}
