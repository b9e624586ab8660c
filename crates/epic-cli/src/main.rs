use epic_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    // Initialize logging as early as possible; fall back to stderr if the log file is unavailable.
    let log_target = logging::init();

    // Parse CLI and dispatch.
    if let Err(err) = Cli::run_from_args() {
        tracing::error!(error = %format!("{:#}", err), "command failed");
        eprintln!("epic-mirror error: {:#}", err);
        if let Some(hint) = log_target.hint() {
            eprintln!("{}", hint);
        }
        std::process::exit(1);
    }
}
