use std::env;
use std::io::{self, Write};
use std::process::ExitCode;

use sug::capability;
use sug::cli;
use sug::config;
use sug::error::Error;
use sug::logger;
use sug::runner;

fn main() -> ExitCode {
    let config = config::load_config().unwrap_or_default();
    if let Err(err) = logger::init_debug_logging(&config) {
        eprintln!("{}: warning: {err:#}", cli::PROGRAM);
    }

    let argv: Vec<String> = env::args().skip(1).collect();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    let outcome = runner::run(
        &argv,
        capability::has_piped_input(),
        stdin.lock(),
        &mut stdout,
    );

    match outcome {
        Ok(()) => {
            let _ = stdout.flush();
            ExitCode::SUCCESS
        }
        Err(err) => report(&err),
    }
}

/// Print a diagnostic for `err` and pick its exit code.
///
/// Malformed command lines go through the usage path; everything else
/// is a fatal message with the error's own wording.
fn report(err: &Error) -> ExitCode {
    if err.is_usage() {
        if !matches!(err, Error::Usage) {
            eprintln!("{}: fatal: {err}", cli::PROGRAM);
        }
        eprintln!("{}: {}", cli::PROGRAM, cli::USAGE);
    } else {
        eprintln!("{}: fatal: {err}", cli::PROGRAM);
    }
    ExitCode::from(err.exit_code())
}
