//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use std::error::Error as _;

use powder_cli::CliError;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "POWDER_LOG";
const DEFAULT_LOG_FILTER: &str = "warn";

fn main() {
    init_logging();
    match powder_cli::run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("powder: {err}");
            let mut source = err.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            std::process::exit(1);
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    // Logging is best effort; a second subscriber is simply not installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
