//! Command-line interface for the Powder ski resort recommender.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod config;
mod error;
mod prompt;
mod recommend;
mod render;
mod session;

pub use error::CliError;

use recommend::{RecommendArgs, run_recommend};
use session::{SessionArgs, run_session};

pub(crate) const ARG_RESORTS: &str = "resorts";
pub(crate) const ARG_CACHE: &str = "cache";
pub(crate) const ARG_CACHE_MAX_AGE_HOURS: &str = "cache-max-age-hours";
pub(crate) const ARG_SNOW_API_KEY: &str = "snow-api-key";
pub(crate) const ARG_SNOW_API_HOST: &str = "snow-api-host";
pub(crate) const ARG_SNOW_BASE_URL: &str = "snow-base-url";
pub(crate) const ARG_SNOW_TIMEOUT_SECS: &str = "snow-timeout-secs";
pub(crate) const ARG_TOP: &str = "top";
pub(crate) const ARG_CONTINENT: &str = "continent";
pub(crate) const ARG_PRIORITY: &str = "priority";
pub(crate) const ARG_MAX_DISTANCE: &str = "max-distance";
pub(crate) const ENV_RECOMMEND_CONTINENT: &str = "POWDER_CMDS_RECOMMEND_CONTINENT";

/// Run the Powder CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Session(args) => run_session(args),
        Command::Recommend(args) => run_recommend(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "powder",
    about = "Recommend ski resorts from your priorities and live snow depths",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Pick a continent, weigh your priorities and browse the results.
    Session(SessionArgs),
    /// Rank the resorts of one continent without prompting.
    Recommend(RecommendArgs),
}

#[cfg(test)]
mod tests;
