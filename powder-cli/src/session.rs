//! Interactive session command for the Powder CLI.

use std::io::{BufRead, Write};

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use powder_core::{PriorityProfile, ResortAttribute, ResortNetwork};
use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_TOP, DataArgs, DataConfig, DefaultSnowSourceBuilder, SnowSourceBuilder};
use crate::prompt::{Mode, Prompter};
use crate::render::{write_details, write_ranking};
use crate::{
    ARG_CACHE, ARG_CACHE_MAX_AGE_HOURS, ARG_RESORTS, ARG_SNOW_API_HOST, ARG_SNOW_API_KEY,
    ARG_SNOW_BASE_URL, ARG_SNOW_TIMEOUT_SECS, ARG_TOP, CliError,
};

/// CLI arguments for the `session` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Choose a continent, rate how much each resort quality matters \
                 to you, and browse the best matches or look a resort up by \
                 name. Snow depths are cached between runs; without an API key \
                 only cached depths are used.",
    about = "Start an interactive recommendation session"
)]
#[ortho_config(prefix = "POWDER")]
pub(crate) struct SessionArgs {
    /// Path to the resort table (CSV).
    #[arg(long = ARG_RESORTS, value_name = "path")]
    #[serde(default)]
    pub(crate) resorts: Option<Utf8PathBuf>,
    /// Path to the snow-depth cache (JSON).
    #[arg(long = ARG_CACHE, value_name = "path")]
    #[serde(default)]
    pub(crate) cache: Option<Utf8PathBuf>,
    /// Ignore a cache file older than this many hours.
    #[arg(long = ARG_CACHE_MAX_AGE_HOURS, value_name = "hours")]
    #[serde(default)]
    pub(crate) cache_max_age_hours: Option<u64>,
    /// API key for the snow forecast service.
    #[arg(long = ARG_SNOW_API_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) snow_api_key: Option<String>,
    /// Host header sent to the snow forecast service.
    #[arg(long = ARG_SNOW_API_HOST, value_name = "host")]
    #[serde(default)]
    pub(crate) snow_api_host: Option<String>,
    /// Base URL of the snow forecast service.
    #[arg(long = ARG_SNOW_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) snow_base_url: Option<String>,
    /// Timeout for each snow lookup, in seconds.
    #[arg(long = ARG_SNOW_TIMEOUT_SECS, value_name = "seconds")]
    #[serde(default)]
    pub(crate) snow_timeout_secs: Option<u64>,
    /// Number of resorts to list.
    #[arg(long = ARG_TOP, value_name = "count")]
    #[serde(default)]
    pub(crate) top: Option<usize>,
}

impl SessionArgs {
    pub(crate) fn into_config(self) -> Result<SessionConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        Ok(SessionConfig::from(merged))
    }
}

/// Resolved `session` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SessionConfig {
    pub(crate) data: DataConfig,
    pub(crate) top: usize,
}

impl From<SessionArgs> for SessionConfig {
    fn from(args: SessionArgs) -> Self {
        let data = DataArgs {
            resorts: args.resorts,
            cache: args.cache,
            cache_max_age_hours: args.cache_max_age_hours,
            snow_api_key: args.snow_api_key,
            snow_api_host: args.snow_api_host,
            snow_base_url: args.snow_base_url,
            snow_timeout_secs: args.snow_timeout_secs,
        };
        Self {
            data: DataConfig::from(data),
            top: args.top.unwrap_or(DEFAULT_TOP),
        }
    }
}

pub(crate) fn run_session(args: SessionArgs) -> Result<(), CliError> {
    let mut input = std::io::stdin().lock();
    let mut output = std::io::stdout().lock();
    run_session_with(args, &DefaultSnowSourceBuilder, &mut input, &mut output)
}

pub(crate) fn run_session_with(
    args: SessionArgs,
    builder: &dyn SnowSourceBuilder,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.data.validate_sources()?;
    let records = config.data.load_records()?;
    let source = builder.build(&config.data)?;
    let mut prompter = Prompter::new(input, output);

    loop {
        let continent = prompter.continent()?;
        let mut network = config
            .data
            .load_network(&records, continent, source.as_ref())?;
        prompter.say(format_args!(
            "Found {} resorts in {continent}.",
            network.len()
        ))?;

        match prompter.mode()? {
            Mode::Recommend => recommend(&mut prompter, &mut network, config.top)?,
            Mode::Search => search(&mut prompter, &network)?,
        }

        if !prompter.confirm("Would you like to restart? (y/n): ")? {
            return Ok(());
        }
    }
}

fn recommend(
    prompter: &mut Prompter<'_>,
    network: &mut ResortNetwork,
    top: usize,
) -> Result<(), CliError> {
    prompter.say(
        "Your choices for these factors will be used to recommend the best resorts \
         for you given your priorities.",
    )?;
    let mut profile = PriorityProfile::new();
    for attribute in ResortAttribute::RATINGS {
        let weight = prompter.priority(attribute)?;
        profile.set_weight(attribute, weight);
    }
    let max_distance_km = prompter.distance()?;

    network.score_all(&profile, max_distance_km);
    let ranked = network.ranked(top);
    write_ranking(prompter.output(), &ranked).map_err(CliError::WriteOutput)?;
    if ranked.is_empty() {
        return Ok(());
    }

    while let Some(index) = prompter.selection(ranked.len())? {
        if let Some(node) = ranked.get(index) {
            write_details(prompter.output(), node).map_err(CliError::WriteOutput)?;
        }
    }
    Ok(())
}

fn search(prompter: &mut Prompter<'_>, network: &ResortNetwork) -> Result<(), CliError> {
    let query = prompter.ask("Enter the name of the resort you are looking for: ")?;
    match network.find_best_match(&query) {
        Some(node) => write_details(prompter.output(), node).map_err(CliError::WriteOutput),
        None => prompter.say(format_args!("No resort found with the name {query}.")),
    }
}
