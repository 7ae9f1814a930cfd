//! Non-interactive `recommend` command for the Powder CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use powder_core::{Continent, PriorityProfile, ResortAttribute};
use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_TOP, DataArgs, DataConfig, DefaultSnowSourceBuilder, SnowSourceBuilder};
use crate::render::write_ranking;
use crate::{
    ARG_CACHE, ARG_CACHE_MAX_AGE_HOURS, ARG_CONTINENT, ARG_MAX_DISTANCE, ARG_PRIORITY,
    ARG_RESORTS, ARG_SNOW_API_HOST, ARG_SNOW_API_KEY, ARG_SNOW_BASE_URL, ARG_SNOW_TIMEOUT_SECS,
    ARG_TOP, CliError, ENV_RECOMMEND_CONTINENT,
};

/// CLI arguments for the `recommend` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Score every resort of one continent against the given \
                 priorities and print the best matches. Priorities are given \
                 as attribute=weight pairs with weights between 0 and 1; \
                 without any, every rated attribute weighs 1.",
    about = "Rank the resorts of one continent"
)]
#[ortho_config(prefix = "POWDER")]
pub(crate) struct RecommendArgs {
    /// Continent to rank, such as "europe" or "north america".
    #[arg(long = ARG_CONTINENT, value_name = "name")]
    #[serde(default)]
    pub(crate) continent: Option<String>,
    /// Attribute weight as attribute=weight; repeat for several attributes,
    /// naming each attribute once.
    #[arg(long = ARG_PRIORITY, value_name = "attribute=weight")]
    #[serde(default)]
    pub(crate) priority: Vec<String>,
    /// Neighbour cutoff in kilometres; 0 ignores neighbours.
    #[arg(long = ARG_MAX_DISTANCE, value_name = "km")]
    #[serde(default)]
    pub(crate) max_distance: Option<f64>,
    /// Number of resorts to list.
    #[arg(long = ARG_TOP, value_name = "count")]
    #[serde(default)]
    pub(crate) top: Option<usize>,
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
}

impl RecommendArgs {
    pub(crate) fn into_config(self) -> Result<RecommendConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RecommendConfig::try_from(merged)
    }
}

/// Resolved `recommend` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecommendConfig {
    pub(crate) data: DataConfig,
    pub(crate) continent: Continent,
    pub(crate) profile: PriorityProfile,
    pub(crate) max_distance_km: f64,
    pub(crate) top: usize,
}

impl TryFrom<RecommendArgs> for RecommendConfig {
    type Error = CliError;

    fn try_from(args: RecommendArgs) -> Result<Self, Self::Error> {
        let raw_continent = args.continent.ok_or(CliError::MissingArgument {
            field: ARG_CONTINENT,
            env: ENV_RECOMMEND_CONTINENT,
        })?;
        let continent = raw_continent
            .parse::<Continent>()
            .map_err(|source| CliError::InvalidContinent {
                field: ARG_CONTINENT,
                source,
            })?;

        let profile = if args.priority.is_empty() {
            ResortAttribute::RATINGS
                .into_iter()
                .map(|attribute| (attribute, 1.0))
                .collect()
        } else {
            let mut profile = PriorityProfile::new();
            for raw in &args.priority {
                let (attribute, weight) = parse_priority(raw)?;
                if profile.weight(attribute).is_some() {
                    return Err(CliError::DuplicatePriority { attribute });
                }
                profile.set_weight(attribute, weight);
            }
            profile
        };

        let max_distance_km = args.max_distance.unwrap_or(0.0);
        if max_distance_km.is_nan() || max_distance_km < 0.0 {
            return Err(CliError::InvalidDistance {
                field: ARG_MAX_DISTANCE,
                value: max_distance_km,
            });
        }

        let data = DataArgs {
            resorts: args.resorts,
            cache: args.cache,
            cache_max_age_hours: args.cache_max_age_hours,
            snow_api_key: args.snow_api_key,
            snow_api_host: args.snow_api_host,
            snow_base_url: args.snow_base_url,
            snow_timeout_secs: args.snow_timeout_secs,
        };

        Ok(Self {
            data: DataConfig::from(data),
            continent,
            profile,
            max_distance_km,
            top: args.top.unwrap_or(DEFAULT_TOP),
        })
    }
}

/// Parse one `attribute=weight` entry.
pub(crate) fn parse_priority(raw: &str) -> Result<(ResortAttribute, f64), CliError> {
    let invalid = || CliError::InvalidPriority {
        raw: raw.to_owned(),
    };
    let (name, weight) = raw.split_once('=').ok_or_else(invalid)?;
    let attribute = name.parse::<ResortAttribute>()?;
    let weight = weight
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|weight| (0.0..=1.0).contains(weight))
        .ok_or_else(invalid)?;
    Ok((attribute, weight))
}

pub(crate) fn run_recommend(args: RecommendArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_recommend_with(args, &DefaultSnowSourceBuilder, &mut stdout)
}

pub(crate) fn run_recommend_with(
    args: RecommendArgs,
    builder: &dyn SnowSourceBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.data.validate_sources()?;
    let records = config.data.load_records()?;
    let source = builder.build(&config.data)?;

    let mut network = config
        .data
        .load_network(&records, config.continent, source.as_ref())?;
    info!(
        "Scoring {} resorts in {} with a {} km cutoff",
        network.len(),
        config.continent,
        config.max_distance_km
    );
    network.score_all(&config.profile, config.max_distance_km);
    write_ranking(writer, &network.ranked(config.top)).map_err(CliError::WriteOutput)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RecommendConfig, CliError> {
    let merged = RecommendArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RecommendConfig::try_from(merged)
}
