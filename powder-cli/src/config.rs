//! Data-source configuration shared by every command.
//!
//! Each command carries the same resort-table, cache and snow-service options.
//! Once merged they resolve into a [`DataConfig`], which also knows how to
//! turn the resort table into a connected network for one continent.

use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use log::info;
use powder_core::{Continent, NoSnowData, ResortNetwork, SnowDepthSource};
use powder_data::snow::{HttpSnowDepthSource, HttpSnowDepthSourceConfig};
use powder_data::{RawRecord, SnowCache, load_continent, read_records};

use crate::{ARG_RESORTS, CliError};

/// Resort table read when none is configured.
pub(crate) const DEFAULT_RESORTS: &str = "resortworldwide.csv";
/// Snow cache used when none is configured.
pub(crate) const DEFAULT_CACHE: &str = "cache.json";
/// Number of resorts listed when no count is configured.
pub(crate) const DEFAULT_TOP: usize = 5;

const SECS_PER_HOUR: u64 = 3600;

/// Data-source options before defaults are applied.
#[derive(Debug, Clone, Default)]
pub(crate) struct DataArgs {
    pub(crate) resorts: Option<Utf8PathBuf>,
    pub(crate) cache: Option<Utf8PathBuf>,
    pub(crate) cache_max_age_hours: Option<u64>,
    pub(crate) snow_api_key: Option<String>,
    pub(crate) snow_api_host: Option<String>,
    pub(crate) snow_base_url: Option<String>,
    pub(crate) snow_timeout_secs: Option<u64>,
}

/// Resolved data-source configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DataConfig {
    /// Path to the resort table.
    pub(crate) resorts: Utf8PathBuf,
    /// Path to the snow cache.
    pub(crate) cache: Utf8PathBuf,
    /// Age beyond which the cache file is ignored.
    pub(crate) cache_max_age: Option<Duration>,
    /// Snow service settings; `None` runs from the cache alone.
    pub(crate) snow: Option<HttpSnowDepthSourceConfig>,
}

impl From<DataArgs> for DataConfig {
    fn from(args: DataArgs) -> Self {
        let DataArgs {
            resorts,
            cache,
            cache_max_age_hours,
            snow_api_key,
            snow_api_host,
            snow_base_url,
            snow_timeout_secs,
        } = args;

        let snow = snow_api_key
            .filter(|key| !key.trim().is_empty())
            .map(|api_key| {
                let mut config = HttpSnowDepthSourceConfig::new(api_key);
                if let Some(api_host) = snow_api_host {
                    config = config.with_api_host(api_host);
                }
                if let Some(base_url) = snow_base_url {
                    config = config.with_base_url(base_url);
                }
                if let Some(secs) = snow_timeout_secs {
                    config = config.with_timeout(Duration::from_secs(secs));
                }
                config
            });

        Self {
            resorts: resorts.unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_RESORTS)),
            cache: cache.unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_CACHE)),
            cache_max_age: cache_max_age_hours
                .map(|hours| Duration::from_secs(hours.saturating_mul(SECS_PER_HOUR))),
            snow,
        }
    }
}

impl DataConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.resorts, ARG_RESORTS)
    }

    pub(crate) fn load_records(&self) -> Result<Vec<RawRecord>, CliError> {
        let records = read_records(&self.resorts)?;
        info!("Read {} resorts from {}", records.len(), self.resorts);
        Ok(records)
    }

    fn load_cache(&self) -> SnowCache {
        match self.cache_max_age {
            Some(max_age) => SnowCache::load_fresh(&self.cache, max_age),
            None => SnowCache::load(&self.cache),
        }
    }

    /// Build the network for `continent`, reading snow depths through the
    /// cache and persisting it afterwards.
    pub(crate) fn load_network(
        &self,
        records: &[RawRecord],
        continent: Continent,
        source: &dyn SnowDepthSource,
    ) -> Result<ResortNetwork, CliError> {
        let mut cache = self.load_cache();
        let network = load_continent(records, continent, &mut cache, source);
        cache.save(&self.cache)?;
        Ok(network)
    }
}

fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match powder_fs::file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) if path.exists() => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Ok(false) => Err(CliError::MissingSourceFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Builds the snow-depth source for one command invocation.
pub(crate) trait SnowSourceBuilder {
    fn build(&self, config: &DataConfig) -> Result<Box<dyn SnowDepthSource>, CliError>;
}

/// Queries the forecast service when an API key is configured.
pub(crate) struct DefaultSnowSourceBuilder;

impl SnowSourceBuilder for DefaultSnowSourceBuilder {
    fn build(&self, config: &DataConfig) -> Result<Box<dyn SnowDepthSource>, CliError> {
        let Some(snow) = &config.snow else {
            info!("No snow API key configured; using cached snow depths only");
            return Ok(Box::new(NoSnowData));
        };
        let source = HttpSnowDepthSource::with_config(snow.clone()).map_err(|source| {
            CliError::BuildSnowSource {
                base_url: snow.base_url.clone(),
                source,
            }
        })?;
        Ok(Box::new(source))
    }
}
