//! Error types emitted by the Powder CLI.

use std::sync::Arc;

use camino::Utf8PathBuf;
use powder_core::{ResortAttribute, UnknownAttribute, UnknownContinent};
use powder_data::snow::SnowSourceBuildError;
use powder_data::{RecordsError, SnowCacheError};
use thiserror::Error;

/// Errors emitted by the Powder CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The configured continent is not one of the seven on offer.
    #[error("invalid --{field}: {source}")]
    InvalidContinent {
        field: &'static str,
        #[source]
        source: UnknownContinent,
    },
    /// A priority entry is not `attribute=weight` with a weight in `0..=1`.
    #[error("invalid priority '{raw}': expected attribute=weight with a weight between 0 and 1")]
    InvalidPriority { raw: String },
    /// The same attribute was weighted more than once.
    #[error("duplicate priority for '{attribute}': give each attribute one weight")]
    DuplicatePriority { attribute: ResortAttribute },
    /// A priority entry names an attribute the recommender does not know.
    #[error(transparent)]
    UnknownAttribute(#[from] UnknownAttribute),
    /// The neighbour cutoff is negative or not a number.
    #[error("--{field} must be a non-negative number of kilometres, got {value}")]
    InvalidDistance { field: &'static str, value: f64 },
    /// Reading the resort table failed.
    #[error(transparent)]
    ReadResorts(#[from] RecordsError),
    /// Persisting the snow cache failed.
    #[error(transparent)]
    SaveCache(#[from] SnowCacheError),
    /// Constructing the HTTP snow-depth source failed.
    #[error("failed to build snow source for {base_url:?}: {source}")]
    BuildSnowSource {
        base_url: String,
        #[source]
        source: SnowSourceBuildError,
    },
    /// Reading an answer from the terminal failed.
    #[error("failed to read input: {0}")]
    ReadInput(#[source] std::io::Error),
    /// Writing to the terminal failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
    /// Input ended while a prompt was waiting for an answer.
    #[error("input ended before the session finished")]
    InputClosed,
}
