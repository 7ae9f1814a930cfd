//! Live snow depths from the ski-resort forecast service.
//!
//! [`HttpSnowDepthSource`] implements [`powder_core::SnowDepthSource`] over
//! HTTP. Readings arrive as strings with a unit suffix; [`parse_depth`]
//! strips the suffix and keeps the whole number.

mod conditions;
mod provider;

pub use conditions::{SnowConditions, parse_depth};
pub use provider::{
    DEFAULT_API_HOST, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
    HttpSnowDepthSource, HttpSnowDepthSourceConfig, SnowSourceBuildError,
};
