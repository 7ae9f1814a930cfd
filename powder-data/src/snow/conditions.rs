//! Response types for the snow-conditions endpoint.
//!
//! The service reports depths as strings carrying a unit suffix, such as
//! `"47in"` when imperial units are requested or `"120cm"` for metric.

use powder_core::SnowLookupError;
use serde::Deserialize;

/// Body of a `snowConditions` response.
///
/// Only the fields the recommender reads are modelled; everything else is
/// ignored.
#[derive(Debug, Default, Deserialize)]
pub struct SnowConditions {
    /// Depth at the top station, with unit suffix.
    #[serde(rename = "topSnowDepth")]
    pub top_snow_depth: Option<String>,
    /// Depth at the bottom station, with unit suffix.
    #[serde(rename = "botSnowDepth")]
    pub bottom_snow_depth: Option<String>,
}

impl SnowConditions {
    /// Return the top-station depth as a whole number.
    ///
    /// A missing, null or blank field is "no data".
    ///
    /// # Errors
    ///
    /// Returns [`SnowLookupError::MalformedReading`] when the field is not a
    /// number followed by a unit.
    pub fn top_depth(&self, resort: &str) -> Result<Option<u32>, SnowLookupError> {
        match self.top_snow_depth.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(reading) => parse_depth(resort, reading).map(Some),
        }
    }
}

/// Strip the unit suffix from a depth reading and parse the number.
///
/// # Errors
///
/// Returns [`SnowLookupError::MalformedReading`] when no whole number remains.
pub fn parse_depth(resort: &str, reading: &str) -> Result<u32, SnowLookupError> {
    let number = reading
        .trim()
        .trim_end_matches(|ch: char| ch.is_alphabetic() || ch == '"' || ch == '\'')
        .trim_end();
    number
        .parse::<u32>()
        .map_err(|_| SnowLookupError::MalformedReading {
            resort: resort.to_owned(),
            reading: reading.to_owned(),
        })
}
