//! Resort attributes that can take part in scoring.
//!
//! The enum replaces free-form attribute names with a closed set. Lookups go
//! through [`ResortNode::attribute`](crate::ResortNode::attribute), which
//! returns `None` for attributes the resort table did not supply.

use thiserror::Error;

/// A static resort attribute that a visitor can prioritise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResortAttribute {
    /// How dependable the snow cover is, on a 0–5 scale.
    SnowReliability,
    /// Quality of the après-ski scene, on a 0–5 scale.
    ApresSki,
    /// Size of the ski area, on a 0–5 scale.
    ResortSize,
    /// Variety of the slope offering, on a 0–5 scale.
    VarietyOfRuns,
    /// Cleanliness and hygiene, on a 0–5 scale.
    Cleanliness,
    /// Kilometres of freeride terrain.
    KmFreeride,
    /// Share of difficult runs rescaled to 0–5.
    ProportionOfDifficultRuns,
}

/// Error returned when text does not name a known attribute.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown resort attribute '{0}'")]
pub struct UnknownAttribute(pub String);

impl ResortAttribute {
    /// Every scorable attribute.
    pub const ALL: [Self; 7] = [
        Self::SnowReliability,
        Self::ApresSki,
        Self::ResortSize,
        Self::VarietyOfRuns,
        Self::Cleanliness,
        Self::KmFreeride,
        Self::ProportionOfDifficultRuns,
    ];

    /// The 0–5 rated attributes, in the order the session asks about them.
    pub const RATINGS: [Self; 6] = [
        Self::SnowReliability,
        Self::ApresSki,
        Self::ResortSize,
        Self::VarietyOfRuns,
        Self::Cleanliness,
        Self::ProportionOfDifficultRuns,
    ];

    /// Return the snake_case identifier.
    ///
    /// # Examples
    /// ```
    /// use powder_core::ResortAttribute;
    ///
    /// assert_eq!(ResortAttribute::ApresSki.as_str(), "apres_ski");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SnowReliability => "snow_reliability",
            Self::ApresSki => "apres_ski",
            Self::ResortSize => "resort_size",
            Self::VarietyOfRuns => "variety_of_runs",
            Self::Cleanliness => "cleanliness",
            Self::KmFreeride => "km_freeride",
            Self::ProportionOfDifficultRuns => "proportion_of_difficult_runs",
        }
    }

    /// Return a human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::SnowReliability => "Snow reliability",
            Self::ApresSki => "Après-ski",
            Self::ResortSize => "Resort size",
            Self::VarietyOfRuns => "Variety of runs",
            Self::Cleanliness => "Cleanliness",
            Self::KmFreeride => "Freeride (km)",
            Self::ProportionOfDifficultRuns => "Difficult runs",
        }
    }
}

impl std::fmt::Display for ResortAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ResortAttribute {
    type Err = UnknownAttribute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|attribute| attribute.as_str() == wanted)
            .ok_or_else(|| UnknownAttribute(s.trim().to_owned()))
    }
}
