//! Continents a resort batch can be drawn from.
//!
//! # Examples
//! ```
//! use powder_core::Continent;
//!
//! assert_eq!(Continent::NorthAmerica.as_str(), "north america");
//! assert_eq!(" Europe ".parse::<Continent>(), Ok(Continent::Europe));
//! ```

use thiserror::Error;

/// One of the seven continents offered by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Continent {
    /// Africa.
    Africa,
    /// Antarctica.
    Antarctica,
    /// Asia.
    Asia,
    /// Europe.
    Europe,
    /// North America.
    NorthAmerica,
    /// Oceania.
    Oceania,
    /// South America.
    SouthAmerica,
}

/// Error returned when text does not name a known continent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown continent '{0}'")]
pub struct UnknownContinent(pub String);

impl Continent {
    /// Every continent in prompt order.
    pub const ALL: [Self; 7] = [
        Self::Africa,
        Self::Antarctica,
        Self::Asia,
        Self::Europe,
        Self::NorthAmerica,
        Self::Oceania,
        Self::SouthAmerica,
    ];

    /// Return the lowercase name used in the resort table.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Africa => "africa",
            Self::Antarctica => "antarctica",
            Self::Asia => "asia",
            Self::Europe => "europe",
            Self::NorthAmerica => "north america",
            Self::Oceania => "oceania",
            Self::SouthAmerica => "south america",
        }
    }

    /// Return the name in title case for display.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Africa => "Africa",
            Self::Antarctica => "Antarctica",
            Self::Asia => "Asia",
            Self::Europe => "Europe",
            Self::NorthAmerica => "North America",
            Self::Oceania => "Oceania",
            Self::SouthAmerica => "South America",
        }
    }
}

impl std::fmt::Display for Continent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Continent {
    type Err = UnknownContinent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|continent| continent.as_str() == wanted)
            .ok_or_else(|| UnknownContinent(s.trim().to_owned()))
    }
}
