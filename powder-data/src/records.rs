//! Raw rows of the tabular resort source.
//!
//! The worldwide resort table is a delimited file with one row per resort.
//! Its header carries stray trailing spaces (`"Snow reliability "`), so column
//! names are trimmed on read and looked up by their trimmed form.

use std::collections::BTreeMap;
use std::io::Read;

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

/// Column names read by the normaliser.
pub mod columns {
    /// Resort name.
    pub const NAME: &str = "NameResort";
    /// Resort web page.
    pub const URL: &str = "URL";
    /// Star rating.
    pub const STARS: &str = "Stars";
    /// Kilometres of freeride terrain.
    pub const KM_FREERIDE: &str = "Km Freeride";
    /// Latitude in decimal degrees.
    pub const LATITUDE: &str = "latitude";
    /// Longitude in decimal degrees.
    pub const LONGITUDE: &str = "longitude";
    /// Continent, lower-case.
    pub const CONTINENT: &str = "Continent";
    /// Country.
    pub const COUNTRY: &str = "Country";
    /// State, province or region.
    pub const STATE_PROVINCE: &str = "State/Province";
    /// Snow reliability rating.
    pub const SNOW_RELIABILITY: &str = "Snow reliability";
    /// Après-ski rating.
    pub const APRES_SKI: &str = "Après-ski";
    /// Resort size rating.
    pub const RESORT_SIZE: &str = "Ski resort size";
    /// Slope variety rating.
    pub const VARIETY_OF_RUNS: &str = "Slope offering, variety of runs";
    /// Cleanliness rating.
    pub const CLEANLINESS: &str = "Cleanliness and hygiene";
    /// Easy run count.
    pub const EASY: &str = "Easy";
    /// Intermediate run count.
    pub const INTERMEDIATE: &str = "Intermediate";
    /// Difficult run count.
    pub const DIFFICULT: &str = "Difficult";
}

/// One row of the resort table keyed by trimmed column name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawRecord {
    fields: BTreeMap<String, String>,
}

impl RawRecord {
    /// Build a record from `(column, value)` pairs. Column names are trimmed;
    /// values are kept verbatim.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(key, value)| (key.as_ref().trim().to_owned(), value.into()))
                .collect(),
        }
    }

    /// Return the raw cell for `column`, if the row has one.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column.trim()).map(String::as_str)
    }

    /// Return the trimmed cell for `column`, treating blank cells as absent.
    #[must_use]
    pub fn text(&self, column: &str) -> Option<&str> {
        self.get(column)
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

/// Errors raised while reading the resort table.
#[derive(Debug, Error)]
pub enum RecordsError {
    /// The file could not be opened.
    #[error("failed to open resort table at {path}")]
    Open {
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
        /// Path that was opened.
        path: Utf8PathBuf,
    },
    /// A row or the header could not be decoded.
    #[error("failed to read resort table at {path}")]
    Parse {
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
        /// Path that was read.
        path: Utf8PathBuf,
    },
}

/// Read every row of a comma-delimited resort table.
///
/// # Errors
///
/// Returns [`RecordsError::Open`] when the file cannot be opened and
/// [`RecordsError::Parse`] when the CSV is malformed.
pub fn read_records(path: &Utf8Path) -> Result<Vec<RawRecord>, RecordsError> {
    let file = powder_fs::open_utf8_file(path).map_err(|source| RecordsError::Open {
        source,
        path: path.to_path_buf(),
    })?;
    read_records_from(file, b',').map_err(|source| RecordsError::Parse {
        source,
        path: path.to_path_buf(),
    })
}

/// Like [`read_records`] but accepts any `Read` source and delimiter.
///
/// Rows may be shorter or longer than the header; missing cells are absent
/// from the record and surplus cells are ignored.
///
/// # Errors
///
/// Returns the CSV error for undecodable input.
///
/// # Examples
/// ```
/// use powder_data::read_records_from;
///
/// let table = "NameResort;Stars \nZermatt;4,5\n";
/// let records = read_records_from(table.as_bytes(), b';')?;
/// assert_eq!(records[0].get("Stars"), Some("4,5"));
/// # Ok::<(), csv::Error>(())
/// ```
pub fn read_records_from<R: Read>(reader: R, delimiter: u8) -> Result<Vec<RawRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    csv_reader
        .records()
        .map(|row| {
            let row = row?;
            Ok(RawRecord::from_pairs(headers.iter().zip(row.iter())))
        })
        .collect()
}
