//! Build a connected resort network for one continent.

use log::info;
use powder_core::{Continent, ResortNetwork, SnowDepthSource};

use crate::SnowCache;
use crate::normalize::normalize_with_snow;
use crate::records::{RawRecord, columns};

/// Report whether a row belongs to `continent`.
#[must_use]
pub fn in_continent(record: &RawRecord, continent: Continent) -> bool {
    record
        .text(columns::CONTINENT)
        .and_then(|raw| raw.parse::<Continent>().ok())
        == Some(continent)
}

/// Normalise every row of `continent` into a fresh, fully connected network.
///
/// Rows keep their table order. Snow depths are read through `cache`,
/// falling back to `source` on a miss, then normalised across the batch
/// before every pair of resorts is linked. The caller is responsible for
/// saving the cache afterwards.
///
/// # Examples
/// ```
/// use powder_core::{Continent, NoSnowData};
/// use powder_data::{RawRecord, SnowCache, load_continent};
///
/// let rows = [
///     RawRecord::from_pairs([("NameResort", "Zermatt"), ("Continent", "europe")]),
///     RawRecord::from_pairs([("NameResort", "Vail"), ("Continent", "north america")]),
/// ];
/// let mut cache = SnowCache::new();
/// let network = load_continent(&rows, Continent::Europe, &mut cache, &NoSnowData);
/// assert_eq!(network.len(), 1);
/// assert_eq!(cache.get("Zermatt"), Some(None));
/// ```
pub fn load_continent<S>(
    records: &[RawRecord],
    continent: Continent,
    cache: &mut SnowCache,
    source: &S,
) -> ResortNetwork
where
    S: SnowDepthSource + ?Sized,
{
    let mut network = ResortNetwork::new();
    for record in records.iter().filter(|record| in_continent(record, continent)) {
        network.add_node(normalize_with_snow(record, cache, source));
    }
    info!("Found {} resorts in {continent}", network.len());

    network.normalise_snow_depths();
    network.connect_all();
    info!("Connected {} resorts", network.len());
    network
}
