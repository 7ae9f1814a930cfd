//! Turn raw resort rows into typed [`ResortNode`]s.
//!
//! Nothing here fails: a cell that does not parse simply leaves the matching
//! attribute unset.

use log::warn;
use powder_core::{Continent, ResortNode, RunCounts, SnowDepthSource};

use crate::SnowCache;
use crate::records::{RawRecord, columns};

/// Parse a decimal cell, accepting `,` as the decimal separator.
///
/// Returns `None` for blank, non-numeric or non-finite input.
///
/// # Examples
/// ```
/// use powder_data::parse_decimal;
///
/// assert_eq!(parse_decimal(" 3,5 "), Some(3.5));
/// assert_eq!(parse_decimal("n/a"), None);
/// ```
#[must_use]
pub fn parse_decimal(raw: &str) -> Option<f64> {
    raw.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Parse a non-negative count, truncating any fractional part.
///
/// # Examples
/// ```
/// use powder_data::parse_count;
///
/// assert_eq!(parse_count("12,9"), Some(12));
/// assert_eq!(parse_count("-1"), None);
/// ```
#[must_use]
pub fn parse_count(raw: &str) -> Option<u32> {
    let value = parse_decimal(raw)?.trunc();
    (0.0..=f64::from(u32::MAX))
        .contains(&value)
        .then_some(value as u32)
}

fn decimal(record: &RawRecord, column: &str) -> Option<f64> {
    record.get(column).and_then(parse_decimal)
}

fn count(record: &RawRecord, column: &str) -> Option<u32> {
    record.get(column).and_then(parse_count)
}

/// Build a node from one row without touching snow data.
///
/// The name falls back to an empty string when the column is missing; every
/// other field is optional.
#[must_use]
pub fn normalize_record(record: &RawRecord) -> ResortNode {
    let mut node = ResortNode::new(record.text(columns::NAME).unwrap_or_default());
    node.url = record.text(columns::URL).unwrap_or_default().to_owned();
    node.continent = record
        .text(columns::CONTINENT)
        .and_then(|raw| raw.parse::<Continent>().ok());
    node.country = record.text(columns::COUNTRY).map(str::to_owned);
    node.state_province = record.text(columns::STATE_PROVINCE).map(str::to_owned);

    match (
        decimal(record, columns::LATITUDE),
        decimal(record, columns::LONGITUDE),
    ) {
        (Some(latitude), Some(longitude)) => node = node.with_location(latitude, longitude),
        _ => warn!("No usable coordinates for '{}'", node.name),
    }

    node.stars = decimal(record, columns::STARS);
    node.km_freeride = decimal(record, columns::KM_FREERIDE);
    node.snow_reliability = decimal(record, columns::SNOW_RELIABILITY);
    node.apres_ski = decimal(record, columns::APRES_SKI);
    node.resort_size = decimal(record, columns::RESORT_SIZE);
    node.variety_of_runs = decimal(record, columns::VARIETY_OF_RUNS);
    node.cleanliness = decimal(record, columns::CLEANLINESS);
    node.set_runs(RunCounts {
        easy: count(record, columns::EASY),
        intermediate: count(record, columns::INTERMEDIATE),
        difficult: count(record, columns::DIFFICULT),
    });
    node
}

/// Build a node and fill its current snow depth from the cache.
///
/// On a cache miss `source` is asked and its answer, including "no data", is
/// stored in the cache before returning. Lookup errors are logged and cached
/// as "no data".
pub fn normalize_with_snow<S>(record: &RawRecord, cache: &mut SnowCache, source: &S) -> ResortNode
where
    S: SnowDepthSource + ?Sized,
{
    let mut node = normalize_record(record);
    if node.name.is_empty() {
        warn!("Skipping snow lookup for a resort without a name");
        return node;
    }
    node.current_snow_depth = cache.lookup_or_fetch(&node.name, source);
    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use powder_core::ResortAttribute;
    use powder_core::test_support::StubSnowSource;
    use rstest::{fixture, rstest};

    #[fixture]
    fn zermatt() -> RawRecord {
        RawRecord::from_pairs([
            ("NameResort", "Zermatt"),
            ("URL", "https://zermatt.example"),
            ("Stars", "4,5"),
            ("Km Freeride", "10"),
            ("latitude", "46,02"),
            ("longitude", "7.75"),
            ("Continent", "Europe"),
            ("Snow reliability ", " 5 "),
            ("Après-ski ", "4"),
            ("Ski resort size ", "5"),
            ("Slope offering, variety of runs ", "x"),
            ("Cleanliness and hygiene ", "4"),
            ("Easy", "2"),
            ("Intermediate ", "3"),
            ("Difficult", "5"),
        ])
    }

    #[rstest]
    #[case("3,5", Some(3.5))]
    #[case("3.5", Some(3.5))]
    #[case("  7 ", Some(7.0))]
    #[case("", None)]
    #[case("NaN", None)]
    #[case("inf", None)]
    fn decimals(#[case] raw: &str, #[case] expected: Option<f64>) {
        assert_eq!(parse_decimal(raw), expected);
    }

    #[rstest]
    #[case("4", Some(4))]
    #[case("4,9", Some(4))]
    #[case("0", Some(0))]
    #[case("-3", None)]
    #[case("lots", None)]
    fn counts(#[case] raw: &str, #[case] expected: Option<u32>) {
        assert_eq!(parse_count(raw), expected);
    }

    #[rstest]
    fn populates_every_field(zermatt: RawRecord) {
        let node = normalize_record(&zermatt);
        assert_eq!(node.name, "Zermatt");
        assert_eq!(node.continent, Some(Continent::Europe));
        assert_eq!(node.latitude(), Some(46.02));
        assert_eq!(node.longitude(), Some(7.75));
        assert_eq!(node.stars, Some(4.5));
        assert_eq!(node.attribute(ResortAttribute::SnowReliability), Some(5.0));
        assert_eq!(node.attribute(ResortAttribute::VarietyOfRuns), None);
        assert_eq!(node.attribute(ResortAttribute::KmFreeride), Some(10.0));
        assert_eq!(
            node.attribute(ResortAttribute::ProportionOfDifficultRuns),
            Some(2.5)
        );
        assert_eq!(node.country, None);
        assert_eq!(node.current_snow_depth, None);
    }

    #[rstest]
    #[case("Snow reliability ", ResortAttribute::SnowReliability, "3,5", 3.5)]
    #[case("Après-ski", ResortAttribute::ApresSki, " 4.25 ", 4.25)]
    #[case("Cleanliness and hygiene ", ResortAttribute::Cleanliness, "2,75", 2.75)]
    #[case("Km Freeride", ResortAttribute::KmFreeride, "12,5", 12.5)]
    fn fractional_ratings_keep_their_fraction(
        #[case] column: &str,
        #[case] attribute: ResortAttribute,
        #[case] raw: &str,
        #[case] expected: f64,
    ) {
        let record = RawRecord::from_pairs([("NameResort", "Laax"), (column, raw)]);
        assert_eq!(normalize_record(&record).attribute(attribute), Some(expected));
    }

    #[rstest]
    fn bad_coordinates_leave_location_unknown() {
        let record = RawRecord::from_pairs([
            ("NameResort", "Nowhere"),
            ("latitude", "46.0"),
            ("longitude", "east"),
        ]);
        assert!(normalize_record(&record).location.is_none());
    }

    #[rstest]
    fn zero_runs_leave_share_missing() {
        let record = RawRecord::from_pairs([("Easy", "0"), ("Intermediate", "0"), ("Difficult", "0")]);
        let node = normalize_record(&record);
        assert_eq!(node.proportion_of_difficult_runs, None);
    }

    #[rstest]
    fn snow_lookup_goes_through_cache(zermatt: RawRecord) {
        let source = StubSnowSource::with_depths([("Zermatt", 47)]);
        let mut cache = SnowCache::new();

        let first = normalize_with_snow(&zermatt, &mut cache, &source);
        let second = normalize_with_snow(&zermatt, &mut cache, &source);

        assert_eq!(first.current_snow_depth, Some(47));
        assert_eq!(second.current_snow_depth, Some(47));
        assert_eq!(source.calls(), 1);
    }

    #[rstest]
    fn nameless_rows_skip_lookup() {
        let source = StubSnowSource::default();
        let mut cache = SnowCache::new();
        let node = normalize_with_snow(&RawRecord::default(), &mut cache, &source);
        assert_eq!(node.current_snow_depth, None);
        assert_eq!(source.calls(), 0);
        assert!(cache.is_empty());
    }
}
