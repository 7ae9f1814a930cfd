//! Great-circle distances between resorts.
//!
//! Coordinates are WGS84 decimal degrees held in a [`geo::Coord`] with
//! `x = longitude` and `y = latitude`.

use geo::Coord;

/// Earth radius used by the Haversine formula, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Return the Haversine distance in kilometres between two coordinates.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use powder_core::haversine_km;
///
/// let origin = Coord { x: 0.0, y: 0.0 };
/// let quarter = Coord { x: 90.0, y: 0.0 };
/// assert!((haversine_km(origin, quarter) - 10_007.543).abs() < 0.01);
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "the Haversine formula is floating-point trigonometry"
)]
#[must_use]
pub fn haversine_km(from: Coord<f64>, to: Coord<f64>) -> f64 {
    let lat_from = from.y.to_radians();
    let lat_to = to.y.to_radians();
    let half_d_lat = (to.y - from.y).to_radians() / 2.0;
    let half_d_lon = (to.x - from.x).to_radians() / 2.0;

    let a = half_d_lat.sin().powi(2) + lat_from.cos() * lat_to.cos() * half_d_lon.sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Return the distance between two optional locations.
///
/// Yields `None` when either location is unknown, when a component is not
/// finite, or when the points coincide. Co-located resorts are treated as
/// unlinked rather than zero kilometres apart.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use powder_core::distance_km;
///
/// let here = Some(Coord { x: 7.75, y: 46.02 });
/// assert_eq!(distance_km(here, None), None);
/// assert_eq!(distance_km(here, here), None);
/// ```
#[must_use]
pub fn distance_km(from: Option<Coord<f64>>, to: Option<Coord<f64>>) -> Option<f64> {
    let (from, to) = (from?, to?);
    if ![from.x, from.y, to.x, to.y].iter().all(|value| value.is_finite()) {
        return None;
    }
    let distance = haversine_km(from, to);
    (distance.is_finite() && distance != 0.0).then_some(distance)
}
