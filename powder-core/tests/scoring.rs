//! End-to-end checks of distances, snow normalisation and the scoring pass.

use geo::Coord;
use powder_core::{
    NodeId, PriorityProfile, ResortAttribute, ResortNetwork, ResortNode, distance_km,
};
use rstest::{fixture, rstest};

const TOLERANCE: f64 = 1e-6;

#[rstest]
#[case((0.0, 0.0), (0.0, 1.0), 111.194_926_644_558_73)]
#[case((0.0, 0.0), (1.0, 0.0), 111.194_926_644_558_73)]
#[case((0.0, 1.0), (1.0, 0.0), 157.249_381_271_943_97)]
#[case((0.0, 0.0), (0.0, 90.0), 10_007.543_398_010_286)]
fn haversine_spot_checks(
    #[case] from: (f64, f64),
    #[case] to: (f64, f64),
    #[case] expected: f64,
) {
    let from = Some(Coord { x: from.1, y: from.0 });
    let to = Some(Coord { x: to.1, y: to.0 });
    let forward = distance_km(from, to).expect("distinct points");
    let backward = distance_km(to, from).expect("distinct points");
    assert!((forward - expected).abs() < TOLERANCE);
    assert_eq!(forward, backward);
}

/// Three resorts on a one-degree triangle: A at the origin, B one degree
/// east, C one degree north. A–B and A–C are about 111 km apart, B–C about
/// 157 km.
#[fixture]
fn triangle() -> ResortNetwork {
    let mut network = ResortNetwork::new();
    let mut a = ResortNode::new("A")
        .with_location(0.0, 0.0)
        .with_attribute(ResortAttribute::SnowReliability, 4.0);
    a.current_snow_depth = Some(200);
    let mut b = ResortNode::new("B")
        .with_location(0.0, 1.0)
        .with_attribute(ResortAttribute::SnowReliability, 2.0);
    b.current_snow_depth = Some(100);
    let c = ResortNode::new("C")
        .with_location(1.0, 0.0)
        .with_attribute(ResortAttribute::SnowReliability, 3.0);
    for node in [a, b, c] {
        network.add_node(node);
    }
    network.connect_all();
    network.normalise_snow_depths();
    network
}

fn score(network: &ResortNetwork, index: usize) -> f64 {
    network
        .get(NodeId::new(index))
        .map_or(f64::NAN, ResortNode::score)
}

#[rstest]
fn cutoff_limits_which_neighbours_count(mut triangle: ResortNetwork) {
    let profile = PriorityProfile::new().with_weight(ResortAttribute::SnowReliability, 0.5);
    triangle.score_all(&profile, 150.0);

    // A: snow 5.0 and reliability 2.0; neighbours are still unscored.
    assert!((score(&triangle, 0) - 3.5).abs() < TOLERANCE);
    // B: snow 2.5, reliability 1.0 and A's 3.5.
    assert!((score(&triangle, 1) - 7.0 / 3.0).abs() < TOLERANCE);
    // C: reliability 1.5 and A's 3.5; B lies beyond the cutoff.
    assert!((score(&triangle, 2) - 2.5).abs() < TOLERANCE);
}

#[rstest]
fn ranked_and_leaders_differ(mut triangle: ResortNetwork) {
    let profile = PriorityProfile::new().with_weight(ResortAttribute::SnowReliability, 0.5);
    triangle.score_all(&profile, 150.0);

    let ranked: Vec<_> = triangle.ranked(5).iter().map(|n| n.name.as_str()).collect();
    assert_eq!(ranked, ["A", "C", "B"]);
    let leaders: Vec<_> = triangle.leaders(5).iter().map(|n| n.name.as_str()).collect();
    assert_eq!(leaders, ["A"]);
}

#[rstest]
fn zero_cutoff_ignores_neighbours(mut triangle: ResortNetwork) {
    let profile = PriorityProfile::new().with_weight(ResortAttribute::SnowReliability, 0.5);
    triangle.score_all(&profile, 0.0);

    assert!((score(&triangle, 1) - 1.75).abs() < TOLERANCE);
    assert_eq!(score(&triangle, 2), 0.0, "a single factor is rejected");
}
