//! A single resort, its attributes and its links to other resorts.
//!
//! The scoring formula lives here too: [`ResortNode::evaluate`] averages the
//! normalised snow depth, the weighted attributes and the scores of nearby,
//! already-scored neighbours.

use geo::Coord;

use crate::{Continent, NodeId, PriorityProfile, ResortAttribute};

/// Minimum number of contributing factors for a non-zero score.
pub const MIN_FACTORS: u32 = 2;

/// A directional distance record from one node to another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    /// The node at the far end of the link.
    pub target: NodeId,
    /// Great-circle distance in kilometres, when both locations are known
    /// and distinct.
    pub distance_km: Option<f64>,
}

/// Raw run counts by difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunCounts {
    /// Number of easy runs.
    pub easy: Option<u32>,
    /// Number of intermediate runs.
    pub intermediate: Option<u32>,
    /// Number of difficult runs.
    pub difficult: Option<u32>,
}

impl RunCounts {
    /// Share of difficult runs rescaled to `0.0..=5.0`.
    ///
    /// Returns `None` when any count is missing or the total is zero.
    ///
    /// # Examples
    /// ```
    /// use powder_core::RunCounts;
    ///
    /// let runs = RunCounts { easy: Some(2), intermediate: Some(3), difficult: Some(5) };
    /// assert_eq!(runs.proportion_of_difficult(), Some(2.5));
    /// ```
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "run shares are ratios of counts"
    )]
    #[must_use]
    pub fn proportion_of_difficult(&self) -> Option<f64> {
        let easy = u64::from(self.easy?);
        let intermediate = u64::from(self.intermediate?);
        let difficult = u64::from(self.difficult?);
        let total = easy + intermediate + difficult;
        if total == 0 {
            return None;
        }
        Some(5.0 * (difficult as f64 / total as f64))
    }
}

/// One ski resort in a network.
///
/// Attribute fields are `None` when the resort table did not supply a usable
/// value. `score` starts at zero and is only changed by a scoring pass.
///
/// # Examples
/// ```
/// use powder_core::{ResortAttribute, ResortNode};
///
/// let mut node = ResortNode::new("Verbier").with_location(46.1, 7.23);
/// node.cleanliness = Some(4.0);
/// assert_eq!(node.attribute(ResortAttribute::Cleanliness), Some(4.0));
/// assert_eq!(node.score(), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResortNode {
    /// Resort name; the lookup key within a network.
    pub name: String,
    /// Resort web page.
    pub url: String,
    /// Continent the resort belongs to.
    pub continent: Option<Continent>,
    /// Country, when known.
    pub country: Option<String>,
    /// State, province or region, when known.
    pub state_province: Option<String>,
    /// Position with `x = longitude` and `y = latitude`.
    pub location: Option<Coord<f64>>,
    /// Star rating from the resort table.
    pub stars: Option<f64>,
    /// Kilometres of freeride terrain.
    pub km_freeride: Option<f64>,
    /// Snow reliability rating.
    pub snow_reliability: Option<f64>,
    /// Après-ski rating.
    pub apres_ski: Option<f64>,
    /// Resort size rating.
    pub resort_size: Option<f64>,
    /// Slope variety rating.
    pub variety_of_runs: Option<f64>,
    /// Cleanliness and hygiene rating.
    pub cleanliness: Option<f64>,
    /// Raw run counts.
    pub runs: RunCounts,
    /// Difficult-run share derived from [`ResortNode::runs`].
    pub proportion_of_difficult_runs: Option<f64>,
    /// Latest known top snow depth.
    pub current_snow_depth: Option<u32>,
    /// Snow depth rescaled to `0.0..=5.0` against the deepest resort in the
    /// batch.
    pub normalized_snow_depth: Option<f64>,
    connections: Vec<Connection>,
    score: f64,
}

impl ResortNode {
    /// Construct a node with a name and no other data.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the location from latitude and longitude in decimal degrees.
    #[must_use]
    pub fn with_location(mut self, latitude: f64, longitude: f64) -> Self {
        self.location = Some(Coord {
            x: longitude,
            y: latitude,
        });
        self
    }

    /// Set an attribute while returning `self` for chaining.
    #[must_use]
    pub fn with_attribute(mut self, attribute: ResortAttribute, value: f64) -> Self {
        self.set_attribute(attribute, Some(value));
        self
    }

    /// Latitude in decimal degrees, when known.
    #[must_use]
    pub fn latitude(&self) -> Option<f64> {
        self.location.map(|coord| coord.y)
    }

    /// Longitude in decimal degrees, when known.
    #[must_use]
    pub fn longitude(&self) -> Option<f64> {
        self.location.map(|coord| coord.x)
    }

    /// Look up a scorable attribute.
    #[must_use]
    pub const fn attribute(&self, attribute: ResortAttribute) -> Option<f64> {
        match attribute {
            ResortAttribute::SnowReliability => self.snow_reliability,
            ResortAttribute::ApresSki => self.apres_ski,
            ResortAttribute::ResortSize => self.resort_size,
            ResortAttribute::VarietyOfRuns => self.variety_of_runs,
            ResortAttribute::Cleanliness => self.cleanliness,
            ResortAttribute::KmFreeride => self.km_freeride,
            ResortAttribute::ProportionOfDifficultRuns => self.proportion_of_difficult_runs,
        }
    }

    /// Overwrite a scorable attribute.
    pub const fn set_attribute(&mut self, attribute: ResortAttribute, value: Option<f64>) {
        let slot = match attribute {
            ResortAttribute::SnowReliability => &mut self.snow_reliability,
            ResortAttribute::ApresSki => &mut self.apres_ski,
            ResortAttribute::ResortSize => &mut self.resort_size,
            ResortAttribute::VarietyOfRuns => &mut self.variety_of_runs,
            ResortAttribute::Cleanliness => &mut self.cleanliness,
            ResortAttribute::KmFreeride => &mut self.km_freeride,
            ResortAttribute::ProportionOfDifficultRuns => &mut self.proportion_of_difficult_runs,
        };
        *slot = value;
    }

    /// Store run counts and refresh the derived difficult-run share.
    pub fn set_runs(&mut self, runs: RunCounts) {
        self.runs = runs;
        self.proportion_of_difficult_runs = runs.proportion_of_difficult();
    }

    /// Record the distance to another node.
    ///
    /// A second call for the same target replaces the earlier distance.
    pub fn add_connection(&mut self, target: NodeId, distance_km: Option<f64>) {
        match self
            .connections
            .iter_mut()
            .find(|connection| connection.target == target)
        {
            Some(existing) => existing.distance_km = distance_km,
            None => self.connections.push(Connection {
                target,
                distance_km,
            }),
        }
    }

    /// Append a connection without checking for an existing target.
    pub(crate) fn push_connection(&mut self, target: NodeId, distance_km: Option<f64>) {
        self.connections.push(Connection {
            target,
            distance_km,
        });
    }

    /// Return the recorded connections in insertion order.
    #[must_use]
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Return the recorded distance to `target`, if linked and known.
    #[must_use]
    pub fn distance_to(&self, target: NodeId) -> Option<f64> {
        self.connections
            .iter()
            .find(|connection| connection.target == target)
            .and_then(|connection| connection.distance_km)
    }

    /// Drop every connection.
    pub fn clear_connections(&mut self) {
        self.connections.clear();
    }

    /// Return the current score.
    #[must_use]
    pub const fn score(&self) -> f64 {
        self.score
    }

    /// Overwrite the current score.
    pub const fn set_score(&mut self, score: f64) {
        self.score = score;
    }

    /// Compute this node's score without storing it.
    ///
    /// Contributions, each counted as one factor:
    /// 1. the normalised snow depth, unweighted, when known;
    /// 2. `value × weight` for every profile attribute the node has;
    /// 3. when `max_distance_km > 0`, the score of every neighbour whose
    ///    recorded distance is known, non-zero and below the cutoff, and whose
    ///    score (as reported by `neighbour_score`) is already non-zero.
    ///
    /// The result is the mean of all contributions, or `0.0` when the sum is
    /// zero or fewer than [`MIN_FACTORS`] factors contributed.
    #[must_use]
    pub fn evaluate<F>(
        &self,
        profile: &PriorityProfile,
        max_distance_km: f64,
        neighbour_score: F,
    ) -> f64
    where
        F: Fn(NodeId) -> Option<f64>,
    {
        let mut tally = Tally::default();

        if let Some(depth) = self.normalized_snow_depth {
            tally.add(depth);
        }

        for (attribute, weight) in profile.iter() {
            if let Some(value) = self.attribute(attribute) {
                tally.add_weighted(value, weight);
            }
        }

        if max_distance_km > 0.0 {
            for connection in &self.connections {
                let Some(distance) = connection.distance_km else {
                    continue;
                };
                if distance >= max_distance_km || distance == 0.0 {
                    continue;
                }
                match neighbour_score(connection.target) {
                    Some(score) if score != 0.0 => tally.add(score),
                    _ => {}
                }
            }
        }

        tally.mean()
    }

    /// Compute and store this node's score, returning it.
    ///
    /// See [`ResortNode::evaluate`] for the formula. A rejected score is
    /// stored as `0.0`.
    pub fn calculate_score<F>(
        &mut self,
        profile: &PriorityProfile,
        max_distance_km: f64,
        neighbour_score: F,
    ) -> f64
    where
        F: Fn(NodeId) -> Option<f64>,
    {
        let score = self.evaluate(profile, max_distance_km, neighbour_score);
        self.score = score;
        score
    }
}

/// Running sum and factor count for one score.
#[derive(Debug, Default)]
struct Tally {
    sum: f64,
    factors: u32,
}

impl Tally {
    #[expect(clippy::float_arithmetic, reason = "scores are summed as floats")]
    fn add(&mut self, contribution: f64) {
        self.sum += contribution;
        self.factors = self.factors.saturating_add(1);
    }

    #[expect(clippy::float_arithmetic, reason = "attributes are scaled by weight")]
    fn add_weighted(&mut self, value: f64, weight: f64) {
        self.add(value * weight);
    }

    #[expect(clippy::float_arithmetic, reason = "the score is an arithmetic mean")]
    fn mean(&self) -> f64 {
        if self.sum == 0.0 || self.factors < MIN_FACTORS {
            return 0.0;
        }
        self.sum / f64::from(self.factors)
    }
}
