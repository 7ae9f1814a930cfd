//! The resort network: every node of one load batch and the links between
//! them.
//!
//! A network is built once per continent selection. Nodes keep their
//! insertion order, which is also the order of the single scoring pass, so
//! results are reproducible for a given input file.

use log::debug;

use crate::{MATCH_THRESHOLD, PriorityProfile, ResortNode, distance_km, similarity_ratio};

/// Position of a node within its network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Wrap an insertion index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Return the insertion index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// An ordered collection of resorts with pairwise distances.
///
/// Names are not required to be unique; lookups return the first match.
///
/// # Examples
/// ```
/// use powder_core::{ResortNetwork, ResortNode};
///
/// let mut network = ResortNetwork::new();
/// let zermatt = network.add_node(ResortNode::new("Zermatt").with_location(46.02, 7.75));
/// let saas_fee = network.add_node(ResortNode::new("Saas-Fee").with_location(46.11, 7.93));
/// network.connect_all();
///
/// let distance = network
///     .get(zermatt)
///     .and_then(|node| node.distance_to(saas_fee))
///     .expect("both resorts have coordinates");
/// assert!(distance > 10.0 && distance < 20.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ResortNetwork {
    nodes: Vec<ResortNode>,
}

impl ResortNetwork {
    /// Construct an empty network.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node and return its identifier.
    pub fn add_node(&mut self, node: ResortNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Return the number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Report whether the network holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Return all nodes in insertion order.
    #[must_use]
    pub fn nodes(&self) -> &[ResortNode] {
        &self.nodes
    }

    /// Iterate over nodes with their identifiers.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &ResortNode)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId(index), node))
    }

    /// Return the node with the given identifier.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&ResortNode> {
        self.nodes.get(id.0)
    }

    /// Return the node with the given identifier mutably.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut ResortNode> {
        self.nodes.get_mut(id.0)
    }

    /// Return the first node whose name matches exactly, case-sensitively.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&ResortNode> {
        self.nodes.iter().find(|node| node.name == name)
    }

    /// Return the node whose name is most similar to `query`.
    ///
    /// Similarity is [`similarity_ratio`]; the best candidate is returned only
    /// when its ratio exceeds [`MATCH_THRESHOLD`]. Among equally similar
    /// names the first in insertion order wins.
    ///
    /// # Examples
    /// ```
    /// use powder_core::{ResortNetwork, ResortNode};
    ///
    /// let mut network = ResortNetwork::new();
    /// network.add_node(ResortNode::new("Chamonix"));
    /// assert!(network.find_best_match("chamonix").is_some());
    /// assert!(network.find_best_match("Courchevel").is_none());
    /// ```
    #[must_use]
    pub fn find_best_match(&self, query: &str) -> Option<&ResortNode> {
        let mut best: Option<(&ResortNode, f64)> = None;
        for node in &self.nodes {
            let ratio = similarity_ratio(query, &node.name);
            if best.is_none_or(|(_, best_ratio)| ratio > best_ratio) {
                best = Some((node, ratio));
            }
        }
        best.filter(|&(_, ratio)| ratio > MATCH_THRESHOLD)
            .map(|(node, _)| node)
    }

    /// Link every ordered pair of distinct nodes with their distance.
    ///
    /// Existing connections are replaced, so calling this again after adding
    /// nodes yields a complete graph over the current node set.
    pub fn connect_all(&mut self) {
        let locations: Vec<_> = self.nodes.iter().map(|node| node.location).collect();
        for (index, node) in self.nodes.iter_mut().enumerate() {
            node.clear_connections();
            for (other, location) in locations.iter().enumerate() {
                if other == index {
                    continue;
                }
                node.push_connection(NodeId(other), distance_km(node.location, *location));
            }
        }
        debug!("Connected {} resorts pairwise", self.nodes.len());
    }

    /// Rescale current snow depths to `0.0..=5.0` against the deepest resort.
    ///
    /// Nodes without a depth are left unset. When no node has a depth the
    /// network is unchanged; when the deepest reading is zero every known
    /// depth normalises to `0.0`.
    #[expect(
        clippy::float_arithmetic,
        reason = "depths are rescaled relative to the batch maximum"
    )]
    pub fn normalise_snow_depths(&mut self) {
        let Some(max_depth) = self
            .nodes
            .iter()
            .filter_map(|node| node.current_snow_depth)
            .max()
        else {
            debug!("No snow depths known; skipping normalisation");
            return;
        };
        let max_depth = f64::from(max_depth);
        for node in &mut self.nodes {
            node.normalized_snow_depth = node.current_snow_depth.map(|depth| {
                if max_depth == 0.0 {
                    0.0
                } else {
                    f64::from(depth) / max_depth * 5.0
                }
            });
        }
    }

    /// Score every node once, in insertion order.
    ///
    /// Each node sees the scores its neighbours hold at the moment it is
    /// scored: neighbours earlier in the order contribute their fresh score,
    /// later ones whatever they held before the pass. The pass is not
    /// repeated until the scores settle.
    pub fn score_all(&mut self, profile: &PriorityProfile, max_distance_km: f64) {
        for index in 0..self.nodes.len() {
            let Some(node) = self.nodes.get(index) else {
                continue;
            };
            let score = node.evaluate(profile, max_distance_km, |id| {
                self.nodes.get(id.0).map(ResortNode::score)
            });
            if let Some(node) = self.nodes.get_mut(index) {
                node.set_score(score);
            }
        }
        debug!(
            "Scored {} resorts, {} with a non-zero score",
            self.nodes.len(),
            self.nodes.iter().filter(|node| node.score() != 0.0).count()
        );
    }

    /// Reset every score to zero.
    pub fn reset_scores(&mut self) {
        for node in &mut self.nodes {
            node.set_score(0.0);
        }
    }

    /// Return the running leaders among scored nodes.
    ///
    /// Walking nodes in insertion order, a node with a non-zero score is
    /// appended whenever its score is at least the highest seen so far. The
    /// result is not a ranking: a high early score hides later, lower
    /// scores, and the list is in discovery order. Use
    /// [`ResortNetwork::ranked`] for a true top-K.
    ///
    /// # Examples
    /// ```
    /// use powder_core::{ResortNetwork, ResortNode};
    ///
    /// let mut network = ResortNetwork::new();
    /// for (name, score) in [("a", 5.0), ("b", 3.0), ("c", 8.0)] {
    ///     let mut node = ResortNode::new(name);
    ///     node.set_score(score);
    ///     network.add_node(node);
    /// }
    /// let names: Vec<_> = network.top_scored().iter().map(|n| n.name.as_str()).collect();
    /// assert_eq!(names, ["a", "c"]);
    /// ```
    #[must_use]
    pub fn top_scored(&self) -> Vec<&ResortNode> {
        let mut high_score = 0.0;
        let mut leaders = Vec::new();
        for node in &self.nodes {
            let score = node.score();
            if score != 0.0 && score >= high_score {
                high_score = score;
                leaders.push(node);
            }
        }
        leaders
    }

    /// Return the last `limit` running leaders, most recent first.
    #[must_use]
    pub fn leaders(&self, limit: usize) -> Vec<&ResortNode> {
        let mut leaders = self.top_scored();
        leaders.reverse();
        leaders.truncate(limit);
        leaders
    }

    /// Return up to `limit` scored nodes by descending score.
    ///
    /// Ties keep insertion order. Nodes with a zero score are excluded.
    #[must_use]
    pub fn ranked(&self, limit: usize) -> Vec<&ResortNode> {
        let mut scored: Vec<_> = self
            .nodes
            .iter()
            .filter(|node| node.score() != 0.0)
            .collect();
        scored.sort_by(|left, right| right.score().total_cmp(&left.score()));
        scored.truncate(limit);
        scored
    }
}
