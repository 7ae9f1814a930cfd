//! Core domain model for the Powder ski resort recommender.
//!
//! The crate holds the resort network and everything needed to rank it:
//! - [`distance`] computes great-circle distances between resorts.
//! - [`ResortNode`] carries the static attributes, live snow data and the
//!   distance-weighted links of a single resort.
//! - [`ResortNetwork`] owns the nodes of one load batch, links every pair,
//!   and runs the scoring pass used to pick recommendations.
//!
//! Everything here is synchronous and free of I/O. Reading the resort table,
//! persisting the snow cache and talking to the snow service live in
//! `powder-data`; the [`SnowDepthSource`] trait is the seam between the two.
//!
//! # Examples
//!
//! ```
//! use powder_core::{PriorityProfile, ResortAttribute, ResortNetwork, ResortNode};
//!
//! let mut network = ResortNetwork::new();
//! let mut node = ResortNode::new("Zermatt").with_location(46.02, 7.75);
//! node.snow_reliability = Some(5.0);
//! node.apres_ski = Some(4.0);
//! network.add_node(node);
//! network.connect_all();
//!
//! let profile = PriorityProfile::new()
//!     .with_weight(ResortAttribute::SnowReliability, 1.0)
//!     .with_weight(ResortAttribute::ApresSki, 0.5);
//! network.score_all(&profile, 0.0);
//!
//! let best = network.ranked(1);
//! assert_eq!(best.first().map(|node| node.name.as_str()), Some("Zermatt"));
//! ```

#![forbid(unsafe_code)]

pub mod attribute;
pub mod continent;
pub mod distance;
pub mod network;
pub mod node;
pub mod profile;
pub mod similarity;
pub mod snow;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use attribute::{ResortAttribute, UnknownAttribute};
pub use continent::{Continent, UnknownContinent};
pub use distance::{EARTH_RADIUS_KM, distance_km, haversine_km};
pub use network::{NodeId, ResortNetwork};
pub use node::{Connection, ResortNode, RunCounts};
pub use profile::PriorityProfile;
pub use similarity::{MATCH_THRESHOLD, similarity_ratio};
pub use snow::{NoSnowData, SnowDepthSource, SnowLookupError};
