//! Facade crate for the Powder ski resort recommender.
//!
//! This crate re-exports the core domain types together with the data-layer
//! entry points needed to turn a resort table into a scored network.

#![forbid(unsafe_code)]

pub use powder_core::{
    Connection, Continent, NoSnowData, NodeId, PriorityProfile, ResortAttribute, ResortNetwork,
    ResortNode, RunCounts, SnowDepthSource, SnowLookupError, distance_km, haversine_km,
    similarity_ratio,
};

pub use powder_data::snow::{HttpSnowDepthSource, HttpSnowDepthSourceConfig};
pub use powder_data::{
    RawRecord, RecordsError, SnowCache, SnowCacheError, load_continent, normalize_record,
    read_records,
};
