//! Data access for the Powder ski resort recommender.
//!
//! Responsibilities:
//! - Read the tabular resort source and normalise its rows into
//!   [`powder_core::ResortNode`]s.
//! - Persist the snow-depth cache as JSON.
//! - Fetch live snow depths over HTTP.
//! - Assemble a connected network for one continent.
//!
//! Boundaries:
//! - Do not encode scoring rules (they live in `powder-core`).
//! - Degrade bad cells, failed lookups and unreadable caches to "missing";
//!   only reading the resort table itself and saving the cache can fail.
//!
//! Invariants:
//! - No global mutable state; the cache and the snow source are passed in.

mod batch;
mod cache;
mod normalize;
mod records;
pub mod snow;

pub use batch::{in_continent, load_continent};
pub use cache::{SnowCache, SnowCacheError};
pub use normalize::{normalize_record, normalize_with_snow, parse_count, parse_decimal};
pub use records::{RawRecord, RecordsError, columns, read_records, read_records_from};
