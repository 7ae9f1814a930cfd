//! Persisted snow-depth cache keyed by resort name.
//!
//! The cache is a JSON object mapping each looked-up resort to its last known
//! depth, with `null` recording that the lookup was made and returned nothing.
//! A missing or unreadable cache file is never fatal: the session starts from
//! an empty cache and rewrites the file after the next load batch.

use std::collections::BTreeMap;
use std::time::{Duration, SystemTime};

use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, info, warn};
use powder_core::SnowDepthSource;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while persisting the cache.
#[derive(Debug, Error)]
pub enum SnowCacheError {
    /// The cache could not be encoded as JSON.
    #[error("failed to encode snow cache")]
    Encode {
        /// Underlying encoder error.
        #[source]
        source: serde_json::Error,
    },
    /// The cache file could not be written.
    #[error("failed to write snow cache to {path}")]
    Write {
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
        /// Target path.
        path: Utf8PathBuf,
    },
}

/// Resort name to last known snow depth.
///
/// # Examples
/// ```
/// use powder_core::NoSnowData;
/// use powder_data::SnowCache;
///
/// let mut cache = SnowCache::new();
/// cache.insert("Zermatt", Some(47));
/// assert_eq!(cache.lookup_or_fetch("Zermatt", &NoSnowData), Some(47));
/// assert_eq!(cache.lookup_or_fetch("Aspen", &NoSnowData), None);
/// assert_eq!(cache.get("Aspen"), Some(None));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnowCache {
    entries: BTreeMap<String, Option<u32>>,
}

impl SnowCache {
    /// Construct an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a cache file, falling back to an empty cache.
    ///
    /// Absence is logged at `debug`; unreadable or corrupt files at `warn`.
    #[must_use]
    pub fn load(path: &Utf8Path) -> Self {
        match powder_fs::file_is_file(path) {
            Ok(true) => {}
            Ok(false) => {
                debug!("No snow cache at {path}; starting empty");
                return Self::new();
            }
            Err(err) => {
                warn!("Cannot inspect snow cache at {path}: {err}; starting empty");
                return Self::new();
            }
        }
        let contents = match powder_fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) => {
                warn!("Cannot read snow cache at {path}: {err}; starting empty");
                return Self::new();
            }
        };
        match serde_json::from_str::<Self>(&contents) {
            Ok(cache) => {
                debug!("Loaded {} cached snow depths from {path}", cache.len());
                cache
            }
            Err(err) => {
                warn!("Ignoring corrupt snow cache at {path}: {err}");
                Self::new()
            }
        }
    }

    /// Load a cache file unless it was last written more than `max_age` ago.
    #[must_use]
    pub fn load_fresh(path: &Utf8Path, max_age: Duration) -> Self {
        Self::load_fresh_at(path, max_age, SystemTime::now())
    }

    /// Like [`SnowCache::load_fresh`] with an explicit notion of "now".
    #[must_use]
    pub fn load_fresh_at(path: &Utf8Path, max_age: Duration, now: SystemTime) -> Self {
        if let Ok(modified) = powder_fs::modified_at(path) {
            // A modification time in the future counts as fresh.
            let age = now.duration_since(modified).unwrap_or_default();
            if age > max_age {
                info!(
                    "Discarding snow cache at {path}: {}h old, limit {}h",
                    age.as_secs() / 3600,
                    max_age.as_secs() / 3600
                );
                return Self::new();
            }
        }
        Self::load(path)
    }

    /// Return the cached entry for `resort`.
    ///
    /// The outer `Option` says whether the resort was ever looked up; the
    /// inner one whether that lookup found a depth.
    #[must_use]
    pub fn get(&self, resort: &str) -> Option<Option<u32>> {
        self.entries.get(resort).copied()
    }

    /// Record the result of a lookup.
    pub fn insert(&mut self, resort: impl Into<String>, depth: Option<u32>) {
        self.entries.insert(resort.into(), depth);
    }

    /// Return the cached depth, asking `source` on a miss.
    ///
    /// Whatever the source answers is cached, so each resort is requested at
    /// most once. Lookup errors are logged and cached as "no data".
    pub fn lookup_or_fetch<S>(&mut self, resort: &str, source: &S) -> Option<u32>
    where
        S: SnowDepthSource + ?Sized,
    {
        if let Some(depth) = self.get(resort) {
            return depth;
        }
        let depth = source.current_depth(resort).unwrap_or_else(|err| {
            warn!("Snow lookup failed, treating as no data: {err}");
            None
        });
        self.insert(resort, depth);
        depth
    }

    /// Return the number of cached resorts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Report whether nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over cached entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<u32>)> + '_ {
        self.entries
            .iter()
            .map(|(name, depth)| (name.as_str(), *depth))
    }

    /// Write the cache as pretty-printed JSON.
    ///
    /// The file is replaced atomically and missing parent directories are
    /// created.
    ///
    /// # Errors
    ///
    /// Returns [`SnowCacheError`] when encoding or writing fails.
    pub fn save(&self, path: &Utf8Path) -> Result<(), SnowCacheError> {
        let bytes =
            serde_json::to_vec_pretty(self).map_err(|source| SnowCacheError::Encode { source })?;
        powder_fs::write_atomic(path, &bytes).map_err(|source| SnowCacheError::Write {
            source,
            path: path.to_path_buf(),
        })?;
        debug!("Saved {} snow depths to {path}", self.len());
        Ok(())
    }
}
