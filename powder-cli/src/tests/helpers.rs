//! Test helpers providing a resort table on disk and a scripted snow service.

use std::rc::Rc;

use camino::Utf8PathBuf;
use powder_core::test_support::StubSnowSource;
use powder_core::{SnowDepthSource, SnowLookupError};
use tempfile::TempDir;

use crate::config::{DataConfig, SnowSourceBuilder};

use super::*;

/// Three European resorts and one North American resort.
///
/// With every rating weighted 1 and no snow data the European scores are
/// Zermatt 24.25 / 6, Verbier 25.5 / 6 and Kitzbühel 21 / 6.
pub(super) const RESORT_TABLE: &str = "\
NameResort,URL,Stars,Continent,Country,State/Province,latitude,longitude,\
Snow reliability ,Après-ski ,Ski resort size ,\"Slope offering, variety of runs \",\
Cleanliness and hygiene ,Easy,Intermediate,Difficult\n\
Zermatt,https://zermatt.example,5,europe,Switzerland,Valais,\"46,02\",7.75,5,4,4,5,5,10,20,10\n\
Vail,https://vail.example,5,north america,USA,Colorado,39.64,-106.37,4,5,5,5,5,20,20,20\n\
Verbier,https://verbier.example,4,europe,Switzerland,Valais,46.10,7.23,4,5,5,5,4,10,10,20\n\
Kitzbühel,https://kitzbuehel.example,4,europe,Austria,Tyrol,47.45,12.39,3,5,4,4,5,20,20,0\n";

/// A temporary directory holding the resort table and the snow cache.
pub(super) struct ResortFiles {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl ResortFiles {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 tempdir");
        std::fs::write(root.join("resorts.csv"), RESORT_TABLE).expect("write resort table");
        Self { _dir: dir, root }
    }

    pub(super) fn resorts(&self) -> Utf8PathBuf {
        self.root.join("resorts.csv")
    }

    pub(super) fn cache(&self) -> Utf8PathBuf {
        self.root.join("state/cache.json")
    }

    pub(super) fn missing(&self) -> Utf8PathBuf {
        self.root.join("missing.csv")
    }

    pub(super) fn root(&self) -> &Utf8PathBuf {
        &self.root
    }
}

struct SharedSource(Rc<StubSnowSource>);

impl SnowDepthSource for SharedSource {
    fn current_depth(&self, resort: &str) -> Result<Option<u32>, SnowLookupError> {
        self.0.current_depth(resort)
    }
}

/// Hands out one shared [`StubSnowSource`] so tests can inspect its lookups.
pub(super) struct StubSnowSourceBuilder {
    source: Rc<StubSnowSource>,
}

impl StubSnowSourceBuilder {
    pub(super) fn new(source: StubSnowSource) -> Self {
        Self {
            source: Rc::new(source),
        }
    }

    pub(super) fn source(&self) -> &StubSnowSource {
        &self.source
    }
}

impl SnowSourceBuilder for StubSnowSourceBuilder {
    fn build(&self, _config: &DataConfig) -> Result<Box<dyn SnowDepthSource>, CliError> {
        Ok(Box::new(SharedSource(Rc::clone(&self.source))))
    }
}

/// Snow depths for two of the three European resorts.
pub(super) fn alpine_snow() -> StubSnowSource {
    StubSnowSource::with_depths([("Zermatt", 60), ("Verbier", 120)])
}
