//! Test-only snow sources used by unit and behaviour tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::{SnowDepthSource, SnowLookupError};

/// In-memory `SnowDepthSource` that counts lookups.
///
/// Names without a configured depth answer `Ok(None)`; names registered with
/// [`StubSnowSource::failing`] answer with a timeout.
#[derive(Debug, Default)]
pub struct StubSnowSource {
    depths: HashMap<String, u32>,
    failures: Vec<String>,
    calls: Cell<usize>,
    requested: RefCell<Vec<String>>,
}

impl StubSnowSource {
    /// Create a source answering with the given depths.
    #[must_use]
    pub fn with_depths<I, S>(depths: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        Self {
            depths: depths
                .into_iter()
                .map(|(name, depth)| (name.into(), depth))
                .collect(),
            ..Self::default()
        }
    }

    /// Make lookups for `resort` fail.
    #[must_use]
    pub fn failing(mut self, resort: impl Into<String>) -> Self {
        self.failures.push(resort.into());
        self
    }

    /// Number of lookups performed so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    /// Names looked up so far, in call order.
    #[must_use]
    pub fn requested(&self) -> Vec<String> {
        self.requested.borrow().clone()
    }
}

impl SnowDepthSource for StubSnowSource {
    fn current_depth(&self, resort: &str) -> Result<Option<u32>, SnowLookupError> {
        self.calls.set(self.calls.get().saturating_add(1));
        self.requested.borrow_mut().push(resort.to_owned());
        if self.failures.iter().any(|name| name == resort) {
            return Err(SnowLookupError::Timeout {
                resort: resort.to_owned(),
            });
        }
        Ok(self.depths.get(resort).copied())
    }
}
