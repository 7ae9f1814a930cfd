//! Look up current snow depths for resorts.
//!
//! The `SnowDepthSource` trait abstracts the remote snow service. A source
//! answers with a depth, with `None` when the service has no reading for the
//! resort, or with an error when the lookup itself failed. Callers treat
//! errors as "no data" and carry on with the batch.

use thiserror::Error;

/// Errors from [`SnowDepthSource::current_depth`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnowLookupError {
    /// The service did not answer in time.
    #[error("snow service timed out for '{resort}'")]
    Timeout {
        /// Resort that was being looked up.
        resort: String,
    },
    /// The service answered with a non-success status.
    #[error("snow service returned HTTP {status} for '{resort}'")]
    Http {
        /// Resort that was being looked up.
        resort: String,
        /// HTTP status code.
        status: u16,
    },
    /// The request could not be sent or the connection failed.
    #[error("snow service request failed for '{resort}': {message}")]
    Network {
        /// Resort that was being looked up.
        resort: String,
        /// Underlying transport error text.
        message: String,
    },
    /// The response body was not the expected document.
    #[error("snow service response for '{resort}' could not be parsed: {message}")]
    Parse {
        /// Resort that was being looked up.
        resort: String,
        /// Decoder error text.
        message: String,
    },
    /// The depth field was present but not a number followed by a unit.
    #[error("malformed snow depth '{reading}' for '{resort}'")]
    MalformedReading {
        /// Resort that was being looked up.
        resort: String,
        /// Raw reading as returned by the service.
        reading: String,
    },
}

/// Fetch the current top snow depth for a resort by name.
///
/// # Examples
///
/// ```
/// use powder_core::{SnowDepthSource, SnowLookupError};
///
/// struct Fixed;
///
/// impl SnowDepthSource for Fixed {
///     fn current_depth(&self, resort: &str) -> Result<Option<u32>, SnowLookupError> {
///         Ok((resort == "Zermatt").then_some(120))
///     }
/// }
///
/// assert_eq!(Fixed.current_depth("Zermatt")?, Some(120));
/// assert_eq!(Fixed.current_depth("Aspen")?, None);
/// # Ok::<(), SnowLookupError>(())
/// ```
pub trait SnowDepthSource {
    /// Return the current depth, `Ok(None)` when the service has no data.
    fn current_depth(&self, resort: &str) -> Result<Option<u32>, SnowLookupError>;
}

impl<T: SnowDepthSource + ?Sized> SnowDepthSource for &T {
    fn current_depth(&self, resort: &str) -> Result<Option<u32>, SnowLookupError> {
        (**self).current_depth(resort)
    }
}

impl<T: SnowDepthSource + ?Sized> SnowDepthSource for Box<T> {
    fn current_depth(&self, resort: &str) -> Result<Option<u32>, SnowLookupError> {
        (**self).current_depth(resort)
    }
}

/// Source that never has data; used when running offline.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSnowData;

impl SnowDepthSource for NoSnowData {
    fn current_depth(&self, _resort: &str) -> Result<Option<u32>, SnowLookupError> {
        Ok(None)
    }
}
