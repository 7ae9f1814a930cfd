//! HTTP-based `SnowDepthSource` for the ski-resort forecast service.
//!
//! The [`SnowDepthSource`] trait is synchronous so the core stays free of
//! async machinery. This source bridges to it by blocking on a Tokio runtime
//! it owns.
//!
//! # Example
//!
//! ```no_run
//! use powder_core::SnowDepthSource;
//! use powder_data::snow::{HttpSnowDepthSource, HttpSnowDepthSourceConfig};
//! use std::time::Duration;
//!
//! let config = HttpSnowDepthSourceConfig::new("my-api-key")
//!     .with_timeout(Duration::from_secs(10));
//! let source = HttpSnowDepthSource::with_config(config)?;
//! let depth = source.current_depth("Zermatt")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::time::Duration;

use log::debug;
use powder_core::{SnowDepthSource, SnowLookupError};
use reqwest::Client;
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use url::Url;

use super::conditions::SnowConditions;

/// Default base URL of the forecast service.
pub const DEFAULT_BASE_URL: &str = "https://ski-resort-forecast.p.rapidapi.com";

/// Default value of the `X-RapidAPI-Host` header.
pub const DEFAULT_API_HOST: &str = "ski-resort-forecast.p.rapidapi.com";

/// Default user agent for snow requests.
pub const DEFAULT_USER_AGENT: &str = "powder-snow/0.1";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const API_KEY_HEADER: &str = "X-RapidAPI-Key";
const API_HOST_HEADER: &str = "X-RapidAPI-Host";

/// Errors raised while constructing an [`HttpSnowDepthSource`].
#[derive(Debug, Error)]
pub enum SnowSourceBuildError {
    /// The configured base URL does not parse or cannot take path segments.
    #[error("invalid snow service base URL '{base_url}'")]
    InvalidBaseUrl {
        /// The offending URL.
        base_url: String,
    },
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime")]
    Runtime(#[source] std::io::Error),
}

/// Configuration for [`HttpSnowDepthSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSnowDepthSourceConfig {
    /// Base URL for the service.
    pub base_url: String,
    /// API key sent with every request.
    pub api_key: String,
    /// Value of the API host header.
    pub api_host: String,
    /// Unit system requested from the service: `i` for imperial, `m` for
    /// metric.
    pub units: String,
    /// Request timeout.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl HttpSnowDepthSourceConfig {
    /// Create a configuration with the given API key and defaults elsewhere.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key: api_key.into(),
            api_host: DEFAULT_API_HOST.to_owned(),
            units: "i".to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }

    /// Set the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the API host header value.
    #[must_use]
    pub fn with_api_host(mut self, api_host: impl Into<String>) -> Self {
        self.api_host = api_host.into();
        self
    }

    /// Set the requested unit system.
    #[must_use]
    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = units.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Snow-depth source backed by the forecast service's `snowConditions`
/// endpoint.
///
/// # Runtime behaviour
///
/// Outside any Tokio runtime the source blocks on its own stored runtime.
/// Inside a multi-threaded runtime it uses that runtime's handle with
/// [`tokio::task::block_in_place`] to avoid nested runtime panics.
///
/// Inside a `current_thread` runtime neither of those is allowed: entering
/// the stored runtime would panic and `block_in_place` is unsupported. The
/// request then runs on the stored runtime from a short-lived OS thread while
/// the caller's thread waits, which stalls every other task on that runtime
/// until the lookup finishes or times out.
pub struct HttpSnowDepthSource {
    client: Client,
    base_url: Url,
    config: HttpSnowDepthSourceConfig,
    runtime: Runtime,
}

impl std::fmt::Debug for HttpSnowDepthSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSnowDepthSource")
            .field("base_url", &self.base_url.as_str())
            .field("api_host", &self.config.api_host)
            .field("timeout", &self.config.timeout)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish_non_exhaustive()
    }
}

impl HttpSnowDepthSource {
    /// Create a source with the given API key and default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(api_key: impl Into<String>) -> Result<Self, SnowSourceBuildError> {
        Self::with_config(HttpSnowDepthSourceConfig::new(api_key))
    }

    /// Create a source with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client or
    /// Tokio runtime fails to build.
    pub fn with_config(config: HttpSnowDepthSourceConfig) -> Result<Self, SnowSourceBuildError> {
        let base_url = Url::parse(&config.base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| SnowSourceBuildError::InvalidBaseUrl {
                base_url: config.base_url.clone(),
            })?;
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(SnowSourceBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(SnowSourceBuildError::Runtime)?;
        Ok(Self {
            client,
            base_url,
            config,
            runtime,
        })
    }

    /// Build the conditions URL for a resort.
    ///
    /// The resort name becomes a single, percent-encoded path segment.
    fn conditions_url(&self, resort: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(resort).push("snowConditions");
        }
        url.query_pairs_mut()
            .clear()
            .append_pair("units", &self.config.units);
        url
    }

    async fn fetch_depth_async(&self, resort: &str) -> Result<Option<u32>, SnowLookupError> {
        let url = self.conditions_url(resort);
        debug!("Requesting snow conditions for '{resort}'");

        let response = self
            .client
            .get(url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .header(API_HOST_HEADER, &self.config.api_host)
            .send()
            .await
            .map_err(|err| convert_reqwest_error(&err, resort))?
            .error_for_status()
            .map_err(|err| convert_reqwest_error(&err, resort))?;

        let conditions: SnowConditions =
            response
                .json()
                .await
                .map_err(|err| SnowLookupError::Parse {
                    resort: resort.to_owned(),
                    message: err.to_string(),
                })?;

        conditions.top_depth(resort)
    }
}

fn convert_reqwest_error(error: &reqwest::Error, resort: &str) -> SnowLookupError {
    let resort = resort.to_owned();
    if error.is_timeout() {
        return SnowLookupError::Timeout { resort };
    }
    if let Some(status) = error.status() {
        return SnowLookupError::Http {
            resort,
            status: status.as_u16(),
        };
    }
    SnowLookupError::Network {
        resort,
        message: error.to_string(),
    }
}

impl SnowDepthSource for HttpSnowDepthSource {
    fn current_depth(&self, resort: &str) -> Result<Option<u32>, SnowLookupError> {
        let future = self.fetch_depth_async(resort);
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            Ok(_) => std::thread::scope(|scope| {
                scope
                    .spawn(|| self.runtime.block_on(future))
                    .join()
                    .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
            }),
            Err(_) => self.runtime.block_on(future),
        }
    }
}
