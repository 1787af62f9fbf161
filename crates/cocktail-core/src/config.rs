// ── Runtime service configuration ──
//
// Describes *where* and *how* to reach the search service. Never touches
// disk: the TUI (via cocktail-config) constructs a `ServiceConfig` and
// hands it in.

use std::time::Duration;

use cocktail_api::{DEFAULT_SEARCH_URL, TransportConfig};
use url::Url;

/// Configuration for the search service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Search prefix; the query letter is appended to it verbatim.
    pub base_url: Url,
    /// Whole-request timeout.
    pub timeout: Duration,
    /// Connect timeout.
    pub connect_timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_SEARCH_URL).expect("default search URL is valid"),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl ServiceConfig {
    pub(crate) fn transport(&self) -> TransportConfig {
        TransportConfig {
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            ..TransportConfig::default()
        }
    }
}
