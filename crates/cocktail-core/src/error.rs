// ── Core error types ──
//
// User-facing errors from cocktail-core. The `From<cocktail_api::Error>`
// impl translates transport-layer errors into domain variants; the flow
// folds every fetch failure into "No results found." after logging it.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Input errors ─────────────────────────────────────────────────
    #[error("Invalid query {input:?}: expected a single letter")]
    InvalidQuery { input: String },

    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach search service at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Search request timed out")]
    Timeout,

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<cocktail_api::Error> for CoreError {
    fn from(err: cocktail_api::Error) -> Self {
        if err.is_timeout() {
            return CoreError::Timeout;
        }
        match err {
            cocktail_api::Error::Transport(ref e) => {
                if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            cocktail_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            cocktail_api::Error::ClientBuild(message) => CoreError::Config { message },
            cocktail_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
