// Search API HTTP client
//
// Wraps `reqwest::Client` with first-letter URL construction and envelope
// decoding. A non-200 status is reported as an absent envelope rather than
// an error; only transport and decoding faults surface as `Error`.

use reqwest::StatusCode;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::SearchResponse;
use crate::transport::TransportConfig;

/// Public first-letter search endpoint. The query character is appended
/// directly to this string.
pub const DEFAULT_SEARCH_URL: &str = "https://www.thecocktaildb.com/api/json/v1/1/search.php?f=";

/// Raw HTTP client for TheCocktailDB first-letter search.
#[derive(Debug, Clone)]
pub struct CocktailClient {
    http: reqwest::Client,
    base_url: Url,
}

impl CocktailClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the full search prefix, query string included
    /// (e.g. [`DEFAULT_SEARCH_URL`]).
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// Parse `base_url` and wrap an existing `reqwest::Client`.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        Ok(Self::with_client(http, Url::parse(base_url)?))
    }

    /// The search prefix requests are built from.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build the request URL by appending `letter` to the search prefix.
    pub fn search_url(&self, letter: char) -> Result<Url, Error> {
        Ok(Url::parse(&format!("{}{letter}", self.base_url))?)
    }

    /// Fetch every cocktail whose name starts with `letter`.
    ///
    /// Returns `Ok(None)` for any status other than 200. No validation is
    /// performed on `letter`.
    pub async fn search_by_first_letter(
        &self,
        letter: char,
    ) -> Result<Option<SearchResponse>, Error> {
        let url = self.search_url(letter)?;
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;

        let status = resp.status();
        if status != StatusCode::OK {
            debug!(status = status.as_u16(), "search returned non-success status");
            return Ok(None);
        }

        let body = resp.text().await.map_err(Error::Transport)?;

        let envelope: SearchResponse =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body: body.clone(),
            })?;

        debug!(count = envelope.records().len(), "search decoded");
        Ok(Some(envelope))
    }
}
