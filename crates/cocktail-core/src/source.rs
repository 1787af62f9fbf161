// ── Fetch seam ──
//
// The flow never talks to HTTP directly. It asks a `CocktailSource`, which
// in production is `CocktailService` wrapping the API client.

use std::future::Future;

use cocktail_api::{CocktailClient, SearchResponse};
use tracing::debug;
use url::Url;

use crate::config::ServiceConfig;
use crate::error::CoreError;
use crate::query::Query;

/// Anything that can answer a first-letter search.
///
/// `Ok(None)` is the absent envelope (non-success status). The returned
/// future is `Send` so UIs can run it on a background task.
pub trait CocktailSource {
    fn fetch(
        &self,
        query: Query,
    ) -> impl Future<Output = Result<Option<SearchResponse>, CoreError>> + Send;
}

/// Production source backed by TheCocktailDB.
///
/// Cheap to clone: the underlying `reqwest::Client` is reference-counted,
/// so clones share one connection pool.
#[derive(Debug, Clone)]
pub struct CocktailService {
    client: CocktailClient,
}

impl CocktailService {
    pub fn new(config: &ServiceConfig) -> Result<Self, CoreError> {
        let client = CocktailClient::new(config.base_url.clone(), &config.transport())?;
        Ok(Self { client })
    }

    pub fn base_url(&self) -> &Url {
        self.client.base_url()
    }
}

impl CocktailSource for CocktailService {
    async fn fetch(&self, query: Query) -> Result<Option<SearchResponse>, CoreError> {
        debug!(%query, "fetching cocktails");
        Ok(self.client.search_by_first_letter(query.letter()).await?)
    }
}
