//! Search-and-display logic between `cocktail-api` and UI consumers.
//!
//! - **[`SearchFlow`]**: validate → fetch → transform → render. Owns the
//!   results list and selection, and pushes every change to a
//!   [`Presenter`]. [`submit`](SearchFlow::submit) and
//!   [`complete`](SearchFlow::complete) split a search around the network
//!   call so a UI can run the fetch in the background;
//!   [`search`](SearchFlow::search) does all three steps in one call.
//!
//! - **[`CocktailSource`]**: the fetch seam. [`CocktailService`] implements
//!   it over the HTTP client; tests substitute their own.
//!
//! - **[`Query`]**: a validated single lowercase letter.

pub mod config;
pub mod error;
pub mod flow;
pub mod query;
pub mod source;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::ServiceConfig;
pub use error::CoreError;
pub use flow::{
    FetchOutcome, FlowState, INVALID_QUERY_MESSAGE, NO_RESULTS_MESSAGE, Presenter, SearchFlow,
    SearchTicket,
};
pub use query::Query;
pub use source::{CocktailService, CocktailSource};

pub use cocktail_api::{DrinkRecord, SearchResponse};
