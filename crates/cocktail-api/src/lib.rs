// cocktail-api: Async Rust client for TheCocktailDB search API

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::{CocktailClient, DEFAULT_SEARCH_URL};
pub use error::Error;
pub use models::{DrinkRecord, SearchResponse};
pub use transport::TransportConfig;
