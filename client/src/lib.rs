mod fetch;
mod handle;
mod handler;
mod service;
mod state;
mod suggest;

pub use fetch::{CATALOG_LIMIT, DEFAULT_BASE_URL, PokeApi};
pub use handle::DexHandle;
pub use handler::DexHandler;
pub use service::DexClient;
pub use state::{DexEvent, DexState, Effect, Transition};
pub use suggest::{SUGGESTION_CAP, Suggestion, filter_catalog};

pub use rotom_api::{CatalogEntry, CatalogPage, Pokemon};
