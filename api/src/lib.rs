use thiserror::Error;

pub mod catalog;
pub mod pokemon;


pub use catalog::{CatalogEntry, CatalogPage, catalog_url, parse_catalog};
pub use pokemon::{AbilityRef, AbilitySlot, Pokemon, Sprites, parse_pokemon, pokemon_url};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Invalid JSON payload: {0}")]
    InvalidJson(String),

    #[error("Empty response body")]
    EmptyBody,
}
