use anyhow::{Context, Result};
use rotom_api::{CatalogPage, Pokemon, catalog_url, parse_catalog, parse_pokemon, pokemon_url};

/// Public PokeAPI v2 base URL.
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Upper bound on the catalog page requested for suggestion filtering.
pub const CATALOG_LIMIT: u32 = 1000;

/// Thin HTTP client for the two PokeAPI endpoints this crate consumes.
///
/// Transport failures, non-2xx responses, and malformed JSON all surface
/// as the same error; callers treat them identically.
#[derive(Clone)]
pub struct PokeApi {
    http: reqwest::Client,
    base: String,
}

impl PokeApi {
    /// Client against the public PokeAPI.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Client against a custom base URL.
    pub fn with_base_url(base: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: base.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    /// Fetch the species catalog, bounded at `CATALOG_LIMIT` entries.
    pub async fn catalog(&self) -> Result<CatalogPage> {
        let url = catalog_url(&self.base, CATALOG_LIMIT);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .context("Failed to request species catalog")?
            .error_for_status()
            .context("Catalog request was rejected")?;

        let body = response
            .text()
            .await
            .context("Failed to read catalog response")?;

        parse_catalog(&body)
    }

    /// Fetch the detail record for a single species.
    ///
    /// The name is lowercased by the URL builder, so lookups are
    /// case-insensitive.
    pub async fn pokemon(&self, name: &str) -> Result<Pokemon> {
        let url = pokemon_url(&self.base, name);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to request detail for {}", name))?
            .error_for_status()
            .with_context(|| format!("Detail request for {} was rejected", name))?;

        let body = response
            .text()
            .await
            .context("Failed to read detail response")?;

        parse_pokemon(&body)
    }
}

impl Default for PokeApi {
    fn default() -> Self {
        Self::new()
    }
}
