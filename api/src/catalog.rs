use anyhow::Result;
use serde::Deserialize;

use crate::ParseError;

/// One page of the species catalog.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CatalogPage {
    pub results: Vec<CatalogEntry>,
}

/// A single catalog entry.
///
/// Only `name` is matched against queries; `url` points at the entry's
/// detail resource.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub url: String,
}

/// Build the catalog endpoint URL: `{base}/pokemon?limit={limit}`
pub fn catalog_url(base: &str, limit: u32) -> String {
    format!("{}/pokemon?limit={}", base.trim_end_matches('/'), limit)
}

/// Parse a catalog page from a JSON response body
pub fn parse_catalog(json: &str) -> Result<CatalogPage> {
    if json.trim().is_empty() {
        return Err(ParseError::EmptyBody.into());
    }

    serde_json::from_str(json).map_err(|e| ParseError::InvalidJson(e.to_string()).into())
}
