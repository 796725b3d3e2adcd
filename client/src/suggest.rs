use rotom_api::CatalogEntry;

/// Maximum number of suggestions offered for a query.
pub const SUGGESTION_CAP: usize = 5;

/// A catalog entry matching the current query, offered for quick selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub name: String,
}

/// Narrow a catalog to entries whose name contains `query` as a
/// case-insensitive substring.
///
/// Catalog order is preserved and the result is capped at
/// `SUGGESTION_CAP`. An empty query matches nothing.
pub fn filter_catalog(entries: &[CatalogEntry], query: &str) -> Vec<Suggestion> {
    if query.is_empty() {
        return Vec::new();
    }

    let query = query.to_lowercase();
    entries
        .iter()
        .filter(|entry| entry.name.to_lowercase().contains(&query))
        .take(SUGGESTION_CAP)
        .map(|entry| Suggestion {
            name: entry.name.clone(),
        })
        .collect()
}
