use rotom_api::Pokemon;

use crate::suggest::Suggestion;

/// Trait for observing search state updates.
///
/// Implement this to drive a presentation layer. All methods have
/// default no-op implementations, so you only need to implement the
/// events you care about.
///
/// Fetch failures are never reported here: a failed suggestion fetch
/// leaves the previous list standing, and a failed detail fetch only
/// clears the loading flag.
///
/// # Example
///
/// ```ignore
/// struct Screen;
///
/// impl DexHandler for Screen {
///     async fn on_suggestions(&mut self, suggestions: &[Suggestion]) {
///         for suggestion in suggestions {
///             println!("{}", suggestion.name);
///         }
///     }
/// }
/// ```
#[allow(async_fn_in_trait)]
pub trait DexHandler: Send {
    /// Called when the query text changes, including the echo of a
    /// selected name into the search field.
    async fn on_query(&mut self, query: &str) {
        let _ = query;
    }

    /// Called when the suggestion list is replaced.
    async fn on_suggestions(&mut self, suggestions: &[Suggestion]) {
        let _ = suggestions;
    }

    /// Called when a detail fetch starts (`true`) or settles (`false`),
    /// whether it succeeded or failed.
    async fn on_loading(&mut self, loading: bool) {
        let _ = loading;
    }

    /// Called when a detail record arrives.
    async fn on_detail(&mut self, pokemon: &Pokemon) {
        let _ = pokemon;
    }
}
