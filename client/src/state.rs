//! DexState - search screen state and its transitions

use rotom_api::Pokemon;

use crate::suggest::Suggestion;

/// Everything the search screen needs to render, in one place.
///
/// The struct knows nothing about scheduling or rendering: [`apply`]
/// consumes events and reports what, if anything, should be fetched next.
/// The service layer executes those fetches and feeds their completions
/// back in as events.
///
/// [`apply`]: DexState::apply
#[derive(Debug, Clone, Default)]
pub struct DexState {
    /// Current contents of the search field.
    pub query: String,

    /// Suggestions for the current query, in catalog order.
    pub suggestions: Vec<Suggestion>,

    /// Detail record for the most recently selected entry.
    pub detail: Option<Pokemon>,

    /// True while a detail fetch is in flight.
    pub loading: bool,

    // Latest issued fetch tokens. Completions carrying an older token
    // belong to a superseded request and are discarded.
    suggest_token: u64,
    detail_token: u64,
}

/// Input and completion events feeding the state.
#[derive(Debug, Clone)]
pub enum DexEvent {
    /// The search field changed.
    QueryChanged(String),

    /// A suggestion was tapped, or a name was submitted directly.
    EntrySelected(String),

    /// A catalog fetch finished and was filtered against its query.
    SuggestionsLoaded {
        token: u64,
        suggestions: Vec<Suggestion>,
    },

    /// A catalog fetch failed; the previous list stands.
    SuggestionsFailed { token: u64 },

    /// A detail fetch finished.
    DetailLoaded { token: u64, pokemon: Pokemon },

    /// A detail fetch failed; the loading flag still clears.
    DetailFailed { token: u64 },
}

/// Fetch work the service must start as a consequence of a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchSuggestions { token: u64, query: String },
    FetchDetail { token: u64, name: String },
}

/// Outcome of applying one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// Whether observable state changed. Discarded stale completions and
    /// suggestion failures do not count.
    pub changed: bool,

    /// Fetch work to start, if any.
    pub effect: Option<Effect>,
}

impl Transition {
    fn unchanged() -> Self {
        Self {
            changed: false,
            effect: None,
        }
    }

    fn changed() -> Self {
        Self {
            changed: true,
            effect: None,
        }
    }

    fn changed_with(effect: Effect) -> Self {
        Self {
            changed: true,
            effect: Some(effect),
        }
    }
}

impl DexState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one event, returning the work it triggers.
    pub fn apply(&mut self, event: DexEvent) -> Transition {
        match event {
            DexEvent::QueryChanged(query) => {
                self.query = query.clone();
                self.suggest_token += 1;

                if query.is_empty() {
                    self.suggestions.clear();
                    return Transition::changed();
                }

                // The previous list stays visible until the new fetch
                // lands; a failure leaves it standing.
                Transition::changed_with(Effect::FetchSuggestions {
                    token: self.suggest_token,
                    query,
                })
            }
            DexEvent::EntrySelected(name) => {
                self.loading = true;
                self.detail = None;
                self.suggestions.clear();
                self.query = name.clone();

                // Bumping the suggestion token too means a still-pending
                // catalog response cannot repopulate the cleared list.
                self.suggest_token += 1;
                self.detail_token += 1;

                Transition::changed_with(Effect::FetchDetail {
                    token: self.detail_token,
                    name,
                })
            }
            DexEvent::SuggestionsLoaded { token, suggestions } => {
                if token != self.suggest_token {
                    return Transition::unchanged();
                }

                self.suggestions = suggestions;
                Transition::changed()
            }
            DexEvent::SuggestionsFailed { .. } => Transition::unchanged(),
            DexEvent::DetailLoaded { token, pokemon } => {
                if token != self.detail_token {
                    return Transition::unchanged();
                }

                self.detail = Some(pokemon);
                self.loading = false;
                Transition::changed()
            }
            DexEvent::DetailFailed { token } => {
                // A stale failure must not clear the flag owned by the
                // newer in-flight request.
                if token != self.detail_token {
                    return Transition::unchanged();
                }

                self.loading = false;
                Transition::changed()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rotom_api::{AbilityRef, AbilitySlot, Sprites};

    fn pokemon(name: &str) -> Pokemon {
        Pokemon {
            name: name.to_string(),
            height: 4,
            weight: 60,
            base_experience: Some(112),
            sprites: Sprites {
                front_default: Some(format!(
                    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/{}.png",
                    name
                )),
            },
            abilities: vec![AbilitySlot {
                ability: AbilityRef {
                    name: "static".to_string(),
                },
            }],
        }
    }

    fn suggestions(names: &[&str]) -> Vec<Suggestion> {
        names
            .iter()
            .map(|name| Suggestion {
                name: name.to_string(),
            })
            .collect()
    }

    fn suggest_token(transition: &Transition) -> u64 {
        match transition.effect {
            Some(Effect::FetchSuggestions { token, .. }) => token,
            ref other => panic!("expected FetchSuggestions effect, got {:?}", other),
        }
    }

    fn detail_token(transition: &Transition) -> u64 {
        match transition.effect {
            Some(Effect::FetchDetail { token, .. }) => token,
            ref other => panic!("expected FetchDetail effect, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_query_clears_without_fetch() {
        let mut state = DexState::new();
        let token = suggest_token(&state.apply(DexEvent::QueryChanged("pika".into())));
        state.apply(DexEvent::SuggestionsLoaded {
            token,
            suggestions: suggestions(&["pikachu"]),
        });

        let transition = state.apply(DexEvent::QueryChanged(String::new()));

        assert!(transition.changed);
        assert_eq!(transition.effect, None);
        assert_eq!(state.query, "");
        assert!(state.suggestions.is_empty());
    }

    #[test]
    fn test_query_change_issues_fetch_with_fresh_token() {
        let mut state = DexState::new();

        let first = state.apply(DexEvent::QueryChanged("pi".into()));
        let second = state.apply(DexEvent::QueryChanged("pika".into()));

        assert!(second.changed);
        match second.effect {
            Some(Effect::FetchSuggestions { token, ref query }) => {
                assert_eq!(query, "pika");
                assert!(token > suggest_token(&first));
            }
            ref other => panic!("expected FetchSuggestions effect, got {:?}", other),
        }
    }

    #[test]
    fn test_stale_suggestions_are_discarded() {
        let mut state = DexState::new();
        let stale = suggest_token(&state.apply(DexEvent::QueryChanged("pi".into())));
        let current = suggest_token(&state.apply(DexEvent::QueryChanged("pika".into())));

        // The newer response lands first, then the slower stale one.
        state.apply(DexEvent::SuggestionsLoaded {
            token: current,
            suggestions: suggestions(&["pikachu"]),
        });
        let transition = state.apply(DexEvent::SuggestionsLoaded {
            token: stale,
            suggestions: suggestions(&["pidgey", "pikachu"]),
        });

        assert!(!transition.changed);
        assert_eq!(state.suggestions, suggestions(&["pikachu"]));
    }

    #[test]
    fn test_suggestion_failure_leaves_list() {
        let mut state = DexState::new();
        let token = suggest_token(&state.apply(DexEvent::QueryChanged("pika".into())));
        state.apply(DexEvent::SuggestionsLoaded {
            token,
            suggestions: suggestions(&["pikachu"]),
        });

        let token = suggest_token(&state.apply(DexEvent::QueryChanged("pikac".into())));
        let transition = state.apply(DexEvent::SuggestionsFailed { token });

        assert!(!transition.changed);
        assert_eq!(state.suggestions, suggestions(&["pikachu"]));
    }

    #[test]
    fn test_selection_brackets_loading_and_echoes_query() {
        let mut state = DexState::new();
        let token = suggest_token(&state.apply(DexEvent::QueryChanged("pika".into())));
        state.apply(DexEvent::SuggestionsLoaded {
            token,
            suggestions: suggestions(&["pikachu"]),
        });

        let transition = state.apply(DexEvent::EntrySelected("pikachu".into()));

        assert!(state.loading);
        assert_eq!(state.detail, None);
        assert!(state.suggestions.is_empty());
        assert_eq!(state.query, "pikachu");

        let token = detail_token(&transition);
        state.apply(DexEvent::DetailLoaded {
            token,
            pokemon: pokemon("pikachu"),
        });

        assert!(!state.loading);
        assert_eq!(state.detail.as_ref().map(|p| p.name.as_str()), Some("pikachu"));
    }

    #[test]
    fn test_selection_discards_pending_suggestions() {
        let mut state = DexState::new();
        let pending = suggest_token(&state.apply(DexEvent::QueryChanged("pika".into())));
        state.apply(DexEvent::EntrySelected("pikachu".into()));

        let transition = state.apply(DexEvent::SuggestionsLoaded {
            token: pending,
            suggestions: suggestions(&["pikachu"]),
        });

        assert!(!transition.changed);
        assert!(state.suggestions.is_empty());
    }

    #[test]
    fn test_detail_failure_clears_loading_only() {
        let mut state = DexState::new();
        let token = detail_token(&state.apply(DexEvent::EntrySelected("missingno".into())));

        let transition = state.apply(DexEvent::DetailFailed { token });

        assert!(transition.changed);
        assert!(!state.loading);
        assert_eq!(state.detail, None);
    }

    #[test]
    fn test_stale_detail_completion_is_ignored() {
        let mut state = DexState::new();
        let stale = detail_token(&state.apply(DexEvent::EntrySelected("pikachu".into())));
        let current = detail_token(&state.apply(DexEvent::EntrySelected("raichu".into())));

        let transition = state.apply(DexEvent::DetailLoaded {
            token: stale,
            pokemon: pokemon("pikachu"),
        });

        assert!(!transition.changed);
        assert_eq!(state.detail, None);
        // The flag belongs to the raichu request, which is still in flight.
        assert!(state.loading);

        state.apply(DexEvent::DetailLoaded {
            token: current,
            pokemon: pokemon("raichu"),
        });

        assert!(!state.loading);
        assert_eq!(state.detail.as_ref().map(|p| p.name.as_str()), Some("raichu"));
    }

    #[test]
    fn test_stale_detail_failure_keeps_loading() {
        let mut state = DexState::new();
        let stale = detail_token(&state.apply(DexEvent::EntrySelected("pikachu".into())));
        let current = detail_token(&state.apply(DexEvent::EntrySelected("raichu".into())));

        state.apply(DexEvent::DetailFailed { token: stale });

        assert!(state.loading);

        state.apply(DexEvent::DetailFailed { token: current });

        assert!(!state.loading);
    }

    #[test]
    fn test_reselection_replaces_detail_wholesale() {
        let mut state = DexState::new();
        let token = detail_token(&state.apply(DexEvent::EntrySelected("pikachu".into())));
        state.apply(DexEvent::DetailLoaded {
            token,
            pokemon: pokemon("pikachu"),
        });

        let token = detail_token(&state.apply(DexEvent::EntrySelected("pikachu".into())));

        // Cleared for the duration of the refetch, never merged.
        assert_eq!(state.detail, None);
        assert!(state.loading);

        state.apply(DexEvent::DetailLoaded {
            token,
            pokemon: pokemon("pikachu"),
        });

        assert_eq!(state.detail, Some(pokemon("pikachu")));
    }
}
