use std::sync::{Arc, RwLock};

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::fetch::PokeApi;
use crate::handle::DexHandle;
use crate::handler::DexHandler;
use crate::state::{DexEvent, DexState, Effect};
use crate::suggest::filter_catalog;

/// Messages accepted by the run loop.
pub(crate) enum Message {
    Event(DexEvent),
    Shutdown,
}

/// Which handler callbacks an event feeds once it has been applied.
enum Dispatch {
    Query,
    Selection,
    Suggestions,
    SuggestionFailure,
    Detail,
    DetailFailure,
}

impl Dispatch {
    fn of(event: &DexEvent) -> Self {
        match event {
            DexEvent::QueryChanged(_) => Self::Query,
            DexEvent::EntrySelected(_) => Self::Selection,
            DexEvent::SuggestionsLoaded { .. } => Self::Suggestions,
            DexEvent::SuggestionsFailed { .. } => Self::SuggestionFailure,
            DexEvent::DetailLoaded { .. } => Self::Detail,
            DexEvent::DetailFailed { .. } => Self::DetailFailure,
        }
    }
}

/// The search engine: applies events to the state, executes the fetches
/// they trigger, and dispatches updates to a handler.
///
/// Superseded in-flight fetches are aborted, and every completion carries
/// the token it was issued with, so a slow stale response can never
/// overwrite the result of a newer request.
pub struct DexClient {
    api: PokeApi,
    state: Arc<RwLock<DexState>>,
    tx: mpsc::UnboundedSender<Message>,
    rx: mpsc::UnboundedReceiver<Message>,
    suggest_task: Option<JoinHandle<()>>,
    detail_task: Option<JoinHandle<()>>,
}

impl DexClient {
    /// Client against the public PokeAPI.
    pub fn new() -> Self {
        Self::with_api(PokeApi::new())
    }

    /// Client against a custom base URL.
    pub fn with_base_url(base: impl Into<String>) -> Self {
        Self::with_api(PokeApi::with_base_url(base))
    }

    pub fn with_api(api: PokeApi) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            api,
            state: Arc::new(RwLock::new(DexState::new())),
            tx,
            rx,
            suggest_task: None,
            detail_task: None,
        }
    }

    /// Get a cloneable handle for driving the client and reading state.
    pub fn handle(&self) -> DexHandle {
        DexHandle::new(self.tx.clone(), self.state.clone())
    }

    /// Run the event loop, dispatching state updates to the handler.
    ///
    /// Runs until [`DexHandle::shutdown`] is called. Any fetches still in
    /// flight at that point are aborted.
    pub async fn run<H: DexHandler>(mut self, handler: &mut H) -> Result<()> {
        while let Some(message) = self.rx.recv().await {
            match message {
                Message::Event(event) => self.step(handler, event).await,
                Message::Shutdown => break,
            }
        }

        if let Some(task) = self.suggest_task.take() {
            task.abort();
        }
        if let Some(task) = self.detail_task.take() {
            task.abort();
        }

        Ok(())
    }

    /// Apply one event and dispatch its consequences.
    async fn step<H: DexHandler>(&mut self, handler: &mut H, event: DexEvent) {
        let dispatch = Dispatch::of(&event);

        let (transition, snapshot) = match self.state.write() {
            Ok(mut state) => {
                let transition = state.apply(event);
                (transition, state.clone())
            }
            Err(_) => return,
        };

        if let Some(effect) = transition.effect {
            self.execute(effect);
        }

        if !transition.changed {
            return;
        }

        match dispatch {
            Dispatch::Query => {
                handler.on_query(&snapshot.query).await;
                if snapshot.query.is_empty() {
                    handler.on_suggestions(&snapshot.suggestions).await;
                }
            }
            Dispatch::Selection => {
                handler.on_query(&snapshot.query).await;
                handler.on_suggestions(&snapshot.suggestions).await;
                handler.on_loading(true).await;
            }
            Dispatch::Suggestions => {
                handler.on_suggestions(&snapshot.suggestions).await;
            }
            Dispatch::Detail => {
                handler.on_loading(false).await;
                if let Some(pokemon) = &snapshot.detail {
                    handler.on_detail(pokemon).await;
                }
            }
            Dispatch::DetailFailure => {
                handler.on_loading(false).await;
            }
            Dispatch::SuggestionFailure => {}
        }
    }

    /// Start the fetch a transition asked for, aborting the superseded
    /// in-flight fetch on the same path.
    fn execute(&mut self, effect: Effect) {
        match effect {
            Effect::FetchSuggestions { token, query } => {
                if let Some(task) = self.suggest_task.take() {
                    task.abort();
                }

                let api = self.api.clone();
                let tx = self.tx.clone();
                self.suggest_task = Some(tokio::spawn(async move {
                    let event = match api.catalog().await {
                        Ok(page) => DexEvent::SuggestionsLoaded {
                            token,
                            suggestions: filter_catalog(&page.results, &query),
                        },
                        Err(e) => {
                            tracing::warn!(error = %e, query = %query, "Suggestion fetch failed");
                            DexEvent::SuggestionsFailed { token }
                        }
                    };
                    let _ = tx.send(Message::Event(event));
                }));
            }
            Effect::FetchDetail { token, name } => {
                // Selection also supersedes any catalog fetch still in
                // flight for the list it just cleared.
                if let Some(task) = self.suggest_task.take() {
                    task.abort();
                }
                if let Some(task) = self.detail_task.take() {
                    task.abort();
                }

                let api = self.api.clone();
                let tx = self.tx.clone();
                self.detail_task = Some(tokio::spawn(async move {
                    let event = match api.pokemon(&name).await {
                        Ok(pokemon) => DexEvent::DetailLoaded { token, pokemon },
                        Err(e) => {
                            tracing::warn!(error = %e, name = %name, "Detail fetch failed");
                            DexEvent::DetailFailed { token }
                        }
                    };
                    let _ = tx.send(Message::Event(event));
                }));
            }
        }
    }
}

impl Default for DexClient {
    fn default() -> Self {
        Self::new()
    }
}
