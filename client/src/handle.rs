use std::sync::{Arc, RwLock};

use anyhow::{Result, anyhow};
use rotom_api::Pokemon;
use tokio::sync::mpsc;

use crate::service::Message;
use crate::state::{DexEvent, DexState};
use crate::suggest::Suggestion;

/// Cloneable handle for driving a running [`DexClient`] and reading its
/// state.
///
/// This can be passed to handlers and cloned freely.
///
/// [`DexClient`]: crate::DexClient
#[derive(Clone)]
pub struct DexHandle {
    tx: mpsc::UnboundedSender<Message>,
    state: Arc<RwLock<DexState>>,
}

impl DexHandle {
    pub(crate) fn new(tx: mpsc::UnboundedSender<Message>, state: Arc<RwLock<DexState>>) -> Self {
        Self { tx, state }
    }

    fn send(&self, message: Message) -> Result<()> {
        self.tx.send(message).map_err(|_| anyhow!("Client stopped"))
    }

    /// Replace the query, refreshing suggestions.
    pub fn set_query(&self, query: &str) -> Result<()> {
        self.send(Message::Event(DexEvent::QueryChanged(query.to_string())))
    }

    /// Select an entry by name, fetching its detail record.
    pub fn select(&self, name: &str) -> Result<()> {
        self.send(Message::Event(DexEvent::EntrySelected(name.to_string())))
    }

    /// Stop the run loop.
    pub fn shutdown(&self) -> Result<()> {
        self.send(Message::Shutdown)
    }

    /// Current contents of the search field.
    pub fn query(&self) -> String {
        self.state
            .read()
            .map(|state| state.query.clone())
            .unwrap_or_default()
    }

    /// Suggestions for the current query, in catalog order.
    pub fn suggestions(&self) -> Vec<Suggestion> {
        self.state
            .read()
            .map(|state| state.suggestions.clone())
            .unwrap_or_default()
    }

    /// Detail record for the most recent selection, if one has loaded.
    pub fn detail(&self) -> Option<Pokemon> {
        self.state.read().ok()?.detail.clone()
    }

    /// Whether a detail fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.state
            .read()
            .map(|state| state.loading)
            .unwrap_or(false)
    }

    /// Clone of the full state.
    pub fn snapshot(&self) -> DexState {
        self.state
            .read()
            .map(|state| state.clone())
            .unwrap_or_default()
    }
}
