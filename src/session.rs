//! Session state and transitions
//!
//! Every user action is a transition on [`Session`]; side effects go through
//! the clients and store bundled in [`Services`]. Nothing here knows about
//! the terminal, so the TUI only has to map keys to [`Action`]s and render.
//!
//! Each transition runs to completion before the next one starts: at most
//! one HTTP call and at most one file write per action.

use tracing::{error, info, warn};

use crate::api::{SearchClient, StreamingClient};
use crate::models::{Title, Watchlist, WatchlistEntry};
use crate::store::WatchlistStore;

// =============================================================================
// Collaborators
// =============================================================================

/// External collaborators used by transitions
#[derive(Debug, Clone)]
pub struct Services {
    pub search: SearchClient,
    pub streaming: StreamingClient,
    pub store: WatchlistStore,
}

// =============================================================================
// Actions and Messages
// =============================================================================

/// Discrete user actions
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SubmitSearch(String),
    SelectTitle(Title),
    ReturnToResults,
    /// Fired implicitly while a selection has no streaming info yet
    RequestStreamingInfo,
    AddToWatchlist,
    RemoveFromWatchlist(String),
}

/// Streaming lookup outcome cached for the current selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamingMessage {
    /// Availability text or a soft outcome (no key, 404, nothing found)
    Info(String),
    /// Transport, status or parse failure
    Error(String),
}

impl StreamingMessage {
    pub fn text(&self) -> &str {
        match self {
            StreamingMessage::Info(s) | StreamingMessage::Error(s) => s,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, StreamingMessage::Error(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Info,
    Error,
}

/// Short-lived notification, dismissed on the next key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub text: String,
}

impl Toast {
    fn new(kind: ToastKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// What the main pane should show. A selection wins over results.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View<'a> {
    Idle,
    Results(&'a [Title]),
    Detail(&'a Title),
}

// =============================================================================
// Session
// =============================================================================

#[derive(Debug, Default)]
pub struct Session {
    pub watchlist: Watchlist,
    /// `None` until a search succeeds; `Some(vec![])` for "no results"
    pub search_results: Option<Vec<Title>>,
    pub selected_title: Option<Title>,
    pub streaming_message: Option<StreamingMessage>,
    pub error_message: Option<String>,
    pub info_message: Option<String>,
    pub toast: Option<Toast>,
}

impl Session {
    /// Start a session from the persisted watchlist. A load failure is
    /// surfaced as the initial error message.
    pub fn open(store: &WatchlistStore) -> Self {
        let loaded = store.load();
        Self {
            watchlist: loaded.watchlist,
            error_message: loaded.error.map(|e| e.to_string()),
            ..Self::default()
        }
    }

    pub fn with_watchlist(watchlist: Watchlist) -> Self {
        Self {
            watchlist,
            ..Self::default()
        }
    }

    /// Run one action to completion
    pub async fn dispatch(&mut self, action: Action, services: &Services) {
        match action {
            Action::SubmitSearch(query) => self.submit_search(&query, &services.search).await,
            Action::SelectTitle(title) => {
                self.select_title(title);
            }
            Action::ReturnToResults => self.return_to_results(),
            Action::RequestStreamingInfo => self.request_streaming_info(&services.streaming).await,
            Action::AddToWatchlist => self.add_to_watchlist(&services.store),
            Action::RemoveFromWatchlist(id) => self.remove_from_watchlist(&id, &services.store),
        }
    }

    pub fn view(&self) -> View<'_> {
        match (&self.selected_title, &self.search_results) {
            (Some(title), _) => View::Detail(title),
            (None, Some(results)) => View::Results(results),
            (None, None) => View::Idle,
        }
    }

    pub async fn submit_search(&mut self, query: &str, search: &SearchClient) {
        let query = query.trim();
        if query.is_empty() {
            return;
        }

        self.selected_title = None;
        self.streaming_message = None;
        self.error_message = None;
        self.info_message = None;
        self.search_results = None;

        match search.search(query).await {
            Ok(results) => {
                info!(query, count = results.len(), "search completed");
                if results.is_empty() {
                    self.info_message = Some(format!("No results found for '{}'.", query));
                }
                self.search_results = Some(results);
            }
            Err(e) => {
                error!(query, error = %e, "search failed");
                self.error_message = Some(e.to_string());
            }
        }
    }

    /// Open a title from the current results. Titles not in the last
    /// results are ignored; returns whether the selection changed.
    pub fn select_title(&mut self, title: Title) -> bool {
        let known = self
            .search_results
            .as_ref()
            .is_some_and(|results| results.iter().any(|r| r.id == title.id));
        if !known {
            warn!(id = %title.id, "ignoring selection outside current results");
            return false;
        }

        self.selected_title = Some(title);
        self.streaming_message = None;
        self.error_message = None;
        true
    }

    pub fn return_to_results(&mut self) {
        if self.selected_title.is_none() {
            return;
        }
        self.selected_title = None;
        self.streaming_message = None;
        self.error_message = None;
    }

    /// True while the selection still lacks its streaming lookup
    pub fn needs_streaming_info(&self) -> bool {
        self.selected_title.is_some() && self.streaming_message.is_none()
    }

    /// Fetch availability once per selection
    pub async fn request_streaming_info(&mut self, streaming: &StreamingClient) {
        if !self.needs_streaming_info() {
            return;
        }
        let Some(title) = self.selected_title.as_ref() else {
            return;
        };

        let message = match streaming.fetch_availability(&title.id).await {
            Ok(text) => StreamingMessage::Info(text),
            Err(e) => {
                error!(id = %title.id, error = %e, "streaming lookup failed");
                StreamingMessage::Error(format!("Error: {}", e))
            }
        };
        self.streaming_message = Some(message);
    }

    pub fn add_to_watchlist(&mut self, store: &WatchlistStore) {
        let Some(title) = self.selected_title.as_ref() else {
            return;
        };

        if self.watchlist.contains(&title.id) {
            self.toast = Some(Toast::new(
                ToastKind::Info,
                format!("'{}' is already in watchlist.", title.display_title()),
            ));
            return;
        }

        self.watchlist
            .insert(title.id.clone(), WatchlistEntry::snapshot(title));
        info!(id = %title.id, "added to watchlist");
        let added = format!("Added '{}' to watchlist!", title.display_title());
        self.persist(store, added);
    }

    /// Remove an entry. Unknown IDs are a no-op.
    pub fn remove_from_watchlist(&mut self, id: &str, store: &WatchlistStore) {
        let Some(entry) = self.watchlist.remove(id) else {
            return;
        };

        info!(id, "removed from watchlist");
        self.persist(store, format!("Removed '{}'.", entry.title));
    }

    /// Write through to the store. The in-memory change stands even if the
    /// write fails.
    fn persist(&mut self, store: &WatchlistStore, success: String) {
        match store.save(&self.watchlist) {
            Ok(()) => self.toast = Some(Toast::new(ToastKind::Success, success)),
            Err(e) => {
                error!(error = %e, "watchlist not persisted");
                self.error_message = Some(e.to_string());
                self.toast = Some(Toast::new(ToastKind::Error, "Watchlist not saved."));
            }
        }
    }

    pub fn dismiss_toast(&mut self) {
        self.toast = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn title(id: &str, name: &str) -> Title {
        Title::from_value(&json!({"id": id, "primaryTitle": name})).unwrap()
    }

    #[test]
    fn test_view_priority() {
        let mut session = Session::default();
        assert_eq!(session.view(), View::Idle);

        let heat = title("tt0113277", "Heat");
        session.search_results = Some(vec![heat.clone()]);
        assert!(matches!(session.view(), View::Results(r) if r.len() == 1));

        assert!(session.select_title(heat.clone()));
        assert_eq!(session.view(), View::Detail(&heat));
    }

    #[test]
    fn test_select_unknown_title_ignored() {
        let mut session = Session::default();
        session.search_results = Some(vec![title("tt1", "One")]);

        assert!(!session.select_title(title("tt2", "Two")));
        assert!(session.selected_title.is_none());
    }

    #[test]
    fn test_select_clears_streaming_and_error() {
        let mut session = Session::default();
        let one = title("tt1", "One");
        session.search_results = Some(vec![one.clone()]);
        session.streaming_message = Some(StreamingMessage::Info("old".into()));
        session.error_message = Some("old".into());

        session.select_title(one);
        assert!(session.streaming_message.is_none());
        assert!(session.error_message.is_none());
        assert!(session.needs_streaming_info());
    }

    #[test]
    fn test_return_to_results_keeps_results() {
        let mut session = Session::default();
        let one = title("tt1", "One");
        session.search_results = Some(vec![one.clone()]);
        session.select_title(one);
        session.streaming_message = Some(StreamingMessage::Error("Error: x".into()));

        session.return_to_results();
        assert!(session.selected_title.is_none());
        assert!(session.streaming_message.is_none());
        assert_eq!(session.search_results.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn test_streaming_message_kinds() {
        let info = StreamingMessage::Info("Available in (IN): Netflix".into());
        let err = StreamingMessage::Error("Error: boom".into());
        assert!(!info.is_error());
        assert!(err.is_error());
        assert_eq!(err.text(), "Error: boom");
    }
}
