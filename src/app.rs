//! App state for the terminal front end
//!
//! Wraps a [`Session`] with the purely visual state the TUI needs (query
//! editing, list cursors, focus) and turns key presses into [`Action`]s.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::models::Title;
use crate::session::{Action, Services, Session};

// =============================================================================
// Input Mode / Focus
// =============================================================================

/// Current input mode for keyboard handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Normal navigation mode
    #[default]
    Normal,
    /// Text input mode (search box focused)
    Editing,
}

/// Which pane receives navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Main,
    Watchlist,
}

// =============================================================================
// Selection State
// =============================================================================

/// Selection state for list views
#[derive(Debug, Clone, Default)]
pub struct ListState {
    /// Currently selected index
    pub selected: usize,
    /// Scroll offset for viewport
    pub offset: usize,
    /// Total number of items
    pub len: usize,
}

impl ListState {
    pub fn new(len: usize) -> Self {
        Self {
            selected: 0,
            offset: 0,
            len,
        }
    }

    pub fn up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            if self.selected < self.offset {
                self.offset = self.selected;
            }
        }
    }

    pub fn down(&mut self) {
        if self.len > 0 && self.selected < self.len - 1 {
            self.selected += 1;
        }
    }

    pub fn first(&mut self) {
        self.selected = 0;
        self.offset = 0;
    }

    pub fn last(&mut self) {
        if self.len > 0 {
            self.selected = self.len - 1;
        }
    }

    /// Update offset to keep selected item visible
    pub fn scroll_into_view(&mut self, visible_height: usize) {
        if visible_height == 0 {
            return;
        }
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + visible_height {
            self.offset = self.selected + 1 - visible_height;
        }
    }

    /// Update length (e.g., when new results come in)
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if len == 0 {
            self.selected = 0;
            self.offset = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}

// =============================================================================
// Query Input
// =============================================================================

/// Search box contents. `cursor` counts characters, not bytes.
#[derive(Debug, Clone, Default)]
pub struct QueryInput {
    pub text: String,
    pub cursor: usize,
}

impl QueryInput {
    fn byte_index(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.text.remove(at);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_index(self.cursor);
            self.text.remove(at);
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Text split at the cursor, for rendering
    pub fn split(&self) -> (&str, &str) {
        self.text.split_at(self.byte_index(self.cursor))
    }
}

// =============================================================================
// Main Application State
// =============================================================================

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub input_mode: InputMode,
    pub focus: Focus,
    pub query: QueryInput,
    pub results_list: ListState,
    pub watchlist_list: ListState,
    pub session: Session,
    /// Label shown while an action is in flight
    pub busy: Option<String>,
}

impl App {
    pub fn new(session: Session) -> Self {
        let watchlist_len = session.watchlist.len();
        Self {
            running: true,
            input_mode: InputMode::Normal,
            focus: Focus::Main,
            query: QueryInput::default(),
            results_list: ListState::default(),
            watchlist_list: ListState::new(watchlist_len),
            session,
            busy: None,
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Implicit action the event loop should run before reading input
    pub fn pending_action(&self) -> Option<Action> {
        self.session
            .needs_streaming_info()
            .then_some(Action::RequestStreamingInfo)
    }

    /// Busy overlay text for an action, if it does I/O worth announcing
    pub fn busy_label(action: &Action) -> Option<String> {
        match action {
            Action::SubmitSearch(q) => Some(format!("Searching for '{}'...", q.trim())),
            Action::RequestStreamingInfo => Some("Fetching streaming info...".to_string()),
            _ => None,
        }
    }

    /// Apply an action to the session and resync list cursors
    pub async fn apply(&mut self, action: Action, services: &Services) {
        let new_search = matches!(action, Action::SubmitSearch(_));
        self.session.dispatch(action, services).await;

        if new_search {
            self.results_list.first();
        }
        let results_len = self.session.search_results.as_ref().map_or(0, Vec::len);
        self.results_list.set_len(results_len);
        self.watchlist_list.set_len(self.session.watchlist.len());
        if self.session.watchlist.is_empty() {
            self.focus = Focus::Main;
        }
    }

    /// Result under the cursor
    pub fn highlighted_result(&self) -> Option<&Title> {
        self.session
            .search_results
            .as_ref()
            .and_then(|r| r.get(self.results_list.selected))
    }

    /// Watchlist ID under the cursor, in display order
    pub fn highlighted_watchlist_id(&self) -> Option<String> {
        self.session
            .watchlist
            .sorted()
            .get(self.watchlist_list.selected)
            .map(|(id, _)| id.to_string())
    }

    // -------------------------------------------------------------------------
    // Keyboard Event Handling
    // -------------------------------------------------------------------------

    /// Handle a key press; returns the action to run, if any
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        self.session.dismiss_toast();

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return None;
        }

        match self.input_mode {
            InputMode::Editing => self.handle_editing_key(key),
            InputMode::Normal => self.handle_normal_key(key),
        }
    }

    fn handle_editing_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => self.input_mode = InputMode::Normal,
            KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                let query = self.query.text.trim();
                if !query.is_empty() {
                    return Some(Action::SubmitSearch(query.to_string()));
                }
            }
            KeyCode::Char(c) => self.query.insert(c),
            KeyCode::Backspace => self.query.backspace(),
            KeyCode::Delete => self.query.delete(),
            KeyCode::Left => self.query.cursor_left(),
            KeyCode::Right => self.query.cursor_right(),
            KeyCode::Home => self.query.cursor_home(),
            KeyCode::End => self.query.cursor_end(),
            _ => {}
        }
        None
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('q') => {
                self.quit();
                return None;
            }
            KeyCode::Char('/') => {
                self.input_mode = InputMode::Editing;
                self.focus = Focus::Main;
                self.query.cursor_end();
                return None;
            }
            KeyCode::Tab => {
                self.focus = match self.focus {
                    Focus::Main if !self.session.watchlist.is_empty() => Focus::Watchlist,
                    _ => Focus::Main,
                };
                return None;
            }
            _ => {}
        }

        match self.focus {
            Focus::Watchlist => self.handle_watchlist_key(key),
            Focus::Main if self.session.selected_title.is_some() => self.handle_detail_key(key),
            Focus::Main if self.session.search_results.is_some() => self.handle_results_key(key),
            Focus::Main => None,
        }
    }

    fn handle_results_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.results_list.up(),
            KeyCode::Down | KeyCode::Char('j') => self.results_list.down(),
            KeyCode::Home => self.results_list.first(),
            KeyCode::End => self.results_list.last(),
            KeyCode::Enter => {
                return self.highlighted_result().cloned().map(Action::SelectTitle);
            }
            _ => {}
        }
        None
    }

    fn handle_detail_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('a') => Some(Action::AddToWatchlist),
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => {
                Some(Action::ReturnToResults)
            }
            _ => None,
        }
    }

    fn handle_watchlist_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.watchlist_list.up(),
            KeyCode::Down | KeyCode::Char('j') => self.watchlist_list.down(),
            KeyCode::Esc => self.focus = Focus::Main,
            KeyCode::Char('d') | KeyCode::Delete => {
                return self
                    .highlighted_watchlist_id()
                    .map(Action::RemoveFromWatchlist);
            }
            _ => {}
        }
        None
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
