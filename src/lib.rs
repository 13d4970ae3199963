//! cinelist - terminal movie search and watchlist
//!
//! Search IMDb titles, check where they stream, and keep a local watchlist.
//!
//! # Modules
//!
//! - `models` - Titles, watchlist entries, offer types
//! - `api` - Title search and streaming availability clients
//! - `store` - Watchlist JSON persistence
//! - `session` - State machine driven by user actions
//! - `app` - Key handling and list cursors for the TUI
//! - `ui` - TUI components
//! - `config`, `cli`, `logging` - Launch plumbing

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod logging;
pub mod models;
pub mod session;
pub mod store;
pub mod ui;

// Re-export commonly used types
pub use models::{OfferType, Title, Watchlist, WatchlistEntry, Year};

pub use api::{SearchClient, SearchError, StreamingClient, StreamingError};
pub use app::App;
pub use config::Config;
pub use session::{Action, Services, Session};
pub use store::WatchlistStore;
