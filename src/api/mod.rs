//! API clients for external services
//!
//! - IMDb: autocomplete title search
//! - Streaming: where-to-watch availability per region

pub mod imdb;
pub mod streaming;

pub use imdb::{SearchClient, SearchError};
pub use streaming::{StreamingClient, StreamingError};
