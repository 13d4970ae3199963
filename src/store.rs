//! Watchlist persistence
//!
//! The whole watchlist is rewritten as indented JSON after every change.

use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::Watchlist;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Could not load watchlist file ({}): {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Could not load watchlist file ({}): {source}", path.display())]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Could not save watchlist file ({}): {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("Could not save watchlist file ({}): {source}", path.display())]
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Result of loading: always a usable watchlist, plus the failure if any
#[derive(Debug, Default)]
pub struct LoadedWatchlist {
    pub watchlist: Watchlist,
    pub error: Option<StorageError>,
}

/// File-backed watchlist store
#[derive(Debug, Clone)]
pub struct WatchlistStore {
    path: PathBuf,
}

impl WatchlistStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the watchlist. A missing file is an empty watchlist; an
    /// unreadable or corrupt one is an empty watchlist plus an error.
    pub fn load(&self) -> LoadedWatchlist {
        match self.try_load() {
            Ok(watchlist) => {
                debug!(path = %self.path.display(), entries = watchlist.len(), "watchlist loaded");
                LoadedWatchlist {
                    watchlist,
                    error: None,
                }
            }
            Err(error) => {
                warn!(%error, "falling back to an empty watchlist");
                LoadedWatchlist {
                    watchlist: Watchlist::new(),
                    error: Some(error),
                }
            }
        }
    }

    fn try_load(&self) -> Result<Watchlist, StorageError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Watchlist::new()),
            Err(source) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_str(&text).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// Overwrite the file with the full watchlist
    pub fn save(&self, watchlist: &Watchlist) -> Result<(), StorageError> {
        let json = to_pretty_json(watchlist).map_err(|source| StorageError::Serialize {
            path: self.path.clone(),
            source,
        })?;

        let write_err = |source| StorageError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        std::fs::write(&self.path, json).map_err(write_err)?;

        info!(path = %self.path.display(), entries = watchlist.len(), "watchlist saved");
        Ok(())
    }
}

/// Serialise with 4-space indentation
fn to_pretty_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    // serde_json only ever emits UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{WatchlistEntry, Year};

    #[test]
    fn test_pretty_json_uses_four_spaces() {
        let mut list = Watchlist::new();
        list.insert(
            "tt1",
            WatchlistEntry {
                title: "One".into(),
                year: Some(Year::Number(2001)),
                id: "tt1".into(),
                title_type: "movie".into(),
            },
        );

        let json = to_pretty_json(&list).unwrap();
        assert!(json.starts_with("{\n    \"tt1\": {\n        \"title\": \"One\""));
        assert!(json.contains("\"type\": \"movie\""));
    }

    #[test]
    fn test_missing_file_is_empty_without_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = WatchlistStore::new(dir.path().join("none.json"));
        let loaded = store.load();
        assert!(loaded.watchlist.is_empty());
        assert!(loaded.error.is_none());
    }
}
