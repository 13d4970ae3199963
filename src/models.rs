//! Data structures shared across cinelist
//!
//! - **Search**: titles returned by the autocomplete endpoint
//! - **Streaming**: offer types reported by the availability endpoint
//! - **Watchlist**: persisted snapshots keyed by title ID

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

// =============================================================================
// Search Models
// =============================================================================

/// A movie or show returned by the search endpoint.
///
/// Only constructed through [`Title::from_value`], which guarantees a
/// non-empty `id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub id: String,
    pub primary_title: String,
    pub start_year: Option<i32>,
    /// Provider type tag ("movie", "tvSeries", ...), empty when absent
    pub title_type: String,
    pub average_rating: Option<f64>,
    pub num_votes: Option<u64>,
    pub genres: Vec<String>,
    pub description: Option<String>,
    pub primary_image: Option<String>,
}

impl Title {
    /// Build a title from one element of the search response.
    ///
    /// Returns `None` for entries without a usable identifier. Optional
    /// fields with an unexpected type are treated as absent.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let id = match obj.get("id")? {
            Value::String(s) if !s.is_empty() => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => return None,
        };

        let string = |key: &str| obj.get(key).and_then(Value::as_str).map(str::to_string);

        Some(Title {
            id,
            primary_title: string("primaryTitle").unwrap_or_default(),
            start_year: obj
                .get("startYear")
                .and_then(Value::as_i64)
                .and_then(|y| i32::try_from(y).ok()),
            title_type: string("type").unwrap_or_default(),
            average_rating: obj.get("averageRating").and_then(Value::as_f64),
            num_votes: obj.get("numVotes").and_then(Value::as_u64),
            genres: obj
                .get("genres")
                .and_then(Value::as_array)
                .map(|genres| {
                    genres
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            description: string("description").filter(|d| !d.is_empty()),
            primary_image: string("primaryImage").filter(|u| !u.is_empty()),
        })
    }

    /// Title for display, "N/A" when the provider sent none
    pub fn display_title(&self) -> &str {
        if self.primary_title.is_empty() {
            "N/A"
        } else {
            &self.primary_title
        }
    }

    /// "8.9 (2,345,678 votes)" or "N/A" when either half is missing
    pub fn rating_line(&self) -> String {
        match (self.average_rating, self.num_votes) {
            (Some(rating), Some(votes)) => {
                format!("{} ({} votes)", rating, format_thousands(votes))
            }
            _ => "N/A".to_string(),
        }
    }

    /// Comma-separated genres, "N/A" if none
    pub fn genres_line(&self) -> String {
        if self.genres.is_empty() {
            "N/A".to_string()
        } else {
            self.genres.join(", ")
        }
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_title())?;
        if let Some(year) = self.start_year {
            write!(f, " ({})", year)?;
        }
        if !self.title_type.is_empty() {
            write!(f, " [{}]", self.title_type)?;
        }
        Ok(())
    }
}

/// Format an integer with comma thousands separators
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

// =============================================================================
// Streaming Models
// =============================================================================

/// How a streaming service offers a title
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OfferType {
    Subscription,
    Rent,
    Buy,
    Other(String),
}

impl OfferType {
    pub fn parse(s: &str) -> Self {
        match s {
            "subscription" => OfferType::Subscription,
            "rent" => OfferType::Rent,
            "buy" => OfferType::Buy,
            other => OfferType::Other(other.to_string()),
        }
    }

    /// Display label for a service with this offer: subscriptions show the
    /// bare service name, everything else carries the type in parentheses.
    pub fn label(&self, service: &str) -> String {
        match self {
            OfferType::Subscription => service.to_string(),
            other => format!("{} ({})", service, other),
        }
    }
}

impl fmt::Display for OfferType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OfferType::Subscription => write!(f, "subscription"),
            OfferType::Rent => write!(f, "rent"),
            OfferType::Buy => write!(f, "buy"),
            OfferType::Other(s) => write!(f, "{}", s),
        }
    }
}

// =============================================================================
// Watchlist Models
// =============================================================================

/// Release year as stored in the watchlist file, which may hold either form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Year {
    Number(i64),
    Text(String),
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Year::Number(n) => write!(f, "{}", n),
            Year::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Persisted snapshot of a title, taken when it was added.
///
/// Fields load one by one: a missing, `null` or wrong-typed value falls back
/// to its default instead of rejecting the whole file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchlistEntry {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_year")]
    pub year: Option<Year>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, rename = "type", deserialize_with = "lenient_string")]
    pub title_type: String,
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

/// Integers and strings are kept; anything else reads as no year
fn lenient_year<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Year>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64().map(Year::Number),
        Value::String(s) => Some(Year::Text(s)),
        _ => None,
    })
}

impl WatchlistEntry {
    pub fn snapshot(title: &Title) -> Self {
        Self {
            title: title.display_title().to_string(),
            year: title.start_year.map(|y| Year::Number(y.into())),
            id: title.id.clone(),
            title_type: title.title_type.clone(),
        }
    }
}

impl fmt::Display for WatchlistEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let year = self.year.as_ref().map(|y| y.to_string()).unwrap_or_default();
        write!(f, "{} ({}) [{}]", self.title, year, self.title_type)
    }
}

/// Title ID → entry mapping, serialised as a plain JSON object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Watchlist {
    entries: BTreeMap<String, WatchlistEntry>,
}

impl Watchlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&WatchlistEntry> {
        self.entries.get(id)
    }

    /// Insert unless the key exists. Returns false on duplicates.
    pub fn insert(&mut self, id: impl Into<String>, entry: WatchlistEntry) -> bool {
        use std::collections::btree_map::Entry;
        match self.entries.entry(id.into()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(entry);
                true
            }
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<WatchlistEntry> {
        self.entries.remove(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries ordered by case-insensitive title, for display.
    pub fn sorted(&self) -> Vec<(&str, &WatchlistEntry)> {
        let mut items: Vec<_> = self
            .entries
            .iter()
            .map(|(id, entry)| (id.as_str(), entry))
            .collect();
        items.sort_by_cached_key(|(_, entry)| entry.title.to_lowercase());
        items
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
