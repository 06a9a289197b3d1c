// src/listing.rs
use chrono::{DateTime, Utc};

/// One scraped posting, built from a single feed `item`.
///
/// Fields the feed omitted stay `None`; nothing is validated after parse.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct Listing {
    pub title: Option<String>,
    pub link: Option<String>,
    pub description: Option<String>,
    /// Timestamp as reported by the feed's `date` tag.
    pub listed_date: Option<DateTime<Utc>>,
    /// Timestamp of retrieval, assigned at parse time.
    pub scraped_date: DateTime<Utc>,
}

impl Listing {
    pub fn title_str(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    pub fn description_str(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }
}

/// A `Listing` plus the keyword substrings that matched its title or
/// description. `matched` is set once by the relevance filter and never
/// recomputed; empty means the listing is not relevant.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct AnnotatedListing {
    #[serde(flatten)]
    pub listing: Listing,
    pub matched: Vec<String>,
}

impl AnnotatedListing {
    pub fn is_match(&self) -> bool {
        !self.matched.is_empty()
    }
}
