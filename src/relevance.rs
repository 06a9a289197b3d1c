// src/relevance.rs
//! Keyword relevance gate: one case-insensitive alternation regex over the
//! configured keywords, tested against title and description independently.
//! Plain substring semantics, no word-boundary anchoring ("app" matches
//! inside "happy").

use anyhow::{ensure, Context, Result};
use regex::{Regex, RegexBuilder};

use crate::listing::{AnnotatedListing, Listing};

pub struct KeywordMatcher {
    re: Regex,
}

impl KeywordMatcher {
    /// Compile the alternation pattern. An empty keyword list or a pattern
    /// that fails to compile is a configuration fault that aborts the run.
    pub fn new(keywords: &[String]) -> Result<Self> {
        ensure!(!keywords.is_empty(), "keyword list is empty");
        let pattern = keywords
            .iter()
            .map(|k| regex::escape(k.trim()))
            .collect::<Vec<_>>()
            .join("|");
        let re = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .context("compiling keyword pattern")?;
        Ok(Self { re })
    }

    /// Attach the keyword matches found in title or description. Matched
    /// substrings are recorded as they appear in the listing text.
    pub fn annotate(&self, listing: Listing) -> AnnotatedListing {
        let mut matched: Vec<String> = Vec::new();
        for field in [listing.title_str(), listing.description_str()] {
            for m in self.re.find_iter(field) {
                matched.push(m.as_str().to_string());
            }
        }
        AnnotatedListing { listing, matched }
    }
}

/// Keep only the listings with a non-empty match set, preserving order.
pub fn filter_matched(posts: &[AnnotatedListing]) -> Vec<AnnotatedListing> {
    posts.iter().filter(|p| p.is_match()).cloned().collect()
}
