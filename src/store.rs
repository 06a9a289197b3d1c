// src/store.rs
//! Append-only tabular log of every observed listing. Rows land at the end
//! of a JSON Lines file; nothing is ever updated or deleted. No locking --
//! single-invocation use is assumed.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::listing::AnnotatedListing;

/// One row of the persistent log, in column order: scraped date, matched
/// keywords, listed date, title, description, link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRow {
    pub scraped_date: DateTime<Utc>,
    pub matched: String,
    pub listed_date: Option<DateTime<Utc>>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
}

impl From<&AnnotatedListing> for LogRow {
    fn from(post: &AnnotatedListing) -> Self {
        Self {
            scraped_date: post.listing.scraped_date,
            matched: post.matched.join(", "),
            listed_date: post.listing.listed_date,
            title: post.listing.title.clone(),
            description: post.listing.description.clone(),
            link: post.listing.link.clone(),
        }
    }
}

#[async_trait::async_trait]
pub trait ListingLog: Send + Sync {
    /// Append one row per listing, in input order. An empty input is an
    /// explicit no-op and must not touch the store.
    async fn append(&self, posts: &[AnnotatedListing]) -> Result<()>;
}

pub struct JsonlLog {
    path: PathBuf,
}

impl JsonlLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of rows currently in the log (0 if the file does not exist).
    pub fn row_count(&self) -> Result<usize> {
        if !self.path.exists() {
            return Ok(0);
        }
        let file = std::fs::File::open(&self.path)
            .with_context(|| format!("opening log {}", self.path.display()))?;
        Ok(BufReader::new(file).lines().count())
    }
}

#[async_trait::async_trait]
impl ListingLog for JsonlLog {
    async fn append(&self, posts: &[AnnotatedListing]) -> Result<()> {
        if posts.is_empty() {
            tracing::info!("no listings to log");
            return Ok(());
        }
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir)
                    .with_context(|| format!("creating log directory {}", dir.display()))?;
            }
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("opening log {}", self.path.display()))?;
        for post in posts {
            let row = LogRow::from(post);
            let line = serde_json::to_string(&row).context("serializing log row")?;
            writeln!(file, "{line}").context("writing log row")?;
        }
        tracing::debug!(rows = posts.len(), path = %self.path.display(), "appended log rows");
        Ok(())
    }
}

// --- Test helper ---
pub struct MockLog {
    pub calls: std::sync::Mutex<Vec<Vec<AnnotatedListing>>>,
}

impl MockLog {
    pub fn new() -> Self {
        Self {
            calls: std::sync::Mutex::new(vec![]),
        }
    }
}

impl Default for MockLog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ListingLog for MockLog {
    async fn append(&self, posts: &[AnnotatedListing]) -> Result<()> {
        self.calls.lock().unwrap().push(posts.to_vec());
        Ok(())
    }
}
