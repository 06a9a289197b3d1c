// src/config.rs
//! Watch configuration, loaded once at startup from TOML and passed
//! explicitly into the pipeline. Nothing reads it from shared state.

use anyhow::{ensure, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::feed::PAGE_SIZE;

pub const ENV_CONFIG_PATH: &str = "GIGWATCH_CONFIG_PATH";
pub const DEFAULT_CONFIG_PATH: &str = "config/gigwatch.toml";

fn default_log_path() -> PathBuf {
    PathBuf::from("data/listings.jsonl")
}

#[derive(Debug, Clone, Deserialize)]
pub struct WatchConfig {
    /// Feed search endpoint; the pagination parameters are appended to it.
    pub base_url: String,
    /// Total listings to retrieve per run, expected to be a multiple of 25.
    pub num_posts: u32,
    /// Case-insensitive substrings used for relevance matching.
    pub keywords: Vec<String>,
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,
    pub email: EmailConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// Comma-separated recipient list.
    pub recipients: String,
    pub subject: String,
}

impl WatchConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: WatchConfig = toml::from_str(s).context("parsing watch config")?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// Load using $GIGWATCH_CONFIG_PATH, falling back to
    /// `config/gigwatch.toml`.
    pub fn load_default() -> Result<Self> {
        let path = std::env::var(ENV_CONFIG_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
        Self::from_path(&path)
    }

    fn validate(&self) -> Result<()> {
        ensure!(!self.base_url.trim().is_empty(), "base_url is empty");
        ensure!(self.num_posts > 0, "num_posts must be positive");
        ensure!(!self.keywords.is_empty(), "keywords list is empty");
        if self.num_posts % PAGE_SIZE != 0 {
            // Tolerated: the page loop still covers the requested count.
            tracing::warn!(
                num_posts = self.num_posts,
                page_size = PAGE_SIZE,
                "num_posts is not a multiple of the page size"
            );
        }
        Ok(())
    }
}
