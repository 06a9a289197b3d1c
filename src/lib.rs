// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod config;
pub mod feed;
pub mod listing;
pub mod notify;
pub mod pipeline;
pub mod relevance;
pub mod store;

// ---- Re-exports for stable public API ----
pub use crate::config::WatchConfig;
pub use crate::listing::{AnnotatedListing, Listing};
pub use crate::pipeline::{run_once, RunSummary};
