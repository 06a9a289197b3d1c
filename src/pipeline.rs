// src/pipeline.rs
//! The one linear run: fetch each feed page, parse, annotate, then log
//! everything and email the matched subset. Any fetch or parse fault aborts
//! the run; the log write happens once at the end, so a mid-run fault loses
//! the whole run's rows.

use anyhow::{Context, Result};
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use once_cell::sync::OnceCell;

use crate::config::WatchConfig;
use crate::feed::{page_url, parser::parse_feed, FeedSource, PAGE_SIZE};
use crate::listing::AnnotatedListing;
use crate::notify::Notifier;
use crate::relevance::{filter_matched, KeywordMatcher};
use crate::store::ListingLog;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub scraped: usize,
    pub matched: usize,
}

/// One-time metrics registration (no-op facade unless a recorder is wired).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("listings_scraped_total", "Listings parsed from the feed.");
        describe_counter!("listings_matched_total", "Listings matching a keyword.");
        describe_histogram!("feed_parse_ms", "Feed page parse time in milliseconds.");
        describe_gauge!("pipeline_last_run_ts", "Unix ts when the pipeline last ran.");
    });
}

/// Run the pipeline once with an explicit configuration value.
pub async fn run_once(
    cfg: &WatchConfig,
    source: &dyn FeedSource,
    log: &dyn ListingLog,
    notifier: &dyn Notifier,
) -> Result<RunSummary> {
    ensure_metrics_described();

    let matcher = KeywordMatcher::new(&cfg.keywords)?;

    // Fetch and annotate page by page, in offset order.
    let mut posts: Vec<AnnotatedListing> = Vec::new();
    let mut offset = 0u32;
    while offset < cfg.num_posts {
        let url = page_url(&cfg.base_url, offset);
        let xml = source.fetch(&url).await?;

        let t0 = std::time::Instant::now();
        let page = parse_feed(&xml, chrono::Utc::now())
            .with_context(|| format!("parsing feed page at offset {offset}"))?;
        histogram!("feed_parse_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);

        tracing::debug!(offset, listings = page.len(), "parsed feed page");
        posts.extend(page.into_iter().map(|l| matcher.annotate(l)));
        offset += PAGE_SIZE;
    }

    let chosen = filter_matched(&posts);
    tracing::info!(chosen = chosen.len(), total = posts.len(), "selected listings");

    counter!("listings_scraped_total").increment(posts.len() as u64);
    counter!("listings_matched_total").increment(chosen.len() as u64);
    gauge!("pipeline_last_run_ts").set(chrono::Utc::now().timestamp().max(0) as f64);

    // Log everything first, then deliver. Empty-match runs skip delivery.
    log.append(&posts).await?;
    if chosen.is_empty() {
        tracing::info!("no matching listings, skipping notification");
    } else {
        notifier.notify(&chosen).await?;
    }

    Ok(RunSummary {
        scraped: posts.len(),
        matched: chosen.len(),
    })
}
