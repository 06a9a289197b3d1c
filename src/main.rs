//! gigwatch — Binary Entrypoint
//! One invocation runs the whole pipeline start-to-finish: fetch the
//! configured feed pages, log every listing, email the keyword matches.
//! Scheduling is external (cron or manual).

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use gigwatch::config::WatchConfig;
use gigwatch::feed::HttpFeedSource;
use gigwatch::notify::email::EmailSender;
use gigwatch::pipeline;
use gigwatch::store::JsonlLog;

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gigwatch=info,warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cfg = WatchConfig::load_default()?;
    let source = HttpFeedSource::new();
    let log = JsonlLog::new(&cfg.log_path);
    let notifier = EmailSender::from_env(&cfg.email)?;

    let summary = pipeline::run_once(&cfg, &source, &log, &notifier).await?;
    tracing::info!(
        scraped = summary.scraped,
        matched = summary.matched,
        "run finished"
    );
    Ok(())
}
