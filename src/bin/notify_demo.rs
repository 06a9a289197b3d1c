//! Render the notification body from sample listings and print it.
//! Set GIGWATCH_SEND_DEMO=1 (with SMTP env vars and a config file present)
//! to send it through the real transport.

use chrono::Utc;

use gigwatch::config::WatchConfig;
use gigwatch::listing::{AnnotatedListing, Listing};
use gigwatch::notify::email::{render_html_body, EmailSender};
use gigwatch::notify::Notifier;

fn sample_posts() -> Vec<AnnotatedListing> {
    let mk = |title: &str, desc: &str, matched: &[&str]| AnnotatedListing {
        listing: Listing {
            title: Some(title.to_string()),
            link: Some("https://city.example.org/cpg/d/sample/1.html".to_string()),
            description: Some(desc.to_string()),
            listed_date: Some(Utc::now()),
            scraped_date: Utc::now(),
        },
        matched: matched.iter().map(|m| m.to_string()).collect(),
    };
    vec![
        mk("Data Analyst Needed", "short contract, csv wrangling", &["Data", "csv"]),
        mk("Python tutor wanted", "two evenings a week", &["Python"]),
    ]
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let posts = sample_posts();
    println!("{}", render_html_body(&posts));

    if std::env::var("GIGWATCH_SEND_DEMO").ok().is_some_and(|v| v == "1") {
        let cfg = WatchConfig::load_default()?;
        let sender = EmailSender::from_env(&cfg.email)?;
        sender.notify(&posts).await?;
        println!("demo email sent to {}", cfg.email.recipients);
    }
    Ok(())
}
