// tests/parser_feed.rs
use chrono::{TimeZone, Utc};

use gigwatch::feed::parser::parse_feed;

const PAGE1: &str = include_str!("fixtures/gigs_page1.xml");
const PAGE2: &str = include_str!("fixtures/gigs_page2.xml");

#[test]
fn fixture_page_yields_one_listing_per_item_in_order() {
    let scraped_at = Utc.with_ymd_and_hms(2026, 8, 28, 12, 0, 0).unwrap();
    let posts = parse_feed(PAGE1, scraped_at).expect("page1 parses");

    assert_eq!(posts.len(), 3);
    assert_eq!(posts[0].title.as_deref(), Some("Data Analyst Needed"));
    assert_eq!(posts[1].title.as_deref(), Some("Freezer for sale"));
    assert_eq!(posts[2].title.as_deref(), Some("Help with a messy workbook"));
    assert!(posts.iter().all(|p| p.scraped_date == scraped_at));
    assert!(posts.iter().all(|p| p.link.is_some()));
}

#[test]
fn channel_metadata_is_not_mistaken_for_an_item() {
    let scraped_at = Utc::now();
    let posts = parse_feed(PAGE1, scraped_at).unwrap();
    // The channel element carries title/link/description too; only items count.
    assert!(posts
        .iter()
        .all(|p| p.title.as_deref() != Some("city example | computer gigs")));
}

#[test]
fn listed_date_comes_from_the_feed() {
    let posts = parse_feed(PAGE1, Utc::now()).unwrap();
    let expected = Utc.with_ymd_and_hms(2026, 8, 28, 14, 15, 0).unwrap(); // 08:15 -06:00
    assert_eq!(posts[0].listed_date, Some(expected));
}

#[test]
fn item_missing_description_is_tolerated() {
    let posts = parse_feed(PAGE2, Utc::now()).unwrap();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[1].title.as_deref(), Some("Free couch on the corner"));
    assert_eq!(posts[1].description, None);
}

#[test]
fn escaped_entities_are_decoded() {
    let posts = parse_feed(PAGE1, Utc::now()).unwrap();
    assert_eq!(
        posts[2].description.as_deref(),
        Some("spreadsheet cleanup, a few hours & some formulas")
    );
}
