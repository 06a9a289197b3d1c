// tests/store_append.rs
use chrono::{TimeZone, Utc};

use gigwatch::listing::{AnnotatedListing, Listing};
use gigwatch::store::{JsonlLog, ListingLog, LogRow};

fn post(title: &str, matched: &[&str]) -> AnnotatedListing {
    AnnotatedListing {
        listing: Listing {
            title: Some(title.to_string()),
            link: Some(format!("https://city.example.org/cpg/{title}.html")),
            description: Some("desc".to_string()),
            listed_date: Some(Utc.with_ymd_and_hms(2026, 8, 28, 9, 0, 0).unwrap()),
            scraped_date: Utc.with_ymd_and_hms(2026, 8, 28, 12, 0, 0).unwrap(),
        },
        matched: matched.iter().map(|m| m.to_string()).collect(),
    }
}

fn read_rows(log: &JsonlLog) -> Vec<LogRow> {
    let content = std::fs::read_to_string(log.path()).unwrap();
    content
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

#[tokio::test]
async fn appending_m_rows_to_r_grows_to_r_plus_m_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let log = JsonlLog::new(dir.path().join("listings.jsonl"));

    log.append(&[post("a", &["data"]), post("b", &[])])
        .await
        .unwrap();
    assert_eq!(log.row_count().unwrap(), 2);

    log.append(&[post("c", &["python", "tutor"])]).await.unwrap();
    assert_eq!(log.row_count().unwrap(), 3);

    let rows = read_rows(&log);
    let titles: Vec<_> = rows.iter().map(|r| r.title.clone().unwrap()).collect();
    assert_eq!(titles, vec!["a", "b", "c"]);
    assert_eq!(rows[0].matched, "data");
    assert_eq!(rows[1].matched, "");
    assert_eq!(rows[2].matched, "python, tutor");
}

#[tokio::test]
async fn empty_append_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();
    let log = JsonlLog::new(dir.path().join("listings.jsonl"));

    log.append(&[]).await.unwrap();
    assert_eq!(log.row_count().unwrap(), 0);
    assert!(!log.path().exists(), "empty append must not create the file");

    log.append(&[post("a", &[])]).await.unwrap();
    log.append(&[]).await.unwrap();
    assert_eq!(log.row_count().unwrap(), 1);
}

#[tokio::test]
async fn missing_fields_round_trip_as_null() {
    let dir = tempfile::tempdir().unwrap();
    let log = JsonlLog::new(dir.path().join("listings.jsonl"));

    let mut bare = post("x", &[]);
    bare.listing.title = None;
    bare.listing.description = None;
    bare.listing.listed_date = None;
    log.append(&[bare]).await.unwrap();

    let rows = read_rows(&log);
    assert_eq!(rows[0].title, None);
    assert_eq!(rows[0].description, None);
    assert_eq!(rows[0].listed_date, None);
}
