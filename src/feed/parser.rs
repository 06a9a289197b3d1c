// src/feed/parser.rs
//! RSS 1.0 feed parsing. Items live directly under the `rdf:RDF` root in the
//! PURL namespace; each item's children are flattened into a field map keyed
//! by local tag name. Collision policy: last occurrence wins.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, TimeZone, Utc};
use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;
use std::collections::HashMap;
use time::{format_description::well_known::Rfc2822, OffsetDateTime};

use crate::listing::Listing;

/// Namespace the feed's `item` elements must be bound to.
pub const PURL_RSS_NS: &str = "http://purl.org/rss/1.0/";

/// Parse a feed document into listings, one per `item`, in document order.
///
/// Fails hard on malformed XML or when no element in the document is bound to
/// the PURL RSS namespace. An item missing an expected tag yields a listing
/// with that field `None`.
pub fn parse_feed(xml: &str, scraped_at: DateTime<Utc>) -> Result<Vec<Listing>> {
    let mut reader = NsReader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut listings = Vec::new();
    let mut saw_purl_ns = false;

    loop {
        let (res, ev) = reader.read_resolved_event().context("parsing feed xml")?;
        let in_purl = matches!(res, ResolveResult::Bound(Namespace(ns)) if ns == PURL_RSS_NS.as_bytes());
        if in_purl {
            saw_purl_ns = true;
        }
        match ev {
            Event::Start(e) if in_purl && e.local_name().as_ref() == b"item" => {
                let fields = read_item_fields(&mut reader)?;
                listings.push(listing_from_fields(fields, scraped_at));
            }
            Event::Empty(e) if in_purl && e.local_name().as_ref() == b"item" => {
                listings.push(listing_from_fields(HashMap::new(), scraped_at));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_purl_ns {
        bail!("feed document does not use the RSS 1.0 namespace {PURL_RSS_NS}");
    }
    Ok(listings)
}

/// Flatten an item's child elements into a map keyed by local tag name.
/// A repeated tag overwrites the earlier value (last occurrence wins).
fn read_item_fields(reader: &mut NsReader<&[u8]>) -> Result<HashMap<String, String>> {
    let mut fields = HashMap::new();
    loop {
        match reader.read_event().context("parsing feed item")? {
            Event::Start(e) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                let text = read_element_text(reader)?;
                fields.insert(name, text);
            }
            Event::Empty(e) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                fields.insert(name, String::new());
            }
            Event::End(e) if e.local_name().as_ref() == b"item" => break,
            Event::Eof => bail!("unexpected end of document inside feed item"),
            _ => {}
        }
    }
    Ok(fields)
}

/// Accumulate the text content of the current element through its closing
/// tag. Nested markup is dropped; its text is kept.
fn read_element_text(reader: &mut NsReader<&[u8]>) -> Result<String> {
    let mut out = String::new();
    let mut depth = 0usize;
    loop {
        match reader.read_event().context("parsing feed element")? {
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                if depth == 0 {
                    break;
                }
                depth -= 1;
            }
            Event::Text(t) => out.push_str(&t.unescape().context("unescaping feed text")?),
            Event::CData(c) => out.push_str(&String::from_utf8_lossy(&c.into_inner())),
            Event::Eof => bail!("unexpected end of document inside feed element"),
            _ => {}
        }
    }
    Ok(out)
}

fn listing_from_fields(mut fields: HashMap<String, String>, scraped_at: DateTime<Utc>) -> Listing {
    Listing {
        title: fields.remove("title"),
        link: fields.remove("link"),
        description: fields.remove("description"),
        listed_date: fields.remove("date").as_deref().and_then(parse_listed_date),
        scraped_date: scraped_at,
    }
}

/// Craigslist-style RSS 1.0 reports `dc:date` in RFC 3339; accept RFC 2822
/// as a fallback for feeds that use the RSS 2.0 style.
fn parse_listed_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw.trim()) {
        return Some(dt.with_timezone(&Utc));
    }
    OffsetDateTime::parse(raw.trim(), &Rfc2822)
        .ok()
        .and_then(|dt| Utc.timestamp_opt(dt.unix_timestamp(), 0).single())
}
