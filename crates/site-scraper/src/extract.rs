use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

use crate::normalize::normalize_title;
use crate::resolve::{HrefMatch, resolve};

/// One matched element, as written to `result.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub title: String,
    pub url: String,
}

/// Compiles a selector, logging and returning `None` when it is not valid.
///
/// An invalid selector matches nothing rather than failing the run.
pub fn parse_selector(selector: &str) -> Option<Selector> {
    match Selector::parse(selector) {
        Ok(selector) => Some(selector),
        Err(e) => {
            tracing::warn!("Invalid selector '{}', no elements will match: {}", selector, e);
            None
        }
    }
}

/// Collects a record for every element matching `selector`, in document order.
///
/// Elements without an `href` are skipped silently. Elements whose href cannot
/// be resolved against `base_url` are skipped with a warning.
pub fn extract(
    document: &Html,
    selector: &Selector,
    base_url: &str,
    mode: HrefMatch,
) -> Vec<Record> {
    let records: Vec<Record> = document
        .select(selector)
        .filter_map(|element| to_record(element, base_url, mode))
        .collect();

    tracing::debug!("Extracted {} records from {}", records.len(), base_url);
    records
}

fn to_record(element: ElementRef<'_>, base_url: &str, mode: HrefMatch) -> Option<Record> {
    let href = element.value().attr("href")?;

    match resolve(base_url, href, mode) {
        Ok(url) => Some(Record {
            title: normalize_title(&element.text().collect::<String>()),
            url,
        }),
        Err(e) => {
            tracing::warn!("Skipping element with href '{}': {}", href, e);
            None
        }
    }
}
