use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, instrument, trace, warn};
use url::Url;

use super::extension::{extension_of, is_downloadable};
use super::normalizer::resolve_url;
use crate::fetcher::{FetchError, Fetcher};

pub const MAX_TEXT_CHARS: usize = 100;
const DEFAULT_LINK_TEXT: &str = "No description";

static ANCHOR_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());

/// A downloadable link found on a scraped page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    /// Absolute URL, also the identity used for deduplication
    pub url: String,

    /// Visible anchor text, at most 100 characters
    pub text: String,

    /// Lowercase extension without the leading dot
    pub extension: String,
}

/// Fetches one page and returns its downloadable links in document order.
#[instrument(level = "debug", skip(fetcher, filter))]
pub async fn scrape_page(
    fetcher: &Fetcher,
    page_url: &str,
    filter: Option<&HashSet<String>>,
) -> Result<Vec<LinkRecord>, FetchError> {
    let html = fetcher.fetch_page(page_url).await?;
    let links = extract_links(&html, page_url, filter);
    debug!("Found {} downloadable links on {}", links.len(), page_url);
    Ok(links)
}

/// Extracts downloadable links from an HTML document.
///
/// Each anchor is resolved against `page_url`, classified, checked against
/// the caller filter and then the downloadable set. The first occurrence of
/// a URL wins.
pub fn extract_links(
    html: &str,
    page_url: &str,
    filter: Option<&HashSet<String>>,
) -> Vec<LinkRecord> {
    let Ok(base) = Url::parse(page_url) else {
        warn!("Cannot resolve links against invalid page URL: {}", page_url);
        return Vec::new();
    };

    let document = Html::parse_document(html);
    let mut links = Vec::new();
    let mut seen = HashSet::new();

    for anchor in document.select(&ANCHOR_SELECTOR) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let Some(url) = resolve_url(&base, href) else {
            continue;
        };

        let extension = extension_of(&url);
        if let Some(filter) = filter {
            if !filter.contains(&extension) {
                continue;
            }
        }
        if !is_downloadable(&extension) {
            continue;
        }
        if seen.contains(&url) {
            trace!("Duplicate link on page: {}", url);
            continue;
        }

        let text = anchor_text(&anchor.text().collect::<String>());
        seen.insert(url.clone());
        links.push(LinkRecord {
            url,
            text,
            extension,
        });
    }

    links
}

fn anchor_text(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return DEFAULT_LINK_TEXT.to_string();
    }
    trimmed.chars().take(MAX_TEXT_CHARS).collect()
}
