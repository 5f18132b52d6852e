use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, info, instrument, warn};

use super::page::{scrape_page, LinkRecord};
use super::pagination::{expand_page_urls, parse_page_range};
use crate::fetcher::Fetcher;

/// How many pages a scrape visits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaginationMode {
    /// Scrape only the given URL
    #[default]
    Single,
    /// Scrape a templated range of pages
    Manual,
    /// Any other value; nothing is scraped
    #[serde(other)]
    Unsupported,
}

/// Validated inputs for one scrape
#[derive(Debug, Clone)]
pub struct ScrapeParams {
    pub url: String,
    pub mode: PaginationMode,
    pub filter: Option<HashSet<String>>,
    pub url_pattern: String,
    pub page_range: String,
}

/// Aggregated result of a scrape, deduplicated across pages
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScrapeSummary {
    pub links: Vec<LinkRecord>,
    pub count: usize,
    pub statistics: BTreeMap<String, usize>,
}

impl ScrapeSummary {
    pub fn from_links(links: Vec<LinkRecord>) -> Self {
        let links = deduplicate_links(links);
        let statistics = compute_statistics(&links);
        Self {
            count: links.len(),
            links,
            statistics,
        }
    }
}

/// Runs a single-page or manual-pagination scrape.
///
/// In single mode a fetch failure fails the scrape. In manual mode each
/// page is scraped in order and failed pages are logged and skipped.
#[instrument(skip(fetcher, params), fields(url = %params.url, mode = ?params.mode))]
pub async fn run_scrape(fetcher: &Fetcher, params: &ScrapeParams) -> Result<ScrapeSummary> {
    let filter = params.filter.as_ref();

    let links = match params.mode {
        PaginationMode::Single => scrape_page(fetcher, &params.url, filter)
            .await
            .with_context(|| format!("Error scraping {}", params.url))?,
        PaginationMode::Manual => {
            let pages = parse_page_range(&params.page_range);
            let page_urls = expand_page_urls(&params.url_pattern, &pages);
            info!("Scraping {} pages from pattern {}", page_urls.len(), params.url_pattern);

            let mut links = Vec::new();
            for (page, page_url) in pages.iter().zip(&page_urls) {
                match scrape_page(fetcher, page_url, filter).await {
                    Ok(page_links) => {
                        debug!("Page {} yielded {} links", page, page_links.len());
                        links.extend(page_links);
                    }
                    Err(e) => {
                        warn!("Error scraping page {} ({}): {}", page, page_url, e);
                    }
                }
            }
            links
        }
        PaginationMode::Unsupported => {
            warn!("Unsupported pagination mode, nothing to scrape");
            Vec::new()
        }
    };

    let summary = ScrapeSummary::from_links(links);
    info!("Scrape of {} found {} unique links", params.url, summary.count);
    Ok(summary)
}

/// Removes repeated URLs, keeping the first occurrence and the original order.
pub fn deduplicate_links(links: Vec<LinkRecord>) -> Vec<LinkRecord> {
    let mut seen = HashSet::new();
    links
        .into_iter()
        .filter(|link| seen.insert(link.url.clone()))
        .collect()
}

/// Counts links per extension.
pub fn compute_statistics(links: &[LinkRecord]) -> BTreeMap<String, usize> {
    let mut stats = BTreeMap::new();
    for link in links {
        *stats.entry(link.extension.clone()).or_insert(0) += 1;
    }
    stats
}
