//! Scraping of downloadable-file links from one page or a templated range of pages.

pub mod extension;
pub mod normalizer;
pub mod orchestrator;
pub mod page;
pub mod pagination;

#[cfg(test)]
mod tests;

pub use extension::{build_extension_filter, extension_of, is_downloadable, DOWNLOADABLE_EXTENSIONS};
pub use normalizer::resolve_url;
pub use orchestrator::{
    compute_statistics, deduplicate_links, run_scrape, PaginationMode, ScrapeParams, ScrapeSummary,
};
pub use page::{extract_links, scrape_page, LinkRecord};
pub use pagination::{expand_page_urls, parse_page_range};
