//! Scrapes web pages for downloadable-file links and proxies file downloads
//! server-side for browser clients.

pub mod api;
pub mod download_proxy;
pub mod fetcher;
pub mod link_scraper;
pub mod utils;
