use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Maximum page numbers a single request may visit
pub const MAX_PAGES: usize = 10;
/// Maximum pages a single `start-end` segment expands to
pub const MAX_PAGES_PER_RANGE: u32 = 10;
pub const PAGE_PLACEHOLDER: &str = "{page}";
pub const DEFAULT_PAGE_RANGE: &str = "1";

/// Parses a page range such as `"1,3-5,9"` into sorted, unique page numbers.
///
/// Any malformed segment makes the whole range fall back to `[1]`.
pub fn parse_page_range(range: &str) -> Vec<u32> {
    match try_parse_page_range(range) {
        Some(pages) => pages,
        None => {
            warn!("Unparseable page range '{}', falling back to page 1", range);
            vec![1]
        }
    }
}

fn try_parse_page_range(range: &str) -> Option<Vec<u32>> {
    let mut pages = BTreeSet::new();

    for segment in range.split(',') {
        let segment = segment.trim();
        match segment.split_once('-') {
            Some((start, end)) => {
                let start = parse_page(start)?;
                let end = parse_page(end)?;
                let last = end.min(start.saturating_add(MAX_PAGES_PER_RANGE - 1));
                pages.extend(start..=last);
            }
            None => {
                pages.insert(parse_page(segment)?);
            }
        }
    }

    let pages: Vec<u32> = pages.into_iter().take(MAX_PAGES).collect();
    debug!("Page range '{}' expanded to {:?}", range, pages);
    Some(pages)
}

fn parse_page(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}

/// Substitutes each page number into the URL template, keeping page order.
///
/// Only the first `{page}` is replaced; later ones are left as written.
pub fn expand_page_urls(template: &str, pages: &[u32]) -> Vec<String> {
    pages
        .iter()
        .map(|page| template.replacen(PAGE_PLACEHOLDER, &page.to_string(), 1))
        .collect()
}
