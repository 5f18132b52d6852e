use tracing::trace;
use url::Url;

/// Resolves an anchor reference against the page it was found on.
///
/// Handles absolute, scheme-relative, path-relative and query/fragment-only
/// references. Returns None when the reference cannot be resolved; callers
/// skip such links.
pub fn resolve_url(base: &Url, href: &str) -> Option<String> {
    match base.join(href) {
        Ok(url) => Some(url.to_string()),
        Err(e) => {
            trace!("Skipping unresolvable href '{}': {}", href, e);
            None
        }
    }
}
