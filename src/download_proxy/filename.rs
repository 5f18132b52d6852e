use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;
use url::Url;

pub static DISPOSITION_FILENAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)filename="?([^";]+)"?"#).unwrap());

/// Picks the suggested filename for a proxied download.
///
/// A `filename` in the Content-Disposition header wins over the URL's last
/// path segment.
pub fn infer_filename(url: &str, content_disposition: Option<&str>) -> String {
    if let Some(name) = content_disposition.and_then(filename_from_disposition) {
        debug!("Using Content-Disposition filename: {}", name);
        return name;
    }
    filename_from_url(url)
}

pub fn filename_from_disposition(header: &str) -> Option<String> {
    let captured = DISPOSITION_FILENAME.captures(header)?.get(1)?.as_str().trim();
    let name = sanitize_filename::sanitize(captured);
    (!name.is_empty()).then_some(name)
}

/// Last path segment of the URL, percent-decoded and sanitized.
///
/// Falls back to `<host>_<timestamp>.file` when the URL ends in a slash or
/// has no path.
pub fn filename_from_url(url: &str) -> String {
    let parsed = Url::parse(url).ok();

    let segment = match &parsed {
        Some(u) => u
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .unwrap_or("")
            .to_string(),
        None => url
            .rsplit('/')
            .next()
            .and_then(|last| last.split('?').next())
            .unwrap_or("")
            .to_string(),
    };

    let decoded = urlencoding::decode(&segment)
        .map(|s| s.into_owned())
        .unwrap_or(segment);
    let name = sanitize_filename::sanitize(decoded);
    if !name.is_empty() {
        return name;
    }

    let host = parsed
        .as_ref()
        .and_then(|u| u.host_str())
        .map(|h| h.trim_start_matches("www.").to_string())
        .unwrap_or_else(|| "download".to_string());
    format!("{}_{}.file", host, Utc::now().timestamp())
}
