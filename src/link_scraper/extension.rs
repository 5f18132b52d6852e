use once_cell::sync::Lazy;
use std::collections::HashSet;
use url::Url;

/// File types worth surfacing as scrape results
pub static DOWNLOADABLE_EXTENSIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // documents
        "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx",
        // archives
        "zip", "rar", "7z", "tar", "gz",
        // text and data
        "txt", "csv", "json", "xml",
        // images
        "jpg", "jpeg", "png", "gif", "svg",
        // audio and video
        "mp3", "mp4", "avi", "mov", "wmv",
    ]
    .into_iter()
    .collect()
});

/// Returns the lowercase extension of a URL's path, without the dot.
///
/// Malformed URLs and dot-less paths yield an empty string, which matches
/// neither a caller filter nor the downloadable set.
pub fn extension_of(url: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return String::new();
    };

    let path = parsed.path();
    let path = path.split(['?', '#']).next().unwrap_or(path);
    match path.rsplit_once('.') {
        Some((_, ext)) => ext.to_lowercase(),
        None => String::new(),
    }
}

pub fn is_downloadable(extension: &str) -> bool {
    DOWNLOADABLE_EXTENSIONS.contains(extension)
}

/// Builds the per-request extension filter from caller input.
///
/// Entries are lowercased and lose one leading dot. An empty list means no
/// filter at all.
pub fn build_extension_filter(extensions: &[String]) -> Option<HashSet<String>> {
    if extensions.is_empty() {
        return None;
    }
    Some(
        extensions
            .iter()
            .map(|ext| {
                let lower = ext.to_lowercase();
                lower.strip_prefix('.').map(str::to_string).unwrap_or(lower)
            })
            .collect(),
    )
}
