//! History fragment convention tying a sheet to a browser history entry.

/// Fragment prefix of history entries pushed by an open sheet.
pub const SHEET_FRAGMENT_PREFIX: &str = "bottom-sheet:";

/// URL pushed when a sheet tagged `id` opens on top of `base`.
///
/// Any sheet fragment already present on `base` is replaced.
pub fn sheet_url(base: &str, id: &str) -> String {
    format!("{}#{SHEET_FRAGMENT_PREFIX}{id}", canonical_url(base))
}

/// `url` without a trailing sheet fragment. Other fragments are kept.
pub fn canonical_url(url: &str) -> &str {
    match url.rfind('#') {
        Some(index) if url[index + 1..].starts_with(SHEET_FRAGMENT_PREFIX) => &url[..index],
        _ => url,
    }
}
