//! Slug derivation for natural keys.

/// Derive a lower-cased, dash-separated slug from a display name.
///
/// Alphanumeric characters are kept (lower-cased); every run of anything
/// else collapses into a single `-`. Leading and trailing separators are
/// dropped, so `"  Apple  Computer, Inc. "` becomes `"apple-computer-inc"`.
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for ch in name.chars() {
        if ch.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(ch.to_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}
