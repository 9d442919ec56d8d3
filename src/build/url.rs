//! URL normalization and HTML escaping for extracted fields.

/// Root of the documentation site. Link targets written into the output
/// package are always absolute URLs under this root.
pub const MDN_ROOT: &str = "https://developer.mozilla.org";

/// Locale and docs path segment between the site root and a page slug.
pub const DOCS_PATH: &str = "/en-US/docs/";

/// Make a link target absolute.
///
/// Source pages write links to other pages as path-absolute URLs
/// ("/en-US/docs/..."). Those get the site root prefixed. Anything else
/// (already-absolute URLs, fragments, relative paths) is left unchanged.
pub fn normalize_url(url: &str) -> String {
    if url.starts_with('/') {
        format!("{}{}", MDN_ROOT, url)
    } else {
        url.to_string()
    }
}

/// HTML-escape text destined for literal embedding in the data package.
///
/// The ampersand is replaced first so that entities introduced by the later
/// replacements are not escaped a second time.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape a text node for HTML serialization.
///
/// Matches the parser's own serializer: quotes stay literal in text
/// content.
pub fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape an attribute value for HTML serialization.
pub fn escape_attribute(s: &str) -> String {
    s.replace('&', "&amp;").replace('"', "&quot;")
}
