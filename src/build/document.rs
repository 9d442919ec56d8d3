//! Page source parsing: front matter splitting and metadata types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug)]
pub enum DocumentError {
    #[error("page has no front matter block")]
    MissingFrontMatter,

    #[error("front matter block is unterminated")]
    UnterminatedFrontMatter,

    #[error("invalid front matter: {0}")]
    InvalidFrontMatter(#[from] serde_yaml::Error),
}

/// Front matter metadata for one source page.
///
/// `title`, `slug` and `page-type` are required: a page without them is
/// malformed and fails at the page boundary. Keys this pipeline does not
/// consume are preserved in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PageMetadata {
    /// Canonical identifier; used as the output map key and grammar lookup key
    pub title: String,
    /// URL path segment under the docs root
    pub slug: String,
    /// Discriminates pages in and out of scope
    pub page_type: String,
    /// Opaque browser-compatibility key
    pub browser_compat: Option<String>,
    /// Lifecycle tags ("experimental", "deprecated", ...)
    #[serde(default)]
    pub status: Vec<String>,
    /// Opaque interactive-example identifier
    pub interactive_example: Option<String>,
    /// Any other front matter keys
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

/// Result of splitting a raw page source into metadata and body.
#[derive(Debug)]
pub struct ParsedPage {
    pub metadata: PageMetadata,
    /// The markdown body without the front matter block
    pub body: String,
}

/// Split a raw page source into its front matter and markdown body.
///
/// Front matter is a YAML block delimited by `---` at the start of the file:
///
/// ```markdown
/// ---
/// title: color
/// slug: Web/CSS/color
/// page-type: css-property
/// ---
///
/// Body starts here
/// ```
pub fn parse_front_matter(raw: &str) -> Result<ParsedPage, DocumentError> {
    let raw = raw.trim_start();

    if !raw.starts_with("---") {
        return Err(DocumentError::MissingFrontMatter);
    }

    // Find the closing delimiter
    let after_opening = &raw[3..];
    let closing_pos = after_opening
        .find("\n---")
        .ok_or(DocumentError::UnterminatedFrontMatter)?;

    // Extract the YAML content (skip the opening newline if present)
    let yaml_content = after_opening[..closing_pos].trim_start_matches('\n');

    // Extract the body (skip the closing delimiter and newline)
    let body_start = 3 + closing_pos + 4; // "---" + yaml + "\n---"
    let body = if body_start < raw.len() {
        raw[body_start..].trim_start_matches('\n').to_string()
    } else {
        String::new()
    };

    let metadata: PageMetadata = serde_yaml::from_str(yaml_content)?;

    Ok(ParsedPage { metadata, body })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_front_matter() {
        let raw = r#"---
title: color
slug: Web/CSS/color
page-type: css-property
browser-compat: css.properties.color
status:
  - experimental
interactive-example: interactive-examples/color
---

The **`color`** property.
"#;
        let parsed = parse_front_matter(raw).unwrap();
        assert_eq!(parsed.metadata.title, "color");
        assert_eq!(parsed.metadata.slug, "Web/CSS/color");
        assert_eq!(parsed.metadata.page_type, "css-property");
        assert_eq!(
            parsed.metadata.browser_compat.as_deref(),
            Some("css.properties.color")
        );
        assert_eq!(parsed.metadata.status, vec!["experimental"]);
        assert_eq!(
            parsed.metadata.interactive_example.as_deref(),
            Some("interactive-examples/color")
        );
        assert!(parsed.body.starts_with("The **`color`** property."));
    }

    #[test]
    fn test_optional_fields_default() {
        let raw =
            "---\ntitle: gap\nslug: Web/CSS/gap\npage-type: css-shorthand-property\n---\nBody\n";
        let parsed = parse_front_matter(raw).unwrap();
        assert!(parsed.metadata.browser_compat.is_none());
        assert!(parsed.metadata.status.is_empty());
        assert!(parsed.metadata.interactive_example.is_none());
    }

    #[test]
    fn test_unknown_keys_preserved_in_extra() {
        let raw = "---\ntitle: color\nslug: Web/CSS/color\npage-type: css-property\nsidebar: cssref\n---\nBody\n";
        let parsed = parse_front_matter(raw).unwrap();
        assert!(parsed.metadata.extra.contains_key("sidebar"));
    }

    #[test]
    fn test_missing_front_matter_is_an_error() {
        let err = parse_front_matter("# Just markdown\n").unwrap_err();
        assert!(matches!(err, DocumentError::MissingFrontMatter));
    }

    #[test]
    fn test_unterminated_front_matter_is_an_error() {
        let err = parse_front_matter("---\ntitle: color\n").unwrap_err();
        assert!(matches!(err, DocumentError::UnterminatedFrontMatter));
    }

    #[test]
    fn test_missing_required_key_is_an_error() {
        let err = parse_front_matter("---\ntitle: color\n---\nBody\n").unwrap_err();
        assert!(matches!(err, DocumentError::InvalidFrontMatter(_)));
    }

    #[test]
    fn test_empty_body() {
        let raw = "---\ntitle: color\nslug: Web/CSS/color\npage-type: css-property\n---";
        let parsed = parse_front_matter(raw).unwrap();
        assert!(parsed.body.is_empty());
    }
}
