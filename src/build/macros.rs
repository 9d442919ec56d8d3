//! Expansion of `{{Name("arg", ...)}}` template macros in page sources.
//!
//! Source pages embed macro calls that the documentation site's renderer
//! expands server-side. For the data package only a handful matter: the
//! cross-reference macros become site-relative links (so the extractor's
//! URL normalization applies to them like any other link), and everything
//! else (sidebars, compat tables, embeds, status badges) expands to
//! nothing. Expansion runs on the markdown source, before rendering.

use crate::build::url::{DOCS_PATH, escape_html};

/// Expand all macro calls in a page body.
///
/// Macro names are case-insensitive. An opening `{{` without a matching
/// `}}` is left verbatim.
pub fn expand_macros(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut rest = source;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);

        let tail = &rest[start..];
        match tail.find("}}") {
            Some(end) => {
                out.push_str(&expand_call(&tail[2..end]));
                rest = &tail[end + 2..];
            }
            None => {
                out.push_str(tail);
                return out;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Expand a single macro call (the text between `{{` and `}}`).
fn expand_call(call: &str) -> String {
    let call = call.trim();

    let (name, args) = match call.find('(') {
        Some(open) => {
            let raw_args = call[open + 1..].trim_end().trim_end_matches(')');
            (call[..open].trim(), parse_args(raw_args))
        }
        None => (call, Vec::new()),
    };

    let display_or = |fallback: &str| {
        args.get(1)
            .cloned()
            .unwrap_or_else(|| fallback.to_string())
    };

    match name.to_ascii_lowercase().as_str() {
        "cssxref" => match args.first() {
            Some(prop) => format!(
                "<a href=\"{}Web/CSS/{}\"><code>{}</code></a>",
                DOCS_PATH,
                prop,
                escape_html(&display_or(prop))
            ),
            None => String::new(),
        },
        "htmlelement" => match args.first() {
            Some(element) => format!(
                "<a href=\"{}Web/HTML/Element/{}\"><code>&lt;{}&gt;</code></a>",
                DOCS_PATH,
                element,
                escape_html(element)
            ),
            None => String::new(),
        },
        "domxref" => match args.first() {
            Some(api) => format!(
                "<a href=\"{}Web/API/{}\"><code>{}</code></a>",
                DOCS_PATH,
                api.replace('.', "/"),
                escape_html(&display_or(api))
            ),
            None => String::new(),
        },
        "jsxref" => match args.first() {
            Some(object) => format!(
                "<a href=\"{}Web/JavaScript/Reference/Global_Objects/{}\"><code>{}</code></a>",
                DOCS_PATH,
                object.replace('.', "/"),
                escape_html(&display_or(object))
            ),
            None => String::new(),
        },
        "glossary" => match args.first() {
            Some(term) => format!(
                "<a href=\"{}Glossary/{}\">{}</a>",
                DOCS_PATH,
                term.replace(' ', "_"),
                escape_html(&display_or(term))
            ),
            None => String::new(),
        },
        // Sidebars, compat tables, embeds, status badges and anything we
        // don't recognize contribute nothing to the extracted fields.
        _ => String::new(),
    }
}

/// Split a macro argument list on commas outside quotes, stripping quotes
/// and whitespace.
fn parse_args(raw: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    let mut push_current = |current: &mut String| {
        let arg = current.trim().to_string();
        if !arg.is_empty() {
            args.push(arg);
        }
        current.clear();
    };

    for c in raw.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None => match c {
                '"' | '\'' => quote = Some(c),
                ',' => push_current(&mut current),
                _ => current.push(c),
            },
        }
    }
    push_current(&mut current);

    args
}
