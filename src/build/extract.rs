//! Field extraction: section map + metadata to a page record.
//!
//! Each field has its own source section and its own omission rule; the
//! rules are independent of one another. A field whose source section is
//! absent is left out of the record entirely.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Node, Selector};

use crate::build::document::PageMetadata;
use crate::build::package::{Link, PageRecord};
use crate::build::sections::{PREAMBLE, Section, SectionMap};
use crate::build::syntax::{SyntaxError, SyntaxSource};
use crate::build::url::{
    DOCS_PATH, MDN_ROOT, escape_attribute, escape_html, escape_text, normalize_url,
};

/// Page types eligible for extraction.
const IN_SCOPE: [&str; 2] = ["css-property", "css-shorthand-property"];

/// Generic placeholder types whose grammar expansions are large enough to
/// swamp the output; the syntax lookup is asked to leave them unexpanded.
const TYPES_TO_SKIP: [&str; 2] = ["<color>", "<gradient>"];

/// Section holding the syntax example.
const SYNTAX_SECTION: &str = "Syntax";
/// Section listing a shorthand's constituent properties.
const CONSTITUENT_SECTION: &str = "Constituent properties";
/// Section of related links.
const SEE_ALSO_SECTION: &str = "See also";

static P_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p").expect("failed to parse p selector"));
static PRE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("pre").expect("failed to parse pre selector"));
static LI_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("li").expect("failed to parse li selector"));
static A_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("failed to parse a selector"));

#[derive(thiserror::Error, Debug)]
pub enum ExtractError {
    /// The syntax lookup failed with something other than "not found".
    #[error("formal syntax lookup failed for '{title}': {source}")]
    Syntax {
        title: String,
        source: SyntaxError,
    },
}

/// Returns true if the page's type is in the extraction allow-list.
pub fn in_scope(metadata: &PageMetadata) -> bool {
    IN_SCOPE.contains(&metadata.page_type.as_str())
}

/// Build the output record for one page.
///
/// Returns `Ok(None)` for pages outside the scope filter; that is a
/// silent skip, not an error.
pub fn build_page_record(
    metadata: &PageMetadata,
    sections: &SectionMap,
    syntaxes: &dyn SyntaxSource,
) -> Result<Option<PageRecord>, ExtractError> {
    if !in_scope(metadata) {
        return Ok(None);
    }

    let mut record = PageRecord {
        mdn_url: format!("{}{}{}", MDN_ROOT, DOCS_PATH, metadata.slug),
        browser_compatibility: metadata.browser_compat.clone(),
        status: metadata.status.clone(),
        summary: None,
        interactive_example: metadata.interactive_example.clone(),
        syntax_example: None,
        constituent_properties: None,
        see_also: None,
        formal_syntax: None,
    };

    // Summary: the first top-level paragraph in the preamble, with its
    // link targets made absolute
    if let Some(preamble) = sections.get(PREAMBLE) {
        record.summary = extract_summary(preamble);
    }

    // Syntax example: text of the first <pre> in the Syntax section
    if let Some(section) = sections.get(SYNTAX_SECTION) {
        record.syntax_example = extract_syntax_example(section);
    }

    // Link lists: present (possibly empty) whenever their section exists
    if let Some(section) = sections.get(CONSTITUENT_SECTION) {
        record.constituent_properties = Some(extract_link_list(section));
    }
    if let Some(section) = sections.get(SEE_ALSO_SECTION) {
        record.see_also = Some(extract_link_list(section));
    }

    // Formal syntax: "not found" is the expected outcome for non-standard
    // properties and just omits the field; anything else fails the page
    match syntaxes.property_syntax(&metadata.title, &TYPES_TO_SKIP) {
        Ok(syntax) => record.formal_syntax = Some(syntax),
        Err(SyntaxError::NotFound(_)) => {}
        Err(source) => {
            return Err(ExtractError::Syntax {
                title: metadata.title.clone(),
                source,
            });
        }
    }

    Ok(Some(record))
}

/// Inner HTML of the first paragraph block, link targets made absolute.
fn extract_summary(preamble: &Section) -> Option<String> {
    let block = preamble.blocks.iter().find(|block| block.tag == "p")?;
    let fragment = Html::parse_fragment(&block.html);
    let paragraph = fragment.select(&P_SELECTOR).next()?;

    let mut out = String::new();
    serialize_children(paragraph, &mut out);
    Some(out)
}

/// Elements without a closing tag.
const VOID_ELEMENTS: [&str; 4] = ["br", "hr", "img", "wbr"];

/// Serialize an element's children, normalizing anchor `href` attributes.
///
/// Rewriting happens per node so attribute-like text content (inline code
/// showing `href="..."`, for instance) passes through untouched.
fn serialize_children(element: ElementRef, out: &mut String) {
    for child in element.children() {
        if let Some(child) = ElementRef::wrap(child) {
            serialize_element(child, out);
        } else if let Node::Text(text) = child.value() {
            out.push_str(&escape_text(text));
        }
    }
}

fn serialize_element(element: ElementRef, out: &mut String) {
    let tag = element.value().name();

    out.push('<');
    out.push_str(tag);
    for (name, value) in element.value().attrs() {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        if tag == "a" && name == "href" {
            out.push_str(&escape_attribute(&normalize_url(value)));
        } else {
            out.push_str(&escape_attribute(value));
        }
        out.push('"');
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&tag) {
        return;
    }
    serialize_children(element, out);
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

/// Escaped text content of the first `<pre>` anywhere in the section.
fn extract_syntax_example(section: &Section) -> Option<String> {
    for block in &section.blocks {
        let fragment = Html::parse_fragment(&block.html);
        if let Some(pre) = fragment.select(&PRE_SELECTOR).next() {
            let text: String = pre.text().collect();
            // Fenced code blocks render with a trailing newline
            return Some(escape_html(text.trim()));
        }
    }
    None
}

/// `{target, text}` records for every linked list item in the section, in
/// document order. List items without a link are skipped.
fn extract_link_list(section: &Section) -> Vec<Link> {
    let mut links = Vec::new();

    for block in &section.blocks {
        let fragment = Html::parse_fragment(&block.html);
        for item in fragment.select(&LI_SELECTOR) {
            let Some(anchor) = item.select(&A_SELECTOR).next() else {
                continue;
            };
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            let text: String = anchor.text().collect();
            links.push(Link {
                target: normalize_url(href),
                text: escape_html(&text),
            });
        }
    }

    links
}
