//! Splits a rendered page into sections keyed by H2 heading text.
//!
//! A section is the run of block-level content between one `<h2>` and the
//! next; content before the first heading goes into a synthetic section
//! named "Preamble". Section content is stored as owned serialized copies
//! of the source elements, so nothing downstream can alias or mutate the
//! parsed document.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

/// Name of the synthetic section holding content before the first heading.
pub const PREAMBLE: &str = "Preamble";

static BODY_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("body").expect("failed to parse body selector"));

/// One element-type child of the document body, captured as a deep copy.
#[derive(Debug, Clone)]
pub struct Block {
    /// Tag name of the element ("p", "pre", "ul", ...), lowercase.
    pub tag: String,
    /// Serialized outer HTML of the element and its subtree.
    pub html: String,
}

/// The content belonging to one section, in document order.
#[derive(Debug, Clone, Default)]
pub struct Section {
    pub blocks: Vec<Block>,
}

/// A page's sections, keyed by heading text, preserving document order.
///
/// "Preamble" is always present (possibly empty) and always first. When two
/// headings share the same text, their content is merged into a single
/// section in first-occurrence position.
#[derive(Debug, Default)]
pub struct SectionMap {
    sections: Vec<(String, Section)>,
}

impl SectionMap {
    /// Look up a section by heading text.
    pub fn get(&self, name: &str) -> Option<&Section> {
        self.sections
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, s)| s)
    }

    /// Section names in document order, Preamble first.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|(n, _)| n.as_str())
    }

    /// Find or create the section with the given name.
    fn entry(&mut self, name: &str) -> &mut Section {
        if let Some(pos) = self.sections.iter().position(|(n, _)| n == name) {
            return &mut self.sections[pos].1;
        }
        self.sections.push((name.to_string(), Section::default()));
        &mut self.sections.last_mut().expect("just pushed").1
    }
}

/// Partition a rendered HTML page into sections.
///
/// Walks the direct children of `<body>` in order. Each `<h2>` starts a new
/// section named after its text content; every other element child is
/// appended to the current section. Text and comment nodes are dropped.
/// A page with no headings at all yields a map containing only "Preamble"
/// holding the entire body.
pub fn split_by_section(html: &str) -> SectionMap {
    let document = Html::parse_document(html);

    let mut map = SectionMap::default();
    map.entry(PREAMBLE);

    let Some(body) = document.select(&BODY_SELECTOR).next() else {
        return map;
    };

    let mut current = PREAMBLE.to_string();
    for child in body.children() {
        // Skip text and comment nodes
        let Some(element) = ElementRef::wrap(child) else {
            continue;
        };

        let tag = element.value().name();
        if tag == "h2" {
            current = element.text().collect::<String>();
            map.entry(&current);
        } else {
            map.entry(&current).blocks.push(Block {
                tag: tag.to_string(),
                html: element.html(),
            });
        }
    }

    map
}
