//! Content rendering: markdown body to HTML.
//!
//! Rendering is a collaborator the extraction pipeline treats as opaque:
//! it takes a page body and its metadata and produces the HTML the section
//! partitioner consumes. The default implementation expands template
//! macros and renders the result with pulldown-cmark; metadata passes
//! through so an implementation may augment it during rendering.

use pulldown_cmark::{Options, Parser, html};

use crate::build::document::PageMetadata;
use crate::build::macros::expand_macros;

/// A rendering failure for one page. Contained at the page boundary.
#[derive(thiserror::Error, Debug)]
#[error("render failed: {0}")]
pub struct RenderError(pub String);

/// A fully rendered page: HTML plus the (possibly augmented) metadata.
#[derive(Debug)]
pub struct RenderedPage {
    pub html: String,
    pub metadata: PageMetadata,
}

/// The rendering seam between page sources and the extraction pipeline.
pub trait PageRenderer {
    fn render(&self, body: &str, metadata: &PageMetadata) -> Result<RenderedPage, RenderError>;
}

/// Default renderer: macro expansion followed by markdown rendering.
///
/// Headings come out plain (`<h2>Syntax</h2>`, no ids or anchors) so the
/// section partitioner can key sections on their text content.
pub struct MarkdownRenderer {
    options: Options,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS;
        Self { options }
    }
}

impl PageRenderer for MarkdownRenderer {
    fn render(&self, body: &str, metadata: &PageMetadata) -> Result<RenderedPage, RenderError> {
        let expanded = expand_macros(body);

        let parser = Parser::new_ext(&expanded, self.options);
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        Ok(RenderedPage {
            html: html_output,
            metadata: metadata.clone(),
        })
    }
}
