//! Formal value-syntax lookup for CSS properties.
//!
//! The grammar for a property comes from an external specification-derived
//! data set, not from the page content. The lookup distinguishes "this
//! property has no formal syntax" (expected for non-standard and some
//! shorthand properties; the field is simply omitted) from real failures,
//! which abort the page.

use std::collections::{HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(thiserror::Error, Debug)]
pub enum SyntaxError {
    /// Expected outcome for properties without a formal grammar.
    #[error("could not find {0} in the syntax data")]
    NotFound(String),

    #[error("failed to read syntax data {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse syntax data {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// The grammar lookup seam.
pub trait SyntaxSource {
    /// Resolve the formal syntax for a property, expanding referenced type
    /// definitions except those named in `types_to_skip`.
    fn property_syntax(&self, title: &str, types_to_skip: &[&str])
    -> Result<String, SyntaxError>;
}

/// Syntax source used when no syntax data is configured: every lookup is
/// `NotFound`, so the formal-syntax field is omitted corpus-wide.
pub struct NoSyntaxData;

impl SyntaxSource for NoSyntaxData {
    fn property_syntax(&self, title: &str, _: &[&str]) -> Result<String, SyntaxError> {
        Err(SyntaxError::NotFound(title.to_string()))
    }
}

/// Value-syntax definitions loaded from a JSON file:
///
/// ```json
/// {
///   "properties": { "color": "<color>" },
///   "types": { "color": "<named-color> | <hex-color> | ..." }
/// }
/// ```
///
/// Type names are stored bare; syntax strings reference them in angle
/// brackets (`<color>`).
#[derive(Debug, Default, Deserialize)]
pub struct SyntaxTable {
    #[serde(default)]
    properties: HashMap<String, String>,
    #[serde(default)]
    types: HashMap<String, String>,
}

impl SyntaxTable {
    pub fn from_path(path: &Path) -> Result<Self, SyntaxError> {
        let content = std::fs::read_to_string(path).map_err(|e| SyntaxError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(|e| SyntaxError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

impl SyntaxSource for SyntaxTable {
    fn property_syntax(
        &self,
        title: &str,
        types_to_skip: &[&str],
    ) -> Result<String, SyntaxError> {
        let syntax = self
            .properties
            .get(title)
            .ok_or_else(|| SyntaxError::NotFound(title.to_string()))?;

        let mut out = syntax.clone();
        let mut expanded: HashSet<String> = HashSet::new();
        let mut queue: VecDeque<String> = type_references(syntax).into();

        // Breadth-first in order of first reference; each type at most once
        while let Some(reference) = queue.pop_front() {
            if types_to_skip.contains(&reference.as_str()) {
                continue;
            }
            let name = reference.trim_matches(['<', '>']);
            if !expanded.insert(name.to_string()) {
                continue;
            }
            if let Some(definition) = self.types.get(name) {
                out.push_str(&format!("\n{} = {}", reference, definition));
                queue.extend(type_references(definition));
            }
        }

        Ok(out)
    }
}

/// Collect `<type>` references in a syntax string, in order.
///
/// Quoted references like `<'border-width'>` point at other properties'
/// grammars, not type definitions, and are not collected.
fn type_references(syntax: &str) -> Vec<String> {
    let mut references = Vec::new();
    let mut rest = syntax;

    while let Some(start) = rest.find('<') {
        let tail = &rest[start..];
        let Some(end) = tail.find('>') else {
            break;
        };
        let reference = &tail[..=end];
        if !reference.starts_with("<'") {
            references.push(reference.to_string());
        }
        rest = &tail[end + 1..];
    }

    references
}
