//! Build orchestration: pages in, data bundle out.

use std::path::{Path, PathBuf};

use crate::build::document::{DocumentError, parse_front_matter};
use crate::build::extract::{self, ExtractError};
use crate::build::markdown::{MarkdownRenderer, PageRenderer, RenderError};
use crate::build::package::{DATA_FILE, DataPackage, MANIFEST_FILE, Manifest, PageRecord};
use crate::build::sections::split_by_section;
use crate::build::source::{SourceError, resolve_root};
use crate::build::syntax::{NoSyntaxData, SyntaxSource};

/// Files copied verbatim into the bundle when present next to the root.
const VERBATIM_FILES: [&str; 2] = ["LICENSE", "README.md"];

/// A batch-fatal failure: bad input root, or the bundle cannot be written.
#[derive(thiserror::Error, Debug)]
pub enum BuildError {
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    #[error("failed to prepare output directory {path}: {source}")]
    PrepareOutput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize data package: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A failure while processing a single page. Contained at the page
/// boundary: the page is skipped and the batch continues.
#[derive(thiserror::Error, Debug)]
pub enum PageError {
    #[error("failed to read page: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Extract(#[from] ExtractError),
}

pub struct BuildResult {
    pub output_dir: PathBuf,
    /// Number of in-scope pages in the bundle
    pub pages: usize,
    /// Pages that errored and were left out
    pub skipped: Vec<PathBuf>,
}

pub struct Builder {
    root: PathBuf,
    output_dir: PathBuf,
    /// Directory holding verbatim bundle files (license, readme)
    base_path: PathBuf,
    renderer: Box<dyn PageRenderer>,
    syntaxes: Box<dyn SyntaxSource>,
}

impl Builder {
    pub fn new(root: PathBuf, output_dir: PathBuf, base_path: PathBuf) -> Self {
        Self {
            root,
            output_dir,
            base_path,
            renderer: Box::new(MarkdownRenderer::default()),
            syntaxes: Box::new(NoSyntaxData),
        }
    }

    /// Use a formal-syntax source instead of the default (which answers
    /// "not found" for everything).
    pub fn with_syntaxes(mut self, syntaxes: Box<dyn SyntaxSource>) -> Self {
        self.syntaxes = syntaxes;
        self
    }

    #[cfg(test)]
    pub fn with_renderer(mut self, renderer: Box<dyn PageRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn build(&self) -> Result<BuildResult, BuildError> {
        // Build pipeline:
        // 1. Enumerate page sources
        // 2. Per page: split front matter, render, partition, extract
        // 3. Accumulate records (last writer wins, enumeration order)
        // 4. Write manifest + data, copy verbatim files

        let files = resolve_root(&self.root)?;
        println!("Found {} page(s) under {}", files.len(), self.root.display());

        let mut package = DataPackage::default();
        let mut skipped = Vec::new();

        for file in &files {
            match self.build_page(file) {
                Ok(Some((title, record))) => {
                    package.insert_property(title, record);
                }
                // Out of scope; not an error
                Ok(None) => {}
                Err(e) => {
                    eprintln!("warning: skipping {}: {}", file.display(), e);
                    skipped.push(file.clone());
                }
            }
        }

        self.prepare_output_dir()?;
        self.write_json(MANIFEST_FILE, &Manifest::from_crate())?;
        self.write_json(DATA_FILE, &package)?;
        self.copy_verbatim_files()?;

        let pages = package.css.properties.len();
        println!(
            "Data bundle is ready: {} propert{} in {}",
            pages,
            if pages == 1 { "y" } else { "ies" },
            self.output_dir.display()
        );

        Ok(BuildResult {
            output_dir: self.output_dir.clone(),
            pages,
            skipped,
        })
    }

    /// Run the whole per-page pipeline for one source file.
    fn build_page(&self, path: &Path) -> Result<Option<(String, PageRecord)>, PageError> {
        let raw = std::fs::read_to_string(path)?;
        let page = parse_front_matter(&raw)?;

        // Filter before rendering; out-of-scope pages cost nothing
        if !extract::in_scope(&page.metadata) {
            return Ok(None);
        }

        let rendered = self.renderer.render(&page.body, &page.metadata)?;
        let sections = split_by_section(&rendered.html);
        let record =
            extract::build_page_record(&rendered.metadata, &sections, self.syntaxes.as_ref())?;

        Ok(record.map(|record| (rendered.metadata.title.clone(), record)))
    }

    /// Remove any previous bundle and create a fresh output directory.
    fn prepare_output_dir(&self) -> Result<(), BuildError> {
        let wrap = |source| BuildError::PrepareOutput {
            path: self.output_dir.clone(),
            source,
        };

        if self.output_dir.exists() {
            std::fs::remove_dir_all(&self.output_dir).map_err(wrap)?;
        }
        std::fs::create_dir_all(&self.output_dir).map_err(wrap)
    }

    fn write_json<T: serde::Serialize>(&self, name: &str, value: &T) -> Result<(), BuildError> {
        let path = self.output_dir.join(name);
        let json = serde_json::to_string(value)?;
        std::fs::write(&path, json).map_err(|source| BuildError::Write { path, source })
    }

    fn copy_verbatim_files(&self) -> Result<(), BuildError> {
        for name in VERBATIM_FILES {
            let src = self.base_path.join(name);
            if !src.is_file() {
                eprintln!("warning: verbatim file {} not found, skipping", src.display());
                continue;
            }
            let dest = self.output_dir.join(name);
            std::fs::copy(&src, &dest)
                .map(|_| ())
                .map_err(|source| BuildError::Write { path: dest, source })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::document::PageMetadata;
    use crate::build::markdown::RenderedPage;

    const COLOR_PAGE: &str = r#"---
title: color
slug: Web/CSS/color
page-type: css-property
browser-compat: css.properties.color
---

The **`color`** property sets the [foreground color](/en-US/docs/Web/CSS/color_value).

## Syntax

```css
color = <color>
```

## See also

- [background-color](/en-US/docs/Web/CSS/background-color)
- plain item without a link
"#;

    const GUIDE_PAGE: &str = "---\ntitle: Using color\nslug: Web/CSS/color/guide\npage-type: guide\n---\n\nA guide.\n";

    fn corpus() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let content = dir.path().join("content");

        std::fs::create_dir_all(content.join("color")).unwrap();
        std::fs::write(content.join("color/index.md"), COLOR_PAGE).unwrap();

        std::fs::create_dir_all(content.join("guide")).unwrap();
        std::fs::write(content.join("guide/index.md"), GUIDE_PAGE).unwrap();

        dir
    }

    fn builder(dir: &tempfile::TempDir) -> Builder {
        Builder::new(
            dir.path().join("content"),
            dir.path().join("build"),
            dir.path().to_path_buf(),
        )
    }

    fn read_data(dir: &tempfile::TempDir) -> serde_json::Value {
        let data = std::fs::read_to_string(dir.path().join("build").join(DATA_FILE)).unwrap();
        serde_json::from_str(&data).unwrap()
    }

    #[test]
    fn test_end_to_end_build() {
        let dir = corpus();
        let result = builder(&dir).build().unwrap();

        assert_eq!(result.pages, 1);
        assert!(result.skipped.is_empty());

        let data = read_data(&dir);
        let record = &data["css"]["properties"]["color"];
        assert_eq!(
            record["mdn-url"],
            "https://developer.mozilla.org/en-US/docs/Web/CSS/color"
        );
        assert_eq!(record["browser-compatibility"], "css.properties.color");
        assert_eq!(record["status"], serde_json::json!([]));
        assert_eq!(record["syntax-example"], "color = &lt;color&gt;");
        assert!(
            record["summary"]
                .as_str()
                .unwrap()
                .contains("https://developer.mozilla.org/en-US/docs/Web/CSS/color_value")
        );
        assert_eq!(record["see-also"].as_array().unwrap().len(), 1);
        assert!(record.get("formal-syntax").is_none());

        // Out-of-scope guide page gains no entry
        assert!(data["css"]["properties"].get("Using color").is_none());
    }

    #[test]
    fn test_manifest_written() {
        let dir = corpus();
        builder(&dir).build().unwrap();

        let manifest: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(dir.path().join("build").join(MANIFEST_FILE)).unwrap(),
        )
        .unwrap();
        assert_eq!(manifest["main"], "data.json");
        assert_eq!(manifest["name"], "cssdata");
    }

    #[test]
    fn test_malformed_page_skipped_without_aborting() {
        let dir = corpus();
        let content = dir.path().join("content");
        std::fs::create_dir_all(content.join("broken")).unwrap();
        std::fs::write(content.join("broken/index.md"), "no front matter at all\n").unwrap();

        let result = builder(&dir).build().unwrap();
        assert_eq!(result.pages, 1);
        assert_eq!(result.skipped, vec![content.join("broken/index.md")]);
    }

    #[test]
    fn test_render_failure_contained_at_page_boundary() {
        struct FailingRenderer;
        impl PageRenderer for FailingRenderer {
            fn render(
                &self,
                _: &str,
                _: &PageMetadata,
            ) -> Result<RenderedPage, RenderError> {
                Err(RenderError("macro service unavailable".to_string()))
            }
        }

        let dir = corpus();
        let result = builder(&dir)
            .with_renderer(Box::new(FailingRenderer))
            .build()
            .unwrap();

        // Only the in-scope page reaches the renderer; it fails and is skipped
        assert_eq!(result.pages, 0);
        assert_eq!(result.skipped.len(), 1);
    }

    #[test]
    fn test_verbatim_files_copied_when_present() {
        let dir = corpus();
        std::fs::write(dir.path().join("LICENSE"), "MIT\n").unwrap();
        std::fs::write(dir.path().join("README.md"), "# readme\n").unwrap();

        builder(&dir).build().unwrap();

        assert!(dir.path().join("build/LICENSE").is_file());
        assert!(dir.path().join("build/README.md").is_file());
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let builder = Builder::new(
            dir.path().join("nope"),
            dir.path().join("build"),
            dir.path().to_path_buf(),
        );
        assert!(matches!(builder.build(), Err(BuildError::Source(_))));
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let dir = corpus();

        builder(&dir).build().unwrap();
        let first = std::fs::read(dir.path().join("build").join(DATA_FILE)).unwrap();

        builder(&dir).build().unwrap();
        let second = std::fs::read(dir.path().join("build").join(DATA_FILE)).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_stale_output_removed() {
        let dir = corpus();
        let stale = dir.path().join("build/stale.json");
        std::fs::create_dir_all(dir.path().join("build")).unwrap();
        std::fs::write(&stale, "{}").unwrap();

        builder(&dir).build().unwrap();
        assert!(!stale.exists());
    }
}
