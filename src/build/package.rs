//! Output data model: the data package, page records, and the manifest.

use std::collections::BTreeMap;

use serde::Serialize;

/// File name of the serialized data package inside the bundle.
pub const DATA_FILE: &str = "data.json";

/// File name of the bundle manifest.
pub const MANIFEST_FILE: &str = "package.json";

/// A `{target, text}` link record extracted from a list item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub target: String,
    pub text: String,
}

/// The output item for one in-scope page.
///
/// Optional fields are omitted from the serialized record entirely when
/// their source section (or metadata key) is absent, never emitted as null.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PageRecord {
    pub mdn_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub browser_compatibility: Option<String>,
    pub status: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interactive_example: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub syntax_example: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constituent_properties: Option<Vec<Link>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub see_also: Option<Vec<Link>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formal_syntax: Option<String>,
}

/// The root object of the data package.
///
/// Only `properties` is populated by this pipeline; `selectors` and
/// `types` are reserved for parallel extensions. `BTreeMap` keeps key
/// order stable so repeated builds are byte-identical.
#[derive(Debug, Default, Serialize)]
pub struct DataPackage {
    pub css: CssData,
}

#[derive(Debug, Default, Serialize)]
pub struct CssData {
    pub properties: BTreeMap<String, PageRecord>,
    pub selectors: BTreeMap<String, PageRecord>,
    pub types: BTreeMap<String, PageRecord>,
}

impl DataPackage {
    /// Insert a page record, replacing any previous record for the title.
    pub fn insert_property(&mut self, title: String, record: PageRecord) {
        self.css.properties.insert(title, record);
    }
}

/// Bundle manifest written next to the data file.
#[derive(Debug, Serialize)]
pub struct Manifest {
    pub main: String,
    pub name: String,
    pub version: String,
}

impl Manifest {
    /// Build the manifest from this crate's package metadata.
    pub fn from_crate() -> Self {
        Self {
            main: DATA_FILE.to_string(),
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> PageRecord {
        PageRecord {
            mdn_url: "https://developer.mozilla.org/en-US/docs/Web/CSS/color".to_string(),
            browser_compatibility: Some("css.properties.color".to_string()),
            status: Vec::new(),
            summary: Some("A summary.".to_string()),
            interactive_example: None,
            syntax_example: Some("color = &lt;color&gt;".to_string()),
            constituent_properties: None,
            see_also: Some(vec![Link {
                target: "https://developer.mozilla.org/en-US/docs/Web/CSS/background-color"
                    .to_string(),
                text: "background-color".to_string(),
            }]),
            formal_syntax: None,
        }
    }

    #[test]
    fn test_record_field_names_are_kebab_case() {
        let json = serde_json::to_value(record()).unwrap();
        let object = json.as_object().unwrap();
        assert!(object.contains_key("mdn-url"));
        assert!(object.contains_key("browser-compatibility"));
        assert!(object.contains_key("syntax-example"));
        assert!(object.contains_key("see-also"));
    }

    #[test]
    fn test_absent_fields_are_omitted_not_null() {
        let json = serde_json::to_value(record()).unwrap();
        let object = json.as_object().unwrap();
        assert!(!object.contains_key("interactive-example"));
        assert!(!object.contains_key("constituent-properties"));
        assert!(!object.contains_key("formal-syntax"));
    }

    #[test]
    fn test_empty_list_is_present() {
        let mut r = record();
        r.see_also = Some(Vec::new());
        let json = serde_json::to_value(r).unwrap();
        assert_eq!(json["see-also"], serde_json::json!([]));
    }

    #[test]
    fn test_package_shape() {
        let mut package = DataPackage::default();
        package.insert_property("color".to_string(), record());

        let json = serde_json::to_value(&package).unwrap();
        assert!(json["css"]["properties"]["color"]["mdn-url"].is_string());
        assert_eq!(json["css"]["selectors"], serde_json::json!({}));
        assert_eq!(json["css"]["types"], serde_json::json!({}));
    }

    #[test]
    fn test_insert_is_last_writer_wins() {
        let mut package = DataPackage::default();
        package.insert_property("color".to_string(), record());
        let mut replacement = record();
        replacement.summary = Some("Replaced.".to_string());
        package.insert_property("color".to_string(), replacement);

        assert_eq!(package.css.properties.len(), 1);
        assert_eq!(
            package.css.properties["color"].summary.as_deref(),
            Some("Replaced.")
        );
    }

    #[test]
    fn test_serialization_is_deterministic() {
        let mut package = DataPackage::default();
        package.insert_property("z-index".to_string(), record());
        package.insert_property("color".to_string(), record());

        let first = serde_json::to_string(&package).unwrap();
        let second = serde_json::to_string(&package).unwrap();
        assert_eq!(first, second);
        // BTreeMap sorts keys
        assert!(first.find("\"color\"").unwrap() < first.find("\"z-index\"").unwrap());
    }

    #[test]
    fn test_manifest_from_crate() {
        let manifest = Manifest::from_crate();
        assert_eq!(manifest.main, DATA_FILE);
        assert_eq!(manifest.name, "cssdata");
        assert!(!manifest.version.is_empty());
    }
}
