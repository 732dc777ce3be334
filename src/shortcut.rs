/// Data structures for Omni Shortcuts
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Every shortcut, keyed by its case-preserved name, in store (insertion) order
pub type Shortcuts = IndexMap<String, ShortcutRecord>;

/// What a shortcut name points at
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "StoredRecord")]
pub struct ShortcutRecord {
    pub url: String,
    /// Cached favicon data URI
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
}

impl ShortcutRecord {
    pub fn new(url: impl Into<String>) -> ShortcutRecord {
        ShortcutRecord {
            url: url.into(),
            favicon: None,
        }
    }
}

/// On-disk shapes: early versions stored the bare URL string
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredRecord {
    Legacy(String),
    Current {
        url: String,
        #[serde(default)]
        favicon: Option<String>,
    },
}

impl From<StoredRecord> for ShortcutRecord {
    fn from(stored: StoredRecord) -> Self {
        match stored {
            StoredRecord::Legacy(url) => ShortcutRecord::new(url),
            StoredRecord::Current { url, favicon } => ShortcutRecord { url, favicon },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_serialization_omits_missing_favicon() {
        let json = serde_json::to_string(&ShortcutRecord::new("https://github.com")).unwrap();
        assert_eq!(json, r#"{"url":"https://github.com"}"#);
    }

    #[test]
    fn test_record_with_favicon() {
        let json = r#"{"url":"https://docs.rs","favicon":"data:image/png;base64,AAAA"}"#;
        let record: ShortcutRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.url, "https://docs.rs");
        assert_eq!(record.favicon.as_deref(), Some("data:image/png;base64,AAAA"));
    }

    #[test]
    fn test_legacy_string_format() {
        let json = r#"{"gh":"https://github.com","docs":{"url":"https://docs.rs"}}"#;
        let shortcuts: Shortcuts = serde_json::from_str(json).unwrap();

        assert_eq!(shortcuts["gh"], ShortcutRecord::new("https://github.com"));
        assert_eq!(shortcuts["docs"].url, "https://docs.rs");
    }

    #[test]
    fn test_map_keeps_store_order() {
        let json = r#"{"zeta":"https://z.io","alpha":"https://a.io","mid":"https://m.io"}"#;
        let shortcuts: Shortcuts = serde_json::from_str(json).unwrap();

        let names: Vec<&str> = shortcuts.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }
}
