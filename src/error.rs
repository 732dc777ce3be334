/// Error types for Omni Shortcuts
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShortcutError {
    /// chrome.storage (or another JS bridge call) failed
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Could not find shortcut \"{0}\"")]
    NotFound(String),

    #[error("A shortcut named \"{0}\" already exists. Choose a different name.")]
    NameExists(String),

    #[error("Please enter a shortcut name")]
    EmptyName,

    #[error("Please enter a valid URL")]
    InvalidUrl(String),

    /// Browser-internal pages can't be bookmarked
    #[error("Cannot save Chrome internal pages as shortcuts.")]
    InternalPage(String),

    #[error("Invalid file format. Please select a valid JSON file.")]
    InvalidImport(String),
}

pub type Result<T> = std::result::Result<T, ShortcutError>;

impl From<serde_json::Error> for ShortcutError {
    fn from(err: serde_json::Error) -> Self {
        ShortcutError::Serialization(err.to_string())
    }
}

impl From<serde_wasm_bindgen::Error> for ShortcutError {
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        ShortcutError::Serialization(err.to_string())
    }
}
