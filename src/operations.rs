/// Popup list operations: sorting, filtering, form validation, favicons

use url::Url;

use crate::config::{DEFAULT_FAVICON, FAVICON_SERVICE};
use crate::error::{Result, ShortcutError};
use crate::shortcut::{ShortcutRecord, Shortcuts};

/// A shortcut row as the popup lists it
#[derive(Debug, Clone, PartialEq)]
pub struct ShortcutEntry {
    pub name: String,
    pub url: String,
    pub favicon: String,
}

/// Popup form state: a fresh shortcut, or an edit of an existing name
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Creating,
    Editing(String),
}

/// Sort shortcuts by name for display (case-insensitive, then exact)
pub fn sorted_entries(shortcuts: &Shortcuts) -> Vec<ShortcutEntry> {
    let mut entries: Vec<ShortcutEntry> = shortcuts
        .iter()
        .map(|(name, record)| ShortcutEntry {
            name: name.clone(),
            url: record.url.clone(),
            favicon: favicon_for(record),
        })
        .collect();

    entries.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });

    entries
}

/// Keep entries whose name or URL contains the search term
pub fn filter_entries(entries: &[ShortcutEntry], term: &str) -> Vec<ShortcutEntry> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return entries.to_vec();
    }

    entries
        .iter()
        .filter(|entry| {
            entry.name.to_lowercase().contains(&term) || entry.url.to_lowercase().contains(&term)
        })
        .cloned()
        .collect()
}

/// Validate the popup form, returning the trimmed name and URL
pub fn validate_form(name: &str, url: &str) -> Result<(String, String)> {
    let name = name.trim();
    let url = url.trim();

    if name.is_empty() {
        return Err(ShortcutError::EmptyName);
    }
    if url.is_empty() || Url::parse(url).is_err() {
        return Err(ShortcutError::InvalidUrl(url.to_string()));
    }

    Ok((name.to_string(), url.to_string()))
}

/// Icon for a shortcut: cached favicon, then the favicon service, then a default
pub fn favicon_for(record: &ShortcutRecord) -> String {
    if let Some(favicon) = &record.favicon {
        return favicon.clone();
    }

    Url::parse(&record.url)
        .ok()
        .and_then(|url| url.host_str().map(|host| FAVICON_SERVICE.replace("{host}", host)))
        .unwrap_or_else(|| DEFAULT_FAVICON.to_string())
}
