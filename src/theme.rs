/// Dark mode preference
///
/// The synced setting is authoritative, with a localStorage mirror so the
/// popup can apply the theme before chrome.storage answers.
use crate::config::{DARK_MODE_CLASS, DARK_MODE_KEY};

/// Combine the synced flag with the local mirror
pub fn effective_dark_mode(synced: Option<bool>, local_mirror: Option<&str>) -> bool {
    synced.unwrap_or(false) || local_mirror == Some("true")
}

/// Read the local mirror
pub fn local_preference() -> Option<String> {
    web_sys::window()?
        .local_storage()
        .ok()??
        .get_item(DARK_MODE_KEY)
        .ok()?
}

/// Update the local mirror and toggle the class on the document element
pub fn apply_dark_mode(enabled: bool) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };

    if let Some(root) = document.document_element() {
        let classes = root.class_list();
        let result = if enabled {
            classes.add_1(DARK_MODE_CLASS)
        } else {
            classes.remove_1(DARK_MODE_CLASS)
        };
        if let Err(e) = result {
            log::warn!("Failed to toggle theme class: {:?}", e);
        }
    }

    if let Some(Ok(Some(storage))) = web_sys::window().map(|w| w.local_storage()) {
        let value = if enabled { "true" } else { "false" };
        if let Err(e) = storage.set_item(DARK_MODE_KEY, value) {
            log::warn!("Failed to mirror theme preference: {:?}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_dark_mode() {
        assert!(effective_dark_mode(Some(true), None));
        assert!(effective_dark_mode(None, Some("true")));
        assert!(effective_dark_mode(Some(false), Some("true")));
        assert!(!effective_dark_mode(Some(false), Some("false")));
        assert!(!effective_dark_mode(None, None));
    }
}
