/// Background service worker: omnibox suggestions and entered commands
use wasm_bindgen::prelude::*;

use crate::bridge::{self, ChromeStore};
use crate::dispatcher::{
    apply, navigation_url, read_failure_notice, resolve_entered, write_failure_notice, Disposition,
    Intent,
};
use crate::error::ShortcutError;
use crate::storage::{ShortcutBook, ShortcutStore};
use crate::suggestions::{build_suggestions, Suggestion};

/// Suggestions for the text currently typed after the omnibox keyword
///
/// A failed storage read degrades to an empty shortcut set.
pub async fn input_changed<S: ShortcutStore>(store: &S, text: &str) -> Vec<Suggestion> {
    let shortcuts = store.read().await.unwrap_or_else(|e| {
        log::warn!("Treating shortcuts as empty: {}", e);
        Default::default()
    });
    build_suggestions(text, &shortcuts)
}

/// Carry out whatever the entered text asks for
pub async fn input_entered<S: ShortcutStore>(
    store: &S,
    text: &str,
    disposition: Disposition,
) -> Result<(), ShortcutError> {
    let mut book = match store.read().await {
        Ok(shortcuts) => ShortcutBook::from(shortcuts),
        Err(e) => {
            log::error!("Storage error: {}", e);
            if let Some(notice) = read_failure_notice(text) {
                bridge::notify(&notice);
            }
            return Err(e);
        }
    };
    let intent = resolve_entered(text, &book);
    log::debug!("Entered {:?} -> {:?}", text, intent);

    let active_url = match &intent {
        Intent::Navigate(url) => {
            return bridge::open_url(&navigation_url(url), disposition).await;
        }
        Intent::Save(_) => bridge::active_tab_url().await?,
        _ => None,
    };

    let outcome = apply(&intent, &mut book, active_url.as_deref());
    if outcome.changed {
        if let Err(e) = store.write(book.shortcuts()).await {
            log::error!("Storage error: {}", e);
            bridge::notify(&write_failure_notice(&intent));
            return Err(e);
        }
    }

    if let Some(notice) = outcome.notice {
        bridge::notify(&notice);
    }
    Ok(())
}

#[wasm_bindgen]
pub fn start_background() {
    bridge::default_suggestion(crate::config::DEFAULT_SUGGESTION);
}

#[wasm_bindgen]
pub async fn omnibox_input_changed(text: String) -> Result<JsValue, JsValue> {
    let suggestions = input_changed(&ChromeStore, &text).await;
    bridge::suggestions_to_js(&suggestions).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[wasm_bindgen]
pub async fn omnibox_input_entered(text: String, disposition: String) -> Result<(), JsValue> {
    let disposition = disposition.parse::<Disposition>().unwrap_or_else(|e| {
        log::warn!("{}", e);
        Disposition::default()
    });

    input_entered(&ChromeStore, &text, disposition).await.map_err(|e| {
        log::error!("Omnibox command failed: {}", e);
        JsValue::from_str(&e.to_string())
    })
}
