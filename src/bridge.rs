/// JS bridge to the chrome.* extension APIs
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::{NOTIFICATION_ICON, SHORTCUTS_KEY};
use crate::dispatcher::{Disposition, Notice};
use crate::error::{self, ShortcutError};
use crate::shortcut::Shortcuts;
use crate::storage::ShortcutStore;

#[wasm_bindgen(module = "/bridge.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getLocal(key: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setLocal(key: &str, value: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn getSync(key: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setSync(key: &str, value: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn getActiveTabUrl() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn updateActiveTab(url: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn createTab(url: &str, active: bool) -> Result<(), JsValue>;

    fn createNotification(icon: &str, title: &str, message: &str);

    fn setDefaultSuggestion(description: &str);

    #[wasm_bindgen(js_name = confirmAction)]
    pub fn confirm_action(message: &str) -> bool;

    #[wasm_bindgen(js_name = downloadText)]
    pub fn download_text(data: &str, filename: &str);

    #[wasm_bindgen(catch)]
    async fn readFileText(input: &web_sys::HtmlInputElement) -> Result<JsValue, JsValue>;
}

fn js_error(context: &str, e: JsValue) -> ShortcutError {
    ShortcutError::Storage(format!("{}: {:?}", context, e))
}

/// Serialize for chrome.storage: maps become plain objects, not JS `Map`s
fn to_js<T: Serialize>(value: &T) -> error::Result<JsValue> {
    Ok(value.serialize(&serde_wasm_bindgen::Serializer::json_compatible())?)
}

/// The shortcut map in chrome.storage.local
pub struct ChromeStore;

impl ShortcutStore for ChromeStore {
    async fn read(&self) -> error::Result<Shortcuts> {
        let value = getLocal(SHORTCUTS_KEY)
            .await
            .map_err(|e| js_error("Failed to get storage", e))?;

        if value.is_null() || value.is_undefined() {
            Ok(Shortcuts::new())
        } else {
            Ok(serde_wasm_bindgen::from_value(value)?)
        }
    }

    async fn write(&self, shortcuts: &Shortcuts) -> error::Result<()> {
        setLocal(SHORTCUTS_KEY, to_js(shortcuts)?)
            .await
            .map_err(|e| js_error("Failed to save storage", e))
    }
}

pub async fn sync_flag(key: &str) -> Option<bool> {
    match getSync(key).await {
        Ok(value) => value.as_bool(),
        Err(e) => {
            log::warn!("Failed to read sync setting {}: {:?}", key, e);
            None
        }
    }
}

pub async fn set_sync_flag(key: &str, value: bool) -> error::Result<()> {
    setSync(key, JsValue::from_bool(value))
        .await
        .map_err(|e| js_error("Failed to save setting", e))
}

/// URL of the active tab in the current window, if there is one
pub async fn active_tab_url() -> error::Result<Option<String>> {
    let value = getActiveTabUrl()
        .await
        .map_err(|e| js_error("Failed to query tabs", e))?;
    Ok(value.as_string())
}

pub async fn open_url(url: &str, disposition: Disposition) -> error::Result<()> {
    let result = match disposition {
        Disposition::CurrentTab => updateActiveTab(url).await,
        Disposition::NewForegroundTab => createTab(url, true).await,
        Disposition::NewBackgroundTab => createTab(url, false).await,
    };
    result.map_err(|e| js_error("Failed to open tab", e))
}

pub fn notify(notice: &Notice) {
    createNotification(NOTIFICATION_ICON, &notice.title, &notice.message);
}

pub fn default_suggestion(description: &str) {
    setDefaultSuggestion(description);
}

pub fn suggestions_to_js<T: Serialize>(suggestions: &T) -> error::Result<JsValue> {
    to_js(suggestions)
}

/// Text of the file picked in an `<input type="file">`, if any
pub async fn read_selected_file(input: &web_sys::HtmlInputElement) -> error::Result<Option<String>> {
    let value = readFileText(input)
        .await
        .map_err(|e| ShortcutError::InvalidImport(format!("{:?}", e)))?;
    Ok(value.as_string())
}
