/// Omni Shortcuts - Chrome Extension for named URL shortcuts in the address bar
/// Built with Rust + WASM + Yew

mod action;
mod background;
mod bridge;
mod command;
mod config;
mod dispatcher;
mod error;
mod matcher;
mod operations;
mod shortcut;
mod storage;
mod suggestions;
mod theme;
pub mod ui;

use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}

// Apply the saved theme before the popup renders, to avoid a flash
#[wasm_bindgen]
pub fn apply_saved_theme() {
    if theme::effective_dark_mode(None, theme::local_preference().as_deref()) {
        theme::apply_dark_mode(true);
    }
}
