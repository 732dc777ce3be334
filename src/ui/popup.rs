/// Popup UI for Omni Shortcuts

use std::cell::Cell;
use std::rc::Rc;

use yew::platform::time::sleep;
use yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use patternfly_yew::prelude::*;
use crate::bridge::{self, ChromeStore};
use crate::config::{BACKUP_FILE_PREFIX, DARK_MODE_KEY, FLASH_TIMEOUT};
use crate::error::ShortcutError;
use crate::operations::{filter_entries, sorted_entries, validate_form, FormMode};
use crate::storage::{edit_stored, parse_import, EditFailure, ShortcutBook, ShortcutStore};
use crate::theme::{apply_dark_mode, effective_dark_mode, local_preference};
use crate::ui::shortcut_list::ShortcutList;

#[derive(Clone, PartialEq)]
enum AppState {
    Loading,
    Idle,
    Error(String),
}

#[derive(Clone, PartialEq)]
enum PopupView {
    Main,
    Settings,
}

/// Result message under the form or the settings buttons
#[derive(Clone, PartialEq)]
struct Flash {
    text: String,
    success: bool,
}

impl Flash {
    fn success(text: impl Into<String>) -> Option<Flash> {
        Some(Flash { text: text.into(), success: true })
    }

    fn error(text: impl Into<String>) -> Option<Flash> {
        Some(Flash { text: text.into(), success: false })
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let state = use_state(|| AppState::Loading);
    let book = use_state(ShortcutBook::new);
    let view = use_state(|| PopupView::Main);
    let form_mode = use_state(FormMode::default);
    let name_value = use_state(String::new);
    let url_value = use_state(String::new);
    let search_query = use_state(String::new);
    let flash = use_state(|| None::<Flash>);
    let dark_mode = use_state(|| false);
    let import_ref = use_node_ref();

    // Load theme, active tab URL and shortcuts on mount
    {
        let state = state.clone();
        let book = book.clone();
        let url_value = url_value.clone();
        let dark_mode = dark_mode.clone();

        use_effect_with((), move |_| {
            spawn_local(async move {
                let local = local_preference();
                let enabled = effective_dark_mode(bridge::sync_flag(DARK_MODE_KEY).await, local.as_deref());
                if enabled {
                    apply_dark_mode(true);
                }
                dark_mode.set(enabled);

                match bridge::active_tab_url().await {
                    Ok(Some(url)) => url_value.set(url),
                    Ok(None) => {}
                    Err(e) => log::warn!("No active tab URL: {}", e),
                }

                match ChromeStore.read().await {
                    Ok(shortcuts) => {
                        book.set(ShortcutBook::from(shortcuts));
                        state.set(AppState::Idle);
                    }
                    Err(e) => {
                        log::error!("Storage error: {}", e);
                        state.set(AppState::Error("Error loading shortcuts".to_string()));
                    }
                }
            });
            || ()
        });
    }

    // Hide each result message after a few seconds
    {
        let flash = flash.clone();
        use_effect_with((*flash).clone(), move |message| {
            let cancelled = Rc::new(Cell::new(false));
            if message.is_some() {
                let cancelled = cancelled.clone();
                spawn_local(async move {
                    sleep(FLASH_TIMEOUT).await;
                    if !cancelled.get() {
                        flash.set(None);
                    }
                });
            }
            move || cancelled.set(true)
        });
    }

    // Form input handlers
    let on_name_input = {
        let name_value = name_value.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                name_value.set(input.value());
            }
        })
    };

    let on_url_input = {
        let url_value = url_value.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                url_value.set(input.value());
            }
        })
    };

    let on_search_input = {
        let search_query = search_query.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                search_query.set(input.value());
            }
        })
    };

    // Save or update, depending on the form mode
    let on_save = {
        let book = book.clone();
        let form_mode = form_mode.clone();
        let name_value = name_value.clone();
        let url_value = url_value.clone();
        let flash = flash.clone();

        Callback::from(move |_: ()| {
            let (name, url) = match validate_form(&name_value, &url_value) {
                Ok(fields) => fields,
                Err(e) => {
                    flash.set(Flash::error(e.to_string()));
                    return;
                }
            };

            let editing = matches!(*form_mode, FormMode::Editing(_));
            let original = match &*form_mode {
                FormMode::Editing(original) => Some(original.clone()),
                FormMode::Creating => None,
            };

            flash.set(Flash::success(if editing { "Updating shortcut..." } else { "Saving shortcut..." }));

            let book = book.clone();
            let form_mode = form_mode.clone();
            let name_value = name_value.clone();
            let url_value = url_value.clone();
            let flash = flash.clone();
            spawn_local(async move {
                let result = edit_stored(&ChromeStore, |stored| match &original {
                    Some(original) => stored.replace(original, &name, &url),
                    None => stored.save(&name, &url),
                })
                .await;

                let verb = if editing { "update" } else { "save" };
                match result {
                    Ok(saved) => {
                        book.set(saved);
                        name_value.set(String::new());
                        if editing {
                            url_value.set(String::new());
                            flash.set(Flash::success(format!("Shortcut \"{}\" updated successfully!", name)));
                        } else {
                            flash.set(Flash::success(format!("Shortcut \"{}\" saved successfully!", name)));
                        }
                        form_mode.set(FormMode::Creating);
                    }
                    Err(EditFailure::Read(e)) => {
                        log::error!("Storage error: {}", e);
                        flash.set(Flash::error(format!("Failed to {} shortcut. Storage error occurred.", verb)));
                    }
                    Err(EditFailure::Edit(e)) => flash.set(Flash::error(e.to_string())),
                    Err(EditFailure::Write(e)) => {
                        log::error!("Storage error: {}", e);
                        flash.set(Flash::error(format!(
                            "Failed to {} shortcut. Storage quota may be exceeded.",
                            verb
                        )));
                    }
                }
            });
        })
    };

    let on_name_keypress = {
        let on_save = on_save.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                on_save.emit(());
            }
        })
    };

    // Start editing an existing shortcut
    let on_edit = {
        let form_mode = form_mode.clone();
        let name_value = name_value.clone();
        let url_value = url_value.clone();

        Callback::from(move |(name, url): (String, String)| {
            name_value.set(name.clone());
            url_value.set(url);
            form_mode.set(FormMode::Editing(name));
        })
    };

    // Delete a shortcut from the list
    let on_delete = {
        let book = book.clone();
        let flash = flash.clone();

        Callback::from(move |name: String| {
            if !bridge::confirm_action(&format!("Are you sure you want to delete the shortcut \"{}\"?", name)) {
                return;
            }

            let book = book.clone();
            let flash = flash.clone();
            spawn_local(async move {
                match edit_stored(&ChromeStore, |stored| stored.delete(&name).map(|_| ())).await {
                    Ok(remaining) => {
                        book.set(remaining);
                        flash.set(Flash::success(format!("Shortcut \"{}\" deleted", name)));
                    }
                    Err(EditFailure::Read(e)) => {
                        log::error!("Storage error: {}", e);
                        flash.set(Flash::error("Failed to delete shortcut. Storage error occurred."));
                    }
                    Err(EditFailure::Edit(e)) => flash.set(Flash::error(e.to_string())),
                    Err(EditFailure::Write(e)) => {
                        log::error!("Storage error: {}", e);
                        flash.set(Flash::error("Failed to delete shortcut."));
                    }
                }
            });
        })
    };

    // View switching
    let on_show_settings = {
        let view = view.clone();
        let flash = flash.clone();
        Callback::from(move |_| {
            flash.set(None);
            view.set(PopupView::Settings);
        })
    };

    let on_back = {
        let view = view.clone();
        let flash = flash.clone();
        Callback::from(move |_| {
            flash.set(None);
            view.set(PopupView::Main);
        })
    };

    // Theme toggle
    let on_theme_change = {
        let dark_mode = dark_mode.clone();
        Callback::from(move |e: Event| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                let enabled = input.checked();
                apply_dark_mode(enabled);
                dark_mode.set(enabled);

                spawn_local(async move {
                    if let Err(e) = bridge::set_sync_flag(DARK_MODE_KEY, enabled).await {
                        log::warn!("{}", e);
                    }
                });
            }
        })
    };

    // Export all shortcuts
    let on_export = {
        let book = book.clone();
        let flash = flash.clone();

        Callback::from(move |_| {
            match book.export_json() {
                Ok(json) => {
                    let filename = format!("{}{}.json", BACKUP_FILE_PREFIX, iso_date(&js_sys::Date::new_0()));
                    bridge::download_text(&json, &filename);
                    flash.set(Flash::success(format!("Exported {} shortcuts", book.len())));
                }
                Err(e) => {
                    log::error!("Export failed: {}", e);
                    flash.set(Flash::error("Failed to export shortcuts"));
                }
            }
        })
    };

    // Import opens the hidden file picker
    let on_import_click = {
        let import_ref = import_ref.clone();
        Callback::from(move |_| {
            if let Some(input) = import_ref.cast::<HtmlInputElement>() {
                input.click();
            }
        })
    };

    let on_import_file = {
        let book = book.clone();
        let flash = flash.clone();

        Callback::from(move |e: Event| {
            let Some(input) = e.target_dyn_into::<HtmlInputElement>() else {
                return;
            };

            let book = book.clone();
            let flash = flash.clone();
            spawn_local(async move {
                let result = import_file(&input).await;
                input.set_value("");

                match result {
                    Ok(Some((merged, count))) => {
                        book.set(merged);
                        flash.set(Flash::success(format!("Imported {} shortcuts successfully", count)));
                    }
                    Ok(None) => {}
                    Err(e @ ShortcutError::InvalidImport(_)) => {
                        log::warn!("Import rejected: {:?}", e);
                        flash.set(Flash::error(e.to_string()));
                    }
                    Err(e) => {
                        log::error!("Storage error: {}", e);
                        flash.set(Flash::error("Failed to import shortcuts. Storage quota may be exceeded."));
                    }
                }
            });
        })
    };

    // Clear everything
    let on_clear_all = {
        let book = book.clone();
        let flash = flash.clone();

        Callback::from(move |_| {
            if book.is_empty() {
                flash.set(Flash::success("No shortcuts to clear"));
                return;
            }
            if !bridge::confirm_action("Are you sure you want to delete ALL shortcuts? This cannot be undone!") {
                return;
            }

            let mut new_book = (*book).clone();
            new_book.clear();

            let book = book.clone();
            let flash = flash.clone();
            spawn_local(async move {
                match ChromeStore.write(new_book.shortcuts()).await {
                    Ok(()) => {
                        book.set(new_book);
                        flash.set(Flash::success("All shortcuts cleared"));
                    }
                    Err(e) => {
                        log::error!("Storage error: {}", e);
                        flash.set(Flash::error("Failed to clear shortcuts"));
                    }
                }
            });
        })
    };

    let entries = filter_entries(&sorted_entries(book.shortcuts()), &search_query);
    let is_editing = matches!(*form_mode, FormMode::Editing(_));

    let flash_html = match &*flash {
        Some(message) => html! {
            <Alert
                r#type={if message.success { AlertType::Success } else { AlertType::Danger }}
                title={message.text.clone()}
                inline={true}
            >
            </Alert>
        },
        None => html! {},
    };

    html! {
        <div class="padding-20">
            {match &*view {
                PopupView::Main => html! {
                    <div id="main-view">
                        <div class="popup-header">
                            <h1 class="popup-title">{"Omni Shortcuts"}</h1>
                            <Button onclick={on_show_settings} variant={ButtonVariant::Secondary}>
                                {"⚙️"}
                            </Button>
                        </div>

                        <div class="flex-column-gap">
                            <input
                                type="text"
                                placeholder="Shortcut name"
                                value={(*name_value).clone()}
                                oninput={on_name_input}
                                onkeypress={on_name_keypress}
                                class="form-input"
                            />
                            <input
                                type="text"
                                placeholder="https://example.com"
                                value={(*url_value).clone()}
                                oninput={on_url_input}
                                class="form-input"
                            />
                            <Button onclick={on_save.reform(|_| ())} variant={ButtonVariant::Primary} block={true}>
                                {if is_editing { "Update Shortcut" } else { "Save Shortcut" }}
                            </Button>
                            {flash_html}
                        </div>

                        {match &*state {
                            AppState::Loading => html! {
                                <div class="loading-text-center">
                                    <Spinner />
                                    <p class="loading-text">{"Loading shortcuts..."}</p>
                                </div>
                            },
                            AppState::Error(err) => html! {
                                <p class="empty-state">{err.clone()}</p>
                            },
                            AppState::Idle => html! {
                                <>
                                    <div class="search-container">
                                        <input
                                            type="text"
                                            placeholder="Search shortcuts..."
                                            value={(*search_query).clone()}
                                            oninput={on_search_input}
                                            class="search-input"
                                        />
                                    </div>
                                    <ShortcutList
                                        entries={entries}
                                        filtered={!search_query.trim().is_empty()}
                                        on_edit={on_edit}
                                        on_delete={on_delete}
                                    />
                                </>
                            },
                        }}
                    </div>
                },
                PopupView::Settings => html! {
                    <div id="settings-view">
                        <div class="popup-header">
                            <Button onclick={on_back} variant={ButtonVariant::Secondary}>
                                {"← Back"}
                            </Button>
                            <h1 class="popup-title">{"Settings"}</h1>
                        </div>

                        <div class="flex-column-gap">
                            <label class="theme-toggle">
                                <input
                                    type="checkbox"
                                    checked={*dark_mode}
                                    onchange={on_theme_change}
                                />
                                {" Dark mode"}
                            </label>
                            <Button onclick={on_export} variant={ButtonVariant::Secondary} block={true}>
                                {"📥 Export Shortcuts"}
                            </Button>
                            <Button onclick={on_import_click} variant={ButtonVariant::Secondary} block={true}>
                                {"📤 Import Shortcuts"}
                            </Button>
                            <input
                                type="file"
                                accept="application/json,.json"
                                class="hidden"
                                ref={import_ref}
                                onchange={on_import_file}
                            />
                            <Button onclick={on_clear_all} variant={ButtonVariant::Danger} block={true}>
                                {"🗑️ Clear All Shortcuts"}
                            </Button>
                            {flash_html}
                        </div>
                    </div>
                },
            }}

            <p class="footer-popup">
                {format!("Omni Shortcuts v0.1.0 • © {}", js_sys::Date::new_0().get_full_year())}
            </p>
        </div>
    }
}

// Helper functions

/// Merge a picked backup file into the stored shortcuts
///
/// Re-reads storage first so the merge lands on the latest data.
async fn import_file(input: &HtmlInputElement) -> Result<Option<(ShortcutBook, usize)>, ShortcutError> {
    let Some(text) = bridge::read_selected_file(input).await? else {
        return Ok(None);
    };
    let imported = parse_import(&text)?;

    let mut merged = ShortcutBook::from(ChromeStore.read().await?);
    let count = merged.merge(imported);
    ChromeStore.write(merged.shortcuts()).await?;

    Ok(Some((merged, count)))
}

/// UTC calendar date, e.g. "2024-10-28"
fn iso_date(date: &js_sys::Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.get_utc_full_year(),
        date.get_utc_month() + 1,
        date.get_utc_date()
    )
}
