/// Shortcut list shown in the popup

use yew::prelude::*;
use patternfly_yew::prelude::*;
use crate::operations::ShortcutEntry;

#[derive(Properties, PartialEq)]
pub struct ShortcutListProps {
    pub entries: Vec<ShortcutEntry>,
    /// True when a search term is hiding some shortcuts
    pub filtered: bool,
    pub on_edit: Callback<(String, String)>,
    pub on_delete: Callback<String>,
}

#[function_component(ShortcutList)]
pub fn shortcut_list(props: &ShortcutListProps) -> Html {
    if props.entries.is_empty() {
        return html! {
            <p class="empty-state">
                {if props.filtered {
                    "No shortcuts match your search."
                } else {
                    "No shortcuts saved yet. Add one above!"
                }}
            </p>
        };
    }

    html! {
        <div class="shortcuts-list">
            {for props.entries.iter().map(|entry| html! {
                <ShortcutRow
                    key={entry.name.clone()}
                    entry={entry.clone()}
                    on_edit={props.on_edit.clone()}
                    on_delete={props.on_delete.clone()}
                />
            })}
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ShortcutRowProps {
    entry: ShortcutEntry,
    on_edit: Callback<(String, String)>,
    on_delete: Callback<String>,
}

#[function_component(ShortcutRow)]
fn shortcut_row(props: &ShortcutRowProps) -> Html {
    let entry = &props.entry;

    html! {
        <div class="shortcut-item">
            <div class="shortcut-info">
                <img src={entry.favicon.clone()} class="shortcut-favicon" alt="" />
                <div class="shortcut-details">
                    <div class="shortcut-name">{&entry.name}</div>
                    <div class="shortcut-url">{&entry.url}</div>
                </div>
            </div>
            <div class="shortcut-actions">
                <Button
                    onclick={props.on_edit.reform({
                        let name = entry.name.clone();
                        let url = entry.url.clone();
                        move |_| (name.clone(), url.clone())
                    })}
                    variant={ButtonVariant::Secondary}
                    size={ButtonSize::Small}
                >
                    {"Edit"}
                </Button>
                <Button
                    onclick={props.on_delete.reform({
                        let name = entry.name.clone();
                        move |_| name.clone()
                    })}
                    variant={ButtonVariant::Danger}
                    size={ButtonSize::Small}
                >
                    {"Delete"}
                </Button>
            </div>
        </div>
    }
}
