/// UI module exports
pub mod popup;
mod shortcut_list;
