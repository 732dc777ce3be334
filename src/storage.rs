/// Shortcut storage: the store capability and the edits applied to a snapshot
use crate::config::INTERNAL_URL_PREFIXES;
use crate::error::{Result, ShortcutError};
use crate::shortcut::{ShortcutRecord, Shortcuts};

/// Wholesale access to the persisted shortcut map
///
/// Implementations read and write the whole map at once; there are no
/// per-key updates.
#[allow(async_fn_in_trait)]
pub trait ShortcutStore {
    async fn read(&self) -> Result<Shortcuts>;
    async fn write(&self, shortcuts: &Shortcuts) -> Result<()>;
}

/// Where a read-edit-write round trip against a store failed
#[derive(Debug, PartialEq)]
pub enum EditFailure {
    Read(ShortcutError),
    Edit(ShortcutError),
    Write(ShortcutError),
}

/// Read the latest shortcuts, apply one edit, and write them back
///
/// Nothing is written when the read or the edit fails.
pub async fn edit_stored<S, F>(
    store: &S,
    edit: F,
) -> std::result::Result<ShortcutBook, EditFailure>
where
    S: ShortcutStore,
    F: FnOnce(&mut ShortcutBook) -> Result<()>,
{
    let mut book = ShortcutBook::from(store.read().await.map_err(EditFailure::Read)?);
    edit(&mut book).map_err(EditFailure::Edit)?;
    store.write(book.shortcuts()).await.map_err(EditFailure::Write)?;
    Ok(book)
}

/// A snapshot of the shortcut map with the edits the UI and omnibox make
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShortcutBook {
    shortcuts: Shortcuts,
}

impl ShortcutBook {
    pub fn new() -> Self {
        ShortcutBook {
            shortcuts: Shortcuts::new(),
        }
    }

    pub fn shortcuts(&self) -> &Shortcuts {
        &self.shortcuts
    }

    pub fn get(&self, name: &str) -> Option<&ShortcutRecord> {
        self.shortcuts.get(name)
    }

    pub fn len(&self) -> usize {
        self.shortcuts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shortcuts.is_empty()
    }

    /// Bind `name` to `url`, replacing any existing record under that exact name
    pub fn save(&mut self, name: &str, url: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ShortcutError::EmptyName);
        }

        // Existing keys keep their position
        self.shortcuts
            .insert(name.to_string(), ShortcutRecord::new(url));
        Ok(())
    }

    /// Remove a shortcut by exact name, returning what it pointed at
    pub fn delete(&mut self, name: &str) -> Result<ShortcutRecord> {
        self.shortcuts
            .shift_remove(name)
            .ok_or_else(|| ShortcutError::NotFound(name.to_string()))
    }

    /// Move a record to a new name; the renamed entry goes to the end
    pub fn rename(&mut self, old_name: &str, new_name: &str) -> Result<&ShortcutRecord> {
        if !self.shortcuts.contains_key(old_name) {
            return Err(ShortcutError::NotFound(old_name.to_string()));
        }
        if new_name.trim().is_empty() {
            return Err(ShortcutError::EmptyName);
        }
        if self.shortcuts.contains_key(new_name) {
            return Err(ShortcutError::NameExists(new_name.to_string()));
        }

        let record = self.delete(old_name)?;
        let (index, _) = self.shortcuts.insert_full(new_name.to_string(), record);
        Ok(&self.shortcuts[index])
    }

    /// Replace an edited shortcut: drop the original name, then store the new one
    ///
    /// Unlike `rename`, an existing record under `new_name` is overwritten.
    pub fn replace(&mut self, original_name: &str, new_name: &str, url: &str) -> Result<()> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(ShortcutError::EmptyName);
        }

        self.shortcuts.shift_remove(original_name);
        self.shortcuts
            .insert(new_name.to_string(), ShortcutRecord::new(url));
        Ok(())
    }

    /// Merge imported shortcuts over the current ones, returning how many were imported
    pub fn merge(&mut self, imported: Shortcuts) -> usize {
        let count = imported.len();
        self.shortcuts.extend(imported);
        count
    }

    pub fn clear(&mut self) {
        self.shortcuts.clear();
    }

    /// Pretty-printed JSON backup of every shortcut
    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.shortcuts)?)
    }
}

impl From<Shortcuts> for ShortcutBook {
    fn from(shortcuts: Shortcuts) -> Self {
        ShortcutBook { shortcuts }
    }
}

/// Parse a backup file; the top level must be a JSON object
pub fn parse_import(text: &str) -> Result<Shortcuts> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| ShortcutError::InvalidImport(e.to_string()))?;

    if !value.is_object() {
        return Err(ShortcutError::InvalidImport(
            "top level is not an object".to_string(),
        ));
    }

    serde_json::from_value(value).map_err(|e| ShortcutError::InvalidImport(e.to_string()))
}

/// Browser pages the omnibox refuses to save as shortcuts
pub fn is_internal_page(url: &str) -> bool {
    INTERNAL_URL_PREFIXES
        .iter()
        .any(|prefix| url.starts_with(prefix))
}
