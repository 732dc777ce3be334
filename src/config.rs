/// Compile-time configuration shared by the background worker and the popup
use std::time::Duration;

/// chrome.storage.local key holding the shortcut map
pub const SHORTCUTS_KEY: &str = "shortcuts";

/// chrome.storage.sync key (and localStorage mirror) for the theme flag
pub const DARK_MODE_KEY: &str = "darkMode";

pub const DARK_MODE_CLASS: &str = "dark-mode";

pub const NOTIFICATION_ICON: &str = "icons/icon48.png";

/// Favicon service, `{host}` is replaced with the shortcut's hostname
pub const FAVICON_SERVICE: &str = "https://www.google.com/s2/favicons?domain={host}&sz=32";

pub const DEFAULT_FAVICON: &str = "data:image/svg+xml,%3Csvg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 24 24\" fill=\"%239ca3af\"%3E%3Cpath d=\"M3.9 12c0-1.71 1.39-3.1 3.1-3.1h4V7H7c-2.76 0-5 2.24-5 5s2.24 5 5 5h4v-1.9H7c-1.71 0-3.1-1.39-3.1-3.1zM8 13h8v-2H8v2zm9-6h-4v1.9h4c1.71 0 3.1 1.39 3.1 3.1s-1.39 3.1-3.1 3.1h-4V17h4c2.76 0 5-2.24 5-5s-2.24-5-5-5z\"/%3E%3C/svg%3E";

pub const DEFAULT_SUGGESTION: &str = "Type a shortcut name to navigate or save a new one";

/// How long a popup result message stays up
pub const FLASH_TIMEOUT: Duration = Duration::from_secs(3);

pub const BACKUP_FILE_PREFIX: &str = "shortcuts-backup-";

/// Pages the browser won't let an extension bookmark
pub const INTERNAL_URL_PREFIXES: [&str; 2] = ["chrome://", "chrome-extension://"];
