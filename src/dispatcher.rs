/// Turning entered omnibox text into actions on the shortcut set
use std::str::FromStr;

use crate::action::ActionToken;
use crate::command::{parse_command, CommandKind, Resolution};
use crate::error::ShortcutError;
use crate::matcher::find_best_match;
use crate::storage::{is_internal_page, ShortcutBook};

/// What entered text asks the extension to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Navigate(String),
    Delete(String),
    Rename(String, String),
    /// Save the active tab's page under this name
    Save(String),
    TargetNotFound(String),
    /// Malformed action token, nothing to do
    Ignore,
}

/// Where chrome.omnibox wants navigation to happen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Disposition {
    #[default]
    CurrentTab,
    NewForegroundTab,
    NewBackgroundTab,
}

impl FromStr for Disposition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "currentTab" => Ok(Disposition::CurrentTab),
            "newForegroundTab" => Ok(Disposition::NewForegroundTab),
            "newBackgroundTab" => Ok(Disposition::NewBackgroundTab),
            other => Err(format!("Unknown disposition: {}", other)),
        }
    }
}

/// A user-facing notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    fn new(title: &str, message: impl Into<String>) -> Self {
        Notice {
            title: title.to_string(),
            message: message.into(),
        }
    }
}

/// Result of applying an intent to a snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Whether the snapshot changed and must be written back
    pub changed: bool,
    pub notice: Option<Notice>,
}

impl Outcome {
    fn changed(notice: Notice) -> Self {
        Outcome {
            changed: true,
            notice: Some(notice),
        }
    }

    fn unchanged(notice: Option<Notice>) -> Self {
        Outcome {
            changed: false,
            notice,
        }
    }
}

/// Resolve entered text (typed or from a selected suggestion) to an intent
///
/// Order: action tokens, then `--delete` / `--rename` directives, then an
/// exact case-sensitive name, then the best fuzzy match. Anything left over
/// becomes a request to save the current page under the typed name.
pub fn resolve_entered(text: &str, book: &ShortcutBook) -> Intent {
    if ActionToken::is_token(text) {
        return match ActionToken::decode(text) {
            Some(ActionToken::Delete { name }) => Intent::Delete(name),
            Some(ActionToken::Rename { old_name, new_name }) => Intent::Rename(old_name, new_name),
            Some(ActionToken::Save { name }) => Intent::Save(name),
            None => Intent::Ignore,
        };
    }

    let shortcuts = book.shortcuts();
    match parse_command(text).resolve(shortcuts) {
        Resolution::Resolved(resolved) => {
            return match (resolved.kind, resolved.extra) {
                (CommandKind::Rename, Some(new_name)) => {
                    Intent::Rename(resolved.matched_name, new_name)
                }
                _ => Intent::Delete(resolved.matched_name),
            };
        }
        Resolution::TargetNotFound(operand) => return Intent::TargetNotFound(operand),
        Resolution::Search(_) => {}
    }

    if let Some(record) = book.get(text) {
        return Intent::Navigate(record.url.clone());
    }

    match find_best_match(text, shortcuts) {
        Some(name) => Intent::Navigate(shortcuts[name].url.clone()),
        None => Intent::Save(text.trim().to_string()),
    }
}

/// Apply a mutating intent to a snapshot
///
/// `active_url` is the URL of the page a `Save` captures. Navigation and
/// ignored intents leave the snapshot untouched.
pub fn apply(intent: &Intent, book: &mut ShortcutBook, active_url: Option<&str>) -> Outcome {
    match intent {
        Intent::Delete(name) => match book.delete(name) {
            Ok(record) => Outcome::changed(Notice::new(
                "Shortcut Deleted!",
                format!("\"{}\" has been deleted.\nURL was: {}", name, record.url),
            )),
            Err(e) => Outcome::unchanged(Some(notice_for_error(&e))),
        },
        Intent::Rename(old_name, new_name) => match book.rename(old_name, new_name) {
            Ok(record) => Outcome::changed(Notice::new(
                "Shortcut Renamed!",
                format!("\"{}\" renamed to \"{}\"\nURL: {}", old_name, new_name, record.url),
            )),
            Err(e) => Outcome::unchanged(Some(notice_for_error(&e))),
        },
        Intent::Save(name) => {
            let Some(url) = active_url else {
                return Outcome::unchanged(None);
            };
            if is_internal_page(url) {
                let err = ShortcutError::InternalPage(url.to_string());
                return Outcome::unchanged(Some(notice_for_error(&err)));
            }
            match book.save(name, url) {
                Ok(()) => Outcome::changed(Notice::new(
                    "Shortcut Saved!",
                    format!("\"{}\" now points to:\n{}", name.trim(), url),
                )),
                Err(e) => Outcome::unchanged(Some(notice_for_error(&e))),
            }
        }
        Intent::TargetNotFound(query) => Outcome::unchanged(Some(Notice::new(
            "Shortcut Not Found",
            format!("Could not find a shortcut matching \"{}\"", query),
        ))),
        Intent::Navigate(_) | Intent::Ignore => Outcome::unchanged(None),
    }
}

/// Notification shown when an intent fails
pub fn notice_for_error(err: &ShortcutError) -> Notice {
    let title = match err {
        ShortcutError::NotFound(_) => "Shortcut Not Found",
        ShortcutError::NameExists(_) => "Name Already Exists",
        ShortcutError::InternalPage(_) => "Cannot Save Shortcut",
        _ => "Error",
    };
    Notice::new(title, err.to_string())
}

/// Notification for a failed write of an applied intent
pub fn write_failure_notice(intent: &Intent) -> Notice {
    let message = match intent {
        Intent::Save(_) => "Failed to save shortcut. Storage quota may be exceeded.",
        Intent::Delete(_) => "Failed to delete shortcut.",
        Intent::Rename(..) => "Failed to rename shortcut.",
        _ => "Failed to update shortcuts.",
    };
    Notice::new("Error", message)
}

/// Notification for a failed storage read on entered text
///
/// Only an explicit save action reports it; other commands just log.
pub fn read_failure_notice(text: &str) -> Option<Notice> {
    match ActionToken::decode(text) {
        Some(ActionToken::Save { .. }) => Some(Notice::new(
            "Error",
            "Failed to save shortcut. Storage error occurred.",
        )),
        _ => None,
    }
}

/// Prefix `http://` onto URLs stored without an http(s) scheme
pub fn navigation_url(url: &str) -> String {
    let lower = url.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        url.to_string()
    } else {
        format!("http://{}", url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suggestions::build_suggestions;

    fn create_test_book(entries: &[(&str, &str)]) -> ShortcutBook {
        let mut book = ShortcutBook::new();
        for (name, url) in entries {
            book.save(name, url).unwrap();
        }
        book
    }

    #[test]
    fn test_resolve_action_tokens() {
        let book = create_test_book(&[("gh", "https://github.com")]);

        assert_eq!(resolve_entered("__DELETE__:gh", &book), Intent::Delete("gh".to_string()));
        assert_eq!(
            resolve_entered("__RENAME__:gh:code: hub", &book),
            Intent::Rename("gh".to_string(), "code: hub".to_string())
        );
        assert_eq!(resolve_entered("__SAVE__:news", &book), Intent::Save("news".to_string()));
        assert_eq!(resolve_entered("__RENAME__:gh", &book), Intent::Ignore);
    }

    #[test]
    fn test_resolve_raw_directives() {
        let book = create_test_book(&[("GitHub", "https://github.com")]);

        assert_eq!(
            resolve_entered("GitHub --delete", &book),
            Intent::Delete("GitHub".to_string())
        );
        assert_eq!(
            resolve_entered("git --rename code", &book),
            Intent::Rename("GitHub".to_string(), "code".to_string())
        );
        assert_eq!(
            resolve_entered("old-name --rename new name", &book),
            Intent::TargetNotFound("old-name".to_string())
        );
    }

    #[test]
    fn test_resolve_navigation() {
        let book = create_test_book(&[("gitlab", "https://gitlab.com"), ("git", "git-scm.com")]);

        assert_eq!(resolve_entered("git", &book), Intent::Navigate("git-scm.com".to_string()));
        assert_eq!(resolve_entered("lab", &book), Intent::Navigate("https://gitlab.com".to_string()));
        assert_eq!(resolve_entered(" news ", &book), Intent::Save("news".to_string()));
    }

    #[test]
    fn test_exact_key_beats_case_insensitive_match() {
        let book = create_test_book(&[("Blog", "https://work.blog"), ("blog", "https://home.blog")]);

        assert_eq!(resolve_entered("blog", &book), Intent::Navigate("https://home.blog".to_string()));
        assert_eq!(resolve_entered("BLOG", &book), Intent::Navigate("https://work.blog".to_string()));
    }

    #[test]
    fn test_apply_delete() {
        let mut book = create_test_book(&[("gh", "https://github.com")]);

        let outcome = apply(&Intent::Delete("gh".to_string()), &mut book, None);

        assert!(outcome.changed);
        assert_eq!(outcome.notice.unwrap().title, "Shortcut Deleted!");
        assert!(book.is_empty());
    }

    #[test]
    fn test_apply_delete_missing_does_not_write() {
        let mut book = create_test_book(&[("gh", "https://github.com")]);

        let outcome = apply(&Intent::Delete("nope".to_string()), &mut book, None);

        assert!(!outcome.changed);
        assert_eq!(
            outcome.notice,
            Some(Notice {
                title: "Shortcut Not Found".to_string(),
                message: "Could not find shortcut \"nope\"".to_string(),
            })
        );
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn test_apply_rename_collision() {
        let mut book = create_test_book(&[("a", "https://a.io"), ("b", "https://b.io")]);

        let outcome = apply(&Intent::Rename("a".to_string(), "b".to_string()), &mut book, None);

        assert!(!outcome.changed);
        assert_eq!(outcome.notice.unwrap().title, "Name Already Exists");
    }

    #[test]
    fn test_apply_rename() {
        let mut book = create_test_book(&[("a", "https://a.io")]);

        let outcome = apply(&Intent::Rename("a".to_string(), "alpha".to_string()), &mut book, None);

        assert!(outcome.changed);
        assert_eq!(
            outcome.notice.unwrap().message,
            "\"a\" renamed to \"alpha\"\nURL: https://a.io"
        );
    }

    #[test]
    fn test_apply_save() {
        let mut book = ShortcutBook::new();

        let outcome = apply(&Intent::Save("news".to_string()), &mut book, Some("https://news.ycombinator.com"));

        assert!(outcome.changed);
        assert_eq!(book.get("news").unwrap().url, "https://news.ycombinator.com");
    }

    #[test]
    fn test_apply_save_internal_page() {
        let mut book = ShortcutBook::new();

        let outcome = apply(&Intent::Save("ext".to_string()), &mut book, Some("chrome://extensions"));

        assert!(!outcome.changed);
        assert_eq!(outcome.notice.unwrap().title, "Cannot Save Shortcut");
    }

    #[test]
    fn test_apply_save_without_tab() {
        let mut book = ShortcutBook::new();

        let outcome = apply(&Intent::Save("news".to_string()), &mut book, None);

        assert_eq!(outcome, Outcome { changed: false, notice: None });
    }

    #[test]
    fn test_apply_target_not_found() {
        let mut book = ShortcutBook::new();

        let outcome = apply(&Intent::TargetNotFound("zzz".to_string()), &mut book, None);

        assert!(!outcome.changed);
        assert_eq!(
            outcome.notice.unwrap().message,
            "Could not find a shortcut matching \"zzz\""
        );
    }

    #[test]
    fn test_rename_of_name_with_colon_hits_matched_shortcut() {
        let mut book = create_test_book(&[("a", "https://a.io"), ("a:b", "https://ab.io")]);
        let suggestions = build_suggestions("a:b --rename c", book.shortcuts());

        let intent = resolve_entered(&suggestions[0].content, &book);
        let outcome = apply(&intent, &mut book, None);

        assert_eq!(intent, Intent::Rename("a:b".to_string(), "c".to_string()));
        assert!(outcome.changed);
        assert_eq!(book.get("a").unwrap().url, "https://a.io");
        assert_eq!(book.get("c").unwrap().url, "https://ab.io");
        assert!(book.get("a:b").is_none());
    }

    #[test]
    fn test_write_failure_notice_per_intent() {
        let save = write_failure_notice(&Intent::Save("news".to_string()));
        let delete = write_failure_notice(&Intent::Delete("gh".to_string()));
        let rename = write_failure_notice(&Intent::Rename("a".to_string(), "b".to_string()));

        assert_eq!(save.title, "Error");
        assert_eq!(save.message, "Failed to save shortcut. Storage quota may be exceeded.");
        assert_eq!(delete.message, "Failed to delete shortcut.");
        assert_eq!(rename.message, "Failed to rename shortcut.");
    }

    #[test]
    fn test_read_failure_notice_only_for_save() {
        assert_eq!(
            read_failure_notice("__SAVE__:news"),
            Some(Notice {
                title: "Error".to_string(),
                message: "Failed to save shortcut. Storage error occurred.".to_string(),
            })
        );
        assert_eq!(read_failure_notice("__DELETE__:gh"), None);
        assert_eq!(read_failure_notice("github"), None);
    }

    #[test]
    fn test_navigation_url() {
        assert_eq!(navigation_url("github.com"), "http://github.com");
        assert_eq!(navigation_url("https://github.com"), "https://github.com");
        assert_eq!(navigation_url("HTTP://example.com"), "HTTP://example.com");
        assert_eq!(navigation_url("ftp://files.example"), "http://ftp://files.example");
    }

    #[test]
    fn test_disposition_parse() {
        assert_eq!("currentTab".parse::<Disposition>(), Ok(Disposition::CurrentTab));
        assert_eq!("newBackgroundTab".parse::<Disposition>(), Ok(Disposition::NewBackgroundTab));
        assert!("sideways".parse::<Disposition>().is_err());
    }
}
