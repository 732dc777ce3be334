/// Parsing of `--delete` / `--rename` directives typed into the omnibox
use std::sync::LazyLock;

use regex::Regex;

use crate::matcher::find_best_match;
use crate::shortcut::Shortcuts;

static DELETE_FLAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s* --delete\s*$").expect("delete flag regex"));

static RENAME_FLAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(.+?)\s+--rename\s+(.+)$").expect("rename flag regex"));

/// What the user asked for, before looking anything up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Delete { target: String },
    Rename { target: String, new_name: String },
    /// No directive: search for / navigate to a shortcut
    Search { query: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Delete,
    Rename,
}

/// A directive whose target has been located in the shortcut set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCommand {
    pub kind: CommandKind,
    pub matched_name: String,
    /// New name for renames
    pub extra: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(ResolvedCommand),
    /// Carries the operand as typed
    TargetNotFound(String),
    Search(String),
}

/// Recognize a directive in raw omnibox text
///
/// Delete wins over rename. The delete flag has to be the trailing token
/// with a plain space right before it; "foo --delete bar" is not a delete.
pub fn parse_command(text: &str) -> Command {
    let trimmed = text.trim();

    if DELETE_FLAG.is_match(trimmed) {
        let target = DELETE_FLAG.replace(trimmed, "").trim().to_string();
        return Command::Delete { target };
    }

    if let Some(caps) = RENAME_FLAG.captures(trimmed) {
        return Command::Rename {
            target: caps[1].trim().to_string(),
            new_name: caps[2].trim().to_string(),
        };
    }

    Command::Search {
        query: trimmed.to_string(),
    }
}

impl Command {
    /// Locate the directive's target with the best-match lookup
    pub fn resolve(&self, shortcuts: &Shortcuts) -> Resolution {
        let (kind, target, extra) = match self {
            Command::Search { query } => return Resolution::Search(query.clone()),
            Command::Delete { target } => (CommandKind::Delete, target, None),
            Command::Rename { target, new_name } => {
                (CommandKind::Rename, target, Some(new_name.clone()))
            }
        };

        match find_best_match(target, shortcuts) {
            Some(matched) => Resolution::Resolved(ResolvedCommand {
                kind,
                matched_name: matched.to_string(),
                extra,
            }),
            None => Resolution::TargetNotFound(target.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shortcut::ShortcutRecord;

    fn shortcuts(names: &[&str]) -> Shortcuts {
        names
            .iter()
            .map(|name| (name.to_string(), ShortcutRecord::new("https://example.com")))
            .collect()
    }

    #[test]
    fn test_parse_delete() {
        assert_eq!(
            parse_command("GitHub --delete"),
            Command::Delete { target: "GitHub".to_string() }
        );
        assert_eq!(
            parse_command("  my docs   --DELETE  "),
            Command::Delete { target: "my docs".to_string() }
        );
    }

    #[test]
    fn test_delete_flag_needs_a_space() {
        assert_eq!(
            parse_command("gh\t--delete"),
            Command::Search { query: "gh\t--delete".to_string() }
        );
        assert_eq!(
            parse_command("gh\t --delete"),
            Command::Delete { target: "gh".to_string() }
        );
    }

    #[test]
    fn test_delete_flag_must_trail() {
        assert_eq!(
            parse_command("foo --delete bar"),
            Command::Search { query: "foo --delete bar".to_string() }
        );
        assert_eq!(
            parse_command("--delete"),
            Command::Search { query: "--delete".to_string() }
        );
        assert_eq!(
            parse_command("foo --deleted"),
            Command::Search { query: "foo --deleted".to_string() }
        );
    }

    #[test]
    fn test_parse_rename() {
        assert_eq!(
            parse_command("old-name --rename new name"),
            Command::Rename {
                target: "old-name".to_string(),
                new_name: "new name".to_string(),
            }
        );
    }

    #[test]
    fn test_rename_is_non_greedy_and_keeps_punctuation() {
        assert_eq!(
            parse_command("a --Rename b --rename c: d"),
            Command::Rename {
                target: "a".to_string(),
                new_name: "b --rename c: d".to_string(),
            }
        );
    }

    #[test]
    fn test_delete_takes_priority_over_rename() {
        assert_eq!(
            parse_command("a --rename b --delete"),
            Command::Delete { target: "a --rename b".to_string() }
        );
    }

    #[test]
    fn test_rename_needs_new_name() {
        assert_eq!(
            parse_command("a --rename"),
            Command::Search { query: "a --rename".to_string() }
        );
    }

    #[test]
    fn test_resolve_delete_exact() {
        let s = shortcuts(&["GitHub", "Gitea"]);

        let resolution = parse_command("GitHub --delete").resolve(&s);

        assert_eq!(
            resolution,
            Resolution::Resolved(ResolvedCommand {
                kind: CommandKind::Delete,
                matched_name: "GitHub".to_string(),
                extra: None,
            })
        );
    }

    #[test]
    fn test_resolve_rename_fuzzy() {
        let s = shortcuts(&["team-wiki"]);

        let resolution = parse_command("wiki --rename Wiki").resolve(&s);

        assert_eq!(
            resolution,
            Resolution::Resolved(ResolvedCommand {
                kind: CommandKind::Rename,
                matched_name: "team-wiki".to_string(),
                extra: Some("Wiki".to_string()),
            })
        );
    }

    #[test]
    fn test_resolve_target_not_found() {
        let s = shortcuts(&["GitHub"]);

        let resolution = parse_command("old-name --rename new name").resolve(&s);

        assert_eq!(resolution, Resolution::TargetNotFound("old-name".to_string()));
    }

    #[test]
    fn test_resolve_search() {
        let s = shortcuts(&["GitHub"]);

        assert_eq!(
            parse_command("  git ").resolve(&s),
            Resolution::Search("git".to_string())
        );
    }
}
