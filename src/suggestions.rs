/// Omnibox suggestion building
use serde::Serialize;

use crate::action::ActionToken;
use crate::command::{parse_command, CommandKind, Resolution};
use crate::matcher::{rank_matches, MatchTier};
use crate::shortcut::Shortcuts;

/// One omnibox suggestion, in the shape `chrome.omnibox` expects
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Suggestion {
    pub content: String,
    /// May contain `<match>` markup; user text inside is XML-escaped
    pub description: String,
}

impl Suggestion {
    fn new(content: impl Into<String>, description: impl Into<String>) -> Self {
        Suggestion {
            content: content.into(),
            description: description.into(),
        }
    }
}

/// Escape text for the omnibox's XML description format
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Build the suggestion list for the current omnibox text
///
/// Directives produce exactly one suggestion describing the pending action.
/// Plain text produces the ranked matches, followed by an offer to save the
/// current page unless some name matches exactly.
pub fn build_suggestions(text: &str, shortcuts: &Shortcuts) -> Vec<Suggestion> {
    let command = parse_command(text);

    match command.resolve(shortcuts) {
        Resolution::Search(query) => search_suggestions(&query, shortcuts),
        Resolution::TargetNotFound(operand) => vec![Suggestion::new(
            text,
            format!("No shortcut found matching \"{}\"", escape_xml(&operand)),
        )],
        Resolution::Resolved(resolved) => {
            let name = resolved.matched_name;
            let suggestion = match (resolved.kind, resolved.extra) {
                (CommandKind::Rename, Some(new_name)) => Suggestion::new(
                    ActionToken::Rename {
                        old_name: name.clone(),
                        new_name: new_name.clone(),
                    }
                    .encode(),
                    format!(
                        "Rename \"<match>{}</match>\" to \"<match>{}</match>\"",
                        escape_xml(&name),
                        escape_xml(&new_name)
                    ),
                ),
                _ => {
                    let url = shortcuts.get(&name).map(|r| r.url.as_str()).unwrap_or_default();
                    Suggestion::new(
                        ActionToken::Delete { name: name.clone() }.encode(),
                        format!(
                            "Delete shortcut: <match>{}</match> - {}",
                            escape_xml(&name),
                            escape_xml(url)
                        ),
                    )
                }
            };
            vec![suggestion]
        }
    }
}

fn search_suggestions(query: &str, shortcuts: &Shortcuts) -> Vec<Suggestion> {
    let ranked = rank_matches(query, shortcuts);
    let has_exact = ranked.iter().any(|m| m.tier == MatchTier::Exact);

    let mut suggestions: Vec<Suggestion> = ranked
        .iter()
        .filter_map(|m| {
            let record = shortcuts.get(m.name)?;
            let label = match m.tier {
                MatchTier::Exact => "Navigate to",
                _ => "Shortcut",
            };
            Some(Suggestion::new(
                m.name,
                format!(
                    "{}: <match>{}</match> - {}",
                    label,
                    escape_xml(m.name),
                    escape_xml(&record.url)
                ),
            ))
        })
        .collect();

    let query = query.trim();
    if !has_exact && !query.is_empty() {
        suggestions.push(Suggestion::new(
            ActionToken::Save { name: query.to_string() }.encode(),
            format!("Save current page as: <match>{}</match>", escape_xml(query)),
        ));
    }

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shortcut::ShortcutRecord;

    fn shortcuts(entries: &[(&str, &str)]) -> Shortcuts {
        entries
            .iter()
            .map(|(name, url)| (name.to_string(), ShortcutRecord::new(*url)))
            .collect()
    }

    fn contents(suggestions: &[Suggestion]) -> Vec<&str> {
        suggestions.iter().map(|s| s.content.as_str()).collect()
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml(r#"a&b<c>"d"'e'"#), "a&amp;b&lt;c&gt;&quot;d&quot;&apos;e&apos;");
        assert_eq!(escape_xml("plain"), "plain");
    }

    #[test]
    fn test_search_with_save_offer() {
        let s = shortcuts(&[("GitHub", "github.com"), ("Gitea", "gitea.io")]);

        let suggestions = build_suggestions("git", &s);

        assert_eq!(contents(&suggestions), vec!["GitHub", "Gitea", "__SAVE__:git"]);
        assert_eq!(suggestions[0].description, "Shortcut: <match>GitHub</match> - github.com");
        assert_eq!(suggestions[2].description, "Save current page as: <match>git</match>");
    }

    #[test]
    fn test_exact_match_suppresses_save_offer() {
        let s = shortcuts(&[("github-docs", "docs.github.com"), ("GitHub", "github.com")]);

        let suggestions = build_suggestions("github", &s);

        assert_eq!(contents(&suggestions), vec!["GitHub", "github-docs"]);
        assert_eq!(suggestions[0].description, "Navigate to: <match>GitHub</match> - github.com");
    }

    #[test]
    fn test_empty_query_lists_all_without_save() {
        let s = shortcuts(&[("b", "b.io"), ("a", "a.io")]);

        let suggestions = build_suggestions("   ", &s);

        assert_eq!(contents(&suggestions), vec!["b", "a"]);
    }

    #[test]
    fn test_no_matches_only_save() {
        let s = shortcuts(&[("GitHub", "github.com")]);

        let suggestions = build_suggestions(" news ", &s);

        assert_eq!(contents(&suggestions), vec!["__SAVE__:news"]);
    }

    #[test]
    fn test_delete_suggestion() {
        let s = shortcuts(&[("GitHub", "https://github.com/?a=1&b=2")]);

        let suggestions = build_suggestions("git --delete", &s);

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].content, "__DELETE__:GitHub");
        assert_eq!(
            suggestions[0].description,
            "Delete shortcut: <match>GitHub</match> - https://github.com/?a=1&amp;b=2"
        );
    }

    #[test]
    fn test_delete_not_found_echoes_text() {
        let s = shortcuts(&[("GitHub", "github.com")]);

        let suggestions = build_suggestions("<nope> --delete", &s);

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].content, "<nope> --delete");
        assert_eq!(suggestions[0].description, "No shortcut found matching \"&lt;nope&gt;\"");
    }

    #[test]
    fn test_rename_suggestion() {
        let s = shortcuts(&[("jira", "jira.example")]);

        let suggestions = build_suggestions("jira --rename work: tickets", &s);

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].content, "__RENAME__:jira:work: tickets");
        assert_eq!(
            suggestions[0].description,
            "Rename \"<match>jira</match>\" to \"<match>work: tickets</match>\""
        );
    }

    #[test]
    fn test_rename_not_found() {
        let s = shortcuts(&[("jira", "jira.example")]);

        let suggestions = build_suggestions("old-name --rename new name", &s);

        assert_eq!(contents(&suggestions), vec!["old-name --rename new name"]);
        assert_eq!(suggestions[0].description, "No shortcut found matching \"old-name\"");
    }
}
