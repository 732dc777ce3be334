/// Action tokens carried in omnibox suggestion content
///
/// A selected suggestion comes back as its `content` string, so pending
/// actions are encoded as a reserved prefix plus a colon-delimited payload.
/// A rename's old name is percent-escaped so the first colon separates it.

const DELETE_PREFIX: &str = "__DELETE__:";
const RENAME_PREFIX: &str = "__RENAME__:";
const SAVE_PREFIX: &str = "__SAVE__:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionToken {
    Delete { name: String },
    Rename { old_name: String, new_name: String },
    Save { name: String },
}

impl ActionToken {
    pub fn encode(&self) -> String {
        match self {
            ActionToken::Delete { name } => format!("{}{}", DELETE_PREFIX, name),
            ActionToken::Rename { old_name, new_name } => {
                format!("{}{}:{}", RENAME_PREFIX, escape_name(old_name), new_name)
            }
            ActionToken::Save { name } => format!("{}{}", SAVE_PREFIX, name),
        }
    }

    /// Decode suggestion content back into an action
    ///
    /// Returns `None` for text that isn't a token, and for a rename payload
    /// without a separator or with a bad escape in the old name. Payloads are
    /// taken verbatim, whitespace included.
    pub fn decode(content: &str) -> Option<ActionToken> {
        if let Some(name) = content.strip_prefix(DELETE_PREFIX) {
            return Some(ActionToken::Delete {
                name: name.to_string(),
            });
        }

        if let Some(payload) = content.strip_prefix(RENAME_PREFIX) {
            // The old name never holds a bare colon, the new name may
            let (old_name, new_name) = payload.split_once(':')?;
            return Some(ActionToken::Rename {
                old_name: unescape_name(old_name)?,
                new_name: new_name.to_string(),
            });
        }

        content.strip_prefix(SAVE_PREFIX).map(|name| ActionToken::Save {
            name: name.to_string(),
        })
    }

    /// True when text starts with any reserved prefix, decodable or not
    pub fn is_token(content: &str) -> bool {
        [DELETE_PREFIX, RENAME_PREFIX, SAVE_PREFIX]
            .iter()
            .any(|prefix| content.starts_with(prefix))
    }
}

/// Percent-escape `%` and `:` so a name fits before the rename separator
fn escape_name(name: &str) -> String {
    let mut escaped = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            '%' => escaped.push_str("%25"),
            ':' => escaped.push_str("%3A"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn unescape_name(escaped: &str) -> Option<String> {
    let mut name = String::with_capacity(escaped.len());
    let mut chars = escaped.chars();
    while let Some(c) = chars.next() {
        if c != '%' {
            name.push(c);
            continue;
        }
        let code: String = chars.by_ref().take(2).collect();
        match code.to_ascii_uppercase().as_str() {
            "25" => name.push('%'),
            "3A" => name.push(':'),
            _ => return None,
        }
    }
    Some(name)
}
