/// Shortcut name matching and ranking
use crate::shortcut::Shortcuts;

/// How well a shortcut name matches a query, best first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchTier {
    /// Name equals the query
    Exact,
    /// Name starts with the query
    PrefixWhole,
    /// One of the name's words starts with the query
    PrefixWord,
    /// Query appears anywhere in the name
    Substring,
}

impl MatchTier {
    pub const ALL: [MatchTier; 4] = [
        MatchTier::Exact,
        MatchTier::PrefixWhole,
        MatchTier::PrefixWord,
        MatchTier::Substring,
    ];

    /// Does a lower-cased name satisfy this tier's own test?
    fn accepts(self, lower_name: &str, query: &str) -> bool {
        match self {
            MatchTier::Exact => lower_name == query,
            MatchTier::PrefixWhole => lower_name.starts_with(query),
            MatchTier::PrefixWord => words(lower_name).any(|word| word.starts_with(query)),
            MatchTier::Substring => lower_name.contains(query),
        }
    }
}

/// A shortcut name together with the tier it landed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankedMatch<'a> {
    pub name: &'a str,
    pub tier: MatchTier,
}

/// Lower-case and trim a query the same way for every lookup
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Split a name into words on runs of whitespace, hyphens and underscores
fn words(name: &str) -> impl Iterator<Item = &str> {
    name.split(|c: char| c.is_whitespace() || c == '-' || c == '_')
}

/// Place a name in the best tier it qualifies for, if any
///
/// `query` must already be normalized.
pub fn classify(name: &str, query: &str) -> Option<MatchTier> {
    let lower_name = name.to_lowercase();
    MatchTier::ALL
        .into_iter()
        .find(|tier| tier.accepts(&lower_name, query))
}

/// Rank every matching shortcut name against a query
///
/// Algorithm:
/// 1. Normalize the query (trim + lowercase)
/// 2. Classify each name into its best tier, dropping names that match nothing
/// 3. Emit Exact, then PrefixWhole, then PrefixWord, then Substring
///
/// Within a tier names keep store order, with no
/// alphabetical tie-break.
pub fn rank_matches<'a>(query: &str, shortcuts: &'a Shortcuts) -> Vec<RankedMatch<'a>> {
    let query = normalize_query(query);

    let mut ranked: Vec<RankedMatch<'a>> = shortcuts
        .keys()
        .filter_map(|name| {
            classify(name, &query).map(|tier| RankedMatch {
                name: name.as_str(),
                tier,
            })
        })
        .collect();

    // Stable sort keeps store order inside each tier
    ranked.sort_by_key(|m| m.tier);
    ranked
}

/// Find the single best shortcut name for a query
///
/// Scans tier by tier and returns the first name in store order from the
/// first tier that has any member. When several names share that tier the
/// earliest stored one wins, even if the user meant another
/// (e.g. "git" against "github" and "gitlab").
pub fn find_best_match<'a>(query: &str, shortcuts: &'a Shortcuts) -> Option<&'a str> {
    let query = normalize_query(query);
    let lowered: Vec<(&'a str, String)> = shortcuts
        .keys()
        .map(|name| (name.as_str(), name.to_lowercase()))
        .collect();

    MatchTier::ALL.into_iter().find_map(|tier| {
        lowered
            .iter()
            .find(|(_, lower_name)| tier.accepts(lower_name, &query))
            .map(|(name, _)| *name)
    })
}
