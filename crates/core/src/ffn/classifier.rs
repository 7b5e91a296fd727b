//! Classifier for FFN's `" - "`-joined stats line.
//!
//! FFN omits fields instead of leaving them blank, so token offsets are
//! meaningless past the first two. Each token is matched against an ordered
//! rule table instead; a new layout is a new [`ClassifierTable`], not new
//! branching.
//!
//! ```text
//! Rated: Fiction T - English - Romance - Harry P. - Chapters: 3 - Words: 5,000 - Favs: 10 - ...
//! ```

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use tracing::debug;

use crate::{AbstractorError, Result};

/// Single genres FFN lets authors pick from.
pub const GENRES: [&str; 21] = [
    "Adventure",
    "Angst",
    "Crime",
    "Drama",
    "Family",
    "Fantasy",
    "Friendship",
    "General",
    "Horror",
    "Humor",
    "Hurt/Comfort",
    "Mystery",
    "Parody",
    "Poetry",
    "Romance",
    "Sci-Fi",
    "Spiritual",
    "Supernatural",
    "Suspense",
    "Tragedy",
    "Western",
];

/// Every genre and ordered genre pair, e.g. `Romance` and `Humor/Romance`.
pub static GENRE_SET: LazyLock<HashSet<String>> = LazyLock::new(|| {
    let mut set = HashSet::new();
    for first in GENRES {
        set.insert(first.to_string());
        for second in GENRES {
            set.insert(format!("{}/{}", first, second));
        }
    }
    set
});

/// Fields of the stats line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatField {
    Rating,
    Language,
    Genre,
    Characters,
    Chapters,
    Words,
    Reviews,
    Favs,
    Follows,
    Updated,
    Published,
    Status,
    Id,
}

impl StatField {
    pub fn name(self) -> &'static str {
        match self {
            StatField::Rating => "rating",
            StatField::Language => "language",
            StatField::Genre => "genre",
            StatField::Characters => "characters",
            StatField::Chapters => "chapters",
            StatField::Words => "words",
            StatField::Reviews => "reviews",
            StatField::Favs => "favs",
            StatField::Follows => "follows",
            StatField::Updated => "updated",
            StatField::Published => "published",
            StatField::Status => "status",
            StatField::Id => "id",
        }
    }
}

/// Condition under which a token is assigned to a rule's field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    /// A known genre or genre pair, optionally labeled `Genre: `.
    Genre,
    /// A token with none of the table's label prefixes, seen before the
    /// chapter and word counts. An optional `Characters: ` label is dropped.
    Unlabeled,
    /// A token starting with this label; the label is stripped.
    Prefix(&'static str),
    /// Exactly this token; the recorded value is the token itself.
    Exact(&'static str),
}

/// One row of a classifier table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub field: StatField,
    pub matcher: Matcher,
}

const fn rule(field: StatField, matcher: Matcher) -> Rule {
    Rule { field, matcher }
}

/// A complete stats-line layout.
#[derive(Debug, Clone, Copy)]
pub struct ClassifierTable {
    /// Leading fields taken by position without inspection.
    pub positional: &'static [StatField],
    /// Rules in priority order; the first unassigned field that matches wins.
    pub rules: &'static [Rule],
    /// Fields whose absence aborts classification.
    pub required: &'static [StatField],
}

const LABELED_RULES: [Rule; 8] = [
    rule(StatField::Chapters, Matcher::Prefix("Chapters: ")),
    rule(StatField::Words, Matcher::Prefix("Words: ")),
    rule(StatField::Reviews, Matcher::Prefix("Reviews: ")),
    rule(StatField::Favs, Matcher::Prefix("Favs: ")),
    rule(StatField::Follows, Matcher::Prefix("Follows: ")),
    rule(StatField::Updated, Matcher::Prefix("Updated: ")),
    rule(StatField::Published, Matcher::Prefix("Published: ")),
    rule(StatField::Status, Matcher::Exact("Status: Complete")),
];

const FULL_RULES: [Rule; 11] = [
    rule(StatField::Genre, Matcher::Genre),
    rule(StatField::Characters, Matcher::Unlabeled),
    LABELED_RULES[0],
    LABELED_RULES[1],
    LABELED_RULES[2],
    LABELED_RULES[3],
    LABELED_RULES[4],
    LABELED_RULES[5],
    LABELED_RULES[6],
    LABELED_RULES[7],
    rule(StatField::Id, Matcher::Prefix("id: ")),
];

/// Stats line of an FFN story page. A missing word count means the layout
/// changed.
pub const STORY_STATS: ClassifierTable = ClassifierTable {
    positional: &[StatField::Rating, StatField::Language],
    rules: &FULL_RULES,
    required: &[StatField::Rating, StatField::Words],
};

/// `extraMeta` of the third-party digest, which carries the same line with
/// counts it also reports separately.
pub const DIGEST_EXTRA_META: ClassifierTable = ClassifierTable {
    positional: &[StatField::Rating, StatField::Language],
    rules: &FULL_RULES,
    required: &[StatField::Rating],
};

/// Classified stats line with documented defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FfnStats {
    pub rating: String,
    pub genre: Option<String>,
    pub characters: Option<String>,
    /// Defaults to `"1"`.
    pub chapters: String,
    /// Empty only for tables that do not require it.
    pub words: String,
    pub reviews: String,
    pub favs: String,
    pub follows: String,
    pub updated: Option<String>,
    pub published: Option<String>,
    pub complete: bool,
}

impl FfnStats {
    /// Last update, falling back to publication for one-shot updates.
    pub fn updated_or_published(&self) -> Option<&str> {
        self.updated.as_deref().or(self.published.as_deref())
    }
}

/// Split a raw stats line into trimmed, whitespace-normalized tokens.
pub fn tokenize(line: &str) -> Vec<String> {
    line.split(" - ")
        .map(|token| token.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|token| !token.is_empty())
        .collect()
}

/// Classify `tokens` with `table` in a single greedy pass.
///
/// # Errors
///
/// Returns [`AbstractorError::MissingField`] naming the first required
/// field that no token matched.
pub fn classify<S: AsRef<str>>(tokens: &[S], table: &ClassifierTable) -> Result<FfnStats> {
    let mut values: HashMap<StatField, String> = HashMap::new();
    let mut rest = tokens.iter().map(|token| token.as_ref());

    for &field in table.positional {
        let Some(token) = rest.next() else { break };
        values.insert(field, positional_value(field, token));
    }

    for token in rest {
        let matched = table
            .rules
            .iter()
            .filter(|rule| !values.contains_key(&rule.field))
            .find_map(|rule| match_rule(rule, token, table, &values).map(|value| (rule.field, value)));
        match matched {
            Some((field, value)) => {
                values.insert(field, value);
            }
            None => debug!(token, "unclassified stats token"),
        }
    }

    if let Some(missing) = table.required.iter().find(|field| !values.contains_key(field)) {
        return Err(AbstractorError::MissingField { field: missing.name() });
    }

    let mut take = |field: StatField| values.remove(&field);
    Ok(FfnStats {
        rating: take(StatField::Rating).unwrap_or_default(),
        genre: take(StatField::Genre),
        characters: take(StatField::Characters),
        chapters: take(StatField::Chapters).unwrap_or_else(|| "1".to_string()),
        words: take(StatField::Words).unwrap_or_default(),
        reviews: take(StatField::Reviews).unwrap_or_else(|| "0".to_string()),
        favs: take(StatField::Favs).unwrap_or_else(|| "0".to_string()),
        follows: take(StatField::Follows).unwrap_or_else(|| "0".to_string()),
        updated: take(StatField::Updated),
        published: take(StatField::Published),
        complete: take(StatField::Status).is_some(),
    })
}

fn positional_value(field: StatField, token: &str) -> String {
    match field {
        StatField::Rating => {
            let rating = token.strip_prefix("Rated:").unwrap_or(token).trim();
            rating.strip_prefix("Fiction").unwrap_or(rating).trim().to_string()
        }
        _ => token.to_string(),
    }
}

fn match_rule(rule: &Rule, token: &str, table: &ClassifierTable, seen: &HashMap<StatField, String>) -> Option<String> {
    match rule.matcher {
        Matcher::Genre => {
            let genre = token.strip_prefix("Genre: ").unwrap_or(token);
            GENRE_SET.contains(genre).then(|| genre.to_string())
        }
        Matcher::Unlabeled => {
            let counted = seen.contains_key(&StatField::Chapters) || seen.contains_key(&StatField::Words);
            let labeled = table.rules.iter().any(|r| match r.matcher {
                Matcher::Prefix(prefix) | Matcher::Exact(prefix) => token.starts_with(prefix),
                _ => false,
            });
            (!counted && !labeled).then(|| token.strip_prefix("Characters: ").unwrap_or(token).to_string())
        }
        Matcher::Prefix(prefix) => token.strip_prefix(prefix).map(|value| value.trim().to_string()),
        Matcher::Exact(exact) => (token == exact).then(|| token.to_string()),
    }
}
