pub mod series;
pub mod work;

pub use series::{SeriesFormatter, format_series};
pub use work::{WorkFormatter, format_work, implied_characters, remaining_characters};

/// Marker appended to a list line that was cut at its cap.
pub const LIST_ELLIPSIS: &str = "…";

/// Display caps for the list-valued lines of a summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatConfig {
    pub max_fandoms: usize,
    pub max_relationships: usize,
    pub max_characters: usize,
    pub max_freeform_tags: usize,
    pub max_series_memberships: usize,
    /// Numbered works listed under a series before "and N more works".
    pub max_series_members: usize,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            max_fandoms: 5,
            max_relationships: 3,
            max_characters: 3,
            max_freeform_tags: 5,
            max_series_memberships: 3,
            max_series_members: 3,
        }
    }
}

/// Join at most `cap` items with `", "`, marking a cut with `", …"`.
pub fn join_capped<S: AsRef<str>>(items: &[S], cap: usize) -> String {
    let shown: Vec<&str> = items.iter().take(cap).map(AsRef::as_ref).collect();
    let mut line = shown.join(", ");
    if items.len() > cap {
        line.push_str(", ");
        line.push_str(LIST_ELLIPSIS);
    }
    line
}
