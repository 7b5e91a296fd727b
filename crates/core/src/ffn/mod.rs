//! FanFiction.net extraction.
//!
//! Story pages are read directly; when FFN answers with a bot challenge the
//! same record is assembled from the third-party digest instead.

pub mod classifier;
pub mod digest;
pub mod story;

pub use classifier::{
    ClassifierTable, DIGEST_EXTRA_META, FfnStats, GENRE_SET, Matcher, Rule, STORY_STATS, StatField, classify, tokenize,
};
pub use digest::{DigestMeta, digest_url, parse_digest};
pub use story::extract_story;

/// Canonical FFN host.
pub const FFN_ROOT: &str = "https://www.fanfiction.net";

/// Canonical link for a story id.
pub fn story_link(id: &str) -> String {
    format!("{}/s/{}", FFN_ROOT, id)
}
