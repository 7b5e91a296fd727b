//! Third-party JSON digest used when FFN blocks direct fetches.

use std::fmt;

use serde::Deserialize;
use tracing::debug;

use crate::extract::ExtractConfig;
use crate::ffn::classifier::{DIGEST_EXTRA_META, FfnStats, classify, tokenize};
use crate::models::{ChapterProgress, FicMetadata, Site};
use crate::sanitize::cap_chars;
use crate::{AbstractorError, Result};

#[derive(Debug, Deserialize)]
struct DigestResponse {
    meta: DigestMeta,
}

/// The `meta` object of a digest response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DigestMeta {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: String,
    pub chapters: Option<Count>,
    pub words: Option<Count>,
    #[serde(default)]
    pub updated: String,
    pub extra_meta: Option<String>,
}

/// A count the digest reports either as a number or as a string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Count {
    Number(u64),
    Text(String),
}

impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Count::Number(n) => write!(f, "{}", n),
            Count::Text(s) => write!(f, "{}", s.trim()),
        }
    }
}

/// Digest request URL for a story link.
pub fn digest_url(endpoint: &str, link: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(link.as_bytes()).collect();
    format!("{}{}", endpoint, encoded)
}

/// Build a work record from a digest response body.
///
/// `extraMeta` carries the stats line with only rating, genre, characters
/// and the popularity counts worth reading; none of its optional fields are
/// required.
///
/// # Errors
///
/// Returns [`AbstractorError::DigestError`] for malformed JSON and
/// [`AbstractorError::MissingField`] when the title, author, word count or
/// rating is absent.
pub fn parse_digest(json: &str, link: &str, config: &ExtractConfig) -> Result<FicMetadata> {
    let response: DigestResponse = serde_json::from_str(json)?;
    let meta = response.meta;

    if meta.title.trim().is_empty() {
        return Err(AbstractorError::MissingField { field: "title" });
    }
    if meta.author.trim().is_empty() {
        return Err(AbstractorError::MissingField { field: "author" });
    }
    let words = meta.words.as_ref().ok_or(AbstractorError::MissingField { field: "words" })?;

    let stats: FfnStats = classify(&tokenize(meta.extra_meta.as_deref().unwrap_or_default()), &DIGEST_EXTRA_META)?;
    debug!(genre = ?stats.genre, "classified digest extra meta");

    let chapters = meta.chapters.as_ref().map(Count::to_string).unwrap_or_else(|| "1".to_string());
    let complete = meta.status.eq_ignore_ascii_case("complete");
    let summary = Some(strip_paragraph(&meta.description))
        .filter(|s| !s.is_empty())
        .map(|s| match config.summary.max_chars {
            Some(max) => cap_chars(&s, max),
            None => s,
        });

    Ok(FicMetadata {
        site: Site::Ffn,
        title: meta.title.trim().to_string(),
        link: link.to_string(),
        authors: vec![meta.author.trim().to_string()],
        fandoms: Vec::new(),
        rating: stats.rating,
        category: stats.genre,
        warnings: None,
        relationships: None,
        characters: stats.characters.map(|c| vec![c]),
        freeform_tags: None,
        series_memberships: Vec::new(),
        word_count: words.to_string(),
        chapter_progress: ChapterProgress::from_count(&chapters, complete),
        popularity_count: stats.favs,
        updated_date: meta.updated.replacen('T', " ", 1),
        summary,
    })
}

fn strip_paragraph(description: &str) -> String {
    let trimmed = description.trim();
    let inner = trimmed.strip_prefix("<p>").unwrap_or(trimmed);
    inner.strip_suffix("</p>").unwrap_or(inner).trim().to_string()
}
