use tracing::debug;

use crate::extract::ExtractConfig;
use crate::ffn::classifier::{STORY_STATS, classify, tokenize};
use crate::models::{ChapterProgress, FicMetadata, Site};
use crate::parse::Document;
use crate::sanitize::sanitize_element;
use crate::{AbstractorError, Result};

/// Extract a work record from an FFN story page.
///
/// The fandom is the last breadcrumb link, and everything else lives in the
/// `#profile_top` header. FFN has no warnings, relationships, tags or
/// series, so those fields stay empty.
///
/// # Errors
///
/// Returns [`AbstractorError::MissingField`] when the header, title, author
/// or word count is absent, or when the story has neither an update nor a
/// publication date.
pub fn extract_story(doc: &Document, link: &str, config: &ExtractConfig) -> Result<FicMetadata> {
    let profile = doc.require("#profile_top", "story header")?;

    let title = profile
        .select_first("b.xcontrast_txt")?
        .map(|b| b.text_trimmed())
        .filter(|t| !t.is_empty())
        .ok_or(AbstractorError::MissingField { field: "title" })?;
    let author = profile
        .select_first("a[href^='/u/']")?
        .map(|a| a.text_trimmed())
        .filter(|a| !a.is_empty())
        .ok_or(AbstractorError::MissingField { field: "author" })?;
    let summary = profile
        .select_first("div.xcontrast_txt")?
        .map(|div| sanitize_element(div, &config.summary))
        .filter(|s| !s.is_empty());

    let fandoms: Vec<String> = doc
        .select("#pre_story_links a")?
        .last()
        .map(|a| a.text_trimmed())
        .into_iter()
        .filter(|f| !f.is_empty())
        .collect();

    let stats_line = profile
        .select_first("span.xgray")?
        .map(|span| span.text())
        .ok_or(AbstractorError::MissingField { field: "stats" })?;
    let tokens = tokenize(&stats_line);
    debug!(tokens = tokens.len(), "classifying story stats");
    let stats = classify(&tokens, &STORY_STATS)?;

    let updated_date = stats
        .updated_or_published()
        .map(str::to_string)
        .ok_or(AbstractorError::MissingField { field: "published" })?;

    Ok(FicMetadata {
        site: Site::Ffn,
        title,
        link: link.to_string(),
        authors: vec![author],
        fandoms,
        rating: stats.rating,
        category: stats.genre,
        warnings: None,
        relationships: None,
        characters: stats.characters.map(|c| vec![c]),
        freeform_tags: None,
        series_memberships: Vec::new(),
        word_count: stats.words,
        chapter_progress: ChapterProgress::from_count(&stats.chapters, stats.complete),
        popularity_count: stats.favs,
        updated_date,
        summary,
    })
}
