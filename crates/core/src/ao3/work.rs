use tracing::debug;

use crate::ao3::{absolute_link, is_chapter_link, work_id, work_link};
use crate::extract::ExtractConfig;
use crate::models::{ChapterProgress, FicMetadata, SeriesMembership, Site};
use crate::parse::{Document, Element};
use crate::sanitize::sanitize_element;
use crate::{AbstractorError, Result};

/// Extract a work record from an AO3 work or chapter page.
///
/// When `link` addresses a chapter, the canonical work link is recovered
/// from the page's share control first, so the record never carries a
/// chapter link.
///
/// # Errors
///
/// Returns [`AbstractorError::MissingField`] when the title, author,
/// rating, word count, chapter count or publication date is absent.
pub fn extract_work(doc: &Document, link: &str, config: &ExtractConfig) -> Result<FicMetadata> {
    let link = if is_chapter_link(link) { resolve_chapter_link(doc)? } else { link.to_string() };

    let preface = doc.require(".preface.group:not(.chapter)", "preface")?;
    let title = preface
        .select_first("h2.title")?
        .map(|h| h.text_trimmed())
        .filter(|t| !t.is_empty())
        .ok_or(AbstractorError::MissingField { field: "title" })?;
    let authors = byline_authors(&preface)?;
    let summary = preface
        .select_first(".summary.module")?
        .map(|el| sanitize_element(el, &config.summary));

    let meta = doc.require("dl.work.meta.group", "work meta")?;
    let rating = tag_list(&meta, "dd.rating.tags")?
        .map(|r| r.join(", "))
        .ok_or(AbstractorError::MissingField { field: "rating" })?;
    let category = tag_list(&meta, "dd.category.tags")?.map(|c| c.join(", "));
    let fandoms = tag_list(&meta, "dd.fandom.tags")?.unwrap_or_default();
    let warnings = tag_list(&meta, "dd.warning.tags")?;
    let relationships = tag_list(&meta, "dd.relationship.tags")?;
    let characters = tag_list(&meta, "dd.character.tags")?;
    let freeform_tags = tag_list(&meta, "dd.freeform.tags")?;

    let series_memberships = match meta.select_first("dd.series")? {
        Some(series) => series_positions(&series, config.max_series_memberships)?,
        None => Vec::new(),
    };

    let word_count = stat(&meta, "dd.words")?.ok_or(AbstractorError::MissingField { field: "words" })?;
    let chapters = stat(&meta, "dd.chapters")?.ok_or(AbstractorError::MissingField { field: "chapters" })?;
    let popularity_count = stat(&meta, "dd.kudos")?.unwrap_or_else(|| "0".to_string());
    let updated_date = match stat(&meta, "dd.status")? {
        Some(updated) => updated,
        None => stat(&meta, "dd.published")?.ok_or(AbstractorError::MissingField { field: "published" })?,
    };

    Ok(FicMetadata {
        site: Site::Ao3,
        title,
        link,
        authors,
        fandoms,
        rating,
        category,
        warnings,
        relationships,
        characters,
        freeform_tags,
        series_memberships,
        word_count,
        chapter_progress: ChapterProgress::parse(&chapters),
        popularity_count,
        updated_date,
        summary,
    })
}

/// Recover the canonical work link from a chapter page's share control.
pub fn resolve_chapter_link(doc: &Document) -> Result<String> {
    let href = doc
        .select(".share a")?
        .iter()
        .filter_map(|a| a.attr("href"))
        .find(|href| work_id(href).is_some())
        .ok_or(AbstractorError::MissingField { field: "share link" })?;
    let id = work_id(href).ok_or(AbstractorError::MissingField { field: "share link" })?;
    debug!(work_id = id, "resolved chapter link to work");
    Ok(work_link(id))
}

/// Authors from the byline: the linked pseuds, or the bare label when the
/// work has none (e.g. "Anonymous").
fn byline_authors(preface: &Element<'_>) -> Result<Vec<String>> {
    let byline = preface
        .select_first("h3.byline")?
        .ok_or(AbstractorError::MissingField { field: "author" })?;
    let linked = byline.link_texts()?;
    if !linked.is_empty() {
        return Ok(linked);
    }
    let label = byline.text_trimmed();
    if label.is_empty() { Err(AbstractorError::MissingField { field: "author" }) } else { Ok(vec![label]) }
}

fn tag_list(meta: &Element<'_>, selector: &str) -> Result<Option<Vec<String>>> {
    meta.select_first(selector)?.map(|dd| dd.link_texts()).transpose()
}

fn stat(meta: &Element<'_>, selector: &str) -> Result<Option<String>> {
    Ok(meta.select_first(selector)?.map(|dd| dd.text_trimmed()))
}

/// Parse up to `cap` "Part N of the NAME series" markers.
///
/// The marker text is split on whitespace: token 1 is the position and
/// tokens 4 up to the last one form the series name.
fn series_positions(series: &Element<'_>, cap: usize) -> Result<Vec<SeriesMembership>> {
    let mut memberships = Vec::new();
    for marker in series.select(".position")?.into_iter().take(cap) {
        let text = marker.text();
        let tokens: Vec<&str> = text.split_whitespace().collect();
        if tokens.len() < 6 {
            debug!(marker = %text.trim(), "skipping unrecognized series marker");
            continue;
        }
        let Ok(position) = tokens[1].parse::<u32>() else {
            debug!(marker = %text.trim(), "series marker without a position");
            continue;
        };
        let Some(href) = marker.select_first("a")?.and_then(|a| a.attr("href")) else {
            continue;
        };
        memberships.push(SeriesMembership {
            position,
            series_name: tokens[4..tokens.len() - 1].join(" "),
            series_link: absolute_link(href)?,
        });
    }
    Ok(memberships)
}
