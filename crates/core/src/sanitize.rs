//! Rich-text to chat-markdown conversion for summaries and series notes.
//!
//! Prose fields arrive as a small HTML fragment: paragraphs, line breaks,
//! lists and one enclosing `<blockquote>`. The sanitizer flattens that into
//! plain text with `- ` bullet lines and blank lines between paragraphs,
//! then applies the paragraph and length caps from [`SanitizeConfig`].

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Node};

use crate::parse::{Document, Element};

/// Runs of three or more newlines, collapsed to one blank line.
static NEWLINE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

/// Appended when a summary is cut short.
pub const ELLIPSIS: char = '…';

/// Caps applied to sanitized prose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizeConfig {
    /// Paragraphs kept; later ones are dropped without a marker.
    pub max_paragraphs: usize,
    /// Hard character cap, `None` for uncapped prose.
    pub max_chars: Option<usize>,
}

impl SanitizeConfig {
    /// Work summaries: three paragraphs and 250 characters.
    pub fn summary() -> Self {
        Self { max_paragraphs: 3, max_chars: Some(250) }
    }

    /// Series descriptions and notes: three paragraphs, no length cap.
    pub fn series_prose() -> Self {
        Self { max_paragraphs: 3, max_chars: None }
    }
}

impl Default for SanitizeConfig {
    fn default() -> Self {
        Self::summary()
    }
}

/// Sanitize an HTML fragment given as a string.
pub fn sanitize_html(html: &str, config: &SanitizeConfig) -> String {
    let doc = Document::parse_fragment(html);
    sanitize_element(doc.root(), config)
}

/// Sanitize the prose held inside `field`.
///
/// Only block-level nodes inside the quoted block are kept. When the
/// fragment has no `<blockquote>`, the field itself is the container.
pub fn sanitize_element(field: Element<'_>, config: &SanitizeConfig) -> String {
    let container = if field.tag_name() == "blockquote" {
        field.element_ref()
    } else {
        match field.select_first("blockquote") {
            Ok(Some(quote)) => quote.element_ref(),
            _ => field.element_ref(),
        }
    };

    let mut blocks = Vec::new();
    collect_blocks(container, &mut blocks);
    if blocks.is_empty() {
        blocks.push(render_text(container));
    }

    let joined = blocks.iter().map(|b| b.trim()).collect::<Vec<_>>().join("\n\n");
    let collapsed = NEWLINE_RUNS.replace_all(joined.trim(), "\n\n").to_string();

    let capped = cap_paragraphs(&collapsed, config.max_paragraphs);
    let capped = match config.max_chars {
        Some(max) => cap_chars(&capped, max),
        None => capped,
    };

    capped.trim().to_string()
}

/// Gather paragraph-level blocks in document order.
///
/// Lists count as one block each, rendered as `- ` lines. Nested lists are
/// not walked into separately.
fn collect_blocks(parent: ElementRef<'_>, blocks: &mut Vec<String>) {
    for child in parent.children().filter_map(ElementRef::wrap) {
        match child.value().name() {
            "p" => blocks.push(render_text(child)),
            "ul" | "ol" => blocks.push(render_list(child)),
            _ => collect_blocks(child, blocks),
        }
    }
}

fn render_list(list: ElementRef<'_>) -> String {
    list.children()
        .filter_map(ElementRef::wrap)
        .filter(|item| item.value().name() == "li")
        .map(|item| format!("- {}", render_text(item).trim()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Text of an element with `<br>` turned into newlines.
fn render_text(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) if el.name() == "br" => out.push('\n'),
            Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(child) {
                    out.push_str(&render_text(child));
                }
            }
            _ => {}
        }
    }
    out
}

fn cap_paragraphs(text: &str, max: usize) -> String {
    let paragraphs: Vec<&str> = text.split("\n\n").collect();
    if paragraphs.len() > max { paragraphs[..max].join("\n\n") } else { text.to_string() }
}

/// Cut to `max` characters, appending [`ELLIPSIS`] when anything was dropped.
pub fn cap_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max).collect();
    cut.truncate(cut.trim_end().len());
    cut.push(ELLIPSIS);
    cut
}
