//! AO3 series pages.
//!
//! The series preface is a flat `dl` of label/value pairs where only some
//! labels ("Description:", "Notes:") are conditionally present. Instead of
//! class lookups it is read with [`SeriesWalker`], a cursor that runs over
//! [`SERIES_LAYOUT`] in order and peeks each optional label before deciding
//! whether to consume the value that follows it.

use std::collections::HashMap;

use tracing::debug;

use crate::ao3::absolute_link;
use crate::extract::ExtractConfig;
use crate::models::{MemberStub, SeriesMetadata};
use crate::parse::{Document, Element};
use crate::sanitize::sanitize_element;
use crate::{AbstractorError, Result};

/// Fields of the series preface, in page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeriesField {
    Creator,
    Begun,
    Updated,
    Description,
    Notes,
    Stats,
}

/// How a field shows up in the preface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Always present; the next value is taken without reading its label.
    Fixed,
    /// Present only when the current label reads exactly this text.
    Labeled(&'static str),
}

/// Field order of the series preface.
pub const SERIES_LAYOUT: &[(SeriesField, Presence)] = &[
    (SeriesField::Creator, Presence::Fixed),
    (SeriesField::Begun, Presence::Fixed),
    (SeriesField::Updated, Presence::Fixed),
    (SeriesField::Description, Presence::Labeled("Description:")),
    (SeriesField::Notes, Presence::Labeled("Notes:")),
    (SeriesField::Stats, Presence::Fixed),
];

/// Cursor over the `dt`/`dd` children of a definition list.
#[derive(Debug)]
pub struct SeriesWalker<'a> {
    nodes: Vec<Element<'a>>,
    pos: usize,
}

impl<'a> SeriesWalker<'a> {
    pub fn new(list: &Element<'a>) -> Self {
        let nodes = list
            .children()
            .into_iter()
            .filter(|el| matches!(el.tag_name().as_str(), "dt" | "dd"))
            .collect();
        Self { nodes, pos: 0 }
    }

    /// Text of the next label, without moving the cursor.
    pub fn peek_label(&self) -> Option<String> {
        self.nodes[self.pos..]
            .iter()
            .find(|el| el.tag_name() == "dt")
            .map(Element::text_trimmed)
    }

    /// Consume and return the next value, skipping its label.
    pub fn next_value(&mut self) -> Option<Element<'a>> {
        let offset = self.nodes[self.pos..].iter().position(|el| el.tag_name() == "dd")?;
        let value = self.nodes[self.pos + offset];
        self.pos += offset + 1;
        Some(value)
    }

    /// Consume the next label/value pair only if the label matches.
    ///
    /// On a mismatch nothing is consumed and the field is absent.
    pub fn take_labeled(&mut self, label: &str) -> Option<Element<'a>> {
        if self.peek_label().as_deref() == Some(label) { self.next_value() } else { None }
    }

    /// Run the walker over `layout`, returning the value node of each field
    /// that is present.
    ///
    /// # Errors
    ///
    /// Returns [`AbstractorError::MissingField`] when a fixed field has no
    /// value left to consume.
    pub fn walk(mut self, layout: &[(SeriesField, Presence)]) -> Result<HashMap<SeriesField, Element<'a>>> {
        let mut found = HashMap::new();
        for &(field, presence) in layout {
            let value = match presence {
                Presence::Fixed => Some(self.next_value().ok_or(AbstractorError::MissingField {
                    field: field.name(),
                })?),
                Presence::Labeled(label) => self.take_labeled(label),
            };
            if let Some(value) = value {
                found.insert(field, value);
            }
        }
        Ok(found)
    }
}

impl SeriesField {
    pub fn name(self) -> &'static str {
        match self {
            SeriesField::Creator => "creator",
            SeriesField::Begun => "series begun",
            SeriesField::Updated => "series updated",
            SeriesField::Description => "description",
            SeriesField::Notes => "notes",
            SeriesField::Stats => "series stats",
        }
    }
}

/// Extract a series record from an AO3 series page.
pub fn extract_series(doc: &Document, link: &str, config: &ExtractConfig) -> Result<SeriesMetadata> {
    let title = doc
        .select_first("h2.heading")?
        .map(|h| h.text_trimmed())
        .filter(|t| !t.is_empty())
        .ok_or(AbstractorError::MissingField { field: "title" })?;

    let meta = doc.require("dl.series.meta.group", "series meta")?;
    let fields = SeriesWalker::new(&meta).walk(SERIES_LAYOUT)?;
    let value = |field: SeriesField| fields.get(&field).copied();

    let authors = value(SeriesField::Creator)
        .map(|dd| dd.link_texts())
        .transpose()?
        .filter(|a| !a.is_empty())
        .ok_or(AbstractorError::MissingField { field: "creator" })?;
    let begun_date = value(SeriesField::Begun).map(|dd| dd.text_trimmed()).unwrap_or_default();
    let updated_date = value(SeriesField::Updated).map(|dd| dd.text_trimmed()).unwrap_or_default();
    let description = value(SeriesField::Description).map(|dd| sanitize_element(dd, &config.series_prose));
    let notes = value(SeriesField::Notes).map(|dd| sanitize_element(dd, &config.series_prose));

    let stats = value(SeriesField::Stats).ok_or(AbstractorError::MissingField { field: "series stats" })?;
    let stats = stats.select("dl.stats dd")?;
    let stat = |i: usize, field: &'static str| {
        stats.get(i).map(|dd| dd.text_trimmed()).ok_or(AbstractorError::MissingField { field })
    };
    let word_count = stat(0, "words")?;
    let work_count = stat(1, "works")?;
    let is_complete = stat(2, "complete")?.eq_ignore_ascii_case("yes");

    Ok(SeriesMetadata {
        title,
        link: link.to_string(),
        authors,
        begun_date,
        updated_date,
        description,
        notes,
        word_count,
        work_count,
        is_complete,
        member_stubs: member_stubs(doc)?,
    })
}

/// Works listed on a series page, in series order.
///
/// Blurbs without a work link (hidden or deleted works) are skipped.
pub fn member_stubs(doc: &Document) -> Result<Vec<MemberStub>> {
    let mut stubs = Vec::new();
    for blurb in doc.select("li.work.blurb.group")? {
        let Some(anchor) = blurb.select_first("h4 a[href*='/works/']")? else {
            continue;
        };
        let Some(href) = anchor.attr("href") else {
            continue;
        };
        stubs.push(MemberStub { title: anchor.text_trimmed(), link: absolute_link(href)? });
    }
    Ok(stubs)
}

/// Link of the `ordinal`-th (1-based) work of a series.
///
/// The declared work count in the series stats bounds the ordinal; the
/// listing itself must also reach that far.
///
/// # Errors
///
/// Returns [`AbstractorError::SeriesOrdinalOutOfRange`] for an ordinal of 0
/// or one past the end of the series.
pub fn find_series_work(doc: &Document, ordinal: usize) -> Result<String> {
    let meta = doc.require("dl.series.meta.group", "series meta")?;
    let declared = meta
        .select("dl.stats dd")?
        .get(1)
        .map(|dd| dd.text_trimmed().replace(',', ""))
        .and_then(|count| count.parse::<usize>().ok())
        .ok_or(AbstractorError::MissingField { field: "works" })?;

    if ordinal == 0 || ordinal > declared {
        return Err(AbstractorError::SeriesOrdinalOutOfRange { ordinal, count: declared });
    }

    let stubs = member_stubs(doc)?;
    match stubs.get(ordinal - 1) {
        Some(stub) => {
            debug!(ordinal, link = %stub.link, "resolved series member");
            Ok(stub.link.clone())
        }
        None => Err(AbstractorError::SeriesOrdinalOutOfRange { ordinal, count: stubs.len() }),
    }
}
