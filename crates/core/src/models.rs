//! Metadata records produced by extraction and consumed by the formatters.
//!
//! Records are built fresh for every link, rendered once and dropped.

use std::fmt;

/// Which archive a record came from.
///
/// The site decides a handful of labels in the rendered summary: the
/// category line reads "Category" on AO3 and "Genre" on FFN, and the
/// popularity counter is "Kudos" or "Favs".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Site {
    Ao3,
    Ffn,
}

impl Site {
    pub fn category_label(self) -> &'static str {
        match self {
            Site::Ao3 => "Category",
            Site::Ffn => "Genre",
        }
    }

    pub fn popularity_label(self) -> &'static str {
        match self {
            Site::Ao3 => "Kudos",
            Site::Ffn => "Favs",
        }
    }
}

/// One "Part N of the X series" entry on a work page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesMembership {
    /// 1-based position of the work in the series.
    pub position: u32,
    pub series_name: String,
    pub series_link: String,
}

/// Chapter progress, e.g. `3/10` or `3/?` for works without a planned total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterProgress {
    pub current: String,
    pub total: Option<String>,
}

impl ChapterProgress {
    /// Parses AO3's `current/total` notation, where the total may be `?`.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.split_once('/') {
            Some((current, total)) => {
                let total = total.trim();
                Self {
                    current: current.trim().to_string(),
                    total: if total == "?" || total.is_empty() { None } else { Some(total.to_string()) },
                }
            }
            None => Self { current: raw.to_string(), total: None },
        }
    }

    /// Progress for a work whose only chapter figure is the published count.
    pub fn from_count(count: &str, complete: bool) -> Self {
        Self { current: count.to_string(), total: complete.then(|| count.to_string()) }
    }
}

impl fmt::Display for ChapterProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.current, self.total.as_deref().unwrap_or("?"))
    }
}

/// Metadata for one fan-fiction work.
///
/// Counts are kept exactly as the site prints them (`"1,234"`), since they
/// are only ever displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FicMetadata {
    pub site: Site,
    pub title: String,
    /// Canonical work link, never a chapter link.
    pub link: String,
    pub authors: Vec<String>,
    pub fandoms: Vec<String>,
    pub rating: String,
    pub category: Option<String>,
    pub warnings: Option<Vec<String>>,
    pub relationships: Option<Vec<String>>,
    pub characters: Option<Vec<String>>,
    pub freeform_tags: Option<Vec<String>>,
    pub series_memberships: Vec<SeriesMembership>,
    pub word_count: String,
    pub chapter_progress: ChapterProgress,
    pub popularity_count: String,
    /// Last update date, or the publication date for never-updated works.
    pub updated_date: String,
    pub summary: Option<String>,
}

/// A work listed on a series page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberStub {
    pub title: String,
    pub link: String,
}

/// Metadata for one series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesMetadata {
    pub title: String,
    pub link: String,
    pub authors: Vec<String>,
    pub begun_date: String,
    pub updated_date: String,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub word_count: String,
    pub work_count: String,
    pub is_complete: bool,
    pub member_stubs: Vec<MemberStub>,
}
