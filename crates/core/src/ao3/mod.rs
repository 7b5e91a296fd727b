//! Archive of Our Own extraction.
//!
//! AO3 pages use stable, class-labeled markup: every work field lives in a
//! `dd` with a descriptive class under `dl.work.meta.group`, and the presence
//! of that node is the presence test for the field. Series pages are the
//! exception, see [`series`].

pub mod series;
pub mod work;

pub use series::{SeriesField, SeriesWalker, extract_series, find_series_work, member_stubs};
pub use work::{extract_work, resolve_chapter_link};

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::parse::Document;
use crate::{AbstractorError, Result};

/// Scheme and host every AO3 link is resolved against.
pub const ARCHIVE_ROOT: &str = "https://archiveofourown.org";

/// Where AO3 redirects anonymous visitors of archive-locked works.
pub const RESTRICTED_LOGIN_URL: &str = "https://archiveofourown.org/users/login?restricted=true";

static WORK_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/works/(\d+)").expect("valid regex"));

/// True for links that address a single chapter rather than the work.
pub fn is_chapter_link(link: &str) -> bool {
    link.contains("/chapters/")
}

/// Canonical work link for a work id.
pub fn work_link(id: &str) -> String {
    format!("{}/works/{}", ARCHIVE_ROOT, id)
}

/// Work id embedded in an AO3 path or URL.
pub fn work_id(href: &str) -> Option<&str> {
    WORK_ID.captures(href).and_then(|c| c.get(1)).map(|m| m.as_str())
}

/// Resolve a site-relative href into an absolute AO3 link.
pub fn absolute_link(href: &str) -> Result<String> {
    let base = Url::parse(ARCHIVE_ROOT).map_err(|e| AbstractorError::InvalidUrl(e.to_string()))?;
    base.join(href.trim())
        .map(String::from)
        .map_err(|e| AbstractorError::InvalidUrl(format!("{}: {}", href, e)))
}

/// Find the link of the `ordinal`-th work of a series page given as HTML.
///
/// Convenience wrapper around [`find_series_work`].
pub fn navigate_series(html: &str, ordinal: usize) -> Result<String> {
    let doc = Document::parse(html);
    find_series_work(&doc, ordinal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_work_id_from_share_href() {
        assert_eq!(work_id("/works/12345/share"), Some("12345"));
        assert_eq!(work_id("/works/12345/chapters/678"), Some("12345"));
        assert_eq!(work_id("/series/1"), None);
    }

    #[test]
    fn test_absolute_link() {
        assert_eq!(absolute_link("/series/42").unwrap(), "https://archiveofourown.org/series/42");
        assert_eq!(
            absolute_link("https://archiveofourown.org/works/1").unwrap(),
            "https://archiveofourown.org/works/1"
        );
    }

    #[test]
    fn test_chapter_link_detection() {
        assert!(is_chapter_link("https://archiveofourown.org/works/1/chapters/2"));
        assert!(!is_chapter_link("https://archiveofourown.org/works/1"));
    }
}
