//! Link detection and normalization for chat messages.
//!
//! A link written directly after `!` is an opt-out and never matches.

use std::sync::LazyLock;

use regex::Regex;

use crate::ffn::story_link;
use crate::models::Site;

/// AO3 work, chapter and series links, optionally collection-scoped.
static AO3_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:^|[^!])(https?://(?:www\.)?archiveofourown\.org(?:/collections/\w+)?/(?:works/\d+(?:/chapters/\d+)?|series/\d+))",
    )
    .expect("valid regex")
});

/// FFN story links on the desktop or mobile host.
static FFN_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|[^!])https?://(?:(www|m)\.)?fanfiction\.net/s/(\d+)").expect("valid regex")
});

static COLLECTION_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/collections/[^/]+").expect("valid regex"));

/// What a detected link points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkKind {
    Ao3Work,
    Ao3Series,
    FfnStory,
}

impl LinkKind {
    pub fn site(self) -> Site {
        match self {
            LinkKind::Ao3Work | LinkKind::Ao3Series => Site::Ao3,
            LinkKind::FfnStory => Site::Ffn,
        }
    }
}

/// A detected, normalized link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FicLink {
    pub kind: LinkKind,
    /// Normalized link, still collection- or chapter-scoped if written so.
    pub link: String,
    /// The link was written against FFN's mobile host.
    pub mobile: bool,
}

impl FicLink {
    /// Link used to spot the same work twice in one message.
    pub fn base_link(&self) -> String {
        base_link(&self.link)
    }
}

/// All links in `text`: AO3 links first, then FFN links, each in order of
/// appearance.
pub fn find_links(text: &str) -> Vec<FicLink> {
    let mut links: Vec<FicLink> = AO3_LINK
        .captures_iter(text)
        .map(|caps| {
            let link = normalize_ao3(&caps[1]);
            let kind = if link.contains("/series/") { LinkKind::Ao3Series } else { LinkKind::Ao3Work };
            FicLink { kind, link, mobile: false }
        })
        .collect();

    links.extend(FFN_LINK.captures_iter(text).map(|caps| FicLink {
        kind: LinkKind::FfnStory,
        link: story_link(&caps[2]),
        mobile: caps.get(1).is_some_and(|host| host.as_str().eq_ignore_ascii_case("m")),
    }));

    links
}

/// The single link in `url`, if it is one the abstractor handles.
pub fn parse_link(url: &str) -> Option<FicLink> {
    find_links(url.trim()).into_iter().next()
}

/// Lowercase, force `https` and drop `www.` from an AO3 link.
pub fn normalize_ao3(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let rest = lowered
        .strip_prefix("https://")
        .or_else(|| lowered.strip_prefix("http://"))
        .unwrap_or(&lowered);
    let rest = rest.strip_prefix("www.").unwrap_or(rest);
    format!("https://{}", rest)
}

/// `link` with its `/collections/<name>` segment removed.
pub fn base_link(link: &str) -> String {
    COLLECTION_SEGMENT.replace(link, "").into_owned()
}
