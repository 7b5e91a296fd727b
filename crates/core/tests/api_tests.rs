//! Library API integration tests
use std::collections::HashMap;
use std::sync::Mutex;

use abstractor_core::*;

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

fn fixture(name: &str) -> String {
    std::fs::read_to_string(get_fixture_path(name)).unwrap()
}

/// Serves fixtures by URL and records every request.
#[derive(Default)]
struct StubFetcher {
    pages: HashMap<String, Result<Page>>,
    requests: Mutex<Vec<String>>,
}

impl StubFetcher {
    fn page(mut self, url: &str, fixture_name: &str) -> Self {
        self.pages.insert(url.to_string(), Ok(Page::new(url, fixture(fixture_name))));
        self
    }

    fn redirect(mut self, url: &str, final_url: &str) -> Self {
        self.pages.insert(url.to_string(), Ok(Page::new(final_url, "<html><body>Log in</body></html>")));
        self
    }

    fn failing(mut self, url: &str, error: AbstractorError) -> Self {
        self.pages.insert(url.to_string(), Err(error));
        self
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Fetch for StubFetcher {
    async fn fetch(&self, url: &str) -> Result<Page> {
        self.requests.lock().unwrap().push(url.to_string());
        match self.pages.get(url) {
            Some(Ok(page)) => Ok(page.clone()),
            Some(Err(AbstractorError::Challenge { url })) => Err(AbstractorError::Challenge { url: url.clone() }),
            Some(Err(_)) | None => Err(AbstractorError::HttpStatus { status: 404, url: url.to_string() }),
        }
    }
}

const WORK: &str = "https://archiveofourown.org/works/1";
const SERIES: &str = "https://archiveofourown.org/series/777";
const STORY: &str = "https://www.fanfiction.net/s/12345";
const DIGEST: &str = "https://fichub.net/api/v0/epub?q=https%3A%2F%2Fwww.fanfiction.net%2Fs%2F12345";

fn link(url: &str) -> FicLink {
    parse_link(url).unwrap()
}

#[tokio::test]
async fn test_minimal_work_end_to_end() {
    let abstractor = Abstractor::new(StubFetcher::default().page(WORK, "ao3/work.html"), BotConfig::default());
    let summary = abstractor.summarize(&link(WORK)).await;

    assert_eq!(
        summary,
        "**Example** (<https://archiveofourown.org/works/1>) by **Jane**\n\
         **Fandoms:** Harry Potter\n\
         **Rating:** General Audiences\n\
         **Warnings:** No Archive Warnings Apply\n\
         **Words:** 1,234 **Chapters:** 1/1 **Kudos:** 10 **Updated:** 2021-01-01"
    );
}

#[tokio::test]
async fn test_chapter_link_matches_work_link() {
    let chapter = "https://archiveofourown.org/works/1/chapters/5";
    let fetcher = StubFetcher::default().page(WORK, "ao3/work.html").page(chapter, "ao3/chapter.html");
    let abstractor = Abstractor::new(fetcher, BotConfig::default());

    let from_work = abstractor.summarize(&link(WORK)).await;
    let from_chapter = abstractor.summarize(&link(chapter)).await;

    assert!(!from_chapter.is_empty());
    assert_eq!(from_chapter, from_work);
    assert!(!from_chapter.contains("Chapter summary"));
}

#[test]
fn test_full_work_extraction() {
    let doc = Document::parse(&fixture("ao3/work_full.html"));
    let fic = ao3::extract_work(&doc, "https://archiveofourown.org/works/2002", &ExtractConfig::default()).unwrap();

    assert_eq!(fic.authors, vec!["Jane", "Joe"]);
    assert_eq!(fic.category.as_deref(), Some("F/M, Gen"));
    assert_eq!(fic.fandoms.len(), 2);
    assert_eq!(fic.series_memberships.len(), 1);
    assert_eq!(fic.series_memberships[0].position, 2);
    assert_eq!(fic.series_memberships[0].series_name, "Grimmauld Nights");
    assert_eq!(fic.series_memberships[0].series_link, SERIES);
    assert_eq!(fic.chapter_progress.to_string(), "12/?");
    assert_eq!(fic.popularity_count, "1,024");
    assert_eq!(fic.updated_date, "2020-09-15");
    assert_eq!(
        fic.summary.as_deref(),
        Some("Sirius teaches Harry the constellations.\nRemus brings the tea.\n\n- one roof\n- two dogs\n\nThird paragraph.")
    );

    let out = format_work(&fic, &FormatConfig::default());
    assert!(out.contains("**Part 2** of the **Grimmauld Nights** series (<https://archiveofourown.org/series/777>)"));
    assert!(out.contains("**Rating:** Teen And Up Audiences          **Category:** F/M, Gen"));
    assert!(out.contains("**Relationships:** Sirius Black/Remus Lupin, Harry Potter & Hermione Granger\n"));
    assert!(out.contains("**Additional Characters:** Kreacher (Harry Potter), Newt Scamander\n"));
    assert!(out.contains("**Tags:** Fluff, Found Family, Stargazing, Post-War, Slow Burn, …\n"));
    assert!(!out.contains("Fourth paragraph"));
}

#[tokio::test]
async fn test_series_summary() {
    let abstractor = Abstractor::new(StubFetcher::default().page(SERIES, "ao3/series.html"), BotConfig::default());
    let summary = abstractor.summarize(&link(SERIES)).await;
    let lines: Vec<&str> = summary.lines().collect();

    assert_eq!(lines[0], "**Grimmauld Nights** (<https://archiveofourown.org/series/777>) by **Jane, Joe**");
    assert_eq!(lines[1], "**Description:** Evenings at number twelve.");
    assert_eq!(lines[2], "");
    assert_eq!(lines[3], "Mostly tea.");
    assert_eq!(lines[4], "**Notes:** Read in any order.");
    assert_eq!(lines[5], "**Begun:** 2019-12-01 **Updated:** 2021-02-02");
    assert_eq!(lines[6], "**Words:** 98,765 **Works:** 5 **Complete:** No");
    assert_eq!(lines[7], "");
    assert_eq!(lines[8], "1. __First Light__: <https://archiveofourown.org/works/2001>");
    assert_eq!(lines[10], "3. __Kettle On__: <https://archiveofourown.org/works/2003>");
    assert_eq!(lines[11], "        [and 2 more works]");
    assert_eq!(lines.len(), 12);
}

#[test]
fn test_series_navigation() {
    let html = fixture("ao3/series.html");

    assert_eq!(ao3::navigate_series(&html, 1).unwrap(), "https://archiveofourown.org/works/2001");
    assert_eq!(ao3::navigate_series(&html, 5).unwrap(), "https://archiveofourown.org/works/2005");
    assert!(matches!(
        ao3::navigate_series(&html, 6),
        Err(AbstractorError::SeriesOrdinalOutOfRange { ordinal: 6, count: 5 })
    ));
}

#[test]
fn test_four_member_series_rejects_fifth() {
    let html = fixture("ao3/series.html")
        .replace(r#"<dd class="works">5</dd>"#, r#"<dd class="works">4</dd>"#)
        .replace(
            r#"<a href="/works/2005">Dawn</a> by <a rel="author" href="/users/Jane/pseuds/Jane">Jane</a>"#,
            "",
        );

    assert!(ao3::navigate_series(&html, 4).is_ok());
    assert!(matches!(
        ao3::navigate_series(&html, 5),
        Err(AbstractorError::SeriesOrdinalOutOfRange { ordinal: 5, .. })
    ));
}

#[tokio::test]
async fn test_reaction_resolves_series_member() {
    let fetcher = StubFetcher::default()
        .page(SERIES, "ao3/series.html")
        .page("https://archiveofourown.org/works/2002", "ao3/work_full.html");
    let abstractor = Abstractor::new(fetcher, BotConfig::default());

    let series_summary = abstractor.summarize(&link(SERIES)).await;
    let summary = abstractor.summary_for_reaction(&series_summary, "2️⃣", Some(1)).await;

    assert!(summary.starts_with("**Stars Over Grimmauld** (<https://archiveofourown.org/works/2002>)"));
}

#[tokio::test]
async fn test_reaction_out_of_range_is_silent() {
    let abstractor = Abstractor::new(StubFetcher::default().page(SERIES, "ao3/series.html"), BotConfig::default());
    let series_summary = abstractor.summarize(&link(SERIES)).await;

    assert_eq!(abstractor.summary_for_reaction(&series_summary, "🔟", None).await, "");
}

#[tokio::test]
async fn test_reactions_disabled_for_guild() {
    let mut config = BotConfig::default();
    config.add_directive(Directive::ServerNoReacts(3));
    let fetcher = StubFetcher::default().page(SERIES, "ao3/series.html");
    let abstractor = Abstractor::new(fetcher, config);
    let series_summary = abstractor.summarize(&link(SERIES)).await;

    assert_eq!(abstractor.summary_for_reaction(&series_summary, "1️⃣", Some(3)).await, "");
}

#[tokio::test]
async fn test_restricted_work_is_silent() {
    let fetcher =
        StubFetcher::default().redirect(WORK, "https://archiveofourown.org/users/login?restricted=true");
    let abstractor = Abstractor::new(fetcher, BotConfig::default());

    assert_eq!(abstractor.summarize(&link(WORK)).await, "");
    assert!(matches!(abstractor.try_summarize(&link(WORK)).await, Err(AbstractorError::Restricted { .. })));
}

#[tokio::test]
async fn test_ffn_story_page() {
    let abstractor = Abstractor::new(StubFetcher::default().page(STORY, "ffn/story.html"), BotConfig::default());
    let summary = abstractor.summarize(&link(STORY)).await;

    assert_eq!(
        summary,
        "**The Long Road** (<https://www.fanfiction.net/s/12345>) by **Scribe**\n\
         **Fandoms:** Harry Potter\n\
         **Rating:** T          **Genre:** Adventure/Friendship\n\
         **Characters:** Ginny W., Luna L.\n\
         **Summary:** Ginny walks from Ottery St Catchpole to London. It takes the whole summer.\n\
         **Words:** 48,210 **Chapters:** 12/12 **Favs:** 301 **Updated:** 9/1/2020"
    );
}

#[tokio::test]
async fn test_ffn_falls_back_to_digest() {
    let fetcher = StubFetcher::default()
        .failing(STORY, AbstractorError::Challenge { url: STORY.to_string() })
        .page(DIGEST, "ffn/digest.json");
    let abstractor = Abstractor::new(fetcher, BotConfig::default());
    let summary = abstractor.summarize(&link(STORY)).await;

    assert!(summary.starts_with("**The Long Road** (<https://www.fanfiction.net/s/12345>) by **Scribe**\n"));
    assert!(summary.contains("**Rating:** T          **Genre:** Adventure/Friendship\n"));
    assert!(summary.ends_with("**Words:** 48210 **Chapters:** 12/12 **Favs:** 301 **Updated:** 2020-09-01 22:40:00"));
    assert_eq!(abstractor.fetcher().requests(), vec![STORY.to_string(), DIGEST.to_string()]);
}

#[tokio::test]
async fn test_challenge_body_falls_back_to_digest() {
    let fetcher = StubFetcher::default().page(STORY, "ffn/challenge.html").page(DIGEST, "ffn/digest.json");
    let abstractor = Abstractor::new(fetcher, BotConfig::default());

    assert!(abstractor.summarize(&link(STORY)).await.contains("**Favs:** 301"));
}

#[tokio::test]
async fn test_mobile_link_degrades_when_everything_fails() {
    let abstractor = Abstractor::new(StubFetcher::default(), BotConfig::default());
    let mobile = link("https://m.fanfiction.net/s/12345");

    assert_eq!(abstractor.summarize(&mobile).await, STORY);
    assert_eq!(abstractor.summarize(&link(STORY)).await, "");
}

#[tokio::test]
async fn test_message_dedup_and_caps() {
    let fetcher = StubFetcher::default().page(WORK, "ao3/work.html").page(STORY, "ffn/story.html");
    let abstractor = Abstractor::new(fetcher, BotConfig::default());

    let text = "read https://archiveofourown.org/works/1 and https://archiveofourown.org/series/777 \
                and https://www.fanfiction.net/s/12345";
    let summaries = abstractor.summaries_for_message(text).await;

    assert_eq!(summaries.len(), 2);
    assert!(summaries[0].starts_with("**Example**"));
    assert!(summaries[1].starts_with("**The Long Road**"));
}

#[tokio::test]
async fn test_collection_link_deduplicated() {
    let collection = "https://archiveofourown.org/collections/fest/works/1";
    let fetcher = StubFetcher::default().page(WORK, "ao3/work.html").page(collection, "ao3/work.html");
    let mut config = BotConfig::default();
    config.add_directive(Directive::MaxLinksPerSite(5));
    let abstractor = Abstractor::new(fetcher, config);

    let summaries = abstractor.summaries_for_message(&format!("{} {}", WORK, collection)).await;
    assert_eq!(summaries.len(), 1);
}

#[tokio::test]
async fn test_failing_link_does_not_block_others() {
    let fetcher = StubFetcher::default().page(STORY, "ffn/story.html");
    let abstractor = Abstractor::new(fetcher, BotConfig::default());

    let summaries = abstractor.summaries_for_message(&format!("{} {}", WORK, STORY)).await;
    assert_eq!(summaries.len(), 1);
    assert!(summaries[0].starts_with("**The Long Road**"));
}

#[test]
fn test_opt_out_link_is_not_detected() {
    assert!(find_links(&format!("!{}", WORK)).is_empty());
}

#[test]
fn test_introduction() {
    let intro = introduction(None, &BotConfig::default());
    assert!(intro.starts_with("Hello, I'm Fanfiction Abstractor!"));
    assert!(intro.contains("react with the fic's number"));
}
