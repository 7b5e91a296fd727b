//! Link-to-summary orchestration.
//!
//! [`Abstractor`] owns the configuration and a [`Fetch`] implementation and
//! turns chat text into summaries. Every failure is scoped to one link: it
//! is logged for the operator and that link produces an empty string.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info, warn};

use crate::ao3::{self, RESTRICTED_LOGIN_URL};
use crate::config::BotConfig;
use crate::extract::ExtractConfig;
use crate::fetch::Fetch;
use crate::ffn;
use crate::formatters::{FormatConfig, format_series, format_work};
use crate::links::{FicLink, LinkKind, find_links};
use crate::models::Site;
use crate::parse::Document;
use crate::reactions::ordinal_for;
use crate::{AbstractorError, Result};

/// Produces chat summaries for fan-fiction links.
#[derive(Debug)]
pub struct Abstractor<F: Fetch> {
    fetcher: F,
    config: BotConfig,
    extract: ExtractConfig,
    format: FormatConfig,
}

impl<F: Fetch> Abstractor<F> {
    pub fn new(fetcher: F, config: BotConfig) -> Self {
        let extract = config.extract_config();
        let format = config.format_config();
        Self { fetcher, config, extract, format }
    }

    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Summary for one link, or an empty string when nothing should be sent.
    ///
    /// A mobile FFN link whose page could not be fetched degrades to the
    /// canonical desktop link.
    pub async fn summarize(&self, link: &FicLink) -> String {
        match self.try_summarize(link).await {
            Ok(summary) => {
                info!(link = %link.link, "summarized");
                summary
            }
            Err(e) if link.mobile && e.is_fetch_failure() => {
                warn!(link = %link.link, error = %e, "mobile link unavailable, sending desktop link");
                link.link.clone()
            }
            Err(e) => {
                warn!(link = %link.link, error = %e, "failed to summarize");
                String::new()
            }
        }
    }

    /// Summary for one link, surfacing the failure.
    pub async fn try_summarize(&self, link: &FicLink) -> Result<String> {
        match link.kind {
            LinkKind::Ao3Work => self.ao3_work(&link.link).await,
            LinkKind::Ao3Series => self.ao3_series(&link.link).await,
            LinkKind::FfnStory => self.ffn_story(&link.link).await,
        }
    }

    /// Summaries for every link in a message, in detection order.
    ///
    /// Only the first `max_links_per_site` links of each site are looked at,
    /// and a work linked twice (including through a collection) is
    /// summarized once.
    pub async fn summaries_for_message(&self, text: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut per_site: HashMap<Site, usize> = HashMap::new();
        let mut summaries = Vec::new();

        for link in find_links(text) {
            let count = per_site.entry(link.kind.site()).or_default();
            if *count >= self.config.max_links_per_site {
                debug!(link = %link.link, "link cap reached");
                continue;
            }
            *count += 1;

            if !seen.insert(link.base_link()) {
                debug!(link = %link.link, "duplicate link");
                continue;
            }

            let summary = self.summarize(&link).await;
            if !summary.is_empty() {
                summaries.push(summary);
            }
        }

        summaries
    }

    /// Summary of the work a reader picked by reacting to a series summary.
    ///
    /// `bot_message` is the summary that was reacted to; its first line
    /// must carry the series link.
    pub async fn summary_for_reaction(&self, bot_message: &str, glyph: &str, guild: Option<u64>) -> String {
        if !self.reacts_enabled(guild) {
            return String::new();
        }
        let Some(first_line) = bot_message.lines().next() else {
            return String::new();
        };
        let Some(series) = find_links(first_line).into_iter().find(|l| l.kind == LinkKind::Ao3Series) else {
            return String::new();
        };
        let Some(ordinal) = ordinal_for(glyph) else {
            return String::new();
        };

        match self.series_member(&series.link, ordinal).await {
            Ok(work) => {
                let link = FicLink { kind: LinkKind::Ao3Work, link: work, mobile: false };
                self.summarize(&link).await
            }
            Err(e) => {
                warn!(series = %series.link, ordinal, error = %e, "failed to resolve series work");
                String::new()
            }
        }
    }

    /// Whether messages from `author` are ignored entirely.
    pub fn should_ignore_author(&self, author: u64) -> bool {
        self.config.bots_ignore.contains(&author)
    }

    /// Whether `text` mentions the bot and asks for help or info.
    ///
    /// `mention_ids` are the bot's own user and role ids; configured
    /// mention ids count as well.
    pub fn is_help_request(&self, text: &str, mention_ids: &[u64]) -> bool {
        let content = text.to_lowercase();
        let mentioned = mention_ids.iter().chain(self.config.mention_ids.iter()).any(|id| {
            content.contains(&format!("<@{}>", id))
                || content.contains(&format!("<@!{}>", id))
                || content.contains(&format!("<@&{}>", id))
        });
        mentioned && (content.contains("help") || content.contains("info"))
    }

    /// Whether a reply of `text` should delete the bot message it answers.
    pub fn is_delete_request(&self, text: &str, guild: Option<u64>) -> bool {
        text == "delete" && self.config.deletion_enabled(guild)
    }

    pub fn reacts_enabled(&self, guild: Option<u64>) -> bool {
        self.config.reacts_enabled(guild)
    }

    async fn fetch_document(&self, link: &str) -> Result<Document> {
        let page = self.fetcher.fetch(link).await?;
        if page.url.starts_with(RESTRICTED_LOGIN_URL) {
            return Err(AbstractorError::Restricted { url: link.to_string() });
        }
        Ok(Document::parse(&page.body))
    }

    async fn ao3_work(&self, link: &str) -> Result<String> {
        let doc = self.fetch_document(link).await?;
        let fic = ao3::extract_work(&doc, link, &self.extract)?;
        Ok(format_work(&fic, &self.format))
    }

    async fn ao3_series(&self, link: &str) -> Result<String> {
        let doc = self.fetch_document(link).await?;
        let series = ao3::extract_series(&doc, link, &self.extract)?;
        Ok(format_series(&series, &self.format))
    }

    async fn series_member(&self, series_link: &str, ordinal: usize) -> Result<String> {
        let doc = self.fetch_document(series_link).await?;
        ao3::find_series_work(&doc, ordinal)
    }

    /// FFN story page first, the digest when the page is unavailable or
    /// does not parse.
    async fn ffn_story(&self, link: &str) -> Result<String> {
        let direct = match self.fetch_document(link).await {
            Ok(doc) => ffn::extract_story(&doc, link, &self.extract),
            Err(e) => Err(e),
        };
        let fic = match direct {
            Ok(fic) => fic,
            Err(e) => {
                debug!(link, error = %e, "story page unavailable, trying digest");
                let page = self.fetcher.fetch(&ffn::digest_url(&self.config.digest_endpoint, link)).await?;
                ffn::parse_digest(&page.body, link, &self.extract)?
            }
        };
        Ok(format_work(&fic, &self.format))
    }
}
