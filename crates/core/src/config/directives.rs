use crate::error::{AbstractorError, Result};
use crate::extract::ExtractConfig;
use crate::fetch::{DEFAULT_USER_AGENT, FetchConfig};
use crate::formatters::FormatConfig;
use std::collections::HashSet;

/// Default third-party digest endpoint; the story link is appended url-encoded.
pub const DEFAULT_DIGEST_ENDPOINT: &str = "https://fichub.net/api/v0/epub?q=";

/// A single configuration line
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    /// Contact shown in the introduction and error template
    Name(String),

    /// Request settings
    UserAgent(String),
    DigestEndpoint(String),
    Timeout(u64),

    /// Links summarized per site in one message
    MaxLinksPerSite(usize),

    /// Global switches, overridden per server by the id lists
    Reacts(bool),
    Deletion(bool),

    /// Id lists (repeatable)
    ServerNoDeletion(u64),
    ServerNoReacts(u64),
    BotIgnore(u64),
    Mention(u64),

    /// Caps
    SummaryLength(usize),
    SeriesWorks(usize),
}

/// Bot configuration assembled from directives
#[derive(Debug, Clone, PartialEq)]
pub struct BotConfig {
    pub name: String,
    pub user_agent: String,
    pub digest_endpoint: String,
    /// Request timeout in seconds
    pub timeout: u64,
    pub max_links_per_site: usize,
    pub reacts: bool,
    pub deletion: bool,
    pub servers_no_deletion: HashSet<u64>,
    pub servers_no_reacts: HashSet<u64>,
    pub bots_ignore: HashSet<u64>,
    /// User and role ids that count as addressing the bot
    pub mention_ids: HashSet<u64>,
    /// Summary character cap, `None` for the built-in 250
    pub summary_length: Option<usize>,
    /// Series works listed before the "more works" line
    pub series_works: Option<usize>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: "the bot operator".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            digest_endpoint: DEFAULT_DIGEST_ENDPOINT.to_string(),
            timeout: 30,
            max_links_per_site: 1,
            reacts: true,
            deletion: true,
            servers_no_deletion: HashSet::new(),
            servers_no_reacts: HashSet::new(),
            bots_ignore: HashSet::new(),
            mention_ids: HashSet::new(),
            summary_length: None,
            series_works: None,
        }
    }
}

impl BotConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one directive; scalars are replaced, id lists accumulate
    pub fn add_directive(&mut self, directive: Directive) {
        match directive {
            Directive::Name(name) => self.name = name,
            Directive::UserAgent(agent) => self.user_agent = agent,
            Directive::DigestEndpoint(endpoint) => self.digest_endpoint = endpoint,
            Directive::Timeout(seconds) => self.timeout = seconds,
            Directive::MaxLinksPerSite(max) => self.max_links_per_site = max,
            Directive::Reacts(value) => self.reacts = value,
            Directive::Deletion(value) => self.deletion = value,
            Directive::ServerNoDeletion(id) => {
                self.servers_no_deletion.insert(id);
            }
            Directive::ServerNoReacts(id) => {
                self.servers_no_reacts.insert(id);
            }
            Directive::BotIgnore(id) => {
                self.bots_ignore.insert(id);
            }
            Directive::Mention(id) => {
                self.mention_ids.insert(id);
            }
            Directive::SummaryLength(max) => self.summary_length = Some(max),
            Directive::SeriesWorks(max) => self.series_works = Some(max),
        }
    }

    /// Apply directives in order
    pub fn apply<I: IntoIterator<Item = Directive>>(&mut self, directives: I) {
        for directive in directives {
            self.add_directive(directive);
        }
    }

    /// Whether reacting to a series summary is allowed in `guild`
    pub fn reacts_enabled(&self, guild: Option<u64>) -> bool {
        self.reacts && guild.is_none_or(|id| !self.servers_no_reacts.contains(&id))
    }

    /// Whether replying "delete" removes bot messages in `guild`
    pub fn deletion_enabled(&self, guild: Option<u64>) -> bool {
        self.deletion && guild.is_none_or(|id| !self.servers_no_deletion.contains(&id))
    }

    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig { timeout: self.timeout, user_agent: self.user_agent.clone() }
    }

    pub fn extract_config(&self) -> ExtractConfig {
        let mut config = ExtractConfig::default();
        if let Some(max) = self.summary_length {
            config.summary.max_chars = Some(max);
        }
        config
    }

    pub fn format_config(&self) -> FormatConfig {
        let mut config = FormatConfig::default();
        if let Some(max) = self.series_works {
            config.max_series_members = max;
        }
        config
    }
}

/// Parse one `key: value` line
pub fn parse_directive(line: &str) -> Result<Directive> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Err(AbstractorError::ConfigError("Empty or comment line".to_string()));
    }

    let Some((key, value)) = line.split_once(':') else {
        return Err(AbstractorError::ConfigError(format!("Invalid directive format: {}", line)));
    };
    let key = key.trim();
    let value = value.trim();

    match key {
        "name" => Ok(Directive::Name(value.to_string())),
        "user_agent" => Ok(Directive::UserAgent(value.to_string())),
        "digest_endpoint" => Ok(Directive::DigestEndpoint(value.to_string())),
        "timeout" => Ok(Directive::Timeout(parse_number(key, value)?)),
        "max_links_per_site" => Ok(Directive::MaxLinksPerSite(parse_number(key, value)?)),
        "reacts" => Ok(Directive::Reacts(parse_boolean(value)?)),
        "deletion" => Ok(Directive::Deletion(parse_boolean(value)?)),
        "server_no_deletion" => Ok(Directive::ServerNoDeletion(parse_number(key, value)?)),
        "server_no_reacts" => Ok(Directive::ServerNoReacts(parse_number(key, value)?)),
        "bot_ignore" => Ok(Directive::BotIgnore(parse_number(key, value)?)),
        "mention" => Ok(Directive::Mention(parse_number(key, value)?)),
        "summary_length" => Ok(Directive::SummaryLength(parse_number(key, value)?)),
        "series_works" => Ok(Directive::SeriesWorks(parse_number(key, value)?)),
        _ => Err(AbstractorError::ConfigError(format!("Unknown directive: {}", key))),
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| AbstractorError::ConfigError(format!("Invalid number for {}: {}", key, value)))
}

fn parse_boolean(value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "yes" | "true" | "1" => Ok(true),
        "no" | "false" | "0" => Ok(false),
        _ => Err(AbstractorError::ConfigError(format!("Invalid boolean value: {}", value))),
    }
}
