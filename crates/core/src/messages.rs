//! Canned chat text.

use crate::config::BotConfig;

const INTRO: &str = "Hello, I'm Fanfiction Abstractor! I provide information about fanfiction \
on AO3 and FFN. Please contact {name} with questions or comments about the bot.\n\
Please note the bot does not provide information about AO3 archive-locked works.";

const USAGE: &str = "To use the bot, send a message containing a link to an AO3 or FFN work or series.";
const REACTS: &str = "To get information about a fic in the series, react with the fic's number.";
const PREVENT: &str = "To prevent the bot from posting, put ! immediately before a link.";
const DELETE: &str = "To delete a bot message, reply to it with the message \"delete\".";
const HELP: &str = "To trigger this message, tag me and say \"help\" or \"info\".";

/// Introduction and usage text, omitting features disabled for `guild`.
pub fn introduction(guild: Option<u64>, config: &BotConfig) -> String {
    let mut lines = vec![INTRO.replace("{name}", &config.name), String::new(), USAGE.to_string()];
    if config.reacts_enabled(guild) {
        lines.push(REACTS.to_string());
    }
    lines.push(PREVENT.to_string());
    if config.deletion_enabled(guild) {
        lines.push(DELETE.to_string());
    }
    lines.push(HELP.to_string());
    lines.join("\n")
}

/// User-facing failure notice for `link`.
///
/// Extraction failures are logged for the operator instead; nothing sends
/// this by default.
pub fn error_message(link: &str, config: &BotConfig) -> String {
    format!(
        "Error on {}.\nIf you can access the page in your browser, please @ {}.",
        link, config.name
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Directive;

    #[test]
    fn test_introduction_full() {
        let mut config = BotConfig::new();
        config.add_directive(Directive::Name("quill".to_string()));
        let intro = introduction(Some(1), &config);

        assert!(intro.contains("Please contact quill with questions"));
        assert!(intro.contains("\n\nTo use the bot"));
        assert!(intro.contains(REACTS));
        assert!(intro.contains(DELETE));
        assert!(intro.ends_with(HELP));
    }

    #[test]
    fn test_introduction_respects_guild_switches() {
        let mut config = BotConfig::new();
        config.apply([Directive::ServerNoReacts(1), Directive::ServerNoDeletion(1)]);
        let intro = introduction(Some(1), &config);

        assert!(!intro.contains(REACTS));
        assert!(!intro.contains(DELETE));
        assert!(intro.contains(PREVENT));
    }

    #[test]
    fn test_error_message() {
        let msg = error_message("https://archiveofourown.org/works/1", &BotConfig::new());
        assert!(msg.starts_with("Error on https://archiveofourown.org/works/1.\n"));
    }
}
