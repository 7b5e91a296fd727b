use std::collections::HashSet;

use crate::formatters::{FormatConfig, join_capped};
use crate::models::FicMetadata;

/// Chat summary formatter for a single work
pub struct WorkFormatter {
    config: FormatConfig,
}

impl WorkFormatter {
    pub fn new(config: FormatConfig) -> Self {
        Self { config }
    }

    /// Render a work summary
    pub fn format(&self, fic: &FicMetadata) -> String {
        format_work(fic, &self.config)
    }
}

/// Render a work as the fixed summary template.
///
/// Optional lines only appear when their field was found and is non-empty.
/// The result has no trailing newline.
pub fn format_work(fic: &FicMetadata, config: &FormatConfig) -> String {
    let mut lines = Vec::new();

    lines.push(format!(
        "**{}** (<{}>) by **{}**",
        fic.title,
        fic.link,
        fic.authors.join(", ")
    ));

    for membership in fic.series_memberships.iter().take(config.max_series_memberships) {
        lines.push(format!(
            "**Part {}** of the **{}** series (<{}>)",
            membership.position, membership.series_name, membership.series_link
        ));
    }

    if !fic.fandoms.is_empty() {
        lines.push(format!("**Fandoms:** {}", join_capped(&fic.fandoms, config.max_fandoms)));
    }

    match &fic.category {
        Some(category) => lines.push(format!(
            "**Rating:** {}          **{}:** {}",
            fic.rating,
            fic.site.category_label(),
            category
        )),
        None => lines.push(format!("**Rating:** {}", fic.rating)),
    }

    if let Some(warnings) = fic.warnings.as_ref().filter(|w| !w.is_empty()) {
        lines.push(format!("**Warnings:** {}", warnings.join(", ")));
    }

    let relationships = fic.relationships.as_deref().filter(|r| !r.is_empty());
    if let Some(relationships) = relationships {
        lines.push(format!(
            "**Relationships:** {}",
            join_capped(relationships, config.max_relationships)
        ));
    }

    if let Some(characters) = &fic.characters {
        let characters = match relationships {
            Some(relationships) => {
                let shown = &relationships[..relationships.len().min(config.max_relationships)];
                remaining_characters(characters, shown)
            }
            None => characters.clone(),
        };
        if !characters.is_empty() {
            let label = if relationships.is_some() { "Additional Characters" } else { "Characters" };
            lines.push(format!("**{}:** {}", label, join_capped(&characters, config.max_characters)));
        }
    }

    if let Some(tags) = fic.freeform_tags.as_ref().filter(|t| !t.is_empty()) {
        lines.push(format!("**Tags:** {}", join_capped(tags, config.max_freeform_tags)));
    }

    if let Some(summary) = fic.summary.as_ref().filter(|s| !s.is_empty()) {
        lines.push(format!("**Summary:** {}", summary));
    }

    lines.push(format!(
        "**Words:** {} **Chapters:** {} **{}:** {} **Updated:** {}",
        fic.word_count,
        fic.chapter_progress,
        fic.site.popularity_label(),
        fic.popularity_count,
        fic.updated_date
    ));

    lines.join("\n")
}

/// Bare names already mentioned by the given relationship tags.
///
/// `" & "` pairings are normalized to `/` before splitting, and each name
/// loses everything from its first `" ("` onward.
pub fn implied_characters<S: AsRef<str>>(relationships: &[S]) -> HashSet<String> {
    let mut implied = HashSet::new();
    for relationship in relationships {
        let normalized = relationship.as_ref().replace(" & ", "/");
        for name in normalized.split('/') {
            implied.insert(strip_parenthetical(name).to_string());
        }
    }
    implied
}

/// Characters that are not already named by one of `shown_relationships`.
///
/// Character tags are compared by bare name: the first `" ("` qualifier and
/// then the first `" - "` suffix are dropped. Names carrying several
/// qualifiers may therefore survive de-duplication.
pub fn remaining_characters<S: AsRef<str>>(characters: &[String], shown_relationships: &[S]) -> Vec<String> {
    let implied = implied_characters(shown_relationships);
    characters
        .iter()
        .filter(|character| !implied.contains(bare_character_name(character)))
        .cloned()
        .collect()
}

fn strip_parenthetical(name: &str) -> &str {
    name.split(" (").next().unwrap_or(name)
}

fn bare_character_name(name: &str) -> &str {
    let name = strip_parenthetical(name);
    name.split(" - ").next().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChapterProgress, SeriesMembership, Site};

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn minimal() -> FicMetadata {
        FicMetadata {
            site: Site::Ao3,
            title: "Example".to_string(),
            link: "https://archiveofourown.org/works/1".to_string(),
            authors: strings(&["Jane"]),
            fandoms: strings(&["Harry Potter"]),
            rating: "General Audiences".to_string(),
            category: None,
            warnings: Some(strings(&["No Archive Warnings Apply"])),
            relationships: None,
            characters: None,
            freeform_tags: None,
            series_memberships: Vec::new(),
            word_count: "1,234".to_string(),
            chapter_progress: ChapterProgress::parse("1/1"),
            popularity_count: "10".to_string(),
            updated_date: "2021-01-01".to_string(),
            summary: None,
        }
    }

    #[test]
    fn test_minimal_work() {
        let out = format_work(&minimal(), &FormatConfig::default());
        assert_eq!(
            out,
            "**Example** (<https://archiveofourown.org/works/1>) by **Jane**\n\
             **Fandoms:** Harry Potter\n\
             **Rating:** General Audiences\n\
             **Warnings:** No Archive Warnings Apply\n\
             **Words:** 1,234 **Chapters:** 1/1 **Kudos:** 10 **Updated:** 2021-01-01"
        );
    }

    #[test]
    fn test_category_merges_with_rating() {
        let mut fic = minimal();
        fic.category = Some("F/M, Gen".to_string());
        let out = format_work(&fic, &FormatConfig::default());
        assert!(out.contains("**Rating:** General Audiences          **Category:** F/M, Gen\n"));
    }

    #[test]
    fn test_character_dedup_against_relationship() {
        let mut fic = minimal();
        fic.relationships = Some(strings(&["A/B"]));
        fic.characters = Some(strings(&["A", "B", "C"]));
        let out = format_work(&fic, &FormatConfig::default());
        assert!(out.contains("**Relationships:** A/B\n"));
        assert!(out.contains("**Additional Characters:** C\n"));
    }

    #[test]
    fn test_characters_label_without_relationships() {
        let mut fic = minimal();
        fic.characters = Some(strings(&["A", "B"]));
        let out = format_work(&fic, &FormatConfig::default());
        assert!(out.contains("**Characters:** A, B\n"));
        assert!(!out.contains("Additional"));
    }

    #[test]
    fn test_fully_implied_characters_suppress_line() {
        let mut fic = minimal();
        fic.relationships = Some(strings(&["Harry Potter & Ron Weasley"]));
        fic.characters = Some(strings(&["Harry Potter", "Ron Weasley"]));
        let out = format_work(&fic, &FormatConfig::default());
        assert!(!out.contains("Characters"));
    }

    #[test]
    fn test_dedup_uses_only_displayed_relationships() {
        let mut fic = minimal();
        fic.relationships = Some(strings(&["A/B", "C/D", "E/F", "G/H"]));
        fic.characters = Some(strings(&["A", "G"]));
        let out = format_work(&fic, &FormatConfig::default());
        assert!(out.contains("**Relationships:** A/B, C/D, E/F, …\n"));
        assert!(out.contains("**Additional Characters:** G\n"));
    }

    #[test]
    fn test_dedup_happens_before_character_cap() {
        let mut fic = minimal();
        fic.relationships = Some(strings(&["A/B"]));
        fic.characters = Some(strings(&["A", "B", "C", "D", "E"]));
        let out = format_work(&fic, &FormatConfig::default());
        assert!(out.contains("**Additional Characters:** C, D, E\n"));
        assert!(!out.contains("C, …"));
    }

    #[test]
    fn test_empty_optional_lists_are_suppressed() {
        let mut fic = minimal();
        fic.relationships = Some(Vec::new());
        fic.freeform_tags = Some(Vec::new());
        fic.summary = Some(String::new());
        let out = format_work(&fic, &FormatConfig::default());
        assert_eq!(out.lines().count(), 5);
    }

    #[test]
    fn test_series_lines_follow_header() {
        let mut fic = minimal();
        fic.series_memberships = vec![SeriesMembership {
            position: 2,
            series_name: "The Saga".to_string(),
            series_link: "https://archiveofourown.org/series/9".to_string(),
        }];
        let out = format_work(&fic, &FormatConfig::default());
        let second = out.lines().nth(1).unwrap();
        assert_eq!(
            second,
            "**Part 2** of the **The Saga** series (<https://archiveofourown.org/series/9>)"
        );
    }

    #[test]
    fn test_ffn_labels() {
        let mut fic = minimal();
        fic.site = Site::Ffn;
        fic.warnings = None;
        fic.category = Some("Romance".to_string());
        fic.chapter_progress = ChapterProgress::from_count("3", false);
        let out = format_work(&fic, &FormatConfig::default());
        assert!(out.contains("**Genre:** Romance"));
        assert!(out.contains("**Chapters:** 3/? **Favs:** 10"));
        assert!(!out.contains("Warnings"));
    }

    #[test]
    fn test_implied_characters_strip_qualifiers() {
        let implied = implied_characters(&["Dean Winchester/Castiel (Supernatural) & Sam Winchester"]);
        assert!(implied.contains("Dean Winchester"));
        assert!(implied.contains("Castiel"));
        assert!(implied.contains("Sam Winchester"));
    }

    #[test]
    fn test_character_dash_suffix_stripped() {
        let remaining = remaining_characters(&strings(&["Castiel - Character", "Castiel (Supernatural)", "Jack"]), &["Castiel/Jo"]);
        assert_eq!(remaining, strings(&["Jack"]));
    }

    #[test]
    fn test_relationship_dash_suffix_not_stripped() {
        let remaining = remaining_characters(&strings(&["Loki"]), &["Loki - Character/Thor"]);
        assert_eq!(remaining, strings(&["Loki"]));
    }
}
