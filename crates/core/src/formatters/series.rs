use crate::formatters::FormatConfig;
use crate::models::SeriesMetadata;

/// Chat summary formatter for a series
pub struct SeriesFormatter {
    config: FormatConfig,
}

impl SeriesFormatter {
    pub fn new(config: FormatConfig) -> Self {
        Self { config }
    }

    /// Render a series summary
    pub fn format(&self, series: &SeriesMetadata) -> String {
        format_series(series, &self.config)
    }
}

/// Render a series as the fixed summary template.
///
/// The numbered member lines are what readers react to, so the numbers
/// must line up with [`crate::ao3::find_series_work`] ordinals.
pub fn format_series(series: &SeriesMetadata, config: &FormatConfig) -> String {
    let mut lines = Vec::new();

    lines.push(format!(
        "**{}** (<{}>) by **{}**",
        series.title,
        series.link,
        series.authors.join(", ")
    ));

    if let Some(description) = series.description.as_ref().filter(|d| !d.is_empty()) {
        lines.push(format!("**Description:** {}", description));
    }
    if let Some(notes) = series.notes.as_ref().filter(|n| !n.is_empty()) {
        lines.push(format!("**Notes:** {}", notes));
    }

    lines.push(format!(
        "**Begun:** {} **Updated:** {}",
        series.begun_date, series.updated_date
    ));
    lines.push(format!(
        "**Words:** {} **Works:** {} **Complete:** {}",
        series.word_count,
        series.work_count,
        if series.is_complete { "Yes" } else { "No" }
    ));

    let members = &series.member_stubs;
    if members.is_empty() {
        return lines.join("\n");
    }

    lines.push(String::new());

    // One extra work fits where an "and 1 more works" line would go.
    let cap = config.max_series_members;
    let listed = if members.len() == cap + 1 { members.len() } else { members.len().min(cap) };
    for (i, member) in members.iter().take(listed).enumerate() {
        lines.push(format!("{}. __{}__: <{}>", i + 1, member.title, member.link));
    }
    if members.len() > listed {
        lines.push(format!("        [and {} more works]", members.len() - listed));
    }

    lines.join("\n")
}
