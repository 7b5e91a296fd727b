use crate::sanitize::SanitizeConfig;

/// Configuration for field extraction
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Maximum "Part N of" series markers read from a work page
    pub max_series_memberships: usize,
    /// Caps for work summaries
    pub summary: SanitizeConfig,
    /// Caps for series descriptions and notes
    pub series_prose: SanitizeConfig,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            max_series_memberships: 3,
            summary: SanitizeConfig::summary(),
            series_prose: SanitizeConfig::series_prose(),
        }
    }
}
