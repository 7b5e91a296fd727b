use crate::config::directives::BotConfig;
use crate::config::parser::ConfigParser;
use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Name of the configuration file looked up in each directory
pub const CONFIG_FILE_NAME: &str = "abstractor.txt";

/// Loads [`BotConfig`] from the default and custom config directories
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Custom config directory path
    custom_dir: Option<PathBuf>,
    /// Default config directory path
    standard_dir: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a loader that reads nothing and yields defaults
    pub fn new() -> Self {
        Self { custom_dir: None, standard_dir: None }
    }

    /// Load the configuration.
    ///
    /// The default directory is applied first and the custom directory on
    /// top of it, so custom scalars win and id lists from both accumulate.
    /// A file that fails to parse is skipped with a warning.
    pub fn load(&self) -> Result<BotConfig> {
        let mut config = BotConfig::new();

        for path in self.config_files() {
            match ConfigParser::parse_file(&path) {
                Ok(directives) => {
                    debug!(path = %path.display(), directives = directives.len(), "applying config");
                    config.apply(directives);
                }
                Err(e) => warn!(path = %path.display(), error = %e, "failed to parse config file"),
            }
        }

        Ok(config)
    }

    /// Existing config files in application order
    fn config_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = Vec::new();

        for dir in [&self.standard_dir, &self.custom_dir].into_iter().flatten() {
            let file_path = dir.join(CONFIG_FILE_NAME);
            if file_path.exists() && !files.contains(&file_path) {
                files.push(file_path);
            }
        }

        files
    }

    /// Default config directory (`<config dir>/abstractor`)
    fn default_standard_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("abstractor"))
    }
}

/// Builder for ConfigLoader
#[derive(Debug)]
pub struct ConfigLoaderBuilder {
    custom_dir: Option<PathBuf>,
    standard_dir: Option<PathBuf>,
}

impl ConfigLoaderBuilder {
    /// Create a new builder with the default directory preset
    pub fn new() -> Self {
        Self { custom_dir: None, standard_dir: ConfigLoader::default_standard_dir() }
    }

    /// Set custom config directory
    pub fn custom_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.custom_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set default config directory
    pub fn standard_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.standard_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Skip the default config directory
    pub fn without_standard_dir(mut self) -> Self {
        self.standard_dir = None;
        self
    }

    /// Build the ConfigLoader
    pub fn build(self) -> ConfigLoader {
        ConfigLoader { custom_dir: self.custom_dir, standard_dir: self.standard_dir }
    }
}

impl Default for ConfigLoaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        ConfigLoaderBuilder::new().build()
    }
}
