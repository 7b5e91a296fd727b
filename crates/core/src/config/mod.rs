pub mod directives;
pub mod loader;
pub mod parser;

pub use directives::{BotConfig, DEFAULT_DIGEST_ENDPOINT, Directive, parse_directive};
pub use loader::{CONFIG_FILE_NAME, ConfigLoader, ConfigLoaderBuilder};
pub use parser::ConfigParser;
