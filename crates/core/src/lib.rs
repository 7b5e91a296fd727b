pub mod abstractor;
pub mod ao3;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod ffn;
pub mod formatters;
pub mod links;
pub mod messages;
pub mod models;
pub mod parse;
pub mod reactions;
pub mod sanitize;

pub use abstractor::Abstractor;
pub use config::{BotConfig, ConfigLoader, ConfigLoaderBuilder, ConfigParser, Directive};
pub use error::{AbstractorError, Result};
pub use extract::ExtractConfig;
#[cfg(feature = "fetch")]
pub use fetch::HttpFetcher;
pub use fetch::{Fetch, FetchConfig, Page, fetch_file, fetch_stdin};
pub use formatters::{FormatConfig, SeriesFormatter, WorkFormatter, format_series, format_work};
pub use links::{FicLink, LinkKind, base_link, find_links, parse_link};
pub use messages::{error_message, introduction};
pub use models::{ChapterProgress, FicMetadata, MemberStub, SeriesMembership, SeriesMetadata, Site};
pub use parse::{Document, Element};
pub use reactions::ordinal_for;
pub use sanitize::{SanitizeConfig, sanitize_html};
