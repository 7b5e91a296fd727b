//! Page retrieval from the archives, local files and standard input.
//!
//! Everything that talks to the network sits behind the [`Fetch`] trait so
//! the orchestration in [`crate::Abstractor`] can be driven by canned pages
//! in tests. [`HttpFetcher`] is the reqwest-backed implementation.

use std::fs;
use std::future::Future;
use std::path::PathBuf;

use crate::{AbstractorError, Result};

/// Default user agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; Abstractor/1.0)";

/// Markers of an anti-bot interstitial in a response body.
const CHALLENGE_MARKERS: [&str; 3] = ["challenge-form", "cf-challenge", "Just a moment..."];

/// HTTP client configuration for fetching pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// User-Agent header value.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout: 30, user_agent: DEFAULT_USER_AGENT.to_string() }
    }
}

/// A fetched page: the URL it finally came from and its body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub url: String,
    pub body: String,
}

impl Page {
    pub fn new(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self { url: url.into(), body: body.into() }
    }
}

/// Source of pages.
///
/// Implementations report restriction and challenge responses as
/// [`AbstractorError::Restricted`] and [`AbstractorError::Challenge`] so
/// callers can pick a fallback.
pub trait Fetch: Send + Sync {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Page>> + Send;
}

/// Whether a response looks like an anti-bot interstitial.
///
/// Only 403 and 503 responses are considered, and they must carry either a
/// `cf-mitigated` header or a known challenge marker in the body.
pub fn is_challenge(status: u16, mitigated_header: bool, body: &str) -> bool {
    matches!(status, 403 | 503) && (mitigated_header || CHALLENGE_MARKERS.iter().any(|m| body.contains(m)))
}

#[cfg(feature = "fetch")]
pub use http::HttpFetcher;

#[cfg(feature = "fetch")]
mod http {
    use std::time::Duration;

    use reqwest::Client;
    use tracing::{debug, warn};
    use url::Url;

    use super::{Fetch, FetchConfig, Page, is_challenge};
    use crate::ao3::RESTRICTED_LOGIN_URL;
    use crate::{AbstractorError, Result};

    /// reqwest-backed [`Fetch`] implementation.
    ///
    /// Follows redirects, respects the configured timeout and sends a
    /// browser-like Accept header.
    #[derive(Debug, Clone)]
    pub struct HttpFetcher {
        client: Client,
        timeout: u64,
    }

    impl HttpFetcher {
        pub fn new(config: &FetchConfig) -> Result<Self> {
            let client = Client::builder()
                .timeout(Duration::from_secs(config.timeout))
                .user_agent(config.user_agent.clone())
                .build()
                .map_err(AbstractorError::HttpError)?;
            Ok(Self { client, timeout: config.timeout })
        }
    }

    impl Fetch for HttpFetcher {
        async fn fetch(&self, url: &str) -> Result<Page> {
            let parsed_url = Url::parse(url).map_err(|e| AbstractorError::InvalidUrl(e.to_string()))?;

            debug!(url, "fetching");
            let response = self
                .client
                .get(parsed_url)
                .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
                .header("Accept-Language", "en-US,en;q=0.9")
                .send()
                .await
                .map_err(|e| {
                    if e.is_timeout() {
                        AbstractorError::Timeout { timeout: self.timeout }
                    } else {
                        AbstractorError::HttpError(e)
                    }
                })?;

            let final_url = response.url().to_string();
            if final_url.starts_with(RESTRICTED_LOGIN_URL) {
                warn!(url, "redirected to login");
                return Err(AbstractorError::Restricted { url: url.to_string() });
            }

            let status = response.status();
            let mitigated = response.headers().contains_key("cf-mitigated");
            let body = response.text().await?;

            if is_challenge(status.as_u16(), mitigated, &body) {
                warn!(url, status = status.as_u16(), "challenge page served");
                return Err(AbstractorError::Challenge { url: url.to_string() });
            }
            if !status.is_success() {
                return Err(AbstractorError::HttpStatus { status: status.as_u16(), url: url.to_string() });
            }

            Ok(Page { url: final_url, body })
        }
    }
}

/// Reads a saved page from a local file.
pub fn fetch_file(path: &str) -> Result<String> {
    let path_buf = PathBuf::from(path);

    if !path_buf.exists() {
        Err(AbstractorError::FileNotFound(path_buf))
    } else {
        fs::read_to_string(&path_buf).map_err(AbstractorError::from)
    }
}

/// Reads a page from standard input until EOF.
pub fn fetch_stdin() -> Result<String> {
    use std::io::{self, Read};

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(AbstractorError::from)?;

    Ok(buffer)
}
