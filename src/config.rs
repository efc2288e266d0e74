//! Runtime configuration.
//!
//! Every endpoint the crate talks to is a plain value on [`Config`] so tests
//! and callers can point it at other hosts. Nothing is read from the
//! environment unless [`Config::from_env`] is called.

use std::path::PathBuf;
use std::time::Duration;

/// OpenAlex API base URL
pub const OPENALEX_API_BASE: &str = "https://api.openalex.org";

/// Default mirror lookup base URL; the DOI is appended to it
pub const DEFAULT_MIRROR_URL: &str = "https://sci-hub.mksa.top/";

/// Environment variable overriding the mirror base URL
pub const MIRROR_URL_ENV: &str = "SCI_HUB_URL";

/// Environment variable overriding the OpenAlex base URL
pub const API_URL_ENV: &str = "OPENALEX_API_URL";

/// Directory used when no output path is given
pub const DEFAULT_OUTPUT_DIR: &str = "/tmp";

/// Browser User-Agent sent to publishers and the mirror, which tend to
/// reject obvious bots.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 6.1) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/41.0.2228.0 Safari/537.36";

/// Read timeout for the mirror page
pub const MIRROR_TIMEOUT_SECS: u64 = 10;

/// Settings shared by the resolver, the mirror lookup and the downloader.
#[derive(Debug, Clone)]
pub struct Config {
    /// OpenAlex API base, without trailing slash
    pub api_base: String,
    /// Mirror base URL the DOI is appended to
    pub mirror_base: String,
    /// Directory for the default `<title>.pdf` file
    pub output_dir: PathBuf,
    /// User-Agent for document and mirror requests
    pub user_agent: String,
    /// Read timeout of the mirror lookup, the only fixed timeout
    pub mirror_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: OPENALEX_API_BASE.to_string(),
            mirror_base: DEFAULT_MIRROR_URL.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            user_agent: BROWSER_USER_AGENT.to_string(),
            mirror_timeout: Duration::from_secs(MIRROR_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Defaults with `SCI_HUB_URL` and `OPENALEX_API_URL` applied when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(mirror) = non_empty_env(MIRROR_URL_ENV) {
            config.mirror_base = mirror;
        }
        if let Some(api) = non_empty_env(API_URL_ENV) {
            config.api_base = api;
        }
        config
    }

    /// Replace the OpenAlex base URL.
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Replace the mirror base URL.
    pub fn with_mirror_base(mut self, base: impl Into<String>) -> Self {
        self.mirror_base = base.into();
        self
    }

    /// Replace the default output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// API base with any trailing slash removed.
    pub(crate) fn api_base_trimmed(&self) -> &str {
        self.api_base.trim_end_matches('/')
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
