//! Mirror lookup.
//!
//! The mirror serves an HTML page per DOI with the document embedded as
//! `<iframe id="pdf" src="...">`. This module fetches that page and pulls
//! the frame's link out of it.

use crate::config::Config;
use crate::error::{Doi2PdfError, OptionExt, Result};
use reqwest::redirect::Policy;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

/// Mirror page client
pub struct MirrorClient {
    client: Client,
    base_url: String,
}

impl MirrorClient {
    /// Create a new MirrorClient against `config.mirror_base`
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .read_timeout(config.mirror_timeout)
            .redirect(Policy::none())
            .build()
            .map_err(|e| Doi2PdfError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.mirror_base.clone(),
        })
    }

    /// Find the document URL the mirror holds for `doi`.
    pub async fn lookup(&self, doi: &str) -> Result<Url> {
        let page_url = build_mirror_url(&self.base_url, doi)?;
        debug!(url = %page_url, "Querying mirror");

        let response = self.client.get(page_url.as_str()).send().await?;
        let status = response.status();
        if !status.is_success() {
            debug!(status = status.as_u16(), "Mirror lookup failed");
            return Err(Doi2PdfError::not_found(format!(
                "Mirror returned HTTP {} for DOI {}",
                status.as_u16(),
                doi
            )));
        }

        let html = response.text().await?;
        extract_pdf_url(&html, &page_url)
    }
}

/// Mirror page URL for a DOI: the DOI appended to the base.
pub fn build_mirror_url(base_url: &str, doi: &str) -> Result<Url> {
    let separator = if base_url.ends_with('/') { "" } else { "/" };
    Url::parse(&format!("{}{}{}", base_url, separator, doi))
        .map_err(|e| Doi2PdfError::Config(format!("Invalid mirror URL '{}': {}", base_url, e)))
}

/// Pull the `iframe#pdf` link out of a mirror page.
///
/// The `src` is resolved against `page_url`, so protocol-relative and
/// relative links come back absolute.
pub fn extract_pdf_url(html: &str, page_url: &Url) -> Result<Url> {
    let document = Html::parse_document(html);
    let frame_selector =
        Selector::parse("iframe#pdf").map_err(|e| Doi2PdfError::Parse(e.to_string()))?;

    let src = document
        .select(&frame_selector)
        .next()
        .and_then(|frame| frame.value().attr("src"))
        .map(str::trim)
        .filter(|src| !src.is_empty())
        .ok_or_not_found("DOI not found.")?;

    page_url
        .join(src)
        .map_err(|e| Doi2PdfError::Parse(format!("Invalid frame link '{}': {}", src, e)))
}
