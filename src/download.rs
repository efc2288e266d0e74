//! Document download with a single mirror fallback.
//!
//! The direct link from the metadata is tried first. If that fails the DOI
//! is looked up on the mirror and the link found there is fetched once.
//! There is no fallback after the mirror.

use crate::config::Config;
use crate::error::{Doi2PdfError, OptionExt, Result};
use crate::mirror::MirrorClient;
use crate::openalex::PaperMetadata;
use reqwest::Client;
use std::fmt;
use tracing::{debug, info, warn};

/// Where the document bytes came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchSource {
    Direct,
    Mirror,
}

impl fmt::Display for FetchSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct => f.write_str("direct"),
            Self::Mirror => f.write_str("mirror"),
        }
    }
}

/// Fetched document
#[derive(Debug, Clone)]
pub struct FetchedDocument {
    pub bytes: Vec<u8>,
    pub source: FetchSource,
}

/// Build the HTTP client used for document downloads
pub fn build_http_client(config: &Config) -> Result<Client> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .build()
        .map_err(|e| Doi2PdfError::Config(format!("Failed to build HTTP client: {}", e)))
}

/// Download `url`; a non-success status is `NotFound`.
pub async fn fetch_pdf(client: &Client, url: &str) -> Result<Vec<u8>> {
    debug!(url = %url, "Fetching document");
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(Doi2PdfError::not_found(format!(
            "Bad PDF URL: HTTP {} from {}",
            status.as_u16(),
            url
        )));
    }

    let bytes = response.bytes().await?;
    debug!(url = %url, size = bytes.len(), "Fetched document");
    Ok(bytes.to_vec())
}

/// Fetch the paper's document, falling back to the mirror once.
///
/// The mirror is only consulted when the direct attempt fails with
/// `NotFound` or a transport error; the mirror attempt's error is returned
/// as is.
pub async fn fetch_with_fallback(
    client: &Client,
    mirror: &MirrorClient,
    metadata: &PaperMetadata,
) -> Result<FetchedDocument> {
    match fetch_pdf(client, &metadata.pdf_url).await {
        Ok(bytes) => {
            info!(url = %metadata.pdf_url, size = bytes.len(), "Downloaded from direct link");
            return Ok(FetchedDocument {
                bytes,
                source: FetchSource::Direct,
            });
        }
        Err(e) if e.is_not_found() || matches!(e, Doi2PdfError::Network(_)) => {
            warn!(url = %metadata.pdf_url, error = %e, "Direct download failed, trying mirror");
        }
        Err(e) => return Err(e),
    }

    let doi = metadata
        .doi
        .as_deref()
        .ok_or_not_found("Direct download failed and the paper has no DOI for the mirror.")?;

    let mirror_url = mirror.lookup(doi).await?;
    let bytes = fetch_pdf(client, mirror_url.as_str()).await?;
    info!(url = %mirror_url, size = bytes.len(), "Downloaded from mirror");

    Ok(FetchedDocument {
        bytes,
        source: FetchSource::Mirror,
    })
}
