//! OpenAlex API Client
//!
//! Resolves a [`PaperReference`] to [`PaperMetadata`] with a single request
//! against the OpenAlex works endpoint:
//!
//! - DOI: `/works/https://doi.org/{doi}`
//! - title: `/works?search=...&per-page=1&sort=relevance_score:desc`, top hit wins
//! - URL: `/works/{url}`

use crate::config::Config;
use crate::error::{Doi2PdfError, OptionExt, Result};
use crate::reference::{normalize_doi, PaperReference};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

/// User-Agent for metadata requests
const API_USER_AGENT: &str = concat!("doi2pdf/", env!("CARGO_PKG_VERSION"));

/// Metadata needed to fetch a paper
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperMetadata {
    /// Bare DOI, without the `https://doi.org/` prefix
    pub doi: Option<String>,
    pub title: String,
    /// Best candidate document URL
    pub pdf_url: String,
}

/// OpenAlex API response structures
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OpenAlexBody {
    Search { results: Vec<OpenAlexWork> },
    Work(OpenAlexWork),
}

#[derive(Debug, Deserialize)]
struct OpenAlexWork {
    title: Option<String>,
    display_name: Option<String>,
    doi: Option<String>,
    open_access: Option<OpenAlexOpenAccess>,
    host_venue: Option<OpenAlexHostVenue>,
    primary_location: Option<OpenAlexLocation>,
}

#[derive(Debug, Deserialize)]
struct OpenAlexOpenAccess {
    oa_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAlexHostVenue {
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAlexLocation {
    landing_page_url: Option<String>,
}

/// OpenAlex metadata resolver
pub struct OpenAlexClient {
    client: Client,
    api_base: String,
}

impl OpenAlexClient {
    /// Create a new OpenAlexClient against `config.api_base`
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(API_USER_AGENT)
            .build()
            .map_err(|e| Doi2PdfError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_base: config.api_base_trimmed().to_string(),
        })
    }

    /// Look the paper up and pick its best document URL.
    ///
    /// Fails with `NotFound` when OpenAlex answers with a non-success
    /// status, the search has no hit, or no candidate URL exists.
    pub async fn resolve(&self, reference: &PaperReference) -> Result<PaperMetadata> {
        let url = build_lookup_url(&self.api_base, reference);
        debug!(url = %url, reference = %reference, "Querying OpenAlex");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            debug!(status = status.as_u16(), "OpenAlex lookup failed");
            return Err(Doi2PdfError::not_found("Paper not found."));
        }

        let body = response.text().await?;
        let metadata = parse_metadata(&body, reference.doi())?;

        info!(title = %metadata.title, doi = ?metadata.doi, "Found paper");
        Ok(metadata)
    }
}

/// Build the OpenAlex request URL for a reference
pub fn build_lookup_url(api_base: &str, reference: &PaperReference) -> String {
    let base = api_base.trim_end_matches('/');
    match reference {
        PaperReference::Doi(doi) => format!("{}/works/https://doi.org/{}", base, doi),
        PaperReference::Title(title) => format!(
            "{}/works?search={}&per-page=1&page=1&sort=relevance_score:desc",
            base,
            urlencoding::encode(title)
        ),
        PaperReference::Url(url) => format!("{}/works/{}", base, url),
    }
}

/// Parse an OpenAlex work (or search envelope) into [`PaperMetadata`].
///
/// `known_doi` is kept when the work itself carries no DOI.
pub fn parse_metadata(json_str: &str, known_doi: Option<&str>) -> Result<PaperMetadata> {
    let body: OpenAlexBody = serde_json::from_str(json_str)
        .map_err(|e| Doi2PdfError::Parse(format!("Failed to parse OpenAlex response: {}", e)))?;

    let work = match body {
        OpenAlexBody::Search { results } => results
            .into_iter()
            .next()
            .ok_or_not_found("Paper not found.")?,
        OpenAlexBody::Work(work) => work,
    };

    let doi = work
        .doi
        .as_deref()
        .map(normalize_doi)
        .filter(|d| !d.is_empty())
        .or_else(|| known_doi.map(str::to_string));

    let title = non_empty(work.display_name)
        .or_else(|| non_empty(work.title))
        .ok_or_not_found("Paper has no title.")?;

    // open access URL, then venue URL, then landing page
    let pdf_url = non_empty(work.open_access.and_then(|oa| oa.oa_url))
        .or_else(|| non_empty(work.host_venue.and_then(|v| v.url)))
        .or_else(|| non_empty(work.primary_location.and_then(|l| l.landing_page_url)))
        .ok_or_not_found("PDF URL not found.")?;

    Ok(PaperMetadata { doi, title, pdf_url })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
