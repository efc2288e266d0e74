//! # doi2pdf
//!
//! Download the PDF of a research paper from its DOI, title or landing page URL.
//!
//! ## Modules
//!
//! - [`reference`] - The caller's paper reference (DOI, title or URL)
//! - [`openalex`] - OpenAlex metadata lookup
//! - [`download`] - Direct download with mirror fallback
//! - [`mirror`] - Mirror page scraping
//! - [`output`] - File naming, writing and opening
//! - [`config`] - Endpoints, timeouts and output directory
//! - [`error`] - Custom error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use doi2pdf::{doi2pdf, Config, DownloadOptions, PaperReference};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let reference = PaperReference::from_parts(Some("10.48550/arXiv.2203.15556"), None, None)?;
//!     let saved = doi2pdf(&reference, &DownloadOptions::default(), &Config::from_env()).await?;
//!     println!("Saved {} to {}", saved.metadata.title, saved.path.display());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod download;
pub mod error;
pub mod mirror;
pub mod openalex;
pub mod output;
pub mod reference;

pub use config::Config;
pub use download::FetchSource;
pub use error::{Doi2PdfError, Result};
pub use openalex::PaperMetadata;
pub use reference::PaperReference;

use std::path::PathBuf;
use tracing::info;

/// Caller options for a download
#[derive(Debug, Clone, Default)]
pub struct DownloadOptions {
    /// Target file; defaults to `{output_dir}/{sanitized title}.pdf`
    pub output: Option<PathBuf>,
    /// Open the file once written
    pub open: bool,
}

/// Outcome of a successful download
#[derive(Debug, Clone)]
pub struct Downloaded {
    pub metadata: PaperMetadata,
    pub path: PathBuf,
    pub source: FetchSource,
    pub size: usize,
}

/// Resolve `reference`, fetch its PDF and write it to disk.
///
/// Requests are issued one after the other: the OpenAlex lookup, the direct
/// download, and only if that fails the mirror page and the mirror download.
pub async fn doi2pdf(
    reference: &PaperReference,
    options: &DownloadOptions,
    config: &Config,
) -> Result<Downloaded> {
    let resolver = openalex::OpenAlexClient::new(config)?;
    let metadata = resolver.resolve(reference).await?;

    let http = download::build_http_client(config)?;
    let mirror = mirror::MirrorClient::new(config)?;
    let document = download::fetch_with_fallback(&http, &mirror, &metadata).await?;

    let path = options
        .output
        .clone()
        .unwrap_or_else(|| output::default_output_path(&config.output_dir, &metadata.title));
    output::write_pdf(&path, &document.bytes).await?;

    if options.open {
        output::open_file(&path).await;
    }

    info!(path = %path.display(), source = %document.source, "Download complete");
    Ok(Downloaded {
        metadata,
        path,
        source: document.source,
        size: document.bytes.len(),
    })
}
