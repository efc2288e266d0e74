//! doi2pdf - Download a research paper's PDF
//!
//! ## Usage
//!
//! ```bash
//! doi2pdf --doi 10.48550/arXiv.2203.15556
//! doi2pdf -n "Attention is all you need" -o /tmp/Transformer.pdf --open
//! doi2pdf --url https://www.science.org/doi/10.1126/science.1166301
//! ```

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use doi2pdf::config::{API_URL_ENV, DEFAULT_MIRROR_URL, MIRROR_URL_ENV, OPENALEX_API_BASE};
use doi2pdf::{doi2pdf, Config, DownloadOptions, PaperReference};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

// ============================================================================
// CLI Definition
// ============================================================================

/// Retrieves the pdf file from DOI, name or URL of a research paper.
#[derive(Parser)]
#[command(name = "doi2pdf")]
#[command(version, about, long_about = None)]
#[command(group(
    ArgGroup::new("paper")
        .required(true)
        .multiple(false)
        .args(["doi", "name", "url"])
))]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// DOI of the research paper
    #[arg(long, value_name = "DOI")]
    doi: Option<String>,

    /// Name of the research paper
    #[arg(short, long, value_name = "NAME")]
    name: Option<String>,

    /// URL of the research paper
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Path of the target pdf file
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Open the pdf file after downloading
    #[arg(long)]
    open: bool,

    /// Mirror base URL the DOI is appended to
    #[arg(long, env = MIRROR_URL_ENV, default_value = DEFAULT_MIRROR_URL)]
    mirror_url: String,

    /// OpenAlex API base URL
    #[arg(long, env = API_URL_ENV, default_value = OPENALEX_API_BASE)]
    api_url: String,
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let reference = PaperReference::from_parts(
        cli.doi.as_deref(),
        cli.name.as_deref(),
        cli.url.as_deref(),
    )
    .context("Invalid paper reference")?;

    let config = Config::default()
        .with_api_base(cli.api_url)
        .with_mirror_base(cli.mirror_url);

    let options = DownloadOptions {
        output: cli.output,
        open: cli.open,
    };

    let saved = doi2pdf(&reference, &options, &config)
        .await
        .with_context(|| format!("Failed to download {}", reference))?;

    println!("{}", saved.path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_exactly_one_reference_flag() {
        assert!(Cli::try_parse_from(["doi2pdf"]).is_err());
        assert!(Cli::try_parse_from(["doi2pdf", "--doi", "10.1/a", "-n", "Title"]).is_err());

        let cli = Cli::try_parse_from(["doi2pdf", "-n", "Attention is all you need", "--open"])
            .expect("single reference");
        assert_eq!(cli.name.as_deref(), Some("Attention is all you need"));
        assert!(cli.open);
        assert!(cli.doi.is_none());
    }
}
