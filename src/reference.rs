//! Paper reference: the one thing the caller knows about the paper.

use crate::error::{Doi2PdfError, Result};
use std::fmt;

/// Prefixes stripped from user supplied DOIs
const DOI_PREFIXES: &[&str] = &[
    "https://doi.org/",
    "http://doi.org/",
    "https://dx.doi.org/",
    "http://dx.doi.org/",
    "doi:",
];

/// Exactly one way of identifying a paper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaperReference {
    /// Bare DOI, e.g. `10.48550/arXiv.2203.15556`
    Doi(String),
    /// Free-text title, resolved by relevance search
    Title(String),
    /// Landing page URL
    Url(String),
}

impl PaperReference {
    /// Build a reference from the three optional inputs.
    ///
    /// Exactly one of `doi`, `name` and `url` must be present; blank strings
    /// count as absent. Anything else is a `NotFound` error.
    pub fn from_parts(doi: Option<&str>, name: Option<&str>, url: Option<&str>) -> Result<Self> {
        fn present(v: Option<&str>) -> Option<&str> {
            v.map(str::trim).filter(|s| !s.is_empty())
        }

        match (present(doi), present(name), present(url)) {
            (Some(doi), None, None) => Ok(Self::Doi(normalize_doi(doi))),
            (None, Some(name), None) => Ok(Self::Title(name.to_string())),
            (None, None, Some(url)) => Ok(Self::Url(url.to_string())),
            (None, None, None) => Err(Doi2PdfError::not_found(
                "one of doi, name, url must be specified",
            )),
            _ => Err(Doi2PdfError::not_found(
                "only one of doi, name, url must be specified",
            )),
        }
    }

    /// The DOI, when this reference is one.
    pub fn doi(&self) -> Option<&str> {
        match self {
            Self::Doi(doi) => Some(doi),
            _ => None,
        }
    }
}

impl fmt::Display for PaperReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Doi(doi) => write!(f, "doi {}", doi),
            Self::Title(title) => write!(f, "title \"{}\"", title),
            Self::Url(url) => write!(f, "url {}", url),
        }
    }
}

/// Strip resolver prefixes so `https://doi.org/10.1/x` and `10.1/x` are the same DOI.
pub fn normalize_doi(doi: &str) -> String {
    let doi = doi.trim();
    for prefix in DOI_PREFIXES {
        match doi.get(..prefix.len()) {
            Some(head) if head.eq_ignore_ascii_case(prefix) => {
                return doi[prefix.len()..].trim().to_string();
            }
            _ => {}
        }
    }
    doi.to_string()
}
