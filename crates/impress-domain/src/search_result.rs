//! Search result representation from online sources

use super::Identifiers;
use serde::{Deserialize, Serialize};

/// Online source for search results
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
pub enum Source {
    ArXiv,
    Crossref,
    ADS,
    PubMed,
    OpenAlex,
    DBLP,
    SemanticScholar,
    SciX,
    Local,
    Manual,
}

impl Source {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::ArXiv => "arxiv",
            Source::Crossref => "crossref",
            Source::ADS => "ads",
            Source::PubMed => "pubmed",
            Source::OpenAlex => "openalex",
            Source::DBLP => "dblp",
            Source::SemanticScholar => "semanticscholar",
            Source::SciX => "scix",
            Source::Local => "local",
            Source::Manual => "manual",
        }
    }
}

/// One hit from one search backend.
///
/// Built once by the backend adapter and then only read: deduplication,
/// matching and import all take it by reference or clone it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct RawResult {
    /// Backend-specific result id (opaque)
    pub result_id: String,
    pub source: Source,
    pub title: String,
    /// Author names in the order the backend listed them
    pub authors: Vec<String>,
    pub year: Option<i32>,
    pub venue: Option<String>,
    pub abstract_text: Option<String>,
    pub identifiers: Identifiers,
    /// Direct PDF link reported by the backend
    pub pdf_url: Option<String>,
    /// Human-facing landing page
    pub web_url: Option<String>,
}

impl RawResult {
    /// Create a result with the required fields
    pub fn new(result_id: impl Into<String>, source: Source, title: impl Into<String>) -> Self {
        Self {
            result_id: result_id.into(),
            source,
            title: title.into(),
            authors: Vec::new(),
            year: None,
            venue: None,
            abstract_text: None,
            identifiers: Identifiers::default(),
            pdf_url: None,
            web_url: None,
        }
    }

    pub fn with_authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.authors = authors.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_venue(mut self, venue: impl Into<String>) -> Self {
        self.venue = Some(venue.into());
        self
    }

    pub fn with_abstract(mut self, abstract_text: impl Into<String>) -> Self {
        self.abstract_text = Some(abstract_text.into());
        self
    }

    pub fn with_identifiers(mut self, identifiers: Identifiers) -> Self {
        self.identifiers = identifiers;
        self
    }

    pub fn with_doi(mut self, doi: impl Into<String>) -> Self {
        self.identifiers.doi = Some(doi.into());
        self
    }

    pub fn with_arxiv_id(mut self, arxiv_id: impl Into<String>) -> Self {
        self.identifiers.arxiv_id = Some(arxiv_id.into());
        self
    }

    pub fn with_bibcode(mut self, bibcode: impl Into<String>) -> Self {
        self.identifiers.bibcode = Some(bibcode.into());
        self
    }

    pub fn with_pmid(mut self, pmid: impl Into<String>) -> Self {
        self.identifiers.pmid = Some(pmid.into());
        self
    }

    pub fn with_semantic_scholar_id(mut self, id: impl Into<String>) -> Self {
        self.identifiers.semantic_scholar_id = Some(id.into());
        self
    }

    pub fn with_openalex_id(mut self, id: impl Into<String>) -> Self {
        self.identifiers.openalex_id = Some(id.into());
        self
    }

    pub fn with_pdf_url(mut self, url: impl Into<String>) -> Self {
        self.pdf_url = Some(url.into());
        self
    }

    pub fn with_web_url(mut self, url: impl Into<String>) -> Self {
        self.web_url = Some(url.into());
        self
    }

    /// Abstract text if the backend supplied a non-blank one
    pub fn abstract_if_present(&self) -> Option<&str> {
        self.abstract_text
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }
}
