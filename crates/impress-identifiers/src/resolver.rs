//! Identifier kinds and the URLs they resolve to
//!
//! Maps each identifier kind to its landing page, and builds the direct
//! artifact URLs the PDF resolver ranks (arXiv PDF, ADS link gateway,
//! ADS scans, DOI resolver).

use impress_domain::{present, Identifiers};
use serde::{Deserialize, Serialize};

use crate::normalize::strip_arxiv_prefix;

/// Types of publication identifiers across different sources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
#[serde(rename_all = "lowercase")]
pub enum IdentifierKind {
    /// Digital Object Identifier
    Doi,
    /// arXiv preprint identifier
    Arxiv,
    /// NASA ADS bibcode
    Bibcode,
    /// PubMed identifier
    Pmid,
    /// PubMed Central identifier
    Pmcid,
    /// Semantic Scholar paper ID (citation graph)
    SemanticScholar,
    /// OpenAlex work ID (open metadata)
    OpenAlex,
}

impl IdentifierKind {
    /// Get all identifier kinds, most reliable first
    pub fn all() -> &'static [IdentifierKind] {
        &[
            IdentifierKind::Doi,
            IdentifierKind::Arxiv,
            IdentifierKind::Bibcode,
            IdentifierKind::Pmid,
            IdentifierKind::Pmcid,
            IdentifierKind::SemanticScholar,
            IdentifierKind::OpenAlex,
        ]
    }

    /// Field-map key for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentifierKind::Doi => "doi",
            IdentifierKind::Arxiv => "arxiv",
            IdentifierKind::Bibcode => "bibcode",
            IdentifierKind::Pmid => "pmid",
            IdentifierKind::Pmcid => "pmcid",
            IdentifierKind::SemanticScholar => "semanticscholar",
            IdentifierKind::OpenAlex => "openalex",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            IdentifierKind::Doi => "DOI",
            IdentifierKind::Arxiv => "arXiv",
            IdentifierKind::Bibcode => "ADS Bibcode",
            IdentifierKind::Pmid => "PubMed",
            IdentifierKind::Pmcid => "PMC",
            IdentifierKind::SemanticScholar => "Semantic Scholar",
            IdentifierKind::OpenAlex => "OpenAlex",
        }
    }

    /// The non-blank value of this kind in an identifier bundle
    pub fn value_in<'a>(&self, identifiers: &'a Identifiers) -> Option<&'a str> {
        let slot = match self {
            IdentifierKind::Doi => &identifiers.doi,
            IdentifierKind::Arxiv => &identifiers.arxiv_id,
            IdentifierKind::Bibcode => &identifiers.bibcode,
            IdentifierKind::Pmid => &identifiers.pmid,
            IdentifierKind::Pmcid => &identifiers.pmcid,
            IdentifierKind::SemanticScholar => &identifiers.semantic_scholar_id,
            IdentifierKind::OpenAlex => &identifiers.openalex_id,
        };
        present(slot)
    }
}

impl std::fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Get the URL prefix for an identifier kind
pub fn identifier_url_prefix(kind: IdentifierKind) -> &'static str {
    match kind {
        IdentifierKind::Doi => "https://doi.org/",
        IdentifierKind::Arxiv => "https://arxiv.org/abs/",
        IdentifierKind::Bibcode => "https://ui.adsabs.harvard.edu/abs/",
        IdentifierKind::Pmid => "https://pubmed.ncbi.nlm.nih.gov/",
        IdentifierKind::Pmcid => "https://www.ncbi.nlm.nih.gov/pmc/articles/",
        IdentifierKind::SemanticScholar => "https://www.semanticscholar.org/paper/",
        IdentifierKind::OpenAlex => "https://openalex.org/works/",
    }
}

/// Get the landing-page URL for an identifier, `None` for a blank value
pub fn identifier_url(kind: IdentifierKind, value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    Some(format!("{}{}", identifier_url_prefix(kind), value))
}

#[cfg(feature = "uniffi")]
#[uniffi::export]
pub fn identifier_url_ffi(kind: IdentifierKind, value: String) -> Option<String> {
    identifier_url(kind, &value)
}

/// arXiv PDF URL for an id; an `arXiv:` prefix is dropped, any version
/// suffix is kept
pub fn arxiv_pdf_url(arxiv_id: &str) -> Option<String> {
    let id = strip_arxiv_prefix(arxiv_id);
    if id.is_empty() {
        return None;
    }
    Some(format!("https://arxiv.org/pdf/{}.pdf", id))
}

#[cfg(feature = "uniffi")]
#[uniffi::export]
pub fn arxiv_pdf_url_ffi(arxiv_id: String) -> Option<String> {
    arxiv_pdf_url(&arxiv_id)
}

/// ADS link-gateway URL for the publisher PDF of a bibcode
pub fn ads_gateway_pdf_url(bibcode: &str) -> Option<String> {
    let bibcode = bibcode.trim();
    if bibcode.is_empty() {
        return None;
    }
    Some(format!(
        "https://ui.adsabs.harvard.edu/link_gateway/{}/PUB_PDF",
        bibcode
    ))
}

#[cfg(feature = "uniffi")]
#[uniffi::export]
pub fn ads_gateway_pdf_url_ffi(bibcode: String) -> Option<String> {
    ads_gateway_pdf_url(&bibcode)
}

/// Direct URL of the scanned article ADS hosts for a bibcode
pub fn ads_scan_pdf_url(bibcode: &str) -> Option<String> {
    let bibcode = bibcode.trim();
    if bibcode.is_empty() {
        return None;
    }
    Some(format!("https://articles.adsabs.harvard.edu/pdf/{}", bibcode))
}

/// DOI resolver URL (publisher landing)
pub fn doi_url(doi: &str) -> Option<String> {
    identifier_url(IdentifierKind::Doi, doi)
}
