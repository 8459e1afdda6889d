//! Scientific publication identifiers

use serde::{Deserialize, Serialize};

/// Collection of publication identifiers carried by a search result.
///
/// Values are stored as the backend reported them. An empty string is kept
/// as-is but counts as "no value" everywhere identity is decided.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct Identifiers {
    pub doi: Option<String>,
    pub arxiv_id: Option<String>,
    pub bibcode: Option<String>,
    pub pmid: Option<String>,
    pub pmcid: Option<String>,
    /// Citation-graph paper id (Semantic Scholar corpus id)
    pub semantic_scholar_id: Option<String>,
    /// Open-metadata work id (OpenAlex)
    pub openalex_id: Option<String>,
}

/// Returns the trimmed value when present and non-empty.
pub fn present(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

impl Identifiers {
    /// Check if all identifiers are empty
    pub fn is_empty(&self) -> bool {
        present(&self.doi).is_none()
            && present(&self.arxiv_id).is_none()
            && present(&self.bibcode).is_none()
            && present(&self.pmid).is_none()
            && present(&self.pmcid).is_none()
            && present(&self.semantic_scholar_id).is_none()
            && present(&self.openalex_id).is_none()
    }

    /// Fill every missing identifier from `other`, keeping existing values.
    pub fn fill_missing(&mut self, other: &Identifiers) {
        fn fill(slot: &mut Option<String>, from: &Option<String>) {
            if present(slot).is_none() {
                if let Some(v) = present(from) {
                    *slot = Some(v.to_string());
                }
            }
        }
        fill(&mut self.doi, &other.doi);
        fill(&mut self.arxiv_id, &other.arxiv_id);
        fill(&mut self.bibcode, &other.bibcode);
        fill(&mut self.pmid, &other.pmid);
        fill(&mut self.pmcid, &other.pmcid);
        fill(&mut self.semantic_scholar_id, &other.semantic_scholar_id);
        fill(&mut self.openalex_id, &other.openalex_id);
    }
}
