//! Tagged identifier values and their equivalence rules

use crate::normalize::{normalize_arxiv_id, normalize_doi};
use crate::resolver::IdentifierKind;
use serde::{Deserialize, Serialize};

/// A single identifier tagged with its kind.
///
/// Two identifiers are only ever compared within the same kind; a DOI never
/// establishes equivalence with an arXiv id, however similar the strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct Identifier {
    pub kind: IdentifierKind,
    pub value: String,
}

impl Identifier {
    pub fn new(kind: IdentifierKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    /// Comparison form of the value, `None` when blank.
    ///
    /// DOIs fold case and resolver prefixes, arXiv ids drop prefix and
    /// version, bibcodes stay case-sensitive.
    pub fn normalized(&self) -> Option<String> {
        let trimmed = self.value.trim();
        if trimmed.is_empty() {
            return None;
        }
        let normalized = match self.kind {
            IdentifierKind::Doi => normalize_doi(trimmed),
            IdentifierKind::Arxiv => normalize_arxiv_id(trimmed),
            IdentifierKind::Bibcode
            | IdentifierKind::Pmid
            | IdentifierKind::Pmcid
            | IdentifierKind::SemanticScholar
            | IdentifierKind::OpenAlex => trimmed.to_string(),
        };
        Some(normalized).filter(|v| !v.is_empty())
    }

    /// Whether both identifiers name the same publication
    pub fn matches(&self, other: &Identifier) -> bool {
        if self.kind != other.kind {
            return false;
        }
        match (self.normalized(), other.normalized()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind, self.value)
    }
}
