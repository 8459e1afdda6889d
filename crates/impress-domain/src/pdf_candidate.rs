//! Candidate download links for a publication's PDF

use super::Source;
use serde::{Deserialize, Serialize};

/// Classification of a candidate PDF link
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
#[serde(rename_all = "kebab-case")]
pub enum PdfSourceKind {
    /// Free preprint (arXiv and friends)
    Preprint,
    /// Publisher copy, may need a subscription or proxy
    Publisher,
    /// Historical scanned article hosted by ADS, always free
    AdsScan,
    /// Indirect resolver link; last resort
    Gateway,
}

impl PdfSourceKind {
    /// Whether fetching this kind goes through the user's proxy
    pub fn requires_proxy(&self) -> bool {
        matches!(self, PdfSourceKind::Publisher | PdfSourceKind::Gateway)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PdfSourceKind::Preprint => "Preprint",
            PdfSourceKind::Publisher => "Publisher",
            PdfSourceKind::AdsScan => "ADS Scan",
            PdfSourceKind::Gateway => "Link Gateway",
        }
    }
}

/// A link to a PDF
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct PdfCandidate {
    pub url: String,
    pub kind: PdfSourceKind,
    /// Backend that contributed the link, if known
    pub source: Option<Source>,
}

impl PdfCandidate {
    pub fn new(url: impl Into<String>, kind: PdfSourceKind) -> Self {
        Self {
            url: url.into(),
            kind,
            source: None,
        }
    }

    pub fn from_source(mut self, source: Source) -> Self {
        self.source = Some(source);
        self
    }
}
