//! Bibliographic domain types shared across the imbib crates
//!
//! This crate provides the value types the identity pipeline passes around:
//! - RawResult: one hit from one search backend
//! - Identifiers: DOI, arXiv, bibcode, PubMed and source-specific ids
//! - StoredRecord: a publication already in the local library
//! - PdfCandidate: a classified download link
//! - Collection: grouping context that imports link records into

pub mod collection;
pub mod identifiers;
pub mod pdf_candidate;
pub mod publication;
pub mod search_result;

pub use collection::*;
pub use identifiers::*;
pub use pdf_candidate::*;
pub use publication::*;
pub use search_result::*;

// Setup UniFFI when the feature is enabled
#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();
