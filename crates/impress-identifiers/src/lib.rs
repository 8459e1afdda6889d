//! Identifier extraction and normalization for academic publications
//!
//! This crate provides tools for working with publication identifiers:
//! - Field-map extraction of DOI, arXiv, bibcode, PMID, PMCID and
//!   source-specific ids (including bibcodes embedded in ADS URLs)
//! - Normalization of arXiv ids and DOIs for comparison
//! - Tagged identifier values with per-kind equivalence
//! - URL construction for landing pages and PDF artifacts

pub mod extractors;
pub mod identifier;
pub mod normalize;
pub mod resolver;

pub use extractors::*;
pub use identifier::*;
pub use normalize::*;
pub use resolver::*;

// Setup UniFFI when the feature is enabled
#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();
