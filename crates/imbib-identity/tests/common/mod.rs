//! Shared fixtures for imbib-identity integration tests

#![allow(dead_code)]

use impress_domain::{RawResult, Source};
use tracing_subscriber::EnvFilter;

/// Route `tracing` output through the test harness; `RUST_LOG` controls it
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Riess et al. 1998 as arXiv reports it
pub fn riess_arxiv() -> RawResult {
    RawResult::new("astro-ph/9805201", Source::ArXiv, "Observational Evidence from Supernovae for an Accelerating Universe and a Cosmological Constant")
        .with_authors(["Riess, Adam G.", "Filippenko, Alexei V."])
        .with_year(1998)
        .with_arxiv_id("astro-ph/9805201v1")
        .with_abstract("We present spectral and photometric observations of 10 type Ia supernovae.")
        .with_pdf_url("https://arxiv.org/pdf/astro-ph/9805201v1.pdf")
}

/// The same paper from Crossref (DOI only, upper-case)
pub fn riess_crossref() -> RawResult {
    RawResult::new("10.1086/300499", Source::Crossref, "Observational Evidence from Supernovae for an Accelerating Universe and a Cosmological Constant")
        .with_authors(["Adam G. Riess"])
        .with_year(1998)
        .with_venue("The Astronomical Journal")
        .with_doi("10.1086/300499")
}

/// The same paper from ADS, carrying both DOI and arXiv id
pub fn riess_ads() -> RawResult {
    RawResult::new("1998AJ....116.1009R", Source::ADS, "Observational Evidence from Supernovae for an Accelerating Universe and a Cosmological Constant")
        .with_authors(["Riess, A. G."])
        .with_year(1998)
        .with_venue("AJ")
        .with_doi("10.1086/300499")
        .with_arxiv_id("arXiv:astro-ph/9805201")
        .with_bibcode("1998AJ....116.1009R")
        .with_abstract("We present spectral and photometric observations of 10 type Ia supernovae (SNe Ia) in the redshift range 0.16 <= z <= 0.62.")
}

/// An unrelated paper
pub fn perlmutter_ads() -> RawResult {
    RawResult::new("1999ApJ...517..565P", Source::ADS, "Measurements of Omega and Lambda from 42 High-Redshift Supernovae")
        .with_authors(["Perlmutter, S."])
        .with_year(1999)
        .with_venue("ApJ")
        .with_doi("10.1086/307221")
        .with_bibcode("1999ApJ...517..565P")
}

/// Same DOI as [`riess_crossref`] but with resolver prefix and mixed case
pub fn riess_semantic_scholar() -> RawResult {
    RawResult::new("s2-1", Source::SemanticScholar, "Observational evidence from supernovae")
        .with_doi("https://doi.org/10.1086/300499")
        .with_semantic_scholar_id("2157016")
}
