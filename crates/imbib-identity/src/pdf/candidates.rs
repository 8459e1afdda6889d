//! Candidate PDF links for records and search results
//!
//! Candidates come from two places: links a backend reported directly, and
//! links derived from identifiers (arXiv id, DOI, bibcode).

use impress_domain::{Identifiers, PdfCandidate, PdfSourceKind, RawResult, Source, StoredRecord};
use impress_identifiers::{ads_gateway_pdf_url, ads_scan_pdf_url, arxiv_pdf_url, doi_url};
use url::Url;

use crate::deduplication::CanonicalRecord;

const ARXIV_HOSTS: &[&str] = &["arxiv.org", "export.arxiv.org"];
const ADS_SCAN_HOST: &str = "articles.adsabs.harvard.edu";
const ADS_SCAN_MARKERS: &[&str] = &["ADS_PDF", "ADS_SCAN"];

/// Whether a URL looks like an indirect resolver rather than a file link
pub fn is_gateway_url(url: &str) -> bool {
    url.to_ascii_lowercase().contains("link_gateway")
}

/// Classify an externally supplied link by its shape
pub fn classify_url(url: &str) -> PdfSourceKind {
    if is_gateway_url(url) {
        return PdfSourceKind::Gateway;
    }
    let host = Url::parse(url.trim())
        .ok()
        .and_then(|u| u.host_str().map(str::to_ascii_lowercase));
    match host.as_deref() {
        Some(h) if ARXIV_HOSTS.contains(&h.trim_start_matches("www.")) => PdfSourceKind::Preprint,
        Some(ADS_SCAN_HOST) => PdfSourceKind::AdsScan,
        _ => PdfSourceKind::Publisher,
    }
}

/// Links derivable from identifiers alone.
///
/// The bibcode only yields an ADS gateway link here; scanned articles need
/// the `esources` marker a stored record carries.
pub fn candidates_from_identifiers(
    identifiers: &Identifiers,
    source: Option<Source>,
) -> Vec<PdfCandidate> {
    let derived = [
        (
            impress_domain::present(&identifiers.arxiv_id).and_then(arxiv_pdf_url),
            PdfSourceKind::Preprint,
        ),
        (
            impress_domain::present(&identifiers.doi).and_then(doi_url),
            PdfSourceKind::Publisher,
        ),
        (
            impress_domain::present(&identifiers.bibcode).and_then(ads_gateway_pdf_url),
            PdfSourceKind::Gateway,
        ),
    ];

    derived
        .into_iter()
        .filter_map(|(url, kind)| {
            let mut candidate = PdfCandidate::new(url?, kind);
            candidate.source = source;
            Some(candidate)
        })
        .collect()
}

/// Reported link (if any) followed by identifier-derived links
pub fn candidates_for_result(result: &RawResult) -> Vec<PdfCandidate> {
    let mut candidates = Vec::new();
    if let Some(url) = impress_domain::present(&result.pdf_url) {
        candidates.push(PdfCandidate::new(url, classify_url(url)).from_source(result.source));
    }
    candidates.extend(candidates_from_identifiers(&result.identifiers, Some(result.source)));
    dedup_by_url(candidates)
}

/// Whether ADS listed a scanned copy in the record's `esources` field
fn has_ads_scan(record: &StoredRecord) -> bool {
    record.fields.get("esources").map_or(false, |esources| {
        esources
            .split(|c: char| c == ',' || c.is_whitespace())
            .any(|e| ADS_SCAN_MARKERS.iter().any(|m| e.eq_ignore_ascii_case(m)))
    })
}

/// Candidates for a stored record plus any externally supplied links.
///
/// Supplied links come first so they win ties within a bucket.
pub fn candidates_for_record(record: &StoredRecord, extra: &[PdfCandidate]) -> Vec<PdfCandidate> {
    let identifiers = Identifiers {
        doi: record.doi.clone(),
        arxiv_id: record.arxiv_id.clone(),
        bibcode: record.fields.get("bibcode").cloned(),
        ..Identifiers::default()
    };

    let mut candidates: Vec<PdfCandidate> = extra.to_vec();
    let scan = impress_domain::present(&identifiers.bibcode)
        .filter(|_| has_ads_scan(record))
        .and_then(ads_scan_pdf_url);
    if let Some(url) = scan {
        candidates.push(PdfCandidate::new(url, PdfSourceKind::AdsScan).from_source(Source::ADS));
    }
    candidates.extend(candidates_from_identifiers(&identifiers, None));
    dedup_by_url(candidates)
}

impl CanonicalRecord {
    /// Every member's reported link, then links from the merged identifiers
    pub fn pdf_candidates(&self) -> Vec<PdfCandidate> {
        let mut candidates: Vec<PdfCandidate> = self
            .members()
            .filter_map(|member| {
                let url = impress_domain::present(&member.pdf_url)?;
                Some(PdfCandidate::new(url, classify_url(url)).from_source(member.source))
            })
            .collect();
        candidates.extend(candidates_from_identifiers(
            &self.identifiers,
            Some(self.primary.source),
        ));
        dedup_by_url(candidates)
    }
}

fn dedup_by_url(candidates: Vec<PdfCandidate>) -> Vec<PdfCandidate> {
    let mut kept: Vec<PdfCandidate> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if !kept.iter().any(|c| c.url.trim() == candidate.url.trim()) {
            kept.push(candidate);
        }
    }
    kept
}
