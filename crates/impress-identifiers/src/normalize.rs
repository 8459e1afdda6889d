//! Canonical textual forms for identifiers
//!
//! Normalization only reshapes; it never rejects. Anything that does not look
//! like a known form passes through trimmed (and lower-cased where the kind is
//! case-insensitive).

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Modern (2301.12345) and old-style (hep-ph/0601001, cond-mat.str-el/0601001)
    // ids with a trailing version. Only a final vNNN counts as a version.
    static ref ARXIV_VERSIONED: Regex = Regex::new(
        r"(?i)^(?P<base>\d{4}\.\d{4,5}|[a-z][a-z.\-]*/\d{7})v\d+$"
    ).unwrap();
}

const ARXIV_PREFIX: &str = "arxiv:";

const DOI_PREFIXES: &[&str] = &[
    "https://doi.org/",
    "http://doi.org/",
    "https://dx.doi.org/",
    "http://dx.doi.org/",
    "doi:",
];

/// Trim and drop a case-insensitive `arXiv:` prefix, keeping any version
pub fn strip_arxiv_prefix(raw: &str) -> &str {
    let trimmed = raw.trim();
    match trimmed.get(..ARXIV_PREFIX.len()) {
        Some(head) if head.eq_ignore_ascii_case(ARXIV_PREFIX) => {
            trimmed[ARXIV_PREFIX.len()..].trim_start()
        }
        _ => trimmed,
    }
}

/// Normalize an arXiv id: trim, drop an `arXiv:` prefix, drop a trailing
/// version suffix, lower-case.
///
/// `"arXiv:2301.12345v2"` becomes `"2301.12345"`, `"HEP-PH/0601001"` becomes
/// `"hep-ph/0601001"`.
pub fn normalize_arxiv_id(raw: &str) -> String {
    let without_prefix = strip_arxiv_prefix(raw);

    let unversioned = ARXIV_VERSIONED
        .captures(without_prefix)
        .and_then(|caps| caps.name("base"))
        .map(|m| m.as_str())
        .unwrap_or(without_prefix);

    unversioned.to_lowercase()
}

/// Normalize a DOI for comparison: trim, lower-case, drop resolver URL and
/// `doi:` prefixes.
pub fn normalize_doi(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let stripped = DOI_PREFIXES
        .iter()
        .find_map(|prefix| lowered.strip_prefix(prefix))
        .unwrap_or(&lowered);
    stripped.trim().to_string()
}
