//! Identifier extraction from free-form field maps
//!
//! Backends and BibTeX imports hand us a loose `key -> value` map. Each
//! extractor looks up its keys in a fixed priority order and returns the raw
//! value; absence is `None`, never an error.

use std::collections::HashMap;

use impress_domain::Identifiers;

use crate::resolver::IdentifierKind;

const ARXIV_KEYS: &[&str] = &["eprint", "arxivid", "arxiv"];
const SEMANTIC_SCHOLAR_KEYS: &[&str] = &["semanticscholar", "s2id"];
const OPENALEX_KEYS: &[&str] = &["openalex", "openalexid"];

const ADS_DOMAIN: &str = "adsabs.harvard.edu";

/// Look up a key exactly, then ASCII-case-insensitively. Among keys that
/// differ only by case, the lexicographically smallest wins.
fn field<'a>(fields: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    if let Some(value) = fields.get(key) {
        return Some(value.as_str());
    }
    fields
        .iter()
        .filter(|(k, _)| k.eq_ignore_ascii_case(key))
        .min_by(|a, b| a.0.cmp(b.0))
        .map(|(_, v)| v.as_str())
}

/// First key present wins, even if its value is empty.
fn first_field(fields: &HashMap<String, String>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| field(fields, key))
        .map(str::to_string)
}

/// arXiv id, verbatim, from `eprint` > `arxivid` > `arxiv`.
///
/// Returns `Some("")` when the winning key exists with an empty value.
pub fn arxiv_id(fields: &HashMap<String, String>) -> Option<String> {
    first_field(fields, ARXIV_KEYS)
}

/// DOI, verbatim, from `doi`
pub fn doi(fields: &HashMap<String, String>) -> Option<String> {
    first_field(fields, &["doi"])
}

/// ADS bibcode from `bibcode`, else parsed out of an ADS `adsurl`.
///
/// A blank `bibcode` value falls through to `adsurl`.
pub fn bibcode(fields: &HashMap<String, String>) -> Option<String> {
    if let Some(value) = field(fields, "bibcode").filter(|v| !v.trim().is_empty()) {
        return Some(value.to_string());
    }
    field(fields, "adsurl").and_then(bibcode_from_ads_url)
}

/// Extract the bibcode from an ADS abstract URL.
///
/// Takes the path segment after `/abs/`. Hosts outside the ADS domain
/// family yield `None`.
pub fn bibcode_from_ads_url(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let parsed = url::Url::parse(raw)
        .or_else(|_| url::Url::parse(&format!("https://{}", raw)))
        .ok()?;

    let host = parsed.host_str()?.to_ascii_lowercase();
    if host != ADS_DOMAIN && !host.ends_with(&format!(".{}", ADS_DOMAIN)) {
        return None;
    }

    let path = parsed.path();
    let start = path.find("/abs/")? + "/abs/".len();
    let segment = path[start..].split('/').next()?;
    let decoded = urlencoding::decode(segment).ok()?;
    let bibcode = decoded.trim();
    if bibcode.is_empty() {
        None
    } else {
        Some(bibcode.to_string())
    }
}

/// PubMed id from `pmid`
pub fn pmid(fields: &HashMap<String, String>) -> Option<String> {
    first_field(fields, &["pmid"])
}

/// PubMed Central id from `pmcid`
pub fn pmcid(fields: &HashMap<String, String>) -> Option<String> {
    first_field(fields, &["pmcid"])
}

/// Semantic Scholar id from `semanticscholar` > `s2id`
pub fn semantic_scholar_id(fields: &HashMap<String, String>) -> Option<String> {
    first_field(fields, SEMANTIC_SCHOLAR_KEYS)
}

/// OpenAlex id from `openalex` > `openalexid`
pub fn openalex_id(fields: &HashMap<String, String>) -> Option<String> {
    first_field(fields, OPENALEX_KEYS)
}

/// Run the extractor for one kind
pub fn extract(kind: IdentifierKind, fields: &HashMap<String, String>) -> Option<String> {
    match kind {
        IdentifierKind::Doi => doi(fields),
        IdentifierKind::Arxiv => arxiv_id(fields),
        IdentifierKind::Bibcode => bibcode(fields),
        IdentifierKind::Pmid => pmid(fields),
        IdentifierKind::Pmcid => pmcid(fields),
        IdentifierKind::SemanticScholar => semantic_scholar_id(fields),
        IdentifierKind::OpenAlex => openalex_id(fields),
    }
}

/// Every identifier kind present in `fields`. Blank values are omitted.
pub fn all_identifiers(fields: &HashMap<String, String>) -> HashMap<IdentifierKind, String> {
    IdentifierKind::all()
        .iter()
        .filter_map(|&kind| {
            extract(kind, fields)
                .filter(|value| !value.trim().is_empty())
                .map(|value| (kind, value))
        })
        .collect()
}

/// Build an identifier bundle from a field map
pub fn identifiers_from_fields(fields: &HashMap<String, String>) -> Identifiers {
    let mut found = all_identifiers(fields);
    Identifiers {
        doi: found.remove(&IdentifierKind::Doi),
        arxiv_id: found.remove(&IdentifierKind::Arxiv),
        bibcode: found.remove(&IdentifierKind::Bibcode),
        pmid: found.remove(&IdentifierKind::Pmid),
        pmcid: found.remove(&IdentifierKind::Pmcid),
        semantic_scholar_id: found.remove(&IdentifierKind::SemanticScholar),
        openalex_id: found.remove(&IdentifierKind::OpenAlex),
    }
}

#[cfg(feature = "uniffi")]
#[uniffi::export]
pub fn arxiv_id_ffi(fields: HashMap<String, String>) -> Option<String> {
    arxiv_id(&fields)
}

#[cfg(feature = "uniffi")]
#[uniffi::export]
pub fn bibcode_ffi(fields: HashMap<String, String>) -> Option<String> {
    bibcode(&fields)
}

#[cfg(feature = "uniffi")]
#[uniffi::export]
pub fn all_identifiers_ffi(fields: HashMap<String, String>) -> HashMap<String, String> {
    all_identifiers(&fields)
        .into_iter()
        .map(|(kind, value)| (kind.as_str().to_string(), value))
        .collect()
}
