//! Search result deduplication orchestration
//!
//! Clusters results from multiple sources by shared identifiers. Clustering
//! is a union-find over result indices, so it is transitive: if A shares a
//! DOI with B and B shares an arXiv id with C, all three land together.
//! Titles and authors never cause a match on their own.

use std::collections::HashMap;

use impress_domain::RawResult;
use impress_identifiers::{Identifier, IdentifierKind};
use tracing::{debug, trace};

use super::canonical::CanonicalRecord;
use super::union_find::DisjointSet;

/// Identifier kinds that establish equivalence, in precedence order.
///
/// PubMed ids are deliberately absent: they are carried through but do not
/// join clusters.
pub const MATCH_PRECEDENCE: [IdentifierKind; 5] = [
    IdentifierKind::Doi,
    IdentifierKind::Arxiv,
    IdentifierKind::Bibcode,
    IdentifierKind::SemanticScholar,
    IdentifierKind::OpenAlex,
];

/// Normalized comparison keys for one result, indexed like `MATCH_PRECEDENCE`
struct MatchKeys([Option<String>; 5]);

impl MatchKeys {
    fn from_result(result: &RawResult) -> Self {
        MatchKeys(MATCH_PRECEDENCE.map(|kind| {
            kind.value_in(&result.identifiers)
                .and_then(|value| Identifier::new(kind, value).normalized())
        }))
    }

    fn shared_kind(&self, other: &MatchKeys) -> Option<IdentifierKind> {
        MATCH_PRECEDENCE
            .iter()
            .zip(self.0.iter().zip(other.0.iter()))
            .find_map(|(&kind, pair)| match pair {
                (Some(a), Some(b)) if a == b => Some(kind),
                _ => None,
            })
    }
}

/// The identifier kind that makes `a` and `b` the same publication, if any.
///
/// Kinds are checked in `MATCH_PRECEDENCE` order and the first hit wins.
pub fn match_reason(a: &RawResult, b: &RawResult) -> Option<IdentifierKind> {
    MatchKeys::from_result(a).shared_kind(&MatchKeys::from_result(b))
}

/// Check if two results represent the same paper
pub fn shares_identifier(a: &RawResult, b: &RawResult) -> bool {
    match_reason(a, b).is_some()
}

/// Cluster raw results into canonical records.
///
/// Pure and deterministic for a given input order. Records come out in the
/// order their primaries appear in the input; the primary is the earliest
/// member, so reordering the input may change which result is primary but
/// never which results cluster together.
pub fn deduplicate(results: Vec<RawResult>) -> Vec<CanonicalRecord> {
    if results.is_empty() {
        return Vec::new();
    }

    let keys: Vec<MatchKeys> = results.iter().map(MatchKeys::from_result).collect();
    let mut sets = DisjointSet::new(results.len());
    let mut unions = 0usize;

    for i in 0..keys.len() {
        for j in (i + 1)..keys.len() {
            if sets.same_set(i, j) {
                continue;
            }
            if let Some(kind) = keys[i].shared_kind(&keys[j]) {
                trace!(
                    "joining {}:{} with {}:{} on {}",
                    results[i].source.as_str(),
                    results[i].result_id,
                    results[j].source.as_str(),
                    results[j].result_id,
                    kind
                );
                sets.union(i, j);
                unions += 1;
            }
        }
    }

    let mut cluster_by_root: HashMap<usize, usize> = HashMap::new();
    let mut clusters: Vec<Vec<usize>> = Vec::new();
    for index in 0..results.len() {
        let root = sets.find(index);
        let slot = *cluster_by_root.entry(root).or_insert_with(|| {
            clusters.push(Vec::new());
            clusters.len() - 1
        });
        clusters[slot].push(index);
    }

    let input_len = results.len();
    let mut slots: Vec<Option<RawResult>> = results.into_iter().map(Some).collect();
    let records: Vec<CanonicalRecord> = clusters
        .into_iter()
        .filter_map(|indices| {
            let members = indices
                .into_iter()
                .filter_map(|index| slots[index].take())
                .collect();
            CanonicalRecord::from_members(members)
        })
        .collect();

    debug!(
        "deduplicated {} results into {} records ({} joins)",
        input_len,
        records.len(),
        unions
    );
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use impress_domain::Source;

    fn make_input(id: &str, source: Source, doi: Option<&str>, arxiv: Option<&str>) -> RawResult {
        let mut result = RawResult::new(id, source, format!("Paper {}", id));
        result.identifiers.doi = doi.map(str::to_string);
        result.identifiers.arxiv_id = arxiv.map(str::to_string);
        result
    }

    #[test]
    fn test_shares_identifier_doi_normalized() {
        let a = make_input("1", Source::Crossref, Some("10.1234/TEST"), None);
        let b = make_input("2", Source::ArXiv, Some(" 10.1234/test "), None);
        assert_eq!(match_reason(&a, &b), Some(IdentifierKind::Doi));
    }

    #[test]
    fn test_shares_identifier_arxiv_version() {
        let a = make_input("1", Source::ArXiv, None, Some("2301.12345"));
        let b = make_input("2", Source::SemanticScholar, None, Some("arXiv:2301.12345v2"));
        assert_eq!(match_reason(&a, &b), Some(IdentifierKind::Arxiv));
    }

    #[test]
    fn test_doi_takes_precedence_over_arxiv() {
        let a = make_input("1", Source::ADS, Some("10.1/x"), Some("2301.00001"));
        let b = make_input("2", Source::Crossref, Some("10.1/X"), Some("2301.00001"));
        assert_eq!(match_reason(&a, &b), Some(IdentifierKind::Doi));
    }

    #[test]
    fn test_bibcode_case_sensitive() {
        let a = RawResult::new("1", Source::ADS, "A").with_bibcode("2024ApJ...123..456A");
        let b = RawResult::new("2", Source::SciX, "B").with_bibcode("2024APJ...123..456A");
        assert!(!shares_identifier(&a, &b));
    }

    #[test]
    fn test_source_ids_match() {
        let a = RawResult::new("1", Source::SemanticScholar, "A").with_semantic_scholar_id("42");
        let b = RawResult::new("2", Source::OpenAlex, "B").with_semantic_scholar_id("42");
        assert_eq!(match_reason(&a, &b), Some(IdentifierKind::SemanticScholar));

        let c = RawResult::new("3", Source::OpenAlex, "C").with_openalex_id("W7");
        let d = RawResult::new("4", Source::Crossref, "D").with_openalex_id("W7");
        assert_eq!(match_reason(&c, &d), Some(IdentifierKind::OpenAlex));
    }

    #[test]
    fn test_pmid_does_not_join() {
        let a = RawResult::new("1", Source::PubMed, "A").with_pmid("12345");
        let b = RawResult::new("2", Source::Crossref, "B").with_pmid("12345");
        assert!(!shares_identifier(&a, &b));
    }

    #[test]
    fn test_empty_identifiers_never_match() {
        let a = make_input("1", Source::Crossref, Some(""), Some(""));
        let b = make_input("2", Source::ArXiv, Some(""), Some("  "));
        assert!(!shares_identifier(&a, &b));
    }

    #[test]
    fn test_same_title_without_identifiers_stays_apart() {
        let a = RawResult::new("1", Source::Crossref, "Machine Learning for Everyone");
        let b = RawResult::new("2", Source::ArXiv, "Machine Learning for Everyone");
        assert_eq!(deduplicate(vec![a, b]).len(), 2);
    }

    #[test]
    fn test_deduplicate_by_doi() {
        let results = vec![
            make_input("1", Source::ArXiv, Some("10.1234/test"), None),
            make_input("2", Source::Crossref, Some("10.1234/test"), None),
            make_input("3", Source::ADS, Some("10.5678/other"), None),
        ];

        let records = deduplicate(results);
        assert_eq!(records.len(), 2);

        // First input wins primary
        assert_eq!(records[0].primary.result_id, "1");
        assert_eq!(records[0].alternates.len(), 1);
        assert_eq!(records[0].alternates[0].result_id, "2");

        assert_eq!(records[1].primary.result_id, "3");
        assert!(records[1].alternates.is_empty());
    }

    #[test]
    fn test_deduplicate_empty_and_singleton() {
        assert!(deduplicate(vec![]).is_empty());

        let records = deduplicate(vec![make_input("1", Source::ADS, None, None)]);
        assert_eq!(records.len(), 1);
        assert!(records[0].alternates.is_empty());
    }

    #[test]
    fn test_transitive_cluster() {
        let results = vec![
            make_input("1", Source::Crossref, Some("10.1/x"), None),
            make_input("2", Source::ADS, Some("10.1/x"), Some("2301.00001")),
            make_input("3", Source::ArXiv, None, Some("2301.00001v3")),
        ];
        let records = deduplicate(results);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].member_count(), 3);
    }

    #[test]
    fn test_late_bridge_merges_earlier_clusters() {
        // 1 and 2 are unrelated until 3 bridges them
        let results = vec![
            make_input("1", Source::Crossref, Some("10.1/a"), None),
            make_input("2", Source::ArXiv, None, Some("2301.00002")),
            make_input("3", Source::ADS, Some("10.1/a"), Some("2301.00002")),
            make_input("4", Source::PubMed, Some("10.9/unrelated"), None),
        ];
        let records = deduplicate(results);
        assert_eq!(records.len(), 2);
        let ids: Vec<&str> = records[0].members().map(|r| r.result_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(records[1].primary.result_id, "4");
    }
}
