//! Priority chain for finding an already-stored record
//!
//! Each link in the chain is an `IdentifierMatcher`. The chain runs them in
//! order and stops at the first hit, so cheap indexed lookups (DOI, arXiv)
//! always run before the bibcode field scan.

use impress_domain::StoredRecord;
use impress_identifiers::{normalize_arxiv_id, IdentifierKind};
use tracing::{debug, warn};

use super::store::RecordStore;
use crate::deduplication::CanonicalRecord;
use crate::error::StoreError;

/// One strategy in the lookup chain.
pub trait IdentifierMatcher: Send + Sync {
    /// Identifier kind this matcher keys on (for logging and introspection)
    fn kind(&self) -> IdentifierKind;

    /// Look the record up. `Ok(None)` when the record has no such identifier
    /// or nothing is stored under it.
    fn lookup(
        &self,
        record: &CanonicalRecord,
        store: &dyn RecordStore,
    ) -> Result<Option<StoredRecord>, StoreError>;
}

/// Looks up the primary result's identifier of one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimaryIdentifierMatcher {
    kind: IdentifierKind,
}

impl PrimaryIdentifierMatcher {
    /// `None` for kinds the store has no lookup for (PMID, PMCID)
    pub fn new(kind: IdentifierKind) -> Option<Self> {
        match kind {
            IdentifierKind::Doi
            | IdentifierKind::Arxiv
            | IdentifierKind::Bibcode
            | IdentifierKind::SemanticScholar
            | IdentifierKind::OpenAlex => Some(Self { kind }),
            IdentifierKind::Pmid | IdentifierKind::Pmcid => None,
        }
    }
}

impl IdentifierMatcher for PrimaryIdentifierMatcher {
    fn kind(&self) -> IdentifierKind {
        self.kind
    }

    fn lookup(
        &self,
        record: &CanonicalRecord,
        store: &dyn RecordStore,
    ) -> Result<Option<StoredRecord>, StoreError> {
        let Some(value) = self.kind.value_in(&record.primary.identifiers) else {
            return Ok(None);
        };
        match self.kind {
            IdentifierKind::Doi => store.find_by_doi(value),
            IdentifierKind::Arxiv => store.find_by_arxiv_id(&normalize_arxiv_id(value)),
            IdentifierKind::Bibcode => store.find_by_bibcode(value),
            IdentifierKind::SemanticScholar => store.find_by_semantic_scholar_id(value),
            IdentifierKind::OpenAlex => store.find_by_openalex_id(value),
            IdentifierKind::Pmid | IdentifierKind::Pmcid => Ok(None),
        }
    }
}

/// Default chain order
pub const LOOKUP_ORDER: [IdentifierKind; 5] = [
    IdentifierKind::Doi,
    IdentifierKind::Arxiv,
    IdentifierKind::Bibcode,
    IdentifierKind::SemanticScholar,
    IdentifierKind::OpenAlex,
];

/// Ordered list of matchers evaluated until one succeeds.
pub struct RecordMatcher {
    matchers: Vec<Box<dyn IdentifierMatcher>>,
}

impl Default for RecordMatcher {
    fn default() -> Self {
        let matchers = LOOKUP_ORDER
            .iter()
            .filter_map(|&kind| PrimaryIdentifierMatcher::new(kind))
            .map(|m| Box::new(m) as Box<dyn IdentifierMatcher>)
            .collect();
        Self { matchers }
    }
}

impl RecordMatcher {
    /// An empty chain; add matchers with [`RecordMatcher::with_matcher`]
    pub fn empty() -> Self {
        Self {
            matchers: Vec::new(),
        }
    }

    /// Append a matcher at the end of the chain
    pub fn with_matcher(mut self, matcher: impl IdentifierMatcher + 'static) -> Self {
        self.matchers.push(Box::new(matcher));
        self
    }

    /// Kinds in evaluation order
    pub fn kinds(&self) -> Vec<IdentifierKind> {
        self.matchers.iter().map(|m| m.kind()).collect()
    }

    /// First stored record matching the canonical record, with the kind that
    /// matched.
    ///
    /// A failing lookup is logged and skipped; the chain carries on with the
    /// next identifier.
    pub fn find_existing_with_kind(
        &self,
        record: &CanonicalRecord,
        store: &dyn RecordStore,
    ) -> Option<(IdentifierKind, StoredRecord)> {
        if record.identifiers.is_empty() {
            debug!("record {} carries no identifiers, skipping lookup", record.id);
            return None;
        }
        for matcher in &self.matchers {
            match matcher.lookup(record, store) {
                Ok(Some(found)) => {
                    debug!(
                        "record {} matches stored {} by {}",
                        record.id,
                        found.id,
                        matcher.kind()
                    );
                    return Some((matcher.kind(), found));
                }
                Ok(None) => {}
                Err(e) => {
                    warn!(
                        "{} lookup failed for record {}: {}",
                        matcher.kind(),
                        record.id,
                        e
                    );
                }
            }
        }
        None
    }

    /// First stored record matching the canonical record
    pub fn find_existing(
        &self,
        record: &CanonicalRecord,
        store: &dyn RecordStore,
    ) -> Option<StoredRecord> {
        self.find_existing_with_kind(record, store)
            .map(|(_, found)| found)
    }
}

/// Resolve a canonical record against the store with the default chain.
///
/// `None` means "not stored yet, go ahead and create it", never an error.
pub fn find_existing(record: &CanonicalRecord, store: &dyn RecordStore) -> Option<StoredRecord> {
    RecordMatcher::default().find_existing(record, store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use crate::deduplication::deduplicate;
    use impress_domain::{RawResult, Source};

    /// Records every lookup it receives and answers from fixed hits.
    #[derive(Default)]
    struct ScriptedStore {
        calls: Mutex<Vec<String>>,
        doi_hit: Option<StoredRecord>,
        bibcode_hit: Option<StoredRecord>,
        fail_doi: bool,
    }

    impl ScriptedStore {
        fn log(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl RecordStore for ScriptedStore {
        fn find_by_doi(&self, doi: &str) -> Result<Option<StoredRecord>, StoreError> {
            self.log(format!("doi:{}", doi));
            if self.fail_doi {
                return Err(StoreError::Storage("index offline".into()));
            }
            Ok(self.doi_hit.clone())
        }

        fn find_by_arxiv_id(&self, id: &str) -> Result<Option<StoredRecord>, StoreError> {
            self.log(format!("arxiv:{}", id));
            Ok(None)
        }

        fn find_by_bibcode(&self, bibcode: &str) -> Result<Option<StoredRecord>, StoreError> {
            self.log(format!("bibcode:{}", bibcode));
            Ok(self.bibcode_hit.clone())
        }

        fn find_by_semantic_scholar_id(&self, id: &str) -> Result<Option<StoredRecord>, StoreError> {
            self.log(format!("semanticscholar:{}", id));
            Ok(None)
        }

        fn find_by_openalex_id(&self, id: &str) -> Result<Option<StoredRecord>, StoreError> {
            self.log(format!("openalex:{}", id));
            Ok(None)
        }
    }

    fn canonical(result: RawResult) -> CanonicalRecord {
        deduplicate(vec![result]).remove(0)
    }

    fn full_result() -> RawResult {
        RawResult::new("1", Source::ADS, "Paper")
            .with_doi("10.1/x")
            .with_arxiv_id("arXiv:2301.00001v2")
            .with_bibcode("2023ApJ...900....1A")
            .with_semantic_scholar_id("42")
            .with_openalex_id("W7")
    }

    #[test]
    fn test_default_chain_order() {
        assert_eq!(RecordMatcher::default().kinds(), LOOKUP_ORDER.to_vec());
    }

    #[test]
    fn test_pmid_has_no_matcher() {
        assert!(PrimaryIdentifierMatcher::new(IdentifierKind::Pmid).is_none());
    }

    #[test]
    fn test_stops_at_first_hit() {
        let store = ScriptedStore {
            doi_hit: Some(StoredRecord::new("hit")),
            ..Default::default()
        };
        let found = find_existing(&canonical(full_result()), &store).unwrap();
        assert_eq!(found.cite_key, "hit");
        assert_eq!(store.calls(), vec!["doi:10.1/x"]);
    }

    #[test]
    fn test_full_miss_walks_chain_in_order() {
        let store = ScriptedStore::default();
        assert!(find_existing(&canonical(full_result()), &store).is_none());
        assert_eq!(
            store.calls(),
            vec![
                "doi:10.1/x",
                "arxiv:2301.00001",
                "bibcode:2023ApJ...900....1A",
                "semanticscholar:42",
                "openalex:W7",
            ]
        );
    }

    #[test]
    fn test_missing_identifiers_are_skipped() {
        let store = ScriptedStore::default();
        let record = canonical(RawResult::new("1", Source::ADS, "P").with_bibcode("2023ApJ...900....1A"));
        assert!(find_existing(&record, &store).is_none());
        assert_eq!(store.calls(), vec!["bibcode:2023ApJ...900....1A"]);
    }

    #[test]
    fn test_failing_lookup_falls_through() {
        let store = ScriptedStore {
            fail_doi: true,
            bibcode_hit: Some(StoredRecord::new("by-bibcode")),
            ..Default::default()
        };
        let (kind, found) = RecordMatcher::default()
            .find_existing_with_kind(&canonical(full_result()), &store)
            .unwrap();
        assert_eq!(kind, IdentifierKind::Bibcode);
        assert_eq!(found.cite_key, "by-bibcode");
    }

    #[test]
    fn test_custom_chain() {
        let store = ScriptedStore {
            doi_hit: Some(StoredRecord::new("hit")),
            ..Default::default()
        };
        let matcher = RecordMatcher::empty()
            .with_matcher(PrimaryIdentifierMatcher::new(IdentifierKind::OpenAlex).unwrap());
        assert!(matcher.find_existing(&canonical(full_result()), &store).is_none());
        assert_eq!(store.calls(), vec!["openalex:W7"]);
    }
}
