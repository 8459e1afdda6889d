//! Search → deduplicate → import → resolve, with in-memory collaborators

mod common;

use std::sync::Arc;

use imbib_identity::config::IdentityConfig;
use imbib_identity::error::BackendError;
use imbib_identity::matching::{import_canonical_records, MemoryRecordStore, RecordMatcher};
use imbib_identity::pdf::{candidates_for_record, resolve};
use imbib_identity::search::{SearchBackend, SearchCache, SearchOrchestrator};
use imbib_identity::deduplicate;
use impress_domain::{Collection, PdfSourceKind, RawResult, Source};

struct StaticBackend {
    source: Source,
    results: Vec<RawResult>,
}

impl SearchBackend for StaticBackend {
    fn source(&self) -> Source {
        self.source
    }

    fn search(&self, _query: &str) -> Result<Vec<RawResult>, BackendError> {
        Ok(self.results.clone())
    }
}

fn four_sources() -> Vec<RawResult> {
    vec![
        RawResult::new("cr-1", Source::Crossref, "Paper X").with_doi("10.1/x"),
        RawResult::new("ax-1", Source::ArXiv, "Paper X").with_arxiv_id("2301.00001"),
        RawResult::new("ads-1", Source::ADS, "Paper X")
            .with_doi("10.1/x")
            .with_arxiv_id("2301.00001v2"),
        RawResult::new("oa-1", Source::OpenAlex, "Paper Y").with_doi("10.2/y"),
    ]
}

#[test]
fn test_four_sources_collapse_to_two_records() {
    common::init_tracing();
    let records = deduplicate(four_sources());

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].member_count(), 3);
    assert_eq!(records[0].primary.result_id, "cr-1");
    assert_eq!(
        records[0].sources(),
        vec![Source::Crossref, Source::ArXiv, Source::ADS]
    );
    assert_eq!(records[1].member_count(), 1);
    assert_eq!(records[1].primary.result_id, "oa-1");
}

#[test]
fn test_search_import_and_resolve() {
    common::init_tracing();
    let config = IdentityConfig::from_toml(
        r#"
        [pdf]
        source_priority = "preprint-first"
        proxy_enabled = true
        proxy_template = "https://proxy.example.edu/login?url="

        [cache]
        ttl_seconds = 120
        "#,
    )
    .unwrap();
    config.validate().unwrap();

    let results = four_sources();
    let orchestrator = SearchOrchestrator::new(Arc::new(SearchCache::new(&config.cache)))
        .with_backend(StaticBackend {
            source: Source::Crossref,
            results: results[..1].to_vec(),
        })
        .with_backend(StaticBackend {
            source: Source::ArXiv,
            results: results[1..2].to_vec(),
        })
        .with_backend(StaticBackend {
            source: Source::ADS,
            results: results[2..].to_vec(),
        });

    let outcome = orchestrator.search("paper x").unwrap();
    assert!(outcome.failures.is_empty());
    assert_eq!(outcome.records.len(), 2);

    let store = MemoryRecordStore::new();
    let session = Collection::new("Search: paper x");
    let summary = import_canonical_records(
        &outcome.records,
        &RecordMatcher::default(),
        &store,
        &store,
        &session,
    )
    .unwrap();
    assert_eq!(summary.created.len(), 2);

    let stored = store.get(summary.created[0]).unwrap().unwrap();
    assert_eq!(stored.doi.as_deref(), Some("10.1/x"));
    assert_eq!(stored.arxiv_id.as_deref(), Some("2301.00001"));

    // Preprint-first: arXiv wins and is not proxied
    let candidates = candidates_for_record(&stored, &[]);
    assert_eq!(
        resolve(&candidates, &config.pdf).as_deref(),
        Some("https://arxiv.org/pdf/2301.00001.pdf")
    );
    assert!(candidates
        .iter()
        .any(|c| c.kind == PdfSourceKind::Publisher));

    // The unrelated paper only has a DOI, which goes through the proxy
    let other = store.get(summary.created[1]).unwrap().unwrap();
    assert_eq!(
        resolve(&candidates_for_record(&other, &[]), &config.pdf).as_deref(),
        Some("https://proxy.example.edu/login?url=https://doi.org/10.2/y")
    );

    // Running the same search again hits the cache and links, not creates
    let cached = orchestrator.search("Paper X ").unwrap();
    assert!(cached.from_cache);
    let relinked = import_canonical_records(
        &cached.records,
        &RecordMatcher::default(),
        &store,
        &store,
        &session,
    )
    .unwrap();
    assert!(relinked.created.is_empty());
    assert_eq!(relinked.linked, summary.created);
    assert_eq!(store.members_of(&session).unwrap().len(), 2);
}
