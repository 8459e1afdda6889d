//! Record matching and import integration tests

mod common;

use imbib_identity::deduplication::deduplicate;
use imbib_identity::matching::{
    find_existing, import_canonical_records, MemoryRecordStore, RecordMatcher, RecordSink,
    RecordStore,
};
use impress_domain::{Collection, RawResult, Source, StoredRecord};
use impress_identifiers::IdentifierKind;
use rstest::rstest;

use common::{perlmutter_ads, riess_ads, riess_arxiv, riess_crossref};

#[test]
fn test_reimport_links_instead_of_duplicating() {
    common::init_tracing();
    let store = MemoryRecordStore::new();
    let matcher = RecordMatcher::default();
    let first_session = Collection::new("Search: supernovae");
    let second_session = Collection::new("Search: dark energy");

    let records = deduplicate(vec![riess_arxiv(), riess_crossref(), perlmutter_ads()]);
    let summary =
        import_canonical_records(&records, &matcher, &store, &store, &first_session).unwrap();
    // arXiv and Crossref hits for Riess share no identifier, so three records
    assert_eq!(summary.created.len(), 3);
    assert!(summary.linked.is_empty());

    let again =
        import_canonical_records(&records, &matcher, &store, &store, &second_session).unwrap();
    assert!(again.created.is_empty());
    assert_eq!(again.linked, summary.created);
    assert_eq!(store.len(), 3);
    assert_eq!(store.members_of(&second_session).unwrap(), summary.created);
}

#[test]
fn test_bridging_result_matches_earlier_import() {
    let store = MemoryRecordStore::new();
    let context = Collection::new("Library");
    let matcher = RecordMatcher::default();

    let first = deduplicate(vec![riess_arxiv()]);
    let created = import_canonical_records(&first, &matcher, &store, &store, &context).unwrap();

    // ADS carries the arXiv id without version and with a prefix
    let later = deduplicate(vec![riess_ads()]);
    let (kind, found) = matcher.find_existing_with_kind(&later[0], &store).unwrap();
    // ADS has a DOI too, but nothing was stored under it yet
    assert_eq!(kind, IdentifierKind::Arxiv);
    assert_eq!(found.id, created.created[0]);
}

#[rstest]
#[case::doi(RawResult::new("n", Source::OpenAlex, "T").with_doi("10.1086/300499"))]
#[case::doi_url(RawResult::new("n", Source::OpenAlex, "T").with_doi("https://doi.org/10.1086/300499"))]
#[case::arxiv(RawResult::new("n", Source::OpenAlex, "T").with_arxiv_id("astro-ph/9805201v3"))]
#[case::bibcode(RawResult::new("n", Source::OpenAlex, "T").with_bibcode("1998AJ....116.1009R"))]
fn test_find_existing_by_each_identifier(#[case] incoming: RawResult) {
    let store = MemoryRecordStore::new();
    let stored = store
        .create_from_canonical(&deduplicate(vec![riess_ads()])[0])
        .unwrap();

    let incoming = deduplicate(vec![incoming]);
    assert_eq!(
        find_existing(&incoming[0], &store).map(|r| r.id),
        Some(stored.id)
    );
}

#[test]
fn test_source_ids_match_after_creation() {
    let store = MemoryRecordStore::new();
    let stored = store
        .create_from_canonical(&deduplicate(vec![common::riess_semantic_scholar()])[0])
        .unwrap();
    assert_eq!(stored.semantic_scholar_id.as_deref(), Some("2157016"));

    let incoming = deduplicate(vec![
        RawResult::new("x", Source::SemanticScholar, "T").with_semantic_scholar_id("2157016"),
    ]);
    assert_eq!(
        find_existing(&incoming[0], &store).map(|r| r.id),
        Some(stored.id)
    );
}

#[test]
fn test_no_identifiers_never_matches() {
    let store = MemoryRecordStore::new();
    let mut untitled = StoredRecord::new("Untitled");
    untitled.set_field("title", "Same Title".to_string());
    store.insert(untitled).unwrap();

    let incoming = deduplicate(vec![RawResult::new("x", Source::DBLP, "Same Title")]);
    assert!(find_existing(&incoming[0], &store).is_none());
}

#[test]
fn test_cite_keys_are_uniquified() {
    let store = MemoryRecordStore::new();
    let a = store
        .create_from_canonical(&deduplicate(vec![riess_ads()])[0])
        .unwrap();
    let mut other = riess_ads();
    other.identifiers = Default::default();
    let b = store
        .create_from_canonical(&deduplicate(vec![other])[0])
        .unwrap();

    assert_eq!(a.cite_key, "Riess1998Observational");
    assert_eq!(b.cite_key, "Riess1998Observationala");
    assert!(b
        .raw_fields
        .unwrap()
        .starts_with("@article{Riess1998Observationala,"));
}

#[test]
fn test_stored_lookup_contracts() {
    let store = MemoryRecordStore::new();
    let stored = store
        .create_from_canonical(&deduplicate(vec![riess_ads()])[0])
        .unwrap();

    assert_eq!(stored.arxiv_id.as_deref(), Some("astro-ph/9805201"));
    assert!(store.find_by_doi("10.1086/300499").unwrap().is_some());
    assert!(store.find_by_arxiv_id("astro-ph/9805201").unwrap().is_some());
    assert!(store.find_by_bibcode("1998AJ....116.1009R").unwrap().is_some());
    assert!(store.find_by_openalex_id("W1").unwrap().is_none());
}
