//! Persistence collaborator interfaces
//!
//! The identity core never owns storage. It reads through `RecordStore`
//! and asks a `RecordSink` to create or link records.

use impress_domain::{Collection, StoredRecord};

use crate::deduplication::CanonicalRecord;
use crate::error::StoreError;

/// Read-only point lookups against the local library.
///
/// Implementations must tolerate concurrent readers. A lookup may race with
/// a concurrent import and miss a record created a moment earlier; callers
/// accept that and rely on idempotent re-import.
pub trait RecordStore: Send + Sync {
    /// Case-insensitive match against the stored DOI
    fn find_by_doi(&self, doi: &str) -> Result<Option<StoredRecord>, StoreError>;

    /// Exact match against the stored normalized arXiv id
    fn find_by_arxiv_id(&self, normalized_arxiv_id: &str)
        -> Result<Option<StoredRecord>, StoreError>;

    /// Scan of free-form fields and raw blobs; slower than the indexed lookups
    fn find_by_bibcode(&self, bibcode: &str) -> Result<Option<StoredRecord>, StoreError>;

    fn find_by_semantic_scholar_id(&self, id: &str) -> Result<Option<StoredRecord>, StoreError>;

    fn find_by_openalex_id(&self, id: &str) -> Result<Option<StoredRecord>, StoreError>;
}

/// Write side used by import.
pub trait RecordSink: Send + Sync {
    /// Persist a new record built from the canonical record's primary
    fn create_from_canonical(&self, record: &CanonicalRecord) -> Result<StoredRecord, StoreError>;

    /// Link a stored record into a grouping context (collection, search session)
    fn link_existing(&self, record: &StoredRecord, context: &Collection) -> Result<(), StoreError>;
}
