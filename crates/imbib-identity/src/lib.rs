//! imbib-identity: cross-source bibliographic identity resolution
//!
//! This library provides:
//! - Deduplication of raw search results into canonical records
//! - Matching canonical records against records already in the library
//! - Import (link or create) through host-provided store interfaces
//! - PDF URL resolution under a user source-priority and proxy policy
//! - A TTL cache and fan-out orchestrator for host-supplied search backends
//!
//! Identifier extraction and normalization live in `impress-identifiers`;
//! the shared value types live in `impress-domain`.

pub mod config;
pub mod deduplication;
pub mod error;
pub mod matching;
pub mod pdf;
pub mod search;

pub use config::{CacheConfig, IdentityConfig, PdfPolicy, SourcePriority};
pub use deduplication::{deduplicate, match_reason, shares_identifier, CanonicalRecord};
pub use error::{BackendError, ConfigError, IdentityError, Result, StoreError};
pub use matching::{
    find_existing, import_canonical_records, ImportSummary, MemoryRecordStore, RecordMatcher,
    RecordSink, RecordStore,
};
pub use pdf::{available_sources, resolve, resolve_with_sources, AvailableSource, PdfResolution};
pub use search::{CacheKey, SearchBackend, SearchCache, SearchOrchestrator, SearchOutcome};
