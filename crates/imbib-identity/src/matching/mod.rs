//! Matching canonical records against the local library

mod chain;
mod import;
mod memory;
mod store;

pub use chain::{find_existing, IdentifierMatcher, PrimaryIdentifierMatcher, RecordMatcher, LOOKUP_ORDER};
pub use import::{
    generate_cite_key, import_canonical_records, make_cite_key_unique,
    stored_record_from_canonical, ImportSummary,
};
pub use memory::MemoryRecordStore;
pub use store::{RecordSink, RecordStore};
