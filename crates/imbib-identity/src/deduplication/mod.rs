//! Deduplication of multi-source search results
//!
//! Groups raw results that share a reliable identifier into canonical
//! records, picks the primary representative and merges abstracts and
//! identifiers across the cluster.

mod canonical;
mod orchestration;
mod union_find;

pub use canonical::CanonicalRecord;
pub use orchestration::{deduplicate, match_reason, shares_identifier, MATCH_PRECEDENCE};
