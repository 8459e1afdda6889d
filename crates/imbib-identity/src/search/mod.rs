//! Cached, deduplicated search across host-supplied backends

mod cache;
mod orchestrator;

pub use cache::{CacheKey, SearchCache};
pub use orchestrator::{SearchBackend, SearchOrchestrator, SearchOutcome};
