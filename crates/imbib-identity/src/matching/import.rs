//! Import of canonical records into the local library
//!
//! For each canonical record: find an existing stored record through the
//! matcher chain, or create one, then link it into the grouping context.

use impress_domain::{Collection, RecordId, StoredRecord};
use impress_identifiers::normalize_arxiv_id;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use unicode_normalization::UnicodeNormalization;

use super::chain::RecordMatcher;
use super::store::{RecordSink, RecordStore};
use crate::deduplication::CanonicalRecord;
use crate::error::StoreError;

/// Short words skipped when picking the title word of a cite key
const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "on", "of", "in", "for", "to", "and", "with", "at", "by", "from",
];

/// Outcome of one import batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    /// Records persisted for the first time
    pub created: Vec<RecordId>,
    /// Records that already existed and were only linked
    pub linked: Vec<RecordId>,
}

impl ImportSummary {
    pub fn total(&self) -> usize {
        self.created.len() + self.linked.len()
    }
}

/// Build the record to persist for a canonical record.
///
/// Bibliographic fields come from the primary result. Identifiers and the
/// abstract come from the whole cluster, so an arXiv hit that merged with a
/// Crossref hit is stored with both ids.
pub fn stored_record_from_canonical(record: &CanonicalRecord) -> StoredRecord {
    let primary = &record.primary;
    let ids = &record.identifiers;

    let mut stored = StoredRecord::new(generate_cite_key(
        primary.authors.first().map(String::as_str),
        primary.year,
        &primary.title,
    ));

    let mut put = |key: &str, value: Option<&str>| {
        if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
            stored.fields.insert(key.to_string(), value.to_string());
        }
    };
    put("title", Some(primary.title.as_str()));
    if !primary.authors.is_empty() {
        put("author", Some(primary.authors.join(" and ").as_str()));
    }
    put("year", primary.year.map(|y| y.to_string()).as_deref());
    put("journal", primary.venue.as_deref());
    put("abstract", record.best_abstract.as_deref());
    put("url", primary.web_url.as_deref());
    put("bibcode", ids.bibcode.as_deref());
    put("pmid", ids.pmid.as_deref());
    put("pmcid", ids.pmcid.as_deref());

    stored.doi = present_trimmed(&ids.doi);
    stored.arxiv_id = present_trimmed(&ids.arxiv_id).map(|id| normalize_arxiv_id(&id));
    stored.semantic_scholar_id = present_trimmed(&ids.semantic_scholar_id);
    stored.openalex_id = present_trimmed(&ids.openalex_id);

    let entry_type = if primary.venue.is_some() { "article" } else { "misc" };
    stored.raw_fields = Some(stored.render_raw_fields(entry_type));
    stored
}

fn present_trimmed(value: &Option<String>) -> Option<String> {
    impress_domain::present(value).map(str::to_string)
}

/// Import a batch of canonical records.
///
/// Existing records are linked into `context`; new ones are created and then
/// linked. The first store or sink failure aborts the batch; records handled
/// before it stay imported, and re-running the batch is idempotent.
pub fn import_canonical_records(
    records: &[CanonicalRecord],
    matcher: &RecordMatcher,
    store: &dyn RecordStore,
    sink: &dyn RecordSink,
    context: &Collection,
) -> Result<ImportSummary, StoreError> {
    let mut summary = ImportSummary::default();

    for record in records {
        match matcher.find_existing(record, store) {
            Some(existing) => {
                sink.link_existing(&existing, context)?;
                summary.linked.push(existing.id);
            }
            None => {
                let created = sink.create_from_canonical(record)?;
                debug!("created {} ({}) for {}", created.cite_key, created.id, record.id);
                sink.link_existing(&created, context)?;
                summary.created.push(created.id);
            }
        }
    }

    info!(
        "imported {} records into '{}': {} new, {} existing",
        summary.total(),
        context.name,
        summary.created.len(),
        summary.linked.len()
    );
    Ok(summary)
}

/// `<Surname><year><TitleWord>`, or `Unknown` when nothing usable is present
pub fn generate_cite_key(author: Option<&str>, year: Option<i32>, title: &str) -> String {
    let mut key = String::new();

    if let Some(surname) = author.and_then(surname) {
        key.push_str(&key_chars(surname));
    }
    if let Some(year) = year.filter(|y| (1000..=9999).contains(y)) {
        key.push_str(&year.to_string());
    }
    if let Some(word) = first_significant_word(title) {
        let mut chars = key_chars(word).chars().collect::<Vec<_>>();
        if let Some(first) = chars.first_mut() {
            *first = first.to_ascii_uppercase();
        }
        key.extend(chars);
    }

    if key.is_empty() {
        "Unknown".to_string()
    } else {
        key
    }
}

/// "Last, First" or "First Last"
fn surname(author: &str) -> Option<&str> {
    let author = author.trim();
    let name = match author.split_once(',') {
        Some((last, _)) => last.trim(),
        None => author.split_whitespace().last()?,
    };
    (!name.is_empty()).then_some(name)
}

fn first_significant_word(title: &str) -> Option<&str> {
    title
        .split(|c: char| c.is_whitespace() || c == '-' || c == ':')
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .find(|w| w.len() > 1 && !STOP_WORDS.contains(&w.to_lowercase().as_str()))
}

/// Decompose accented letters to their base letter, then keep ASCII alphanumerics
fn key_chars(text: &str) -> String {
    text.nfkd().filter(|c| c.is_ascii_alphanumeric()).collect()
}

/// Append `a`..`z`, then numbers, until `base` no longer collides
pub fn make_cite_key_unique(base: &str, existing: impl Fn(&str) -> bool) -> String {
    if !existing(base) {
        return base.to_string();
    }
    for suffix in 'a'..='z' {
        let candidate = format!("{}{}", base, suffix);
        if !existing(&candidate) {
            return candidate;
        }
    }
    let mut counter = 2u32;
    loop {
        let candidate = format!("{}{}", base, counter);
        if !existing(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}
