//! In-memory record store
//!
//! Keeps records in an id-keyed arena plus lookup tables for the indexed
//! identifiers. Collection membership is a separate table of record ids, so
//! records never hold references to each other or to collections.

use std::collections::HashMap;
use std::sync::RwLock;

use impress_domain::{Collection, RecordId, StoredRecord};
use impress_identifiers::{normalize_arxiv_id, normalize_doi};
use tracing::trace;
use uuid::Uuid;

use super::import::{make_cite_key_unique, stored_record_from_canonical};
use super::store::{RecordSink, RecordStore};
use crate::deduplication::CanonicalRecord;
use crate::error::StoreError;

#[derive(Default)]
struct Tables {
    records: HashMap<RecordId, StoredRecord>,
    /// Insertion order, so scans are deterministic
    order: Vec<RecordId>,
    by_doi: HashMap<String, RecordId>,
    by_arxiv: HashMap<String, RecordId>,
    by_semantic_scholar: HashMap<String, RecordId>,
    by_openalex: HashMap<String, RecordId>,
    memberships: HashMap<Uuid, Vec<RecordId>>,
}

struct IndexKeys {
    doi: Option<String>,
    arxiv: Option<String>,
    semantic_scholar: Option<String>,
    openalex: Option<String>,
}

impl IndexKeys {
    fn of(record: &StoredRecord) -> Self {
        let key = |value: &Option<String>, normalize: fn(&str) -> String| {
            impress_domain::present(value).map(normalize)
        };
        Self {
            doi: key(&record.doi, normalize_doi),
            arxiv: key(&record.arxiv_id, normalize_arxiv_id),
            semantic_scholar: key(&record.semantic_scholar_id, |v| v.to_string()),
            openalex: key(&record.openalex_id, |v| v.to_string()),
        }
    }
}

impl Tables {
    fn index(&mut self, record: &StoredRecord) {
        let keys = IndexKeys::of(record);
        // First record stored under a key keeps it
        for (table, key) in [
            (&mut self.by_doi, keys.doi),
            (&mut self.by_arxiv, keys.arxiv),
            (&mut self.by_semantic_scholar, keys.semantic_scholar),
            (&mut self.by_openalex, keys.openalex),
        ] {
            if let Some(key) = key {
                table.entry(key).or_insert(record.id);
            }
        }
    }

    fn unindex(&mut self, record: &StoredRecord) {
        let keys = IndexKeys::of(record);
        for (table, key) in [
            (&mut self.by_doi, keys.doi),
            (&mut self.by_arxiv, keys.arxiv),
            (&mut self.by_semantic_scholar, keys.semantic_scholar),
            (&mut self.by_openalex, keys.openalex),
        ] {
            if let Some(key) = key {
                if table.get(&key) == Some(&record.id) {
                    table.remove(&key);
                }
            }
        }
    }

    fn lookup(&self, table: &HashMap<String, RecordId>, key: &str) -> Option<StoredRecord> {
        table.get(key).and_then(|id| self.records.get(id)).cloned()
    }

    fn cite_key_taken(&self, cite_key: &str) -> bool {
        self.records.values().any(|r| r.cite_key == cite_key)
    }
}

/// Thread-safe in-memory implementation of [`RecordStore`] and [`RecordSink`].
#[derive(Default)]
pub struct MemoryRecordStore {
    tables: RwLock<Tables>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Tables>, StoreError> {
        self.tables
            .read()
            .map_err(|e| StoreError::Storage(e.to_string()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Tables>, StoreError> {
        self.tables
            .write()
            .map_err(|e| StoreError::Storage(e.to_string()))
    }

    /// Insert a record as-is
    pub fn insert(&self, record: StoredRecord) -> Result<RecordId, StoreError> {
        let mut tables = self.write()?;
        if tables.records.contains_key(&record.id) {
            return Err(StoreError::AlreadyExists(record.id));
        }
        let id = record.id;
        tables.index(&record);
        tables.order.push(id);
        tables.records.insert(id, record);
        Ok(id)
    }

    /// Replace a stored record and re-index it
    pub fn update(&self, record: StoredRecord) -> Result<(), StoreError> {
        let mut tables = self.write()?;
        let previous = tables
            .records
            .remove(&record.id)
            .ok_or(StoreError::NotFound(record.id))?;
        tables.unindex(&previous);
        tables.index(&record);
        tables.records.insert(record.id, record);
        Ok(())
    }

    pub fn get(&self, id: RecordId) -> Result<Option<StoredRecord>, StoreError> {
        Ok(self.read()?.records.get(&id).cloned())
    }

    pub fn len(&self) -> usize {
        self.read().map(|t| t.records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Record ids linked into `collection`, in link order
    pub fn members_of(&self, collection: &Collection) -> Result<Vec<RecordId>, StoreError> {
        Ok(self
            .read()?
            .memberships
            .get(&collection.id)
            .cloned()
            .unwrap_or_default())
    }
}

impl RecordStore for MemoryRecordStore {
    fn find_by_doi(&self, doi: &str) -> Result<Option<StoredRecord>, StoreError> {
        let tables = self.read()?;
        Ok(tables.lookup(&tables.by_doi, &normalize_doi(doi)))
    }

    fn find_by_arxiv_id(&self, normalized_arxiv_id: &str) -> Result<Option<StoredRecord>, StoreError> {
        let tables = self.read()?;
        Ok(tables.lookup(&tables.by_arxiv, normalized_arxiv_id.trim()))
    }

    fn find_by_bibcode(&self, bibcode: &str) -> Result<Option<StoredRecord>, StoreError> {
        let tables = self.read()?;
        trace!("scanning {} records for bibcode {}", tables.order.len(), bibcode);
        Ok(tables
            .order
            .iter()
            .filter_map(|id| tables.records.get(id))
            .find(|record| record.mentions_bibcode(bibcode))
            .cloned())
    }

    fn find_by_semantic_scholar_id(&self, id: &str) -> Result<Option<StoredRecord>, StoreError> {
        let tables = self.read()?;
        Ok(tables.lookup(&tables.by_semantic_scholar, id.trim()))
    }

    fn find_by_openalex_id(&self, id: &str) -> Result<Option<StoredRecord>, StoreError> {
        let tables = self.read()?;
        Ok(tables.lookup(&tables.by_openalex, id.trim()))
    }
}

impl RecordSink for MemoryRecordStore {
    fn create_from_canonical(&self, record: &CanonicalRecord) -> Result<StoredRecord, StoreError> {
        let mut stored = stored_record_from_canonical(record);
        let mut tables = self.write()?;

        let unique = make_cite_key_unique(&stored.cite_key, |key| tables.cite_key_taken(key));
        if unique != stored.cite_key {
            stored.cite_key = unique;
            let entry_type = if record.primary.venue.is_some() { "article" } else { "misc" };
            stored.raw_fields = Some(stored.render_raw_fields(entry_type));
        }

        tables.index(&stored);
        tables.order.push(stored.id);
        tables.records.insert(stored.id, stored.clone());
        Ok(stored)
    }

    fn link_existing(&self, record: &StoredRecord, context: &Collection) -> Result<(), StoreError> {
        let mut tables = self.write()?;
        if !tables.records.contains_key(&record.id) {
            return Err(StoreError::NotFound(record.id));
        }
        let members = tables.memberships.entry(context.id).or_default();
        if !members.contains(&record.id) {
            members.push(record.id);
        }
        Ok(())
    }
}
