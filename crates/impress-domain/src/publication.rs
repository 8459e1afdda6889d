//! Persisted publication record

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Opaque 128-bit record identifier.
pub type RecordId = Uuid;

/// A publication as the local library stores it.
///
/// DOI, arXiv and the two numeric source ids are first-class (indexed)
/// attributes. Bibcode, PMID and PMCID only live in `fields` and in the raw
/// BibTeX blob, so finding a record by bibcode means scanning those.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StoredRecord {
    pub id: RecordId,
    pub cite_key: String,
    /// Free-form fields keyed by lower-case BibTeX field name
    pub fields: HashMap<String, String>,
    pub doi: Option<String>,
    /// arXiv id in normalized form (no prefix, no version, lower-case)
    pub arxiv_id: Option<String>,
    pub semantic_scholar_id: Option<String>,
    pub openalex_id: Option<String>,
    /// Original field blob as imported
    pub raw_fields: Option<String>,
}

impl StoredRecord {
    /// Create an empty record with a fresh id
    pub fn new(cite_key: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            cite_key: cite_key.into(),
            fields: HashMap::new(),
            doi: None,
            arxiv_id: None,
            semantic_scholar_id: None,
            openalex_id: None,
            raw_fields: None,
        }
    }

    /// Get a field value by name (case-insensitive)
    pub fn get_field(&self, name: &str) -> Option<&str> {
        match name.to_lowercase().as_str() {
            "doi" => self.doi.as_deref(),
            "arxiv" | "arxiv_id" => self.arxiv_id.as_deref(),
            "semanticscholar" => self.semantic_scholar_id.as_deref(),
            "openalex" => self.openalex_id.as_deref(),
            key => self.fields.get(key).map(String::as_str),
        }
    }

    /// Set a field value by name (case-insensitive)
    pub fn set_field(&mut self, name: &str, value: String) {
        match name.to_lowercase().as_str() {
            "doi" => self.doi = Some(value),
            "arxiv" | "arxiv_id" => self.arxiv_id = Some(value),
            "semanticscholar" => self.semantic_scholar_id = Some(value),
            "openalex" => self.openalex_id = Some(value),
            key => {
                self.fields.insert(key.to_string(), value);
            }
        }
    }

    /// Whether the record carries `bibcode` in its fields or raw blob.
    ///
    /// Slow path: this is a scan, not an indexed lookup.
    pub fn mentions_bibcode(&self, bibcode: &str) -> bool {
        let bibcode = bibcode.trim();
        if bibcode.is_empty() {
            return false;
        }
        if self.fields.get("bibcode").map(|b| b.trim()) == Some(bibcode) {
            return true;
        }
        self.raw_fields
            .as_deref()
            .map(|raw| raw.contains(bibcode))
            .unwrap_or(false)
    }

    /// Render fields and first-class identifiers as a BibTeX entry.
    ///
    /// Keys are emitted in sorted order so the blob is stable.
    pub fn render_raw_fields(&self, entry_type: &str) -> String {
        let mut pairs: Vec<(&str, &str)> = self
            .fields
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        for (key, value) in [
            ("doi", &self.doi),
            ("eprint", &self.arxiv_id),
            ("semanticscholar", &self.semantic_scholar_id),
            ("openalex", &self.openalex_id),
        ] {
            if let Some(v) = value.as_deref().filter(|v| !v.is_empty()) {
                if !self.fields.contains_key(key) {
                    pairs.push((key, v));
                }
            }
        }
        pairs.retain(|(_, v)| !v.is_empty());
        pairs.sort_by(|a, b| a.0.cmp(b.0));

        let mut out = format!("@{}{{{},\n", entry_type, self.cite_key);
        for (key, value) in pairs {
            out.push_str(&format!("  {} = {{{}}},\n", key, value));
        }
        out.push('}');
        out
    }
}
