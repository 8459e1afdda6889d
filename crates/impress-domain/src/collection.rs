//! Grouping context that imported records are linked into

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A folder or search session. Import links every created or matched
/// record into one of these.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Collection {
    pub id: Uuid,
    pub name: String,
}

impl Collection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}
