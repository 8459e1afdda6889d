//! Canonical (deduplicated) records

use impress_domain::{Identifiers, RawResult, Source};
use impress_identifiers::{Identifier, IdentifierKind};
use serde::{Deserialize, Serialize};

/// A cluster of raw results believed to describe one publication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    /// Stable id derived from the cluster's strongest identifier
    pub id: String,
    /// Representative used for display and import (first in input order)
    pub primary: RawResult,
    /// Remaining members in input order
    pub alternates: Vec<RawResult>,
    /// Longest non-blank abstract across all members
    pub best_abstract: Option<String>,
    /// Union of member identifiers, first non-blank value per kind
    pub identifiers: Identifiers,
}

impl CanonicalRecord {
    /// Build a record from members already in input order.
    pub(crate) fn from_members(members: Vec<RawResult>) -> Option<Self> {
        let mut members = members.into_iter();
        let primary = members.next()?;
        let alternates: Vec<RawResult> = members.collect();

        let mut identifiers = primary.identifiers.clone();
        for alternate in &alternates {
            identifiers.fill_missing(&alternate.identifiers);
        }

        let best_abstract = longest_abstract(std::iter::once(&primary).chain(&alternates));
        let id = cluster_id(&identifiers, &primary);

        Some(Self {
            id,
            primary,
            alternates,
            best_abstract,
            identifiers,
        })
    }

    /// Primary followed by alternates
    pub fn members(&self) -> impl Iterator<Item = &RawResult> {
        std::iter::once(&self.primary).chain(self.alternates.iter())
    }

    pub fn member_count(&self) -> usize {
        1 + self.alternates.len()
    }

    /// Contributing sources in member order, without repeats
    pub fn sources(&self) -> Vec<Source> {
        let mut sources = Vec::new();
        for member in self.members() {
            if !sources.contains(&member.source) {
                sources.push(member.source);
            }
        }
        sources
    }
}

/// Ties keep the earlier member.
fn longest_abstract<'a>(members: impl Iterator<Item = &'a RawResult>) -> Option<String> {
    let mut best: Option<(&str, usize)> = None;
    for text in members.filter_map(RawResult::abstract_if_present) {
        let len = text.trim().chars().count();
        if best.map_or(true, |(_, best_len)| len > best_len) {
            best = Some((text, len));
        }
    }
    best.map(|(text, _)| text.to_string())
}

fn cluster_id(identifiers: &Identifiers, primary: &RawResult) -> String {
    IdentifierKind::all()
        .iter()
        .find_map(|&kind| {
            let value = kind.value_in(identifiers)?;
            let normalized = Identifier::new(kind, value).normalized()?;
            Some(format!("{}:{}", kind, normalized))
        })
        .unwrap_or_else(|| format!("{}:{}", primary.source.as_str(), primary.result_id))
}
