//! PDF URL selection
//!
//! Candidates are bucketed by kind and tried in the order the user's
//! `SourcePriority` dictates, with gateway links always last. Only publisher
//! and gateway URLs are ever proxied: arXiv and ADS scans are free, and
//! sending them through a library proxy breaks the download.

use impress_domain::{PdfCandidate, PdfSourceKind};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::candidates::is_gateway_url;
use crate::config::{PdfPolicy, SourcePriority};

/// Fixed presentation order for [`available_sources`]
const DISPLAY_ORDER: [PdfSourceKind; 4] = [
    PdfSourceKind::Preprint,
    PdfSourceKind::Publisher,
    PdfSourceKind::AdsScan,
    PdfSourceKind::Gateway,
];

/// One download option offered to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableSource {
    /// The candidate URL, never proxied
    pub url: String,
    pub kind: PdfSourceKind,
    pub requires_proxy: bool,
}

/// The chosen URL plus the options it was chosen from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdfResolution {
    /// Winning URL with the proxy prefix applied where appropriate
    pub url: String,
    pub kind: PdfSourceKind,
    /// Best option of each kind, in the order the policy tries them
    pub sources: Vec<AvailableSource>,
}

/// Bucket order for a priority
pub fn bucket_order(priority: SourcePriority) -> [PdfSourceKind; 4] {
    match priority {
        SourcePriority::PreprintFirst => [
            PdfSourceKind::Preprint,
            PdfSourceKind::Publisher,
            PdfSourceKind::AdsScan,
            PdfSourceKind::Gateway,
        ],
        SourcePriority::PublisherFirst => [
            PdfSourceKind::Publisher,
            PdfSourceKind::Preprint,
            PdfSourceKind::AdsScan,
            PdfSourceKind::Gateway,
        ],
    }
}

/// Non-blank candidates of one kind, input order kept. In the publisher
/// bucket, direct links precede gateway-shaped ones.
fn bucket<'a>(candidates: &'a [PdfCandidate], kind: PdfSourceKind) -> Vec<&'a PdfCandidate> {
    let mut members: Vec<&PdfCandidate> = candidates
        .iter()
        .filter(|c| c.kind == kind && !c.url.trim().is_empty())
        .collect();
    if kind == PdfSourceKind::Publisher {
        // stable: false (direct) sorts before true (gateway-shaped)
        members.sort_by_key(|c| is_gateway_url(&c.url));
    }
    members
}

fn ordered<'a>(candidates: &'a [PdfCandidate], order: &[PdfSourceKind]) -> Vec<&'a PdfCandidate> {
    order
        .iter()
        .flat_map(|&kind| bucket(candidates, kind))
        .collect()
}

/// Best-ranked candidate of each kind present, one per kind
fn best_per_kind<'a>(
    candidates: &'a [PdfCandidate],
    order: &[PdfSourceKind],
) -> Vec<&'a PdfCandidate> {
    order
        .iter()
        .filter_map(|&kind| bucket(candidates, kind).into_iter().next())
        .collect()
}

fn apply_policy(candidate: &PdfCandidate, policy: &PdfPolicy) -> String {
    let url = candidate.url.trim();
    match policy.active_proxy() {
        Some(proxy) if candidate.kind.requires_proxy() => format!("{}{}", proxy, url),
        _ => url.to_string(),
    }
}

fn to_available(candidate: &PdfCandidate) -> AvailableSource {
    AvailableSource {
        url: candidate.url.trim().to_string(),
        kind: candidate.kind,
        requires_proxy: candidate.kind.requires_proxy(),
    }
}

/// Pick the URL to download, or `None` when there are no usable candidates
pub fn resolve(candidates: &[PdfCandidate], policy: &PdfPolicy) -> Option<String> {
    let order = bucket_order(policy.source_priority);
    let winner = ordered(candidates, &order).into_iter().next()?;
    let url = apply_policy(winner, policy);
    debug!(
        "resolved {} from {} candidates ({})",
        winner.kind.display_name(),
        candidates.len(),
        if url == winner.url.trim() { "direct" } else { "proxied" }
    );
    Some(url)
}

/// One entry per kind present for user choice, ordered Preprint, Publisher,
/// ADS scan, Gateway. Each entry carries the best URL of its kind, unproxied.
pub fn available_sources(candidates: &[PdfCandidate]) -> Vec<AvailableSource> {
    best_per_kind(candidates, &DISPLAY_ORDER)
        .into_iter()
        .map(to_available)
        .collect()
}

/// [`resolve`] plus the options list in the same order the policy used
pub fn resolve_with_sources(
    candidates: &[PdfCandidate],
    policy: &PdfPolicy,
) -> Option<PdfResolution> {
    let order = bucket_order(policy.source_priority);
    let ranked = best_per_kind(candidates, &order);
    let winner = ranked.first()?;
    Some(PdfResolution {
        url: apply_policy(winner, policy),
        kind: winner.kind,
        sources: ranked.iter().map(|c| to_available(c)).collect(),
    })
}
