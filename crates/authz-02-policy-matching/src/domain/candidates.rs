//! # Candidate Set
//!
//! The wildcard-descending resource identifiers checked per authorize call.

use shared_types::{ResourceId, WILDCARD};

/// First two `/`-separated segments of `path`, or `None` if there are
/// fewer than two. Further segments are discarded, never compared.
pub fn split_resource(path: &str) -> Option<(&str, &str)> {
    let mut segments = path.split('/');
    let segment0 = segments.next()?;
    let segment1 = segments.next()?;
    Some((segment0, segment1))
}

/// `rid:<s>:*/*`, `rid:<s>:<seg0>/*`, `rid:<s>:<seg0>/<seg1>`, duplicates
/// removed (a path may itself contain `*`).
pub fn candidate_set(service: &str, segment0: &str, segment1: &str) -> Vec<ResourceId> {
    let mut candidates: Vec<ResourceId> = Vec::with_capacity(3);
    for rid in [
        ResourceId::new(service, WILDCARD, WILDCARD),
        ResourceId::new(service, segment0, WILDCARD),
        ResourceId::new(service, segment0, segment1),
    ] {
        if !candidates.contains(&rid) {
            candidates.push(rid);
        }
    }
    candidates
}
