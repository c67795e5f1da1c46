//! Exact duplicate detection over canonical keys.

use crate::normalize::{normalize, CanonicalKey, ValuePolicy};
use crate::record::BadgeRecord;
use indexmap::IndexMap;
use serde::Serialize;

/// Records that encode the same achievement rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateGroup {
    /// Shared rule identity.
    pub key: CanonicalKey,
    /// Colliding records in input order. Always at least two.
    pub records: Vec<BadgeRecord>,
}

/// Bucket every record under its canonical key.
///
/// Buckets appear in first-seen order and records keep input order within a
/// bucket. Every record lands in exactly one bucket.
pub fn group_by_key(
    records: &[BadgeRecord],
    policy: ValuePolicy,
) -> IndexMap<CanonicalKey, Vec<&BadgeRecord>> {
    let mut groups: IndexMap<CanonicalKey, Vec<&BadgeRecord>> = IndexMap::new();
    for record in records {
        groups
            .entry(normalize(record, policy))
            .or_default()
            .push(record);
    }
    groups
}

/// Groups of two or more records sharing a canonical key.
pub fn detect(records: &[BadgeRecord], policy: ValuePolicy) -> Vec<DuplicateGroup> {
    group_by_key(records, policy)
        .into_iter()
        .filter(|(_, members)| members.len() > 1)
        .map(|(key, members)| DuplicateGroup {
            key,
            records: members.into_iter().cloned().collect(),
        })
        .collect()
}
