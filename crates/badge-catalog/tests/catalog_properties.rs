//! Property tests for the catalog consistency checks.
//!
//! - every record lands in exactly one key bucket
//! - `missing` is exactly required minus observed
//! - checks are idempotent
//! - input order only affects which record is first within a group

#![allow(clippy::expect_used, clippy::unwrap_used, missing_docs)]

use badge_catalog::{
    group_by_key, BadgeRecord, ConsistencyEngine, CriteriaValue, Report, Taxonomy, ValuePolicy,
};
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

const TYPES: [&str; 5] = ["streak", "focus", "share_stats", "grades_logged", "late_night"];

fn criteria_value() -> impl Strategy<Value = CriteriaValue> {
    prop_oneof![
        (0i64..4).prop_map(CriteriaValue::from),
        (0i64..4).prop_map(|n| CriteriaValue::Text(n.to_string())),
    ]
}

/// Records with unique ids and a small value space so collisions are common.
fn records() -> impl Strategy<Value = Vec<BadgeRecord>> {
    prop::collection::vec((prop::sample::select(TYPES.to_vec()), criteria_value()), 0..24).prop_map(
        |rules| {
            rules
                .into_iter()
                .enumerate()
                .map(|(i, (criteria_type, value))| {
                    let id = i64::try_from(i).unwrap();
                    BadgeRecord::new(id, format!("badge {i}"), criteria_type, value)
                })
                .collect()
        },
    )
}

/// Disjoint required/deprecated subsets of the type vocabulary.
fn taxonomy() -> impl Strategy<Value = Taxonomy> {
    prop::collection::vec(0u8..3, TYPES.len()).prop_map(|roles| {
        let required: Vec<&str> = TYPES
            .iter()
            .zip(&roles)
            .filter(|(_, role)| **role == 1)
            .map(|(t, _)| *t)
            .collect();
        let deprecated: Vec<&str> = TYPES
            .iter()
            .zip(&roles)
            .filter(|(_, role)| **role == 2)
            .map(|(t, _)| *t)
            .collect();
        Taxonomy::new(required, deprecated).unwrap()
    })
}

fn policy() -> impl Strategy<Value = ValuePolicy> {
    prop_oneof![Just(ValuePolicy::Exact), Just(ValuePolicy::Numeric)]
}

type Membership = (
    BTreeMap<String, BTreeSet<String>>,
    BTreeSet<String>,
    BTreeMap<String, BTreeSet<String>>,
);

/// Order-insensitive view of a report.
fn membership(report: &Report) -> Membership {
    let duplicates = report
        .duplicates()
        .iter()
        .map(|g| {
            (
                g.key.token(),
                g.records.iter().map(|r| r.id.to_string()).collect(),
            )
        })
        .collect();
    let missing = report.missing_types().iter().cloned().collect();
    let deprecated = report
        .deprecated_found()
        .iter()
        .map(|d| {
            (
                d.criteria_type.clone(),
                d.records.iter().map(|r| r.id.to_string()).collect(),
            )
        })
        .collect();
    (duplicates, missing, deprecated)
}

proptest! {
    /// Property: buckets partition the input
    #[test]
    fn every_record_in_exactly_one_bucket(records in records(), policy in policy()) {
        let buckets = group_by_key(&records, policy);
        let mut seen: Vec<String> = buckets
            .values()
            .flat_map(|members| members.iter().map(|r| r.id.to_string()))
            .collect();
        seen.sort();
        let mut expected: Vec<String> = records.iter().map(|r| r.id.to_string()).collect();
        expected.sort();
        prop_assert_eq!(seen, expected);

        let engine = ConsistencyEngine::new(Taxonomy::default()).with_value_policy(policy);
        let report = engine.check(&records);
        let duplicated: usize = report.duplicates().iter().map(|g| g.records.len()).sum();
        let multi: usize = buckets.values().filter(|m| m.len() > 1).map(Vec::len).sum();
        prop_assert_eq!(duplicated, multi);
        prop_assert!(report.duplicates().iter().all(|g| g.records.len() >= 2));
    }

    /// Property: missing = required - observed
    #[test]
    fn missing_is_required_minus_observed(records in records(), taxonomy in taxonomy()) {
        let report = ConsistencyEngine::new(taxonomy.clone()).check(&records);
        let observed: BTreeSet<&str> = records.iter().map(|r| r.criteria_type.as_str()).collect();
        let expected: Vec<&str> = taxonomy
            .required_types()
            .iter()
            .map(String::as_str)
            .filter(|t| !observed.contains(t))
            .collect();
        prop_assert_eq!(report.missing_types(), expected.as_slice());

        for finding in report.deprecated_found() {
            prop_assert!(taxonomy.deprecated_types().contains(&finding.criteria_type));
            prop_assert!(finding.records.iter().all(|r| r.criteria_type == finding.criteria_type));
        }
    }

    /// Property: checks are idempotent
    #[test]
    fn check_is_idempotent(records in records(), taxonomy in taxonomy(), policy in policy()) {
        let engine = ConsistencyEngine::new(taxonomy).with_value_policy(policy);
        prop_assert_eq!(engine.check(&records), engine.check(&records));
    }

    /// Property: permuting input keeps group membership and taxonomy findings
    #[test]
    fn permutation_keeps_membership(
        (original, shuffled) in records().prop_flat_map(|r| (Just(r.clone()), Just(r).prop_shuffle())),
        taxonomy in taxonomy(),
        policy in policy(),
    ) {
        let engine = ConsistencyEngine::new(taxonomy).with_value_policy(policy);
        let a = engine.check(&original);
        let b = engine.check(&shuffled);
        prop_assert_eq!(membership(&a), membership(&b));
        prop_assert_eq!(a.total_records(), b.total_records());
    }
}
