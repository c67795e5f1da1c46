//! Taxonomy validation: gaps and leftovers in the criteria-type vocabulary.

use crate::record::BadgeRecord;
use crate::taxonomy::Taxonomy;
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

/// Outcome of checking a record set against a taxonomy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationFindings {
    /// Required types with no record, in configured order.
    pub missing: Vec<String>,
    /// Deprecated types still in use, in configured order, each with its
    /// records in input order.
    pub deprecated_found: IndexMap<String, Vec<BadgeRecord>>,
    /// Observed types the taxonomy does not name, in first-seen order.
    pub unrecognized: Vec<String>,
}

impl ValidationFindings {
    /// No missing and no deprecated types.
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.deprecated_found.is_empty()
    }
}

/// Check the records against the taxonomy.
pub fn validate(records: &[BadgeRecord], taxonomy: &Taxonomy) -> ValidationFindings {
    let observed: IndexSet<&str> = records.iter().map(|r| r.criteria_type.as_str()).collect();

    let missing = taxonomy
        .required_types()
        .iter()
        .filter(|t| !observed.contains(t.as_str()))
        .cloned()
        .collect();

    let deprecated_found = taxonomy
        .deprecated_types()
        .iter()
        .filter(|t| observed.contains(t.as_str()))
        .map(|t| {
            let carriers = records
                .iter()
                .filter(|r| &r.criteria_type == t)
                .cloned()
                .collect();
            (t.clone(), carriers)
        })
        .collect();

    let unrecognized = observed
        .iter()
        .filter(|t| !taxonomy.recognizes(t))
        .map(|t| (*t).to_string())
        .collect();

    ValidationFindings {
        missing,
        deprecated_found,
        unrecognized,
    }
}
