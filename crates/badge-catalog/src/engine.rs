//! Consistency engine: runs the normalizer, validator and detector over one
//! snapshot and assembles the report.

use crate::duplicates::detect;
use crate::error::Result;
use crate::normalize::ValuePolicy;
use crate::record::{records_from_rows, BadgeRecord};
use crate::report::{build, Report};
use crate::source::RecordSource;
use crate::taxonomy::Taxonomy;
use crate::validate::validate;
use serde_json::Value;

/// Stateless catalog checker bound to one taxonomy.
#[derive(Debug, Clone)]
pub struct ConsistencyEngine {
    taxonomy: Taxonomy,
    policy: ValuePolicy,
}

impl ConsistencyEngine {
    /// Create an engine with the exact value policy.
    pub fn new(taxonomy: Taxonomy) -> Self {
        Self {
            taxonomy,
            policy: ValuePolicy::default(),
        }
    }

    /// Use a different value comparison policy.
    pub fn with_value_policy(mut self, policy: ValuePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Taxonomy in use.
    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Value policy in use.
    pub fn value_policy(&self) -> ValuePolicy {
        self.policy
    }

    /// Check already-validated records.
    pub fn check(&self, records: &[BadgeRecord]) -> Report {
        if records.is_empty() {
            tracing::warn!("Badge catalog snapshot is empty");
        }

        let duplicates = detect(records, self.policy);
        tracing::debug!(
            groups = duplicates.len(),
            policy = %self.policy,
            "Duplicate detection complete"
        );

        let validation = validate(records, &self.taxonomy);
        tracing::debug!(
            missing = validation.missing.len(),
            deprecated = validation.deprecated_found.len(),
            unrecognized = validation.unrecognized.len(),
            "Taxonomy validation complete"
        );

        let report = build(records, duplicates, validation);
        tracing::info!(
            records = report.total_records(),
            findings = report.finding_count(),
            clean = report.is_clean(),
            "Badge catalog check complete"
        );
        report
    }

    /// Validate raw rows at the boundary, then check them.
    ///
    /// Any malformed row aborts the run; no partial report is produced.
    pub fn check_rows(&self, rows: &[Value]) -> Result<Report> {
        let records = records_from_rows(rows).map_err(|e| {
            tracing::error!(error = %e, "Rejecting badge catalog snapshot");
            e
        })?;
        Ok(self.check(&records))
    }

    /// Fetch a snapshot from the source and check it.
    pub async fn check_source(&self, source: &dyn RecordSource) -> Result<Report> {
        let name = source.describe();
        tracing::debug!(source = %name, "Fetching badge catalog snapshot");
        let rows = source.fetch_rows().await?;
        tracing::debug!(source = %name, rows = rows.len(), "Snapshot fetched");
        self.check_rows(&rows)
    }
}
