//! Catalog report: structured findings plus a rendered operator view.

use crate::duplicates::DuplicateGroup;
use crate::record::BadgeRecord;
use crate::validate::ValidationFindings;
use serde::Serialize;
use std::fmt;

/// Non-fatal conditions worth surfacing alongside the findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportWarning {
    /// Zero records were supplied.
    EmptyInput,
}

impl fmt::Display for ReportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => f.write_str("catalog snapshot contained no records"),
        }
    }
}

/// A deprecated criteria type that is still in use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeprecatedTypeFinding {
    /// The deprecated type.
    pub criteria_type: String,
    /// Records carrying it, in input order.
    pub records: Vec<BadgeRecord>,
}

/// Result of one catalog check.
///
/// Built once and never modified. Serialize it for programmatic checks or
/// format it with `{}` for the operator view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    total_records: usize,
    duplicates: Vec<DuplicateGroup>,
    missing_types: Vec<String>,
    deprecated_found: Vec<DeprecatedTypeFinding>,
    unrecognized_types: Vec<String>,
    warnings: Vec<ReportWarning>,
}

/// Assemble a report from the detector and validator outputs.
///
/// Orderings from both inputs are kept as given.
pub fn build(
    records: &[BadgeRecord],
    duplicates: Vec<DuplicateGroup>,
    validation: ValidationFindings,
) -> Report {
    let mut warnings = Vec::new();
    if records.is_empty() {
        warnings.push(ReportWarning::EmptyInput);
    }

    Report {
        total_records: records.len(),
        duplicates,
        missing_types: validation.missing,
        deprecated_found: validation
            .deprecated_found
            .into_iter()
            .map(|(criteria_type, records)| DeprecatedTypeFinding {
                criteria_type,
                records,
            })
            .collect(),
        unrecognized_types: validation.unrecognized,
        warnings,
    }
}

impl Report {
    /// Number of records checked.
    pub fn total_records(&self) -> usize {
        self.total_records
    }

    /// Duplicate groups in first-seen order.
    pub fn duplicates(&self) -> &[DuplicateGroup] {
        &self.duplicates
    }

    /// Required types with no record.
    pub fn missing_types(&self) -> &[String] {
        &self.missing_types
    }

    /// Deprecated types still present.
    pub fn deprecated_found(&self) -> &[DeprecatedTypeFinding] {
        &self.deprecated_found
    }

    /// Observed types outside the taxonomy.
    pub fn unrecognized_types(&self) -> &[String] {
        &self.unrecognized_types
    }

    /// Non-fatal warnings.
    pub fn warnings(&self) -> &[ReportWarning] {
        &self.warnings
    }

    /// Number of failing findings: duplicate groups, missing types and
    /// deprecated types. Unrecognized types are informational.
    pub fn finding_count(&self) -> usize {
        self.duplicates.len() + self.missing_types.len() + self.deprecated_found.len()
    }

    /// True when there is nothing to fix.
    pub fn is_clean(&self) -> bool {
        self.finding_count() == 0
    }
}

fn write_record(f: &mut fmt::Formatter<'_>, record: &BadgeRecord) -> fmt::Result {
    write!(f, "    - [{}] {:?}", record.id, record.name)?;
    if let Some(created_at) = &record.created_at {
        write!(f, " (created {created_at})")?;
    }
    writeln!(f)
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Badge catalog report")?;
        writeln!(f, "  records:            {}", self.total_records)?;
        writeln!(f, "  duplicate groups:   {}", self.duplicates.len())?;
        writeln!(f, "  missing types:      {}", self.missing_types.len())?;
        writeln!(f, "  deprecated types:   {}", self.deprecated_found.len())?;
        writeln!(f, "  unrecognized types: {}", self.unrecognized_types.len())?;

        if !self.warnings.is_empty() {
            writeln!(f)?;
            writeln!(f, "Warnings")?;
            for warning in &self.warnings {
                writeln!(f, "  ! {warning}")?;
            }
        }

        if !self.duplicates.is_empty() {
            writeln!(f)?;
            writeln!(f, "Duplicate rules")?;
            for group in &self.duplicates {
                writeln!(f, "  {} ({} records)", group.key, group.records.len())?;
                for record in &group.records {
                    write_record(f, record)?;
                }
            }
        }

        if !self.missing_types.is_empty() {
            writeln!(f)?;
            writeln!(f, "Missing required types")?;
            for criteria_type in &self.missing_types {
                writeln!(f, "  {criteria_type}")?;
            }
        }

        if !self.deprecated_found.is_empty() {
            writeln!(f)?;
            writeln!(f, "Deprecated types still present")?;
            for finding in &self.deprecated_found {
                writeln!(
                    f,
                    "  {} ({} records)",
                    finding.criteria_type,
                    finding.records.len()
                )?;
                for record in &finding.records {
                    write_record(f, record)?;
                }
            }
        }

        if !self.unrecognized_types.is_empty() {
            writeln!(f)?;
            writeln!(f, "Unrecognized types")?;
            for criteria_type in &self.unrecognized_types {
                writeln!(f, "  {criteria_type}")?;
            }
        }

        writeln!(f)?;
        if self.is_clean() {
            write!(f, "Result: clean")
        } else {
            write!(f, "Result: {} finding(s)", self.finding_count())
        }
    }
}
