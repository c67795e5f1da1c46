//! Error types for catalog checks.
//!
//! Only structural and configuration problems are errors. Duplicates, missing
//! types and deprecated types are findings and always land in the report.

use thiserror::Error;

/// Fatal errors that stop a catalog check before a report is produced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A row could not be turned into a badge record.
    #[error("malformed badge record at index {index}{}: {reason}", id_suffix(.id))]
    MalformedRecord {
        /// Position of the row in the fetched sequence.
        index: usize,
        /// Record identifier, when one could be read.
        id: Option<String>,
        /// What was wrong with the row.
        reason: String,
    },

    /// The taxonomy is internally inconsistent.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The record source could not supply a complete snapshot.
    #[error("record source '{source_name}' is unavailable: {reason}")]
    SourceUnavailable {
        /// Human-readable name of the source.
        source_name: String,
        /// Failure reported by the source.
        reason: String,
    },
}

fn id_suffix(id: &Option<String>) -> String {
    match id {
        Some(id) => format!(" (id {id})"),
        None => String::new(),
    }
}

impl CatalogError {
    /// Build a malformed-record error.
    pub fn malformed(index: usize, id: Option<String>, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            index,
            id,
            reason: reason.into(),
        }
    }

    /// Build a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Build a source failure.
    pub fn source_unavailable(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }
}

/// Result alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_message_includes_id_when_known() {
        let err = CatalogError::malformed(3, Some("42".to_string()), "missing criteriaType");
        assert_eq!(
            err.to_string(),
            "malformed badge record at index 3 (id 42): missing criteriaType"
        );

        let err = CatalogError::malformed(0, None, "row is not an object");
        assert_eq!(
            err.to_string(),
            "malformed badge record at index 0: row is not an object"
        );
    }
}
