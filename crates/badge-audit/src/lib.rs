//! Badge Audit CLI Library
//!
//! Operator tooling around the `badge_catalog` engine: configuration loading,
//! the snapshot-file record source, and report output.

/// Command handlers
pub mod commands;

/// Audit configuration file
pub mod config;

/// Snapshot-file record source
pub mod snapshot;

pub use config::{AuditConfig, NormalizationConfig};
pub use snapshot::{parse_snapshot, SnapshotFileSource};
