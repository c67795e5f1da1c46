//! Badge Catalog
//!
//! Consistency checks over a snapshot of achievement badge definitions.
//!
//! A badge definition is one rule: a criteria type (the behavior being
//! measured) paired with a criteria value (the threshold). This crate takes a
//! snapshot of those definitions, already fetched by some data-access layer,
//! and reports:
//! - duplicate rules (two badges encoding the same achievement condition)
//! - required criteria types with no badge at all
//! - deprecated criteria types that should have been migrated away
//!
//! The engine is stateless and synchronous. Re-running it against the same
//! snapshot and taxonomy yields an identical [`Report`]. The only async seam
//! is [`RecordSource`], which callers implement to hand over raw rows.
//!
//! ```rust,ignore
//! use badge_catalog::{ConsistencyEngine, Taxonomy};
//!
//! let taxonomy = Taxonomy::new(["streak", "focus"], ["share_stats"])?;
//! let report = ConsistencyEngine::new(taxonomy).check_rows(&rows)?;
//! println!("{report}");
//! ```

pub mod duplicates;
pub mod engine;
pub mod error;
pub mod normalize;
pub mod record;
pub mod report;
pub mod source;
pub mod taxonomy;
pub mod validate;

pub use duplicates::{detect, group_by_key, DuplicateGroup};
pub use engine::ConsistencyEngine;
pub use error::{CatalogError, Result};
pub use normalize::{normalize, CanonicalKey, CanonicalValue, ValuePolicy};
pub use record::{records_from_rows, BadgeId, BadgeRecord, CriteriaValue};
pub use report::{build, DeprecatedTypeFinding, Report, ReportWarning};
pub use source::{RecordSource, StaticRecordSource};
pub use taxonomy::Taxonomy;
pub use validate::{validate, ValidationFindings};
