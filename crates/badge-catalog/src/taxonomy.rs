//! Expected criteria-type vocabulary.

use crate::error::{CatalogError, Result};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Criteria types the catalog must and must not contain.
///
/// Both sets keep their configured order, which is also the order findings are
/// reported in. A taxonomy is immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TaxonomyTable", into = "TaxonomyTable")]
pub struct Taxonomy {
    required_types: IndexSet<String>,
    deprecated_types: IndexSet<String>,
}

/// Wire shape of a taxonomy before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct TaxonomyTable {
    #[serde(default, alias = "requiredTypes")]
    required_types: Vec<String>,
    #[serde(default, alias = "deprecatedTypes")]
    deprecated_types: Vec<String>,
}

impl Taxonomy {
    /// Build a taxonomy, rejecting overlapping or empty entries.
    ///
    /// Repeated entries within one list collapse to their first occurrence.
    pub fn new<R, D>(required: R, deprecated: D) -> Result<Self>
    where
        R: IntoIterator,
        R::Item: Into<String>,
        D: IntoIterator,
        D::Item: Into<String>,
    {
        let required_types: IndexSet<String> = required.into_iter().map(Into::into).collect();
        let deprecated_types: IndexSet<String> = deprecated.into_iter().map(Into::into).collect();

        if required_types
            .iter()
            .chain(deprecated_types.iter())
            .any(|t| t.trim().is_empty())
        {
            return Err(CatalogError::configuration(
                "criteria type names must not be empty",
            ));
        }

        let overlap: Vec<&str> = required_types
            .iter()
            .filter(|t| deprecated_types.contains(*t))
            .map(String::as_str)
            .collect();
        if !overlap.is_empty() {
            return Err(CatalogError::configuration(format!(
                "criteria types both required and deprecated: {}",
                overlap.join(", ")
            )));
        }

        Ok(Self {
            required_types,
            deprecated_types,
        })
    }

    /// Types that must appear at least once.
    pub fn required_types(&self) -> &IndexSet<String> {
        &self.required_types
    }

    /// Types that must not appear.
    pub fn deprecated_types(&self) -> &IndexSet<String> {
        &self.deprecated_types
    }

    /// Whether the type is named by either set.
    pub fn recognizes(&self, criteria_type: &str) -> bool {
        self.required_types.contains(criteria_type) || self.deprecated_types.contains(criteria_type)
    }

    /// Return a taxonomy with extra entries appended to each set.
    ///
    /// The result is validated again, so an extension can still fail.
    pub fn extended<R, D>(&self, required: R, deprecated: D) -> Result<Self>
    where
        R: IntoIterator,
        R::Item: Into<String>,
        D: IntoIterator,
        D::Item: Into<String>,
    {
        Self::new(
            self.required_types
                .iter()
                .cloned()
                .chain(required.into_iter().map(Into::into)),
            self.deprecated_types
                .iter()
                .cloned()
                .chain(deprecated.into_iter().map(Into::into)),
        )
    }
}

impl TryFrom<TaxonomyTable> for Taxonomy {
    type Error = CatalogError;

    fn try_from(table: TaxonomyTable) -> Result<Self> {
        Self::new(table.required_types, table.deprecated_types)
    }
}

impl From<Taxonomy> for TaxonomyTable {
    fn from(taxonomy: Taxonomy) -> Self {
        Self {
            required_types: taxonomy.required_types.into_iter().collect(),
            deprecated_types: taxonomy.deprecated_types.into_iter().collect(),
        }
    }
}
