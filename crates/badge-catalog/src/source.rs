//! Record source seam.
//!
//! The engine never fetches data. Callers hand it a [`RecordSource`] that
//! returns the raw rows of one snapshot, or fails as a whole.

use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Supplies one complete snapshot of raw badge rows.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Short name used in logs and errors.
    fn describe(&self) -> String;

    /// Fetch every row. A partial snapshot must be reported as an error.
    async fn fetch_rows(&self) -> Result<Vec<Value>>;
}

/// In-memory rows, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct StaticRecordSource {
    rows: Vec<Value>,
}

impl StaticRecordSource {
    /// Wrap pre-fetched rows.
    pub fn new(rows: Vec<Value>) -> Self {
        Self { rows }
    }
}

#[async_trait]
impl RecordSource for StaticRecordSource {
    fn describe(&self) -> String {
        format!("in-memory ({} rows)", self.rows.len())
    }

    async fn fetch_rows(&self) -> Result<Vec<Value>> {
        Ok(self.rows.clone())
    }
}
