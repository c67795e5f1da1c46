//! Snapshot-file record source.
//!
//! A snapshot is the JSON export of the badges table: either a bare array of
//! rows or the platform's `{ "data": [...] }` response envelope.

use async_trait::async_trait;
use badge_catalog::{CatalogError, RecordSource};
use serde_json::Value;
use std::path::PathBuf;

/// Reads one snapshot file per fetch.
#[derive(Debug, Clone)]
pub struct SnapshotFileSource {
    path: PathBuf,
}

impl SnapshotFileSource {
    /// Source backed by the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RecordSource for SnapshotFileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch_rows(&self) -> badge_catalog::Result<Vec<Value>> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| CatalogError::source_unavailable(self.describe(), e.to_string()))?;
        parse_snapshot(&text).map_err(|reason| CatalogError::source_unavailable(self.describe(), reason))
    }
}

/// Extract the row array from snapshot text.
pub fn parse_snapshot(text: &str) -> Result<Vec<Value>, String> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| format!("snapshot is not valid JSON: {e}"))?;
    match value {
        Value::Array(rows) => Ok(rows),
        Value::Object(mut envelope) => {
            if let Some(error) = envelope.get("error").filter(|e| !e.is_null()) {
                return Err(format!("snapshot carries a fetch error: {error}"));
            }
            match envelope.remove("data") {
                Some(Value::Array(rows)) => Ok(rows),
                _ => Err("snapshot object has no `data` array".to_string()),
            }
        }
        _ => Err("snapshot must be a JSON array or an object with a `data` array".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bare_array_and_envelope() {
        assert_eq!(parse_snapshot(r#"[{"id": 1}]"#).unwrap().len(), 1);
        assert_eq!(
            parse_snapshot(r#"{"data": [{"id": 1}, {"id": 2}], "error": null}"#)
                .unwrap()
                .len(),
            2
        );
    }

    #[test]
    fn rejects_incomplete_snapshots() {
        let err = parse_snapshot(r#"{"data": null, "error": {"message": "JWT expired"}}"#)
            .unwrap_err();
        assert!(err.contains("JWT expired"));
        let err = parse_snapshot(r#"{"data": [{"id": 1}], "error": {"message": "range truncated"}}"#)
            .unwrap_err();
        assert!(err.contains("range truncated"));
        assert!(parse_snapshot("42").is_err());
        assert!(parse_snapshot("[{").is_err());
    }
}
