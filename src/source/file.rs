//! File status source (for offline inspection and testing)

use super::{FetchError, StatusSource, decode_snapshot, select_scope};
use crate::models::{Scope, Snapshot, StatusList};
use async_trait::async_trait;
use chrono::Utc;
use std::path::PathBuf;

/// File status source
///
/// Reads a saved status API response from a local JSON file. Either envelope
/// is accepted; a list envelope is narrowed when a namespace is requested.
pub struct FileStatusSource {
    file_path: PathBuf,
}

impl FileStatusSource {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        let file_path = file_path.into();

        tracing::debug!("Created file status source: {:?}", file_path);

        Self { file_path }
    }
}

#[async_trait]
impl StatusSource for FileStatusSource {
    async fn fetch(&self, scope: &Scope) -> Result<Snapshot, FetchError> {
        tracing::debug!("Reading Waybill status from file: {:?}", self.file_path);

        let content = tokio::fs::read(&self.file_path).await.map_err(|e| {
            FetchError::network(format!("failed to read {:?}: {}", self.file_path, e))
        })?;

        let is_list = serde_json::from_slice::<serde_json::Value>(&content)
            .map_err(FetchError::parse)?
            .get("Waybills")
            .is_some();

        if is_list {
            let list: StatusList = serde_json::from_slice(&content).map_err(FetchError::parse)?;
            select_scope(list, scope, Utc::now())
        } else {
            decode_snapshot(scope, &content, Utc::now())
        }
    }

    fn source_type(&self) -> &'static str {
        "file"
    }

    fn describe(&self) -> String {
        self.file_path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_fixture(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_list_file_narrowed_to_namespace() {
        let file = write_fixture(
            r#"{"Waybills": [{"metadata": {"namespace": "a"}}, {"metadata": {"namespace": "b"}}],
                "DiffURLFormat": "%s"}"#,
        );
        let source = FileStatusSource::new(file.path());

        let all = source.fetch(&Scope::All).await.unwrap();
        assert_eq!(all.len(), 2);

        let one = source
            .fetch(&Scope::Namespace("a".to_string()))
            .await
            .unwrap();
        assert_eq!(one.len(), 1);
        assert_eq!(one.scope, Scope::Namespace("a".to_string()));
    }

    #[tokio::test]
    async fn test_missing_file_is_error() {
        let source = FileStatusSource::new("/nonexistent/ka9s-status.json");
        let err = source.fetch(&Scope::All).await.unwrap_err();
        assert!(matches!(err, FetchError::Network { .. }));
    }

    #[tokio::test]
    async fn test_invalid_json_is_parse_error() {
        let file = write_fixture("{not json");
        let source = FileStatusSource::new(file.path());
        let err = source.fetch(&Scope::All).await.unwrap_err();
        assert!(matches!(err, FetchError::Parse { .. }));
    }
}
