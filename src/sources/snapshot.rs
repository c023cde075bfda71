// src/sources/snapshot.rs
//! Offline source backed by a JSON file of pre-fetched listings

use super::{JobSource, SourceError};
use crate::types::{JobListing, StructuredQuery};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::info;

/// Filters a JSON snapshot of listings by substring match on the role.
///
/// The file is read on every call so it can be refreshed without a restart.
pub struct SnapshotSource {
    path: PathBuf,
}

impl SnapshotSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    async fn load(&self) -> Result<Vec<JobListing>, SourceError> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[async_trait]
impl JobSource for SnapshotSource {
    async fn fetch(&self, query: &StructuredQuery) -> Result<Vec<JobListing>, SourceError> {
        let Some(term) = query.search_term() else {
            return Ok(Vec::new());
        };

        let listings = self.load().await?;
        let total = listings.len();
        let matches: Vec<JobListing> = listings
            .into_iter()
            .filter(|job| job.mentions(term))
            .collect();

        info!(
            "Snapshot {}: {} of {} listings match '{}'",
            self.path.display(),
            matches.len(),
            total,
            term
        );
        Ok(matches)
    }

    fn name(&self) -> &str {
        "snapshot"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn snapshot_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    const JOBS: &str = r#"[
        {"id": "1", "title": "Python Developer", "company": "Acme", "location": "Austin", "description": "Django APIs", "link": null},
        {"id": "2", "title": "Backend Engineer", "company": "Beta", "location": "Remote", "description": "Python and Go services"},
        {"id": "3", "title": "Nurse", "company": "Clinic", "location": "Denver", "description": "Patient care"}
    ]"#;

    #[tokio::test]
    async fn test_filters_on_title_and_description() {
        let file = snapshot_file(JOBS);
        let source = SnapshotSource::new(file.path().to_path_buf());

        let results = source.fetch(&StructuredQuery::fallback("python")).await.unwrap();
        let ids: Vec<&str> = results.iter().map(|j| j.id.as_str()).collect();

        assert_eq!(ids, vec!["1", "2"]);
    }

    #[tokio::test]
    async fn test_missing_role_returns_nothing() {
        let file = snapshot_file(JOBS);
        let source = SnapshotSource::new(file.path().to_path_buf());

        let results = source.fetch(&StructuredQuery::default()).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_missing_file_is_error() {
        let source = SnapshotSource::new(PathBuf::from("/nonexistent/jobs.json"));
        let result = source.fetch(&StructuredQuery::fallback("python")).await;

        assert!(matches!(result, Err(SourceError::Io(_))));
    }

    #[tokio::test]
    async fn test_invalid_json_is_error() {
        let file = snapshot_file("{not json");
        let source = SnapshotSource::new(file.path().to_path_buf());
        let result = source.fetch(&StructuredQuery::fallback("python")).await;

        assert!(matches!(result, Err(SourceError::Decode(_))));
    }
}
