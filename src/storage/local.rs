//! Local filesystem storage implementation.
//!
//! ## Storage Layout
//!
//! ```text
//! {root}/
//! ├── config.toml        # Crawler configuration
//! ├── courses.json       # Course records (JSON array, crawl order)
//! └── rag_ready.json     # RAG documents
//! ```
//!
//! File names come from the `[output]` section of the configuration.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use serde::{Serialize, de::DeserializeOwned};
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::{CourseRecord, OutputConfig, RagDocument};
use crate::storage::{CatalogStorage, WriteMetadata};

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
    output: OutputConfig,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self::with_output(root_dir, OutputConfig::default())
    }

    /// Create a LocalStorage with custom output file names.
    pub fn with_output(root_dir: impl Into<PathBuf>, output: OutputConfig) -> Self {
        Self {
            root_dir: root_dir.into(),
            output,
        }
    }

    /// Get the full path for a relative key.
    pub fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path(key);
        self.ensure_dir(&path).await?;

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// Write JSON data.
    async fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(value)?;
        self.write_bytes(key, &bytes).await
    }

    /// Read bytes, returning None if file doesn't exist.
    async fn read_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Read JSON data.
    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.read_bytes(key).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn metadata(&self, key: &str, count: usize) -> WriteMetadata {
        WriteMetadata {
            location: self.path(key).display().to_string(),
            count,
            timestamp: Utc::now(),
        }
    }
}

#[async_trait]
impl CatalogStorage for LocalStorage {
    async fn write_courses(&self, records: &[CourseRecord]) -> Result<WriteMetadata> {
        let key = &self.output.courses_file;
        self.write_json(key, records).await?;
        log::info!("{} course records written to {}", records.len(), key);
        Ok(self.metadata(key, records.len()))
    }

    async fn load_courses(&self) -> Result<Vec<CourseRecord>> {
        let key = &self.output.courses_file;
        self.read_json(key).await?.ok_or_else(|| {
            AppError::validation(format!(
                "{} not found, run the crawler first",
                self.path(key).display()
            ))
        })
    }

    async fn write_documents(&self, documents: &[RagDocument]) -> Result<WriteMetadata> {
        let key = &self.output.documents_file;
        self.write_json(key, documents).await?;
        log::info!("{} documents written to {}", documents.len(), key);
        Ok(self.metadata(key, documents.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CourseDetails, CourseType};
    use tempfile::TempDir;

    fn record(code: &str) -> CourseRecord {
        CourseRecord::new(
            "Software Engineering",
            code,
            "Yazılım Mühendisliğine Giriş",
            "1. Semester",
            CourseType::Mandatory,
            "6",
            "3",
            CourseDetails::default(),
            "",
        )
    }

    #[tokio::test]
    async fn test_write_and_read() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());

        storage.write_bytes("test.txt", b"hello").await.unwrap();
        let data = storage.read_bytes("test.txt").await.unwrap();
        assert_eq!(data, Some(b"hello".to_vec()));
        assert!(!storage.path("test.tmp").exists());
    }

    #[tokio::test]
    async fn test_read_nonexistent() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());

        let data = storage.read_bytes("nope.txt").await.unwrap();
        assert!(data.is_none());
    }

    #[tokio::test]
    async fn test_courses_round_trip_preserves_order() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path().join("nested"));
        let records = vec![record("SE 102"), record("SE 101")];

        let before = Utc::now();
        let meta = storage.write_courses(&records).await.unwrap();
        assert_eq!(meta.count, 2);
        assert!(meta.timestamp >= before);
        assert!(meta.location.ends_with("courses.json"));

        let loaded = storage.load_courses().await.unwrap();
        assert_eq!(loaded, records);

        // non-ASCII text is stored as-is
        let raw = std::fs::read_to_string(storage.path("courses.json")).unwrap();
        assert!(raw.contains("Yazılım"));
        assert!(raw.contains("\"type\": \"Mandatory\""));
    }

    #[tokio::test]
    async fn test_load_missing_courses_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());
        assert!(storage.load_courses().await.is_err());
    }

    #[tokio::test]
    async fn test_documents_use_configured_file_name() {
        let tmp = TempDir::new().unwrap();
        let output = OutputConfig {
            documents_file: "docs.json".to_string(),
            ..OutputConfig::default()
        };
        let storage = LocalStorage::with_output(tmp.path(), output);
        let documents: Vec<RagDocument> = [record("SE 101")].iter().map(RagDocument::from).collect();

        storage.write_documents(&documents).await.unwrap();
        assert!(storage.path("docs.json").exists());
    }
}
