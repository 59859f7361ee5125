//! Storage abstractions for crawl output.
//!
//! ## Directory Structure
//!
//! ```text
//! storage/
//! ├── config.toml        # Crawler configuration
//! ├── courses.json       # Every course record of the last run
//! └── rag_ready.json     # Documents prepared for the vector store
//! ```

pub mod local;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{CourseRecord, RagDocument};

// Re-export for convenience
pub use local::LocalStorage;

/// Metadata about a storage write operation.
#[derive(Debug, Clone)]
pub struct WriteMetadata {
    /// Where the data was written
    pub location: String,
    /// Number of items written
    pub count: usize,
    /// Timestamp of the write
    pub timestamp: DateTime<Utc>,
}

/// Trait for catalog storage backends.
#[async_trait]
pub trait CatalogStorage: Send + Sync {
    /// Replace the stored course records with `records`, in order.
    async fn write_courses(&self, records: &[CourseRecord]) -> Result<WriteMetadata>;

    /// Load the stored course records.
    async fn load_courses(&self) -> Result<Vec<CourseRecord>>;

    /// Replace the stored RAG documents.
    async fn write_documents(&self, documents: &[RagDocument]) -> Result<WriteMetadata>;
}
