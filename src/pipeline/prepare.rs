// src/pipeline/prepare.rs

//! RAG document preparation.

use crate::error::Result;
use crate::models::RagDocument;
use crate::storage::{CatalogStorage, WriteMetadata};
use crate::utils::report;

/// Length of the example chunk printed after preparation.
const PREVIEW_CHARS: usize = 500;

/// Convert the stored course records into RAG documents and store them.
pub async fn run_prepare(storage: &dyn CatalogStorage) -> Result<WriteMetadata> {
    report::header("Preparing RAG documents");

    let records = storage.load_courses().await?;
    let documents: Vec<RagDocument> = records.iter().map(RagDocument::from).collect();
    let written = storage.write_documents(&documents).await?;

    report::summary(
        "Preparation complete",
        &[
            ("Documents", written.count.to_string()),
            ("Output", written.location.clone()),
            ("Written at", written.timestamp.to_rfc3339()),
        ],
    );

    if let Some(first) = documents.first() {
        let preview: String = first.text_content.chars().take(PREVIEW_CHARS).collect();
        log::info!("--- Example Chunk ---");
        for line in preview.lines() {
            report::sub_item(line);
        }
    }

    Ok(written)
}
