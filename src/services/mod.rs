//! Service layer for the catalog crawler.
//!
//! This module contains the scraping logic for:
//! - Page snapshots (`Page`)
//! - Table classification (`TableClassifier`)
//! - Curriculum rows (`RowExtractor`, `ColumnMap`)
//! - Course detail pages (`DetailParser`)
//! - Elective pools (`PoolResolver`)
//! - Language courses (`LanguageResolver`)
//! - Whole departments (`DepartmentScraper`)

pub mod classifier;
pub mod departments;
pub mod details;
pub mod languages;
pub mod page;
pub mod pools;
pub mod rows;

pub use classifier::{Classification, TableClassifier, TableKind};
pub use departments::DepartmentScraper;
pub use details::DetailParser;
pub use languages::LanguageResolver;
pub use page::Page;
pub use pools::{PoolResolver, ProcessedPools};
pub use rows::{ColumnMap, RowAction, RowExtractor};
