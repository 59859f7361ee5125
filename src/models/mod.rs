// src/models/mod.rs

//! Domain models for the catalog crawler.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod catalog;
mod config;
mod course;
mod department;
mod document;

// Re-export all public types
pub use catalog::Catalog;
pub use config::{Config, CrawlerConfig, KeywordConfig, OutputConfig, contains_any, fold_case};
pub use course::{CourseDetails, CourseRecord, CourseType, NO_PREREQUISITES, NOT_SPECIFIED};
pub use department::DepartmentInfo;
pub use document::{DocumentMetadata, RagDocument, clean_list, clean_text};
