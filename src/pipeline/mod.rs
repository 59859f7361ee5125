//! Pipeline entry points for crawler operations.
//!
//! - `run_crawler`: Scrape every department and write the course records
//! - `run_prepare`: Turn stored records into RAG documents
//! - `run_validate`: Check configuration and stored output
//! - `run_info`: Summarize stored output

pub mod crawl;
pub mod info;
pub mod prepare;
pub mod validate;

pub use crawl::{CrawlStats, crawl_departments, run_crawler};
pub use info::run_info;
pub use prepare::run_prepare;
pub use validate::{check_records, run_validate};
