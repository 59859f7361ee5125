// src/pipeline/crawl.rs

//! Catalog crawling pipeline.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{Catalog, Config, DepartmentInfo};
use crate::services::DepartmentScraper;
use crate::storage::{CatalogStorage, WriteMetadata};
use crate::utils::http::PageSource;
use crate::utils::report;

/// Statistics of one crawl run.
#[derive(Debug, Clone)]
pub struct CrawlStats {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub department_count: usize,
    pub failed_departments: Vec<String>,
    pub record_count: usize,
}

impl CrawlStats {
    pub fn success_rate(&self) -> f64 {
        if self.department_count == 0 {
            return 1.0;
        }
        let ok = self.department_count - self.failed_departments.len();
        ok as f64 / self.department_count as f64
    }
}

/// Scrape every department in order and collect the results.
///
/// A department whose page cannot be fetched contributes no records.
pub async fn crawl_departments(
    config: &Config,
    source: &dyn PageSource,
    departments: &[DepartmentInfo],
) -> Result<(Catalog, Vec<String>)> {
    let scraper = DepartmentScraper::new(source, &config.keywords)?;
    let delay = Duration::from_millis(config.crawler.department_delay_ms);

    let mut catalog = Catalog::new();
    let mut failed = Vec::new();

    for (i, dept) in departments.iter().enumerate() {
        if i > 0 && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        report::step(i + 1, departments.len(), &dept.name);
        match scraper.scrape(dept).await {
            Ok(records) => catalog.extend_department(records),
            Err(e) => {
                log::error!("Error: {} ({}): {}", dept.name, dept.url, e);
                failed.push(dept.name.clone());
            }
        }
    }

    Ok((catalog, failed))
}

/// Run the catalog crawler and write the records once at the end.
pub async fn run_crawler(
    config: &Config,
    source: &dyn PageSource,
    storage: &dyn CatalogStorage,
    departments: &[DepartmentInfo],
) -> Result<(CrawlStats, WriteMetadata)> {
    let start_time = Utc::now();
    report::header("Catalog crawler starting");
    log::info!("Loaded {} departments", departments.len());

    let (catalog, failed_departments) = crawl_departments(config, source, departments).await?;
    let written = storage.write_courses(catalog.records()).await?;

    let stats = CrawlStats {
        start_time,
        end_time: Utc::now(),
        department_count: departments.len(),
        failed_departments,
        record_count: catalog.len(),
    };

    let mut items = vec![
        ("Departments", stats.department_count.to_string()),
        ("Failed", stats.failed_departments.len().to_string()),
        ("Success rate", format!("{:.0}%", stats.success_rate() * 100.0)),
        ("Records", stats.record_count.to_string()),
    ];
    for (label, count) in catalog.count_by_type() {
        items.push((label, count.to_string()));
    }
    items.push(("Output", written.location.clone()));
    items.push(("Written at", written.timestamp.to_rfc3339()));
    items.push((
        "Duration",
        format!("{}s", (stats.end_time - stats.start_time).num_seconds()),
    ));
    report::summary("Crawl complete", &items);

    Ok((stats, written))
}
