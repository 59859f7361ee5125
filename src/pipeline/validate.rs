// src/pipeline/validate.rs

//! Configuration and output validation.

use crate::error::{AppError, Result};
use crate::models::{Config, CourseRecord};
use crate::storage::CatalogStorage;
use crate::utils::report;

/// Problems found in stored course records, one message per offending record.
pub fn check_records(records: &[CourseRecord]) -> Vec<String> {
    let mut issues = Vec::new();
    for (i, record) in records.iter().enumerate() {
        if record.course_code.trim().is_empty() {
            issues.push(format!("record {i}: empty course_code"));
        }
        if record.department.trim().is_empty() {
            issues.push(format!("record {i} ({}): empty department", record.course_code));
        }
        if record.semester.trim().is_empty() {
            issues.push(format!("record {i} ({}): empty semester", record.course_code));
        }
    }
    issues
}

/// Validate the configuration and, when present, the stored course records.
pub async fn run_validate(config: &Config, storage: &dyn CatalogStorage) -> Result<()> {
    report::header("Validating configuration");

    if let Err(e) = config.validate() {
        log::error!("Config validation failed: {}", e);
        return Err(e);
    }
    log::info!("✓ Config OK");
    report::sub_item(&format!("User agent: {}", config.crawler.user_agent));
    report::sub_item(&format!(
        "Timeout: {}",
        config
            .crawler
            .timeout_secs
            .map_or_else(|| "none".to_string(), |s| format!("{s}s"))
    ));
    report::sub_item(&format!("Department delay: {}ms", config.crawler.department_delay_ms));
    report::sub_item(&format!("Departments: {}", config.departments.len()));
    report::sub_item(&format!(
        "Language codes: {}",
        config.keywords.language_codes.join(", ")
    ));

    match storage.load_courses().await {
        Ok(records) => {
            let issues = check_records(&records);
            if !issues.is_empty() {
                for issue in &issues {
                    log::error!("{issue}");
                }
                return Err(AppError::validation(format!(
                    "{} invalid course records",
                    issues.len()
                )));
            }
            log::info!("✓ {} stored course records OK", records.len());
        }
        Err(e) => log::warn!("Skipping record validation: {}", e),
    }

    log::info!("All validations passed!");
    Ok(())
}
