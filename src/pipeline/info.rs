// src/pipeline/info.rs

//! Summary of the stored crawl output.

use crate::error::Result;
use crate::models::Catalog;
use crate::storage::CatalogStorage;
use crate::utils::report;

/// Log record counts per department and per type of the stored output.
pub async fn run_info(storage: &dyn CatalogStorage) -> Result<Catalog> {
    let mut catalog = Catalog::new();
    catalog.extend_department(storage.load_courses().await?);

    let mut items = vec![("Records", catalog.len().to_string())];
    items.extend(
        catalog
            .departments()
            .into_iter()
            .map(|name| (name, catalog.department_count(name).to_string())),
    );
    report::summary("Stored courses", &items);

    let by_type: Vec<(&str, String)> = catalog
        .count_by_type()
        .into_iter()
        .map(|(label, n)| (label, n.to_string()))
        .collect();
    report::summary("By type", &by_type);

    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CourseDetails, CourseRecord, CourseType};
    use crate::storage::LocalStorage;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_info_loads_stored_catalog() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());
        let record = CourseRecord::new(
            "Industrial Engineering",
            "IE 301",
            "Operations Research I",
            "5. Semester",
            CourseType::Mandatory,
            "6",
            "3",
            CourseDetails::default(),
            "",
        );
        let mut elective = record.clone();
        elective.department = "Computer Engineering".to_string();
        elective.course_type = CourseType::Elective;
        storage.write_courses(&[record.clone(), elective, record]).await.unwrap();

        let catalog = run_info(&storage).await.unwrap();
        assert_eq!(catalog.departments(), ["Industrial Engineering", "Computer Engineering"]);
        assert_eq!(catalog.department_count("Industrial Engineering"), 2);
        assert_eq!(catalog.count_by_type().get("Elective"), Some(&1));
    }

    #[tokio::test]
    async fn test_info_without_output_fails() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());
        assert!(run_info(&storage).await.is_err());
    }
}
