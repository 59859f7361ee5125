// src/services/departments.rs

//! Department curriculum scraping.
//!
//! Walks every table of a department's curriculum page, emits course records
//! in row order, expands pool placeholders and finally adds the language
//! courses found among the page links.

use crate::error::Result;
use crate::models::{CourseDetails, CourseRecord, CourseType, DepartmentInfo, KeywordConfig};
use crate::services::classifier::{TableClassifier, TableKind};
use crate::services::details::DetailParser;
use crate::services::languages::LanguageResolver;
use crate::services::page::{Page, Table};
use crate::services::pools::{PoolRequest, PoolResolver, ProcessedPools};
use crate::services::rows::{ColumnMap, ExtractedRow, RowAction, RowExtractor};
use crate::utils::http::PageSource;
use crate::utils::resolve;

/// Description of elective placeholder slots.
pub const PLACEHOLDER_DESCRIPTION: &str =
    "This is an elective course slot. The course is chosen from the department's elective list.";

/// Objective of elective placeholder slots.
pub const PLACEHOLDER_OBJECTIVE: &str = "Depends on the selected elective course.";

/// Scrapes one department page into course records.
pub struct DepartmentScraper<'a> {
    source: &'a dyn PageSource,
    classifier: TableClassifier<'a>,
    rows: RowExtractor<'a>,
    details: DetailParser<'a>,
    pools: PoolResolver<'a>,
    languages: LanguageResolver<'a>,
    keywords: &'a KeywordConfig,
}

impl<'a> DepartmentScraper<'a> {
    pub fn new(source: &'a dyn PageSource, keywords: &'a KeywordConfig) -> Result<Self> {
        Ok(Self {
            source,
            classifier: TableClassifier::new(keywords),
            rows: RowExtractor::new(keywords),
            details: DetailParser::new(keywords),
            pools: PoolResolver::new(keywords),
            languages: LanguageResolver::new(keywords)?,
            keywords,
        })
    }

    /// Scrape a department.
    ///
    /// Fails only when the curriculum page itself cannot be fetched or
    /// parsed; row and detail level problems are skipped or defaulted.
    pub async fn scrape(&self, dept: &DepartmentInfo) -> Result<Vec<CourseRecord>> {
        log::info!("--- {} searching ---", dept.name);

        let html = self.source.fetch_text(&dept.url).await?;
        let page = Page::parse(&dept.url, &html)?;

        let mut records = Vec::new();
        let mut processed = ProcessedPools::new();

        for table in &page.tables {
            let classification = self.classifier.classify(table);
            if classification.kind == TableKind::Unknown {
                continue;
            }
            log::debug!("Table '{}' → {:?}", classification.label, classification.kind);

            let table_records = self
                .scrape_table(
                    &page,
                    table,
                    &classification.label,
                    classification.kind,
                    dept,
                    &mut processed,
                )
                .await;
            records.extend(table_records);
        }

        let languages = self
            .languages
            .resolve(self.source, &page, &dept.name, &records)
            .await;
        records.extend(languages);

        if !processed.is_empty() {
            log::debug!("{}: {} pools expanded", dept.name, processed.len());
        }
        log::info!("{}: {} records", dept.name, records.len());
        Ok(records)
    }

    async fn scrape_table(
        &self,
        page: &Page,
        table: &Table,
        semester: &str,
        kind: TableKind,
        dept: &DepartmentInfo,
        processed: &mut ProcessedPools,
    ) -> Vec<CourseRecord> {
        let columns = ColumnMap::resolve(table, self.keywords);
        let mut records = Vec::new();

        for row in &table.rows {
            let Some(extracted) = self.rows.extract(row, &columns) else {
                continue;
            };
            let Some(action) = self.rows.resolve(&extracted, kind) else {
                continue;
            };

            match action {
                RowAction::Placeholder => {
                    records.push(self.placeholder(page, dept, semester, extracted));
                }
                RowAction::Pool { id } => {
                    let Some(link) = extracted.link.as_deref() else {
                        continue;
                    };
                    if !processed.insert(&id) {
                        log::debug!("Pool {id} already processed for {}", dept.name);
                        continue;
                    }
                    let url = resolve(&page.url, link);
                    let members = self
                        .pools
                        .resolve(
                            self.source,
                            PoolRequest {
                                url: &url,
                                target_id: &id,
                                department: &dept.name,
                                pool_code: &extracted.code,
                                label: CourseType::PoolSelection,
                            },
                        )
                        .await;
                    log::info!("  {} expanded into {} courses", extracted.code, members.len());
                    records.extend(members);
                }
                RowAction::Course(course_type) => {
                    records.push(
                        self.course(page, dept, semester, course_type, extracted)
                            .await,
                    );
                }
            }
        }

        records
    }

    fn placeholder(
        &self,
        page: &Page,
        dept: &DepartmentInfo,
        semester: &str,
        row: ExtractedRow,
    ) -> CourseRecord {
        let description = match &row.annotation {
            Some(options) => format!("{PLACEHOLDER_DESCRIPTION} Options: {options}"),
            None => PLACEHOLDER_DESCRIPTION.to_string(),
        };
        let details = CourseDetails {
            objectives: PLACEHOLDER_OBJECTIVE.to_string(),
            description,
            ..CourseDetails::default()
        };
        let url = row
            .link
            .as_deref()
            .map(|link| resolve(&page.url, link))
            .unwrap_or_default();

        log::info!("  Added: {} | {} | {}", row.code, CourseType::ElectivePlaceholder, semester);
        CourseRecord::new(
            dept.name.as_str(),
            row.code,
            row.name,
            semester,
            CourseType::ElectivePlaceholder,
            row.ects,
            row.local_credit,
            details,
            url,
        )
    }

    async fn course(
        &self,
        page: &Page,
        dept: &DepartmentInfo,
        semester: &str,
        course_type: CourseType,
        row: ExtractedRow,
    ) -> CourseRecord {
        let (details, url) = match &row.link {
            Some(link) => {
                let url = resolve(&page.url, link);
                let mut details = self.details.fetch(self.source, &url).await;
                if let Some(note) = &row.annotation {
                    details.description = format!("{} [Note: {note}]", details.description);
                }
                (details, url)
            }
            None => (CourseDetails::default(), String::new()),
        };

        log::info!("  Added: {} | {} | {}", row.code, course_type, semester);
        CourseRecord::new(
            dept.name.as_str(),
            row.code,
            row.name,
            semester,
            course_type,
            row.ects,
            row.local_credit,
            details,
            url,
        )
    }
}
