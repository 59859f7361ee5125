// src/services/pools.rs

//! Elective pool resolution.
//!
//! A pool page lists several pools one after another, each introduced by a
//! `POOL <n>` section header row. Only the rows under the requested section
//! become course records.

use std::collections::HashSet;

use crate::models::{CourseDetails, CourseRecord, CourseType, KeywordConfig};
use crate::services::details::DetailParser;
use crate::services::page::Page;
use crate::services::rows::RowExtractor;
use crate::utils::http::PageSource;
use crate::utils::resolve;
use crate::utils::text::char_len;

/// Literal token introducing pool codes and pool section headers.
pub const POOL_TOKEN: &str = "POOL";

/// Pool member rows need at least this many cells.
pub const MIN_POOL_ROW_CELLS: usize = 6;

/// Extract the pool id from a placeholder code such as `POOL 003`.
pub fn pool_id_from_code(code: &str) -> Option<String> {
    let upper = code.to_uppercase();
    let start = upper.find(POOL_TOKEN)? + POOL_TOKEN.len();
    let id: String = upper[start..]
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect();
    (!id.is_empty()).then_some(id)
}

/// Integer form of a purely numeric id (`"003"` → `"3"`), otherwise the id itself.
pub fn normalize_pool_id(id: &str) -> String {
    if !id.is_empty() && id.chars().all(|c| c.is_ascii_digit()) {
        if let Ok(n) = id.parse::<u64>() {
            return n.to_string();
        }
    }
    id.to_string()
}

/// Whether upper-cased row text is a pool section header (`POOL` then a digit).
fn is_section_header(upper: &str) -> bool {
    upper.match_indices(POOL_TOKEN).any(|(i, _)| {
        upper[i + POOL_TOKEN.len()..]
            .trim_start()
            .starts_with(|c: char| c.is_ascii_digit())
    })
}

/// Pool ids already expanded while scraping one department.
#[derive(Debug, Default)]
pub struct ProcessedPools {
    ids: HashSet<String>,
}

impl ProcessedPools {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a pool id as processed. Returns `false` if it already was.
    pub fn insert(&mut self, id: &str) -> bool {
        self.ids.insert(normalize_pool_id(id))
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// A course listed under a pool section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolMember {
    pub code: String,
    pub name: String,
    pub local_credit: String,
    pub ects: String,
    pub link: Option<String>,
}

/// Parameters of one pool expansion.
#[derive(Debug, Clone, Copy)]
pub struct PoolRequest<'r> {
    /// Pool page URL (absolute)
    pub url: &'r str,
    /// Pool id as written in the placeholder code
    pub target_id: &'r str,
    pub department: &'r str,
    /// Placeholder code that referenced the pool
    pub pool_code: &'r str,
    pub label: CourseType,
}

/// Expands pool placeholders into member course records.
pub struct PoolResolver<'a> {
    rows: RowExtractor<'a>,
    details: DetailParser<'a>,
}

impl<'a> PoolResolver<'a> {
    pub fn new(keywords: &'a KeywordConfig) -> Self {
        Self {
            rows: RowExtractor::new(keywords),
            details: DetailParser::new(keywords),
        }
    }

    /// Fetch the pool page and emit one record per member of the target section.
    ///
    /// A page that cannot be fetched yields no records.
    pub async fn resolve(
        &self,
        source: &dyn PageSource,
        request: PoolRequest<'_>,
    ) -> Vec<CourseRecord> {
        let page = match source.fetch_text(request.url).await {
            Ok(html) => Page::parse(request.url, &html),
            Err(e) => {
                log::warn!(
                    "Pool page for {} could not be fetched ({}): {}",
                    request.pool_code,
                    request.url,
                    e
                );
                return Vec::new();
            }
        };
        let page = match page {
            Ok(page) => page,
            Err(e) => {
                log::warn!("Pool page {} could not be parsed: {}", request.url, e);
                return Vec::new();
            }
        };

        let members = self.select_members(&page, request.target_id);
        log::debug!(
            "{} → {} courses in pool {}",
            request.pool_code,
            members.len(),
            request.target_id
        );

        let semester = format!("From Pool {}", request.target_id);
        let mut records = Vec::with_capacity(members.len());
        for member in members {
            let (details, url) = match &member.link {
                Some(link) => {
                    let url = resolve(&page.url, link);
                    (self.details.fetch(source, &url).await, url)
                }
                None => (
                    CourseDetails {
                        description: format!("{} Course", request.label),
                        ..CourseDetails::default()
                    },
                    String::new(),
                ),
            };

            records.push(CourseRecord::new(
                request.department,
                member.code,
                member.name,
                semester.as_str(),
                request.label,
                member.ects,
                member.local_credit,
                details,
                url,
            ));
        }
        records
    }

    /// Rows belonging to the section of `target_id`, in page order.
    pub fn select_members(&self, page: &Page, target_id: &str) -> Vec<PoolMember> {
        let id_needle = target_id.to_uppercase();
        let pool_needle = format!("{POOL_TOKEN} {}", normalize_pool_id(target_id)).to_uppercase();

        let mut collecting = false;
        let mut members = Vec::new();

        for row in page.rows() {
            let upper = row.text.to_uppercase();
            if is_section_header(&upper) {
                collecting = upper.contains(&id_needle) || upper.contains(&pool_needle);
                continue;
            }
            if !collecting || row.cells.len() < MIN_POOL_ROW_CELLS {
                continue;
            }

            let code = row.cell_text(0);
            if self.rows.is_header_code(code) {
                continue;
            }

            let mut name = row.cell_text(1);
            if char_len(name) < 3 {
                name = row.cell_text(2);
            }

            let last = row.cells.len() - 1;
            members.push(PoolMember {
                code: code.to_string(),
                name: name.to_string(),
                local_credit: row.cell_text(last - 1).to_string(),
                ects: row.cell_text(last).to_string(),
                link: row.cells[0].link.clone(),
            });
        }

        members
    }
}
