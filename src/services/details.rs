// src/services/details.rs

//! Course detail page parsing.
//!
//! Reads objective, description and prerequisite rows plus the weekly topics
//! table from a syllabus page. Missing content leaves the sentinel defaults
//! of [`CourseDetails`] in place.

use crate::models::{CourseDetails, KeywordConfig, contains_any};
use crate::services::page::{Page, Table};
use crate::utils::http::PageSource;
use crate::utils::text::char_len;

/// `id` of the weekly topics table on standard syllabus pages.
pub const WEEKS_TABLE_ID: &str = "weeks";

/// Extracts [`CourseDetails`] from detail pages.
pub struct DetailParser<'a> {
    keywords: &'a KeywordConfig,
}

impl<'a> DetailParser<'a> {
    pub fn new(keywords: &'a KeywordConfig) -> Self {
        Self { keywords }
    }

    /// Fetch and parse a detail page.
    ///
    /// Never fails: fetch and parse errors are logged and yield the defaults.
    pub async fn fetch(&self, source: &dyn PageSource, url: &str) -> CourseDetails {
        let html = match source.fetch_text(url).await {
            Ok(html) => html,
            Err(e) => {
                log::warn!("Details could not be captured ({url}): {e}");
                return CourseDetails::default();
            }
        };

        match Page::parse(url, &html) {
            Ok(page) => self.parse(&page),
            Err(e) => {
                log::warn!("Detail page could not be parsed ({url}): {e}");
                CourseDetails::default()
            }
        }
    }

    /// Parse an already fetched detail page.
    pub fn parse(&self, page: &Page) -> CourseDetails {
        let mut details = CourseDetails::default();

        for row in page.rows().filter(|r| r.cells.len() >= 2) {
            let header = &row.cells[0].text;
            let content = row.cells[1].text.clone();

            if contains_any(header, &self.keywords.objective) {
                details.objectives = content;
            } else if contains_any(header, &self.keywords.description) {
                details.description = content;
            } else if contains_any(header, &self.keywords.prerequisite) {
                details.prerequisites = content;
            }
        }

        if let Some(table) = self.find_weeks_table(page) {
            details.weekly_topics = self.weekly_topics(table);
        }

        details
    }

    /// The table with the known id, else the first whose header mentions both
    /// a week and a topic column.
    fn find_weeks_table<'p>(&self, page: &'p Page) -> Option<&'p Table> {
        page.table_by_id(WEEKS_TABLE_ID).or_else(|| {
            page.tables.iter().find(|table| {
                let sample = table.header_texts.join(" ");
                contains_any(&sample, &self.keywords.week)
                    && contains_any(&sample, &self.keywords.topic)
            })
        })
    }

    fn weekly_topics(&self, table: &Table) -> Vec<String> {
        table
            .rows
            .iter()
            .filter(|r| r.cells.len() >= 2)
            .filter_map(|row| {
                let week = row.cells[0]
                    .text
                    .trim_end_matches(|c: char| c == '.' || c == '\u{a0}' || c.is_whitespace())
                    .trim();
                let topic = &row.cells[1].text;

                if !week.is_empty() && week.chars().all(|c| c.is_ascii_digit()) {
                    Some(format!("Week {week}: {topic}"))
                } else if contains_any(week, &self.keywords.note_markers) && char_len(topic) > 2 {
                    Some(format!("Note: {topic}"))
                } else {
                    None
                }
            })
            .collect()
    }
}
