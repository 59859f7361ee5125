// src/services/languages.rs

//! Second foreign language courses.
//!
//! Language courses are not listed as table rows. They are recognised from
//! link targets such as `syllabus.php?course_code=GER%20101` and one record
//! is synthesized per language.

use regex::{Regex, RegexBuilder};

use crate::error::{AppError, Result};
use crate::models::{CourseRecord, CourseType, KeywordConfig};
use crate::services::details::DetailParser;
use crate::services::page::Page;
use crate::utils::http::PageSource;
use crate::utils::resolve;

/// Semester label of synthesized language records.
pub const LANGUAGE_SEMESTER: &str = "Language Selection";

/// ECTS and local credit assigned to synthesized language records.
pub const LANGUAGE_CREDIT: &str = "2";

/// Builds language course records from curriculum page links.
pub struct LanguageResolver<'a> {
    pattern: Regex,
    details: DetailParser<'a>,
}

impl<'a> LanguageResolver<'a> {
    /// Compile the link pattern from the configured language codes.
    pub fn new(keywords: &'a KeywordConfig) -> Result<Self> {
        let codes = keywords
            .language_codes
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .map(regex::escape)
            .collect::<Vec<_>>();
        if codes.is_empty() {
            return Err(AppError::config("No usable language codes"));
        }
        let codes = codes.join("|");
        let pattern = RegexBuilder::new(&format!(r"\b({codes})(?:\s|%20|\+|_|-)*\d{{3,4}}"))
            .case_insensitive(true)
            .build()?;

        Ok(Self {
            pattern,
            details: DetailParser::new(keywords),
        })
    }

    /// Upper-cased language code encoded in `href`, if any.
    pub fn language_code(&self, href: &str) -> Option<String> {
        self.pattern
            .captures(href)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_uppercase())
    }

    /// Distinct language codes on the page with the first link for each.
    pub fn find_links(&self, page: &Page) -> Vec<(String, String)> {
        let mut found: Vec<(String, String)> = Vec::new();
        for href in &page.links {
            if let Some(code) = self.language_code(href) {
                if !found.iter().any(|(c, _)| *c == code) {
                    found.push((code, href.clone()));
                }
            }
        }
        found
    }

    /// Emit one record per language not already present in `existing`.
    pub async fn resolve(
        &self,
        source: &dyn PageSource,
        page: &Page,
        department: &str,
        existing: &[CourseRecord],
    ) -> Vec<CourseRecord> {
        let mut records = Vec::new();

        for (code, href) in self.find_links(page) {
            if existing.iter().any(|r| r.matches(department, &code)) {
                log::debug!("{code} already recorded for {department}");
                continue;
            }

            let url = resolve(&page.url, &href);
            let details = self.details.fetch(source, &url).await;
            log::info!("  Added: {code} | {} | {LANGUAGE_SEMESTER}", CourseType::Mandatory);

            records.push(CourseRecord::new(
                department,
                code.as_str(),
                format!("{code} Language Course"),
                LANGUAGE_SEMESTER,
                CourseType::Mandatory,
                LANGUAGE_CREDIT,
                LANGUAGE_CREDIT,
                details,
                url,
            ));
        }

        records
    }
}
