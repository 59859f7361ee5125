// src/services/classifier.rs

//! Table classification.
//!
//! Decides from a table's leading text whether it lists a semester of the
//! curriculum, an elective list, or something to ignore.

use crate::models::{KeywordConfig, contains_any};
use crate::services::page::Table;
use crate::utils::text::char_len;

/// Label given to every elective list table.
pub const ELECTIVE_TABLE_LABEL: &str = "Elective Table";

/// Leading texts shorter than this defer to the preceding heading.
const MIN_LEADING_TEXT: usize = 4;

/// Kind of course listing a table holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    /// Semester-organized mandatory listing
    Curriculum,
    /// Non-semester elective listing
    ElectiveList,
    Unknown,
}

/// Result of classifying a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Semester label assigned to the table's rows
    pub label: String,
    pub kind: TableKind,
}

/// Classifies tables by keyword matching on their leading text.
pub struct TableClassifier<'a> {
    keywords: &'a KeywordConfig,
}

impl<'a> TableClassifier<'a> {
    pub fn new(keywords: &'a KeywordConfig) -> Self {
        Self { keywords }
    }

    /// Classify a parsed table.
    pub fn classify(&self, table: &Table) -> Classification {
        let leading = table.leading_text().unwrap_or("");
        let text = if char_len(leading) < MIN_LEADING_TEXT {
            table.heading.as_deref().unwrap_or(leading)
        } else {
            leading
        };
        self.classify_text(text)
    }

    /// Classify by text alone. Curriculum keywords win over elective ones.
    pub fn classify_text(&self, text: &str) -> Classification {
        if contains_any(text, &self.keywords.semester) {
            Classification {
                label: text.trim().to_string(),
                kind: TableKind::Curriculum,
            }
        } else if contains_any(text, &self.keywords.elective_table) {
            Classification {
                label: ELECTIVE_TABLE_LABEL.to_string(),
                kind: TableKind::ElectiveList,
            }
        } else {
            Classification {
                label: String::new(),
                kind: TableKind::Unknown,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::page::Row;

    fn table_with(leading: &str, heading: Option<&str>) -> Table {
        Table {
            heading: heading.map(str::to_string),
            rows: vec![
                Row::default(),
                Row {
                    text: leading.to_string(),
                    ..Row::default()
                },
            ],
            ..Table::default()
        }
    }

    #[test]
    fn test_semester_row_is_curriculum() {
        let keywords = KeywordConfig::default();
        let classifier = TableClassifier::new(&keywords);
        let result = classifier.classify(&table_with("1. Semester", None));
        assert_eq!(result.kind, TableKind::Curriculum);
        assert_eq!(result.label, "1. Semester");
    }

    #[test]
    fn test_turkish_semester_keyword() {
        let keywords = KeywordConfig::default();
        let classifier = TableClassifier::new(&keywords);
        let result = classifier.classify_text("3. Yarıyıl");
        assert_eq!(result.kind, TableKind::Curriculum);
        assert_eq!(result.label, "3. Yarıyıl");
    }

    #[test]
    fn test_upper_case_turkish_keywords() {
        let keywords = KeywordConfig::default();
        let classifier = TableClassifier::new(&keywords);

        let semester = classifier.classify(&table_with("3. YARIYIL", None));
        assert_eq!(semester.kind, TableKind::Curriculum);
        assert_eq!(semester.label, "3. YARIYIL");

        let elective = classifier.classify_text("SEÇMELİ DERSLER");
        assert_eq!(elective.kind, TableKind::ElectiveList);
    }

    #[test]
    fn test_elective_row_gets_fixed_label() {
        let keywords = KeywordConfig::default();
        let classifier = TableClassifier::new(&keywords);
        let result = classifier.classify(&table_with("Technical Elective Courses", None));
        assert_eq!(result.kind, TableKind::ElectiveList);
        assert_eq!(result.label, "Elective Table");
    }

    #[test]
    fn test_curriculum_checked_before_elective() {
        let keywords = KeywordConfig::default();
        let classifier = TableClassifier::new(&keywords);
        let result = classifier.classify_text("Fall Semester Electives");
        assert_eq!(result.kind, TableKind::Curriculum);
    }

    #[test]
    fn test_short_leading_text_uses_heading() {
        let keywords = KeywordConfig::default();
        let classifier = TableClassifier::new(&keywords);
        let result = classifier.classify(&table_with("1.", Some("2. Semester")));
        assert_eq!(result.kind, TableKind::Curriculum);
        assert_eq!(result.label, "2. Semester");
    }

    #[test]
    fn test_unrelated_table_is_unknown() {
        let keywords = KeywordConfig::default();
        let classifier = TableClassifier::new(&keywords);
        let result = classifier.classify(&table_with("Contact Information", Some("Semester")));
        assert_eq!(result.kind, TableKind::Unknown);
    }
}
