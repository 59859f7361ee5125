// src/services/rows.rs

//! Curriculum row extraction.
//!
//! Column positions are bound once per table ([`ColumnMap`]); rows are then
//! read by role and resolved into the action the department scraper takes.

use crate::models::{CourseType, KeywordConfig, contains_any};
use crate::services::classifier::TableKind;
use crate::services::page::{Row, Table};
use crate::services::pools::pool_id_from_code;
use crate::utils::text::char_len;

/// Rows with fewer cells are layout or header noise.
pub const MIN_ROW_CELLS: usize = 7;

/// Column index of each field within a curriculum table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub code: usize,
    pub name: usize,
    pub local_credit: usize,
    pub ects: usize,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            code: 0,
            name: 2,
            local_credit: 5,
            ects: 6,
        }
    }
}

impl ColumnMap {
    /// Bind columns from the table's header row, keeping the positional
    /// defaults for any role the header does not name.
    pub fn resolve(table: &Table, keywords: &KeywordConfig) -> Self {
        let mut columns = Self::default();

        let Some(header) = table.rows.iter().find(|row| {
            row.labels.len() >= MIN_ROW_CELLS
                && contains_any(&row.labels[0], &keywords.code_header)
        }) else {
            return columns;
        };

        if let Some(ects) = find_label(&header.labels, &keywords.ects_header, None) {
            columns.ects = ects;
        }
        if let Some(credit) = find_label(&header.labels, &keywords.credit_header, Some(columns.ects)) {
            columns.local_credit = credit;
        }
        if let Some(name) = find_label(&header.labels, &keywords.name_header, None) {
            columns.name = name;
        }

        columns
    }
}

/// Index of the first header label (past the code column) matching `words`.
fn find_label(labels: &[String], words: &[String], skip: Option<usize>) -> Option<usize> {
    labels
        .iter()
        .enumerate()
        .skip(1)
        .find(|(i, label)| Some(*i) != skip && contains_any(label, words))
        .map(|(i, _)| i)
}

/// Listing fields read from one data row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedRow {
    pub code: String,
    pub name: String,
    pub local_credit: String,
    pub ects: String,

    /// Raw detail link from the code cell
    pub link: Option<String>,

    /// Tooltip text from the code cell
    pub annotation: Option<String>,
}

/// What to do with an extracted row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowAction {
    /// Elective slot; emitted without fetching details
    Placeholder,
    /// Expand the referenced elective pool instead of emitting the row
    Pool { id: String },
    /// Ordinary course, fetched and emitted with the given type
    Course(CourseType),
}

/// Reads curriculum rows according to the keyword configuration.
pub struct RowExtractor<'a> {
    keywords: &'a KeywordConfig,
}

impl<'a> RowExtractor<'a> {
    pub fn new(keywords: &'a KeywordConfig) -> Self {
        Self { keywords }
    }

    /// Whether a code cell is a header or too short to be a course code.
    pub fn is_header_code(&self, code: &str) -> bool {
        char_len(code) < 2 || contains_any(code, &self.keywords.code_header)
    }

    /// Extract listing fields, or `None` for short and header rows.
    pub fn extract(&self, row: &Row, columns: &ColumnMap) -> Option<ExtractedRow> {
        if row.cells.len() < MIN_ROW_CELLS {
            return None;
        }

        let code = row.cell_text(columns.code);
        if self.is_header_code(code) {
            return None;
        }

        let code_cell = row.cells.get(columns.code)?;
        Some(ExtractedRow {
            code: code.to_string(),
            name: row.cell_text(columns.name).to_string(),
            local_credit: row.cell_text(columns.local_credit).to_string(),
            ects: row.cell_text(columns.ects).to_string(),
            link: code_cell.link.clone(),
            annotation: code_cell.annotation.clone(),
        })
    }

    /// Decide how a row is emitted within a table of the given kind.
    ///
    /// Returns `None` for unclassified tables.
    pub fn resolve(&self, row: &ExtractedRow, kind: TableKind) -> Option<RowAction> {
        let default_type = match kind {
            TableKind::Curriculum => CourseType::Mandatory,
            TableKind::ElectiveList => CourseType::Elective,
            TableKind::Unknown => return None,
        };

        if contains_any(&row.code, &self.keywords.placeholder_markers) {
            return Some(RowAction::Placeholder);
        }
        if contains_any(&row.code, &self.keywords.language_markers) {
            return Some(RowAction::Course(CourseType::Mandatory));
        }
        if row.link.is_some() {
            if let Some(id) = pool_id_from_code(&row.code) {
                return Some(RowAction::Pool { id });
            }
        }
        Some(RowAction::Course(default_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::page::Cell;

    fn row(texts: &[&str]) -> Row {
        Row {
            text: texts.join(" "),
            labels: texts.iter().map(|t| t.to_string()).collect(),
            cells: texts
                .iter()
                .map(|t| Cell {
                    text: t.to_string(),
                    ..Cell::default()
                })
                .collect(),
        }
    }

    fn linked(mut row: Row, href: &str) -> Row {
        row.cells[0].link = Some(href.to_string());
        row
    }

    #[test]
    fn test_extract_positional_fields() {
        let keywords = KeywordConfig::default();
        let extractor = RowExtractor::new(&keywords);
        let data = linked(
            row(&["SE 101", "", "Intro to Programming", "", "", "3", "6"]),
            "syllabus.php?c=SE101",
        );

        let extracted = extractor.extract(&data, &ColumnMap::default()).unwrap();
        assert_eq!(extracted.code, "SE 101");
        assert_eq!(extracted.name, "Intro to Programming");
        assert_eq!(extracted.local_credit, "3");
        assert_eq!(extracted.ects, "6");
        assert_eq!(extracted.link.as_deref(), Some("syllabus.php?c=SE101"));
    }

    #[test]
    fn test_short_row_skipped() {
        let keywords = KeywordConfig::default();
        let extractor = RowExtractor::new(&keywords);
        let data = row(&["SE 101", "", "Intro to Programming", "3", "6"]);
        assert!(extractor.extract(&data, &ColumnMap::default()).is_none());
    }

    #[test]
    fn test_header_rows_skipped() {
        let keywords = KeywordConfig::default();
        let extractor = RowExtractor::new(&keywords);
        let header = row(&["Code", "Pre.", "Course Name", "T", "A", "Local Credits", "ECTS"]);
        let turkish = row(&["Ders Kodu", "", "Ders Adı", "", "", "Kredi", "AKTS"]);
        let tiny = row(&["-", "", "Something", "", "", "3", "6"]);
        for r in [header, turkish, tiny] {
            assert!(extractor.extract(&r, &ColumnMap::default()).is_none());
        }
    }

    #[test]
    fn test_column_map_from_header() {
        let keywords = KeywordConfig::default();
        let table = Table {
            rows: vec![
                row(&["1. Semester"]),
                row(&["Code", "Course Name", "Pre.", "Theory", "Local Credits", "ECTS", "Notes"]),
            ],
            ..Table::default()
        };
        let columns = ColumnMap::resolve(&table, &keywords);
        assert_eq!(
            columns,
            ColumnMap {
                code: 0,
                name: 1,
                local_credit: 4,
                ects: 5,
            }
        );
    }

    #[test]
    fn test_column_map_defaults_without_header() {
        let keywords = KeywordConfig::default();
        let table = Table {
            rows: vec![row(&["SE 101", "", "Intro", "", "", "3", "6"])],
            ..Table::default()
        };
        assert_eq!(ColumnMap::resolve(&table, &keywords), ColumnMap::default());
    }

    #[test]
    fn test_resolve_by_table_kind() {
        let keywords = KeywordConfig::default();
        let extractor = RowExtractor::new(&keywords);
        let data = extractor
            .extract(&row(&["SE 101", "", "Intro", "", "", "3", "6"]), &ColumnMap::default())
            .unwrap();

        assert_eq!(
            extractor.resolve(&data, TableKind::Curriculum),
            Some(RowAction::Course(CourseType::Mandatory))
        );
        assert_eq!(
            extractor.resolve(&data, TableKind::ElectiveList),
            Some(RowAction::Course(CourseType::Elective))
        );
        assert_eq!(extractor.resolve(&data, TableKind::Unknown), None);
    }

    #[test]
    fn test_resolve_markers() {
        let keywords = KeywordConfig::default();
        let extractor = RowExtractor::new(&keywords);
        let columns = ColumnMap::default();

        let elective = extractor
            .extract(&row(&["ELEC 001", "", "Elective", "", "", "3", "5"]), &columns)
            .unwrap();
        assert_eq!(
            extractor.resolve(&elective, TableKind::Curriculum),
            Some(RowAction::Placeholder)
        );

        let language = extractor
            .extract(&row(&["SFL 201", "", "Second Foreign Language", "", "", "3", "4"]), &columns)
            .unwrap();
        assert_eq!(
            extractor.resolve(&language, TableKind::ElectiveList),
            Some(RowAction::Course(CourseType::Mandatory))
        );
    }

    #[test]
    fn test_pool_requires_link() {
        let keywords = KeywordConfig::default();
        let extractor = RowExtractor::new(&keywords);
        let columns = ColumnMap::default();

        let unlinked = extractor
            .extract(&row(&["POOL 3", "", "Technical Electives", "", "", "", "5"]), &columns)
            .unwrap();
        assert_eq!(
            extractor.resolve(&unlinked, TableKind::ElectiveList),
            Some(RowAction::Course(CourseType::Elective))
        );

        let pool = linked(
            row(&["POOL 3", "", "Technical Electives", "", "", "", "5"]),
            "pool.php?id=3",
        );
        let pool = extractor.extract(&pool, &columns).unwrap();
        assert_eq!(
            extractor.resolve(&pool, TableKind::ElectiveList),
            Some(RowAction::Pool {
                id: "3".to_string()
            })
        );
    }
}
