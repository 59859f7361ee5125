// src/models/document.rs

//! Retrieval-ready documents handed to the vector store indexer.

use serde::{Deserialize, Serialize};

use crate::models::{CourseRecord, NOT_SPECIFIED};

/// A flattened course text block plus the metadata the indexer keys on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RagDocument {
    /// Course code, used as the document key
    pub id: String,
    pub text_content: String,
    pub metadata: DocumentMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Detail page URL of the course
    pub source: String,
    pub department: String,
    #[serde(rename = "type")]
    pub course_type: String,
    pub code: String,
}

impl From<&CourseRecord> for RagDocument {
    fn from(course: &CourseRecord) -> Self {
        let meta_info = format!(
            "Course Code: {}\nCourse Name: {}\nDepartment: {}\nType: {}\nSemester: {}\nECTS: {}\n",
            clean_text(&course.course_code),
            clean_text(&course.course_name),
            clean_text(&course.department),
            clean_text(course.course_type.as_str()),
            clean_text(&course.semester),
            clean_text(&course.ects),
        );

        let content_info = format!(
            "Objectives: {}\nDescription: {}\nPrerequisites: {}\nWeekly Topics: {}",
            clean_text(&course.objectives),
            clean_text(&course.description),
            clean_text(&course.prerequisites),
            clean_list(&course.weekly_topics),
        );

        Self {
            id: course.course_code.clone(),
            text_content: format!("{meta_info}\n---\n{content_info}"),
            metadata: DocumentMetadata {
                source: course.url.clone(),
                department: course.department.clone(),
                course_type: course.course_type.as_str().to_string(),
                code: course.course_code.clone(),
            },
        }
    }
}

/// Render a text field, substituting the sentinel for empty values.
pub fn clean_text(text: &str) -> String {
    if text.is_empty() {
        return NOT_SPECIFIED.to_string();
    }
    text.trim().to_string()
}

/// Render a list field as `"; "`-joined text, dropping empty entries.
pub fn clean_list(items: &[String]) -> String {
    if items.is_empty() {
        return NOT_SPECIFIED.to_string();
    }
    items
        .iter()
        .filter(|item| !item.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CourseDetails, CourseType};

    #[test]
    fn test_clean_text_sentinel() {
        assert_eq!(clean_text(""), "Not specified");
        assert_eq!(clean_text("  Calculus  "), "Calculus");
    }

    #[test]
    fn test_clean_list_joins_non_empty() {
        let items = vec![
            "Week 1: Intro".to_string(),
            String::new(),
            "Week 2: Loops".to_string(),
        ];
        assert_eq!(clean_list(&items), "Week 1: Intro; Week 2: Loops");
        assert_eq!(clean_list(&[]), "Not specified");
    }

    #[test]
    fn test_document_from_record() {
        let details = CourseDetails {
            objectives: "Learn to program".to_string(),
            description: String::new(),
            prerequisites: "None".to_string(),
            weekly_topics: vec!["Week 1: Intro".to_string()],
        };
        let record = CourseRecord::new(
            "Software Engineering",
            "SE 101",
            "Intro to Programming",
            "1. Semester",
            CourseType::Mandatory,
            "6",
            "3",
            details,
            "https://example.com/se101",
        );

        let doc = RagDocument::from(&record);
        assert_eq!(doc.id, "SE 101");
        assert_eq!(doc.metadata.source, "https://example.com/se101");
        assert_eq!(doc.metadata.course_type, "Mandatory");
        assert!(doc.text_content.starts_with("Course Code: SE 101\n"));
        assert!(doc.text_content.contains("ECTS: 6\n\n---\nObjectives: Learn to program"));
        assert!(doc.text_content.contains("Description: Not specified\n"));
        assert!(doc.text_content.ends_with("Weekly Topics: Week 1: Intro"));
    }
}
