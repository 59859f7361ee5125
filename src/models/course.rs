// src/models/course.rs

//! Course record data structures.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sentinel for text fields that could not be located on a detail page.
pub const NOT_SPECIFIED: &str = "Not specified";

/// Sentinel for a missing prerequisite row.
pub const NO_PREREQUISITES: &str = "None";

/// How a course is taken within the curriculum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CourseType {
    #[serde(rename = "Mandatory")]
    Mandatory,

    #[serde(rename = "Elective")]
    Elective,

    /// Curriculum slot standing in for a choice from an elective list
    #[serde(rename = "Elective - Placeholder")]
    ElectivePlaceholder,

    /// Member course expanded from an elective pool page
    #[serde(rename = "Mandatory - Pool Selection")]
    PoolSelection,
}

impl CourseType {
    /// Label used in the serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseType::Mandatory => "Mandatory",
            CourseType::Elective => "Elective",
            CourseType::ElectivePlaceholder => "Elective - Placeholder",
            CourseType::PoolSelection => "Mandatory - Pool Selection",
        }
    }
}

impl fmt::Display for CourseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content scraped from a course detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseDetails {
    pub objectives: String,
    pub description: String,
    pub prerequisites: String,

    /// Entries formatted as `Week N: <topic>` or `Note: <topic>`
    pub weekly_topics: Vec<String>,
}

impl Default for CourseDetails {
    fn default() -> Self {
        Self {
            objectives: NOT_SPECIFIED.to_string(),
            description: NOT_SPECIFIED.to_string(),
            prerequisites: NO_PREREQUISITES.to_string(),
            weekly_topics: Vec::new(),
        }
    }
}

/// A single course entry of a department catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecord {
    /// Owning department display name
    pub department: String,

    pub course_code: String,
    pub course_name: String,

    /// Semester heading, `Elective Table`, `From Pool <id>` or `Language Selection`
    pub semester: String,

    #[serde(rename = "type")]
    pub course_type: CourseType,

    /// Kept as text so cells such as `-` survive
    pub ects: String,
    pub local_credit: String,

    pub objectives: String,
    pub description: String,
    pub prerequisites: String,
    pub weekly_topics: Vec<String>,

    /// Detail page link (empty when the row had none)
    pub url: String,
}

impl CourseRecord {
    /// Build a record from listing fields and the scraped detail content.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        department: impl Into<String>,
        course_code: impl Into<String>,
        course_name: impl Into<String>,
        semester: impl Into<String>,
        course_type: CourseType,
        ects: impl Into<String>,
        local_credit: impl Into<String>,
        details: CourseDetails,
        url: impl Into<String>,
    ) -> Self {
        Self {
            department: department.into(),
            course_code: course_code.into(),
            course_name: course_name.into(),
            semester: semester.into(),
            course_type,
            ects: ects.into(),
            local_credit: local_credit.into(),
            objectives: details.objectives,
            description: details.description,
            prerequisites: details.prerequisites,
            weekly_topics: details.weekly_topics,
            url: url.into(),
        }
    }

    /// Whether this record has the given code within the given department.
    pub fn matches(&self, department: &str, course_code: &str) -> bool {
        self.department == department && self.course_code == course_code
    }
}
