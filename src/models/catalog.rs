// src/models/catalog.rs

//! Run-wide record accumulation.

use std::collections::BTreeMap;

use crate::models::CourseRecord;

/// Ordered collection of every record produced during a run.
///
/// Departments are appended whole and in crawl order; records are never
/// reordered, merged or deduplicated here.
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    records: Vec<CourseRecord>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the records of one department, preserving emission order.
    pub fn extend_department(&mut self, records: Vec<CourseRecord>) {
        self.records.extend(records);
    }

    pub fn records(&self) -> &[CourseRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record counts per course type, in type label order.
    pub fn count_by_type(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            *counts.entry(record.course_type.as_str()).or_insert(0) += 1;
        }
        counts
    }

    /// Number of records belonging to a department.
    pub fn department_count(&self, department: &str) -> usize {
        self.records
            .iter()
            .filter(|r| r.department == department)
            .count()
    }

    /// Distinct department names in first-seen order.
    pub fn departments(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for record in &self.records {
            if !names.contains(&record.department.as_str()) {
                names.push(&record.department);
            }
        }
        names
    }
}
