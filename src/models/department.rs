// src/models/department.rs

//! Department descriptors.

use serde::{Deserialize, Serialize};

/// A department whose curriculum page is crawled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentInfo {
    /// Display name (e.g., "Software Engineering")
    pub name: String,

    /// Short code (e.g., "SE")
    pub code: String,

    /// URL of the curriculum page
    pub url: String,
}
