//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::DepartmentInfo;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP and crawling behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Keyword sets driving table, row and detail page recognition
    #[serde(default)]
    pub keywords: KeywordConfig,

    /// Output file names inside the storage directory
    #[serde(default)]
    pub output: OutputConfig,

    /// Departments to crawl, in crawl order
    #[serde(default = "defaults::departments")]
    pub departments: Vec<DepartmentInfo>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == Some(0) {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        if self.departments.is_empty() {
            return Err(AppError::validation("No departments defined"));
        }
        for dept in &self.departments {
            if dept.name.trim().is_empty() {
                return Err(AppError::validation(format!(
                    "Department with url {} has no name",
                    dept.url
                )));
            }
            if !dept.url.starts_with("http") {
                return Err(AppError::validation(format!(
                    "Department {} has an invalid url: {}",
                    dept.name, dept.url
                )));
            }
        }
        if self.keywords.semester.is_empty() || self.keywords.elective_table.is_empty() {
            return Err(AppError::validation(
                "keywords.semester and keywords.elective_table must not be empty",
            ));
        }
        if self.keywords.language_codes.is_empty() {
            return Err(AppError::validation("No language codes defined"));
        }
        if self.keywords.language_codes.iter().any(|c| c.trim().is_empty()) {
            return Err(AppError::validation("keywords.language_codes contains a blank code"));
        }
        if self.output.courses_file.trim().is_empty() {
            return Err(AppError::validation("output.courses_file is empty"));
        }
        Ok(())
    }

    /// Departments restricted to the given codes (all when `codes` is empty).
    pub fn selected_departments(&self, codes: &[String]) -> Vec<DepartmentInfo> {
        self.departments
            .iter()
            .filter(|d| codes.is_empty() || codes.iter().any(|c| c.eq_ignore_ascii_case(&d.code)))
            .cloned()
            .collect()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            crawler: CrawlerConfig::default(),
            keywords: KeywordConfig::default(),
            output: OutputConfig::default(),
            departments: defaults::departments(),
        }
    }
}

/// HTTP client and crawling behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds; unset means requests wait for the server
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Pause between two departments in milliseconds
    #[serde(default = "defaults::department_delay")]
    pub department_delay_ms: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: None,
            department_delay_ms: defaults::department_delay(),
        }
    }
}

/// Keyword sets, matched case-insensitively unless noted otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordConfig {
    /// Leading-row words marking a semester curriculum table
    #[serde(default = "defaults::semester")]
    pub semester: Vec<String>,

    /// Leading-row words marking an elective list table
    #[serde(default = "defaults::elective_table")]
    pub elective_table: Vec<String>,

    /// First-cell words marking a header row
    #[serde(default = "defaults::code_header")]
    pub code_header: Vec<String>,

    /// Header words binding the course name column
    #[serde(default = "defaults::name_header")]
    pub name_header: Vec<String>,

    /// Header words binding the local credit column
    #[serde(default = "defaults::credit_header")]
    pub credit_header: Vec<String>,

    /// Header words binding the ECTS column
    #[serde(default = "defaults::ects_header")]
    pub ects_header: Vec<String>,

    /// Code fragments marking an elective slot placeholder
    #[serde(default = "defaults::placeholder_markers")]
    pub placeholder_markers: Vec<String>,

    /// Code fragments marking a foreign language course
    #[serde(default = "defaults::language_markers")]
    pub language_markers: Vec<String>,

    /// Language abbreviations recognised in course links
    #[serde(default = "defaults::language_codes")]
    pub language_codes: Vec<String>,

    /// Detail row headers holding the course objective
    #[serde(default = "defaults::objective")]
    pub objective: Vec<String>,

    /// Detail row headers holding the course description
    #[serde(default = "defaults::description")]
    pub description: Vec<String>,

    /// Detail row headers holding the prerequisites
    #[serde(default = "defaults::prerequisite")]
    pub prerequisite: Vec<String>,

    /// Header words of a weekly topics table's week column
    #[serde(default = "defaults::week")]
    pub week: Vec<String>,

    /// Header words of a weekly topics table's topic column
    #[serde(default = "defaults::topic")]
    pub topic: Vec<String>,

    /// Non-numeric week cells kept as notes
    #[serde(default = "defaults::note_markers")]
    pub note_markers: Vec<String>,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            semester: defaults::semester(),
            elective_table: defaults::elective_table(),
            code_header: defaults::code_header(),
            name_header: defaults::name_header(),
            credit_header: defaults::credit_header(),
            ects_header: defaults::ects_header(),
            placeholder_markers: defaults::placeholder_markers(),
            language_markers: defaults::language_markers(),
            language_codes: defaults::language_codes(),
            objective: defaults::objective(),
            description: defaults::description(),
            prerequisite: defaults::prerequisite(),
            week: defaults::week(),
            topic: defaults::topic(),
            note_markers: defaults::note_markers(),
        }
    }
}

/// Lower-case `text` so that Turkish dotted and dotless `i` compare equal.
///
/// `I`, `İ` and `ı` all fold to `i`; the combining dot left by lower-casing
/// `İ` is dropped.
pub fn fold_case(text: &str) -> String {
    text.chars()
        .flat_map(|c| match c {
            'I' | 'İ' | 'ı' => 'i'.to_lowercase(),
            _ => c.to_lowercase(),
        })
        .filter(|&c| c != '\u{307}')
        .collect()
}

/// Check whether `text` contains any keyword, ignoring case.
pub fn contains_any(text: &str, keywords: &[String]) -> bool {
    let folded = fold_case(text);
    keywords
        .iter()
        .filter(|k| !k.trim().is_empty())
        .any(|k| folded.contains(&fold_case(k)))
}

/// Output file names, relative to the storage directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Crawled course records
    #[serde(default = "defaults::courses_file")]
    pub courses_file: String,

    /// Retrieval-ready documents
    #[serde(default = "defaults::documents_file")]
    pub documents_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            courses_file: defaults::courses_file(),
            documents_file: defaults::documents_file(),
        }
    }
}

mod defaults {
    use super::DepartmentInfo;

    fn words(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    // Crawler defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; catalog-crawler/0.1)".into()
    }
    pub fn department_delay() -> u64 {
        1000
    }

    // Keyword defaults
    pub fn semester() -> Vec<String> {
        words(&["semester", "dönem", "yarıyıl"])
    }
    pub fn elective_table() -> Vec<String> {
        words(&["elective", "seçmeli", "pool", "havuz"])
    }
    pub fn code_header() -> Vec<String> {
        words(&["code", "kod"])
    }
    pub fn name_header() -> Vec<String> {
        words(&["name", "adı"])
    }
    pub fn credit_header() -> Vec<String> {
        words(&["local credit", "kredi"])
    }
    pub fn ects_header() -> Vec<String> {
        words(&["ects", "akts"])
    }
    pub fn placeholder_markers() -> Vec<String> {
        words(&["ELEC"])
    }
    pub fn language_markers() -> Vec<String> {
        words(&["SFL"])
    }
    pub fn language_codes() -> Vec<String> {
        words(&["ARB", "CHN", "FR", "GER", "ITL", "JPN", "RUS", "SPN"])
    }
    pub fn objective() -> Vec<String> {
        words(&["course objective", "objectives", "dersin amacı"])
    }
    pub fn description() -> Vec<String> {
        words(&["course description", "ders tanımı", "dersin tanımı"])
    }
    pub fn prerequisite() -> Vec<String> {
        words(&["prerequisite", "ön koşul", "ön-koşul", "önkoşul"])
    }
    pub fn week() -> Vec<String> {
        words(&["week", "hafta"])
    }
    pub fn topic() -> Vec<String> {
        words(&["topic", "subject", "konu"])
    }
    pub fn note_markers() -> Vec<String> {
        words(&["review", "final"])
    }

    // Output defaults
    pub fn courses_file() -> String {
        "courses.json".into()
    }
    pub fn documents_file() -> String {
        "rag_ready.json".into()
    }

    // Department defaults
    pub fn departments() -> Vec<DepartmentInfo> {
        let curriculum = |section: &str| {
            format!(
                "https://ects.ieu.edu.tr/new/akademik.php?section={section}&sid=curr_before_2025&lang=en"
            )
        };
        vec![
            DepartmentInfo {
                name: "Software Engineering".to_string(),
                code: "SE".to_string(),
                url: curriculum("se.cs.ieu.edu.tr"),
            },
            DepartmentInfo {
                name: "Computer Engineering".to_string(),
                code: "CE".to_string(),
                url: curriculum("ce.cs.ieu.edu.tr"),
            },
            DepartmentInfo {
                name: "Electrical and Electronics Engineering".to_string(),
                code: "EEE".to_string(),
                url: curriculum("ete.cs.ieu.edu.tr"),
            },
            DepartmentInfo {
                name: "Industrial Engineering".to_string(),
                code: "IE".to_string(),
                url: curriculum("is.cs.ieu.edu.tr"),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.crawler.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.crawler.timeout_secs = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_missing_departments() {
        let mut config = Config::default();
        config.departments.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_blank_language_code() {
        let mut config = Config::default();
        config.keywords.language_codes.push(" ".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [crawler]
            department_delay_ms = 0
            "#,
        )
        .unwrap();
        assert_eq!(config.crawler.department_delay_ms, 0);
        assert_eq!(config.departments.len(), 4);
        assert_eq!(config.keywords.semester, defaults::semester());
        assert_eq!(config.output.courses_file, "courses.json");
        assert!(config.crawler.timeout_secs.is_none());
    }

    #[test]
    fn selected_departments_filters_by_code() {
        let config = Config::default();
        let selected = config.selected_departments(&["se".to_string(), "IE".to_string()]);
        let codes: Vec<_> = selected.iter().map(|d| d.code.as_str()).collect();
        assert_eq!(codes, ["SE", "IE"]);
        assert_eq!(config.selected_departments(&[]).len(), 4);
    }

    #[test]
    fn contains_any_ignores_case() {
        let keywords = defaults::semester();
        assert!(contains_any("1. SEMESTER", &keywords));
        assert!(contains_any("Güz Dönemi", &keywords));
        assert!(!contains_any("Elective Courses", &keywords));
    }

    #[test]
    fn contains_any_folds_turkish_capitals() {
        assert!(contains_any("3. YARIYIL", &defaults::semester()));
        assert!(contains_any("DERSİN AMACI", &defaults::objective()));
        assert!(contains_any("ÖN KOŞUL", &defaults::prerequisite()));
        assert!(contains_any("Ders Adı", &words_of(&["ADI"])));
        assert_eq!(fold_case("İstanbul IŞIK"), "istanbul işik");
    }

    #[test]
    fn blank_keywords_never_match() {
        assert!(!contains_any("anything", &words_of(&["", "  "])));
    }

    fn words_of(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }
}
