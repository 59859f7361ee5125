// src/utils/url.rs

//! URL manipulation utilities.

use ::url::Url;

/// Resolve a potentially relative URL against a base URL.
pub fn resolve_url(base: &Url, href: &str) -> String {
    base.join(href.trim())
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

/// Resolve a URL string against a base URL string.
///
/// Falls back to the raw `href` when the base itself cannot be parsed.
///
/// # Examples
/// ```
/// use catalog_crawler::utils::url::resolve;
///
/// assert_eq!(
///     resolve("https://ects.example.edu/new/akademik.php?x=1", "syllabus.php?c=SE101"),
///     "https://ects.example.edu/new/syllabus.php?c=SE101"
/// );
/// ```
pub fn resolve(base_url: &str, href: &str) -> String {
    match Url::parse(base_url) {
        Ok(base) => resolve_url(&base, href),
        Err(_) => href.to_string(),
    }
}
