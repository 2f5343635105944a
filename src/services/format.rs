//! Display transformations applied while assembling an [`EnrichedRecord`].
//!
//! [`EnrichedRecord`]: crate::models::EnrichedRecord

use chrono::NaiveDate;

use crate::models::{NOT_AVAILABLE, POSTER_PLACEHOLDER};

/// Minutes → `"Xh"` on whole hours, otherwise `"Xh Ym"`
pub fn format_runtime(minutes: u32) -> String {
    let hours = minutes / 60;
    let rest = minutes % 60;
    if rest == 0 {
        format!("{}h", hours)
    } else {
        format!("{}h {}m", hours, rest)
    }
}

/// `YYYY-MM-DD` → `"Mon DD YYYY"`, or `None` when the date does not parse
pub fn format_date(raw: &str) -> Option<String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .ok()
        .map(|date| date.format("%b %d %Y").to_string())
}

/// Like [`format_date`] but falls back to the "Not Available" sentinel
pub fn format_date_or_sentinel(raw: Option<&str>) -> String {
    raw.and_then(format_date)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Groups digits by thousands: `1234567` → `"1,234,567"`
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Makes a biography safe to embed in the render payload.
///
/// Double quotes become single quotes; each newline becomes one space.
pub fn clean_biography(raw: &str) -> String {
    raw.replace('"', "'").replace('\n', " ")
}

/// Joins an image path onto the configured image base, or returns `placeholder`
pub fn image_url(base: &str, path: Option<&str>, placeholder: &str) -> String {
    match path.filter(|p| !p.is_empty()) {
        Some(path) => format!("{}{}", base, path),
        None => placeholder.to_string(),
    }
}

/// Poster URL with the poster placeholder as fallback
pub fn poster_url(base: &str, path: Option<&str>) -> String {
    image_url(base, path, POSTER_PLACEHOLDER)
}

/// TMDB `vote_average` as a plain number (`8.0` renders as `"8"`)
pub fn format_rating(vote_average: f64) -> String {
    vote_average.to_string()
}
