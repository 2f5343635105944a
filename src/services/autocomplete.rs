use serde::Serialize;
use std::path::Path;

use crate::error::{AppError, AppResult};

/// Characters typed before suggestions appear
pub const MIN_QUERY_CHARS: usize = 2;

/// Suggestions shown at once
pub const MAX_SUGGESTIONS: usize = 5;

/// A suggestion plus the byte range of the matched text within `title`,
/// for highlighting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub title: String,
    pub start: usize,
    pub end: usize,
}

/// Suggestion source for the search box
#[derive(Debug, Clone, Default)]
pub struct Autocomplete {
    titles: Vec<String>,
}

impl Autocomplete {
    pub fn new(titles: Vec<String>) -> Self {
        let titles = titles
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        Self { titles }
    }

    /// Loads one title per line; blank lines are skipped
    pub fn from_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Internal(format!(
                "Failed to read suggestions from {}: {}",
                path.display(),
                e
            ))
        })?;

        let autocomplete = Self::new(contents.lines().map(str::to_string).collect());
        tracing::info!(
            path = %path.display(),
            titles = autocomplete.len(),
            "Loaded autocomplete suggestions"
        );
        Ok(autocomplete)
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// Case-insensitive substring matches in list order, capped at [`MAX_SUGGESTIONS`]
    pub fn suggest(&self, query: &str) -> Vec<Suggestion> {
        if query.chars().count() < MIN_QUERY_CHARS {
            return Vec::new();
        }

        self.titles
            .iter()
            .filter_map(|title| {
                let (start, end) = find_ignoring_case(title, query)?;
                Some(Suggestion {
                    title: title.clone(),
                    start,
                    end,
                })
            })
            .take(MAX_SUGGESTIONS)
            .collect()
    }

    /// The search button is disabled while the box is empty
    pub fn submit_enabled(query: &str) -> bool {
        !query.is_empty()
    }
}

/// Byte range in `haystack` of the first case-insensitive match of `needle`.
///
/// Compares lowercased characters but reports offsets into the original
/// text, so titles whose lowercase form changes byte length still line up.
fn find_ignoring_case(haystack: &str, needle: &str) -> Option<(usize, usize)> {
    let needle: Vec<char> = needle.chars().flat_map(char::to_lowercase).collect();
    if needle.is_empty() {
        return None;
    }

    haystack.char_indices().find_map(|(start, _)| {
        let mut pending = needle.as_slice();
        for (offset, c) in haystack[start..].char_indices() {
            for lower in c.to_lowercase() {
                match pending.split_first() {
                    Some((first, rest)) if *first == lower => pending = rest,
                    _ => return None,
                }
            }
            if pending.is_empty() {
                return Some((start, start + offset + c.len_utf8()));
            }
        }
        None
    })
}
