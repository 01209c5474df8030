//! Placeholder substitution
//!
//! Markers are literal strings (`LIBRARYNAME`, `NEWOPERATION`) embedded in
//! template files. All markers are applied in one pass, so a replacement value
//! is never rescanned for other markers.

use regex::Regex;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{Result, ScaffoldError};

/// Ordered marker -> replacement mapping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placeholders {
    entries: Vec<(String, String)>,
}

impl Placeholders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a marker, replacing the value if the marker is already present
    pub fn insert(&mut self, marker: &str, value: &str) {
        match self.entries.iter_mut().find(|(m, _)| m == marker) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.entries.push((marker.to_string(), value.to_string())),
        }
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with(mut self, marker: &str, value: &str) -> Self {
        self.insert(marker, value);
        self
    }

    pub fn get(&self, marker: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(m, _)| m == marker)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace every marker occurrence in `content`.
    ///
    /// Where two markers match at the same position the longer one wins.
    /// Empty markers are ignored.
    pub fn substitute(&self, content: &str) -> Result<String> {
        let mut markers: Vec<&str> = self
            .entries
            .iter()
            .map(|(m, _)| m.as_str())
            .filter(|m| !m.is_empty())
            .collect();
        if markers.is_empty() {
            return Ok(content.to_string());
        }
        markers.sort_by(|a, b| b.len().cmp(&a.len()));

        let pattern = markers
            .iter()
            .map(|m| regex::escape(m))
            .collect::<Vec<_>>()
            .join("|");
        let re = Regex::new(&pattern)?;

        Ok(re
            .replace_all(content, |caps: &regex::Captures| {
                let marker = &caps[0];
                self.get(marker).unwrap_or(marker).to_string()
            })
            .into_owned())
    }
}

impl<K: AsRef<str>, V: AsRef<str>> FromIterator<(K, V)> for Placeholders {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut placeholders = Self::new();
        for (marker, value) in iter {
            placeholders.insert(marker.as_ref(), value.as_ref());
        }
        placeholders
    }
}

/// Rewrite `file_path` with every placeholder substituted.
///
/// The file is read and written once. A write failure can leave it truncated.
pub fn replace_placeholders_in_file(file_path: &Path, placeholders: &Placeholders) -> Result<()> {
    if !file_path.is_file() {
        return Err(ScaffoldError::NotFound(file_path.to_path_buf()));
    }

    let content = fs::read_to_string(file_path)?;
    let substituted = placeholders.substitute(&content)?;
    fs::write(file_path, substituted)?;

    debug!(
        file = %file_path.display(),
        markers = placeholders.len(),
        "substituted placeholders"
    );
    Ok(())
}

/// Convert a snake_case identifier to CamelCase.
///
/// Each `_`-separated segment is title-cased: a character following a cased
/// character is lowercased, any other character is uppercased. Uppercase
/// stands in for titlecase, so digraphs such as `ǆ` become `Ǆ`, not `ǅ`.
pub fn to_camel_case(snake_str: &str) -> String {
    snake_str.split('_').map(title_case).collect()
}

fn title_case(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut after_cased = false;
    for c in word.chars() {
        if after_cased {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        after_cased = c.is_lowercase() || c.is_uppercase();
    }
    out
}
