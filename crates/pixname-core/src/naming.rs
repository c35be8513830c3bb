//! Target filename assembly and collision resolution.
//!
//! A target name is `{base}{date}{.ext}` where `base` joins the non-empty
//! parts of prefix, suggestion and suffix with `_`. If that name is taken,
//! `_1`, `_2`, ... is inserted before the extension until a free name is found.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::sanitize::{sanitize_filename, DEFAULT_MAX_LENGTH};

/// Base name used when prefix, suggestion and suffix are all empty.
pub const PLACEHOLDER_NAME: &str = "untitled";

/// User-supplied naming rules, fixed for the whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamingOptions {
    /// Text placed before the suggestion
    pub prefix: String,
    /// Text placed after the suggestion
    pub suffix: String,
    /// `_YYYY-MM-DD`, or empty when date stamping is off
    pub date_stamp: String,
}

impl NamingOptions {
    /// Build naming options, stamping with today's local date if requested.
    ///
    /// The date is computed once here so every file in a run shares it.
    pub fn new(prefix: &str, suffix: &str, add_date: bool) -> Self {
        let today = add_date.then(|| chrono::Local::now().date_naive());
        Self::with_date(prefix, suffix, today)
    }

    /// Build naming options with an explicit date.
    ///
    /// Prefix and suffix go through the same sanitizer as suggestions so they
    /// can never smuggle a path separator into the target name.
    pub fn with_date(prefix: &str, suffix: &str, date: Option<NaiveDate>) -> Self {
        Self {
            prefix: sanitize_filename(prefix.trim(), DEFAULT_MAX_LENGTH),
            suffix: sanitize_filename(suffix.trim(), DEFAULT_MAX_LENGTH),
            date_stamp: date.map(date_stamp).unwrap_or_default(),
        }
    }

    /// Join prefix, sanitized suggestion and suffix, skipping empty parts.
    pub fn base_name(&self, suggestion: &str) -> String {
        let parts: Vec<&str> = [
            self.prefix.as_str(),
            suggestion,
            self.suffix.as_str(),
        ]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect();

        if parts.is_empty() {
            PLACEHOLDER_NAME.to_string()
        } else {
            parts.join("_")
        }
    }

    /// Full filename for a base name, extension and optional collision counter.
    pub fn file_name(&self, base: &str, extension: &str, counter: Option<u32>) -> String {
        let counter = counter.map(|n| format!("_{n}")).unwrap_or_default();
        if extension.is_empty() {
            format!("{base}{}{counter}", self.date_stamp)
        } else {
            format!("{base}{}{counter}.{extension}", self.date_stamp)
        }
    }

    /// Find a path in `dir` for `base` that does not exist yet.
    pub fn resolve_target(&self, dir: &Path, base: &str, extension: &str) -> PathBuf {
        let mut target = dir.join(self.file_name(base, extension, None));
        let mut counter = 1;
        while is_taken(&target) {
            target = dir.join(self.file_name(base, extension, Some(counter)));
            counter += 1;
        }
        target
    }
}

/// Format a date as the `_YYYY-MM-DD` stamp.
pub fn date_stamp(date: NaiveDate) -> String {
    date.format("_%Y-%m-%d").to_string()
}

/// A path is taken if anything is there, including a dangling symlink.
fn is_taken(path: &Path) -> bool {
    std::fs::symlink_metadata(path).is_ok()
}
