//! Form field checks
//!
//! Validation collects every problem of a form before answering, so the
//! whole list can be shown next to the re-rendered page.

use crate::error::{RecruitmentError, RecruitmentResult};

#[derive(Debug, Default)]
pub struct FieldErrors(Vec<String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.0.push(message.into());
    }

    /// Trimmed value; records `message` when blank
    pub fn required(&mut self, value: &str, message: &str) -> String {
        let value = value.trim();
        if value.is_empty() {
            self.push(message);
        }
        value.to_string()
    }

    /// Trimmed value, `None` when blank
    pub fn optional(value: &str) -> Option<String> {
        let value = value.trim();
        (!value.is_empty()).then(|| value.to_string())
    }

    /// Records `message` when `value` is longer than `max` characters
    pub fn max_len(&mut self, value: &str, max: usize, message: &str) {
        if value.chars().count() > max {
            self.push(message);
        }
    }

    /// Keep the success value, record the failure message
    pub fn check<T>(&mut self, result: Result<T, String>) -> Option<T> {
        result.map_err(|e| self.push(e)).ok()
    }

    pub fn absorb(&mut self, other: Vec<String>) {
        self.0.extend(other);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }

    /// `Ok(())` when nothing was recorded
    pub fn finish(self) -> RecruitmentResult<()> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(RecruitmentError::Validation(self.0))
        }
    }
}

/// Digits of `raw`, dropping punctuation such as `.`, `-` and `/`
pub fn digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Comma-separated list, trimmed, blanks dropped
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
