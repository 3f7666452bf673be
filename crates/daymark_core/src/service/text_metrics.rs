//! Pure text metrics over note bodies.

use once_cell::sync::Lazy;
use regex::Regex;

static OPEN_TASK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[-*] \[ \]").expect("valid open task regex"));

/// Counts whitespace-delimited tokens. Punctuation is not normalized.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Counts unchecked checklist markers (`- [ ]` or `* [ ]`).
///
/// Counts every occurrence, so a line holding two markers counts twice.
pub fn open_task_count(text: &str) -> usize {
    OPEN_TASK_RE.find_iter(text).count()
}
