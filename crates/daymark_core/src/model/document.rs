//! Opaque daily-note handle.
//!
//! # Invariants
//! - `id` is stable for one underlying note for the repository lifetime.
//! - Equality and hashing use `id` only.

use chrono::NaiveDate;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Stable identity of one daily note.
pub type DocumentId = Uuid;

/// Handle to the note associated with one calendar day.
#[derive(Debug, Clone)]
pub struct Document {
    id: DocumentId,
    date: NaiveDate,
    path: PathBuf,
}

impl Document {
    pub fn new(id: DocumentId, date: NaiveDate, path: impl Into<PathBuf>) -> Self {
        Self {
            id,
            date,
            path: path.into(),
        }
    }

    /// Deterministic id derived from the note path.
    ///
    /// Rescanning the same folder yields the same handles, so an active
    /// document recorded before a rescan still matches afterwards.
    pub fn from_path(date: NaiveDate, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let id = Uuid::new_v5(&Uuid::NAMESPACE_URL, path.to_string_lossy().as_bytes());
        Self { id, date, path }
    }

    pub fn id(&self) -> DocumentId {
        self.id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Document {}

impl Hash for Document {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::Document;
    use chrono::NaiveDate;

    #[test]
    fn path_derived_ids_are_deterministic() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();
        let first = Document::from_path(date, "/notes/2026-01-02.md");
        let second = Document::from_path(date, "/notes/2026-01-02.md");
        let other = Document::from_path(date, "/notes/archive/2026-01-02.md");

        assert_eq!(first, second);
        assert_ne!(first, other);
    }
}
