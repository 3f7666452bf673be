//! Folder-backed daily note repository.
//!
//! # Responsibility
//! - Index a notes folder into a `date -> Document` map.
//! - Serve content reads asynchronously and header tags from frontmatter.
//!
//! # Invariants
//! - Only `*.md` files whose stem parses with `date_format` are indexed.
//! - When two files map to the same date, the first in path order wins.
//! - Document ids derive from paths, so rescans keep handles stable.
//! - Header tags are parsed once per scan; `header_tags` never touches disk.

use crate::model::document::Document;
use crate::repo::frontmatter::header_tags_or_none;
use crate::repo::{DocumentRepository, RepoError, RepoResult};
use async_trait::async_trait;
use chrono::NaiveDate;
use log::{info, warn};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;
use walkdir::WalkDir;

/// Filename date format used when the host does not configure one.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";
const NOTE_EXTENSION: &str = "md";

type NoteIndex = BTreeMap<NaiveDate, IndexedNote>;

struct IndexedNote {
    document: Document,
    header_tags: Option<Vec<String>>,
}

/// Daily notes stored as markdown files under one folder.
pub struct FsDailyNoteRepository {
    notes_dir: PathBuf,
    date_format: String,
    index: RwLock<NoteIndex>,
}

impl FsDailyNoteRepository {
    /// Opens and indexes `notes_dir` using `YYYY-MM-DD.md` file names.
    pub fn open(notes_dir: impl Into<PathBuf>) -> RepoResult<Self> {
        Self::open_with_format(notes_dir, DEFAULT_DATE_FORMAT)
    }

    /// Opens and indexes `notes_dir` using a chrono `date_format`.
    pub fn open_with_format(
        notes_dir: impl Into<PathBuf>,
        date_format: impl Into<String>,
    ) -> RepoResult<Self> {
        let notes_dir = notes_dir.into();
        let date_format = date_format.into();
        let index = scan_notes_dir(&notes_dir, &date_format)?;
        Ok(Self {
            notes_dir,
            date_format,
            index: RwLock::new(index),
        })
    }

    /// Rescans the folder, replacing the index and its header tags.
    /// Returns the note count.
    pub fn refresh(&self) -> RepoResult<usize> {
        let index = scan_notes_dir(&self.notes_dir, &self.date_format)?;
        let count = index.len();
        *self.write_index() = index;
        Ok(count)
    }

    pub fn notes_dir(&self) -> &Path {
        &self.notes_dir
    }

    pub fn len(&self) -> usize {
        self.read_index().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_index().is_empty()
    }

    /// Returns indexed dates in ascending order.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.read_index().keys().copied().collect()
    }

    fn read_index(&self) -> RwLockReadGuard<'_, NoteIndex> {
        self.index.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_index(&self) -> RwLockWriteGuard<'_, NoteIndex> {
        self.index
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl DocumentRepository for FsDailyNoteRepository {
    fn resolve_document_for_date(&self, date: NaiveDate) -> Option<Document> {
        self.read_index().get(&date).map(|note| note.document.clone())
    }

    async fn read_content(&self, document: &Document) -> RepoResult<String> {
        tokio::fs::read_to_string(document.path())
            .await
            .map_err(|source| RepoError::Io {
                path: document.path().to_path_buf(),
                source,
            })
    }

    fn header_tags(&self, document: &Document) -> Option<Vec<String>> {
        self.read_index()
            .get(&document.date())
            .filter(|note| note.document == *document)
            .and_then(|note| note.header_tags.clone())
    }
}

// An unreadable or non-UTF-8 note indexes without tags; its content read
// reports the failure.
fn read_header_tags(document: &Document) -> Option<Vec<String>> {
    match std::fs::read_to_string(document.path()) {
        Ok(content) => header_tags_or_none(&content),
        Err(err) => {
            warn!(
                "event=header_read module=repo status=error document={} error={err}",
                document.id()
            );
            None
        }
    }
}

/// Parses a note file name into its calendar day.
pub fn parse_note_date(path: &Path, date_format: &str) -> Option<NaiveDate> {
    let extension = path.extension()?.to_str()?;
    if !extension.eq_ignore_ascii_case(NOTE_EXTENSION) {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    NaiveDate::parse_from_str(stem, date_format).ok()
}

fn scan_notes_dir(notes_dir: &Path, date_format: &str) -> RepoResult<NoteIndex> {
    if !notes_dir.is_dir() {
        return Err(RepoError::InvalidNotesDir(notes_dir.to_path_buf()));
    }

    let started_at = Instant::now();
    let mut index = NoteIndex::new();
    let walker = WalkDir::new(notes_dir)
        .follow_links(true)
        .sort_by_file_name();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("event=daily_note_index module=repo status=skip error={err}");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(date) = parse_note_date(entry.path(), date_format) else {
            continue;
        };
        if let Entry::Vacant(slot) = index.entry(date) {
            let document = Document::from_path(date, entry.path());
            let header_tags = read_header_tags(&document);
            slot.insert(IndexedNote {
                document,
                header_tags,
            });
        }
    }

    info!(
        "event=daily_note_index module=repo status=ok notes={} duration_ms={}",
        index.len(),
        started_at.elapsed().as_millis()
    );
    Ok(index)
}
