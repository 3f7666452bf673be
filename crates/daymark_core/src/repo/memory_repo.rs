//! In-memory daily note repository.
//!
//! Used by hosts that keep notes outside the filesystem and by tests that
//! need to count reads or inject read failures.

use crate::model::document::Document;
use crate::repo::frontmatter::header_tags_or_none;
use crate::repo::{DocumentRepository, RepoError, RepoResult};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

struct MemoryNote {
    document: Document,
    content: String,
    header_tags: Option<Vec<String>>,
    read_failure: Option<String>,
}

/// Map-backed repository keyed by calendar day.
#[derive(Default)]
pub struct MemoryDocumentRepository {
    notes: RwLock<BTreeMap<NaiveDate, MemoryNote>>,
    reads: AtomicUsize,
}

impl MemoryDocumentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a note; header tags are parsed from its frontmatter.
    pub fn insert_note(&self, date: NaiveDate, content: impl Into<String>) -> Document {
        let content = content.into();
        let header_tags = header_tags_or_none(&content);
        self.insert_note_with_tags(date, content, header_tags)
    }

    /// Stores a note with host-provided header tags, replacing any note
    /// already stored for `date`.
    pub fn insert_note_with_tags(
        &self,
        date: NaiveDate,
        content: impl Into<String>,
        header_tags: Option<Vec<String>>,
    ) -> Document {
        let path = PathBuf::from(format!("memory/{}.md", date.format("%Y-%m-%d")));
        let document = Document::new(Uuid::new_v4(), date, path);
        self.write_notes().insert(
            date,
            MemoryNote {
                document: document.clone(),
                content: content.into(),
                header_tags,
                read_failure: None,
            },
        );
        document
    }

    /// Replaces note text in place, keeping the document identity.
    pub fn update_content(&self, date: NaiveDate, content: impl Into<String>) -> bool {
        match self.write_notes().get_mut(&date) {
            Some(note) => {
                note.content = content.into();
                true
            }
            None => false,
        }
    }

    pub fn remove_note(&self, date: NaiveDate) -> Option<Document> {
        self.write_notes().remove(&date).map(|note| note.document)
    }

    /// Makes every subsequent content read of the note for `date` fail.
    pub fn fail_reads(&self, date: NaiveDate, message: impl Into<String>) -> bool {
        match self.write_notes().get_mut(&date) {
            Some(note) => {
                note.read_failure = Some(message.into());
                true
            }
            None => false,
        }
    }

    pub fn clear_read_failure(&self, date: NaiveDate) {
        if let Some(note) = self.write_notes().get_mut(&date) {
            note.read_failure = None;
        }
    }

    /// Number of `read_content` calls served so far, including failures.
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    fn read_notes(&self) -> RwLockReadGuard<'_, BTreeMap<NaiveDate, MemoryNote>> {
        self.notes.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_notes(&self) -> RwLockWriteGuard<'_, BTreeMap<NaiveDate, MemoryNote>> {
        self.notes
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lookup<T>(&self, document: &Document, f: impl FnOnce(&MemoryNote) -> T) -> Option<T> {
        self.read_notes()
            .get(&document.date())
            .filter(|note| note.document == *document)
            .map(f)
    }
}

#[async_trait]
impl DocumentRepository for MemoryDocumentRepository {
    fn resolve_document_for_date(&self, date: NaiveDate) -> Option<Document> {
        self.read_notes().get(&date).map(|note| note.document.clone())
    }

    async fn read_content(&self, document: &Document) -> RepoResult<String> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let outcome = self.lookup(document, |note| match &note.read_failure {
            Some(message) => Err(message.clone()),
            None => Ok(note.content.clone()),
        });
        match outcome {
            Some(Ok(content)) => Ok(content),
            Some(Err(message)) => Err(RepoError::Io {
                path: document.path().to_path_buf(),
                source: std::io::Error::other(message),
            }),
            None => Err(RepoError::DocumentNotFound(document.id())),
        }
    }

    fn header_tags(&self, document: &Document) -> Option<Vec<String>> {
        self.lookup(document, |note| note.header_tags.clone())
            .flatten()
    }
}
