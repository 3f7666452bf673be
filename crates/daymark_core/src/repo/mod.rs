//! Document repository contracts and implementations.
//!
//! # Responsibility
//! - Define the narrow host contract the annotation engine reads through.
//! - Keep filesystem and frontmatter details out of the engine.
//!
//! # Invariants
//! - Absence of a note is `None`, never an error.
//! - Content read failures surface as `RepoError` verbatim; no retry here.

use crate::model::document::{Document, DocumentId};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod frontmatter;
pub mod fs_repo;
pub mod memory_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for document lookups and reads.
#[derive(Debug)]
pub enum RepoError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    DocumentNotFound(DocumentId),
    InvalidNotesDir(PathBuf),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read document `{}`: {source}", path.display())
            }
            Self::DocumentNotFound(id) => write!(f, "document not found: {id}"),
            Self::InvalidNotesDir(path) => {
                write!(f, "notes directory is not a directory: `{}`", path.display())
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::DocumentNotFound(_) => None,
            Self::InvalidNotesDir(_) => None,
        }
    }
}

/// Host-side access to daily notes.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Returns the daily note for `date`, if one exists.
    fn resolve_document_for_date(&self, date: NaiveDate) -> Option<Document>;

    /// Reads the full note text. This is the only suspending operation.
    async fn read_content(&self, document: &Document) -> RepoResult<String>;

    /// Returns header tags as declared, including any `#` marker.
    ///
    /// `None` when the note has no header block or no tag field.
    fn header_tags(&self, document: &Document) -> Option<Vec<String>>;
}
