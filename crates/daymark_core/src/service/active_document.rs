//! Currently focused document signal.

use crate::model::document::{Document, DocumentId};
use std::sync::{Arc, RwLock};

/// Read side of the host's "which note is open" state.
pub trait ActiveDocumentSignal: Send + Sync {
    fn current(&self) -> Option<DocumentId>;

    fn is_active(&self, document: &Document) -> bool {
        self.current() == Some(document.id())
    }
}

/// Signal for hosts without a focus concept.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoActiveDocument;

impl ActiveDocumentSignal for NoActiveDocument {
    fn current(&self) -> Option<DocumentId> {
        None
    }
}

/// Cloneable handle the host writes and the engine reads.
#[derive(Debug, Clone, Default)]
pub struct SharedActiveDocument {
    current: Arc<RwLock<Option<DocumentId>>>,
}

impl SharedActiveDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, document: Option<&Document>) {
        let mut current = self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *current = document.map(Document::id);
    }

    pub fn clear(&self) {
        self.set(None);
    }
}

impl ActiveDocumentSignal for SharedActiveDocument {
    fn current(&self) -> Option<DocumentId> {
        *self
            .current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::{ActiveDocumentSignal, NoActiveDocument, SharedActiveDocument};
    use crate::model::document::Document;
    use chrono::NaiveDate;

    #[test]
    fn shared_signal_tracks_host_updates_across_clones() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        let note = Document::from_path(date, "/notes/2026-02-01.md");
        let other = Document::from_path(date, "/notes/copy/2026-02-01.md");
        let host_side = SharedActiveDocument::new();
        let engine_side = host_side.clone();

        assert!(!engine_side.is_active(&note));
        host_side.set(Some(&note));
        assert!(engine_side.is_active(&note));
        assert!(!engine_side.is_active(&other));
        host_side.clear();
        assert_eq!(engine_side.current(), None);
        assert!(!NoActiveDocument.is_active(&note));
    }
}
