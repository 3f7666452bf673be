//! Day annotation engine for calendar views over daily notes.
//!
//! Given a calendar day, resolves its daily note through a host repository
//! and derives the cell decoration (classes, tags, dots), memoized per day.

pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::day::{DateKey, DayMetadata, Dot, DotColor, CLASS_ACTIVE, CLASS_HAS_NOTE};
pub use model::document::{Document, DocumentId};
pub use model::settings::{Settings, SettingsError, DEFAULT_WORDS_PER_DOT};
pub use repo::fs_repo::{FsDailyNoteRepository, DEFAULT_DATE_FORMAT};
pub use repo::memory_repo::MemoryDocumentRepository;
pub use repo::{DocumentRepository, RepoError, RepoResult};
pub use service::active_document::{
    ActiveDocumentSignal, NoActiveDocument, SharedActiveDocument,
};
pub use service::daily_note_source::{AnnotationError, CalendarSource, DailyNoteSource};
pub use service::dots::{build_dots, solid_dot_count, MAX_SOLID_DOTS};
pub use service::metadata_cache::DayMetadataCache;
pub use service::tag_extractor::extract_tags;
pub use service::text_metrics::{open_task_count, word_count};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
