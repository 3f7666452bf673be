//! Daily-note annotation source.
//!
//! # Responsibility
//! - Resolve the note for a calendar day and derive its `DayMetadata`.
//! - Serve repeated requests for a day from the per-day cache.
//!
//! # Invariants
//! - `has-note` is present iff a document resolved for the day.
//! - `active` is present iff that document is the focused one at build time.
//! - Content is fully read before a record is built, so cached records never
//!   hold pending work.
//! - Content read failures propagate and leave the day uncached.
//! - Cached records are not refreshed when notes or focus change; hosts call
//!   `invalidate`/`invalidate_all` when they observe such changes.

use crate::model::day::{DateKey, DayMetadata, CLASS_ACTIVE, CLASS_HAS_NOTE};
use crate::model::settings::Settings;
use crate::repo::{DocumentRepository, RepoError};
use crate::service::active_document::ActiveDocumentSignal;
use crate::service::dots::build_dots;
use crate::service::metadata_cache::DayMetadataCache;
use crate::service::tag_extractor::extract_tags;
use crate::service::text_metrics::{open_task_count, word_count};
use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, error};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::time::Instant;

/// Annotation failures surfaced to the calendar host.
#[derive(Debug)]
pub enum AnnotationError {
    /// The repository failed to read the day's note.
    ContentRead { date: NaiveDate, source: RepoError },
}

impl AnnotationError {
    /// Returns the underlying repository error.
    pub fn into_repo_error(self) -> RepoError {
        match self {
            Self::ContentRead { source, .. } => source,
        }
    }
}

impl Display for AnnotationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ContentRead { date, source } => {
                write!(f, "failed to annotate {date}: {source}")
            }
        }
    }
}

impl Error for AnnotationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ContentRead { source, .. } => Some(source),
        }
    }
}

/// A provider of per-day calendar annotations.
#[async_trait]
pub trait CalendarSource: Send + Sync {
    async fn get_metadata(&self, date: NaiveDate) -> Result<Arc<DayMetadata>, AnnotationError>;
}

/// Annotates days from their daily notes.
pub struct DailyNoteSource<R: ?Sized, A> {
    repo: Arc<R>,
    active: A,
    settings: Settings,
    cache: DayMetadataCache,
}

impl<R, A> DailyNoteSource<R, A>
where
    R: DocumentRepository + ?Sized,
    A: ActiveDocumentSignal,
{
    pub fn new(repo: Arc<R>, active: A, settings: Settings) -> Self {
        Self {
            repo,
            active,
            settings,
            cache: DayMetadataCache::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn cache(&self) -> &DayMetadataCache {
        &self.cache
    }

    /// Drops the cached record for `date` so the next request rebuilds it.
    pub fn invalidate(&self, date: NaiveDate) -> bool {
        self.cache.invalidate(&DateKey::from_date(date))
    }

    pub fn invalidate_all(&self) {
        self.cache.clear();
    }

    async fn build_metadata(&self, date: NaiveDate) -> Result<DayMetadata, AnnotationError> {
        let Some(document) = self.repo.resolve_document_for_date(date) else {
            return Ok(DayMetadata::empty());
        };

        let mut classes = BTreeSet::new();
        classes.insert(CLASS_HAS_NOTE.to_string());
        if self.active.is_active(&document) {
            classes.insert(CLASS_ACTIVE.to_string());
        }

        let data_attributes = extract_tags(self.repo.as_ref(), Some(&document));

        let content = self
            .repo
            .read_content(&document)
            .await
            .map_err(|source| AnnotationError::ContentRead { date, source })?;
        let dots = build_dots(
            word_count(&content),
            self.settings.words_per_dot,
            open_task_count(&content),
        );

        Ok(DayMetadata {
            classes,
            data_attributes,
            dots,
        })
    }
}

#[async_trait]
impl<R, A> CalendarSource for DailyNoteSource<R, A>
where
    R: DocumentRepository + ?Sized,
    A: ActiveDocumentSignal,
{
    async fn get_metadata(&self, date: NaiveDate) -> Result<Arc<DayMetadata>, AnnotationError> {
        let key = DateKey::from_date(date);
        self.cache
            .get_or_compute(key, || async move {
                let started_at = Instant::now();
                let result = self.build_metadata(date).await;
                match &result {
                    Ok(metadata) => debug!(
                        "event=metadata_build module=daily_note_source status=ok date={date} dots={} duration_ms={}",
                        metadata.dots.len(),
                        started_at.elapsed().as_millis()
                    ),
                    Err(err) => error!(
                        "event=metadata_build module=daily_note_source status=error date={date} duration_ms={} error={err}",
                        started_at.elapsed().as_millis()
                    ),
                }
                result
            })
            .await
    }
}
