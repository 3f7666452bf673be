//! Annotation use-case services.
//!
//! # Responsibility
//! - Derive day annotations from note text and headers.
//! - Memoize per-day records and expose them through `CalendarSource`.
//!
//! # Invariants
//! - Metrics, tag extraction and dot building are pure.
//! - Only cached records that were fully computed are ever served.

pub mod active_document;
pub mod daily_note_source;
pub mod dots;
pub mod metadata_cache;
pub mod tag_extractor;
pub mod text_metrics;
