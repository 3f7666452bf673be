//! Domain model for per-day calendar annotations.
//!
//! # Responsibility
//! - Define the records handed to the calendar UI (`DayMetadata`, `Dot`).
//! - Define the opaque document handle and the cache key for one day.
//!
//! # Invariants
//! - `DayMetadata` is never mutated after construction; updates replace it.
//! - `Document` equality is identity (`DocumentId`), never content.

pub mod day;
pub mod document;
pub mod settings;
