//! Dot builder: turns note metrics into visual markers.
//!
//! # Invariants
//! - Filled dots are capped at `MAX_SOLID_DOTS` and, when scaling is
//!   enabled, floored at one so every existing note shows a marker.
//! - Hollow dots equal the open task count with no cap.
//! - Filled dots always precede hollow dots.

use crate::model::day::Dot;

/// Upper bound on content-volume markers.
pub const MAX_SOLID_DOTS: usize = 5;

/// Number of filled dots for an existing note.
///
/// Non-positive or NaN `words_per_dot` disables filled dots.
pub fn solid_dot_count(word_count: usize, words_per_dot: f64) -> usize {
    if words_per_dot.is_nan() || words_per_dot <= 0.0 {
        return 0;
    }
    let scaled = (word_count as f64 / words_per_dot).floor();
    scaled.clamp(1.0, MAX_SOLID_DOTS as f64) as usize
}

/// Builds the marker row for an existing note.
pub fn build_dots(word_count: usize, words_per_dot: f64, open_task_count: usize) -> Vec<Dot> {
    let solid = solid_dot_count(word_count, words_per_dot);
    let mut dots = Vec::with_capacity(solid + open_task_count);
    dots.extend(std::iter::repeat(Dot::filled()).take(solid));
    dots.extend(std::iter::repeat(Dot::hollow()).take(open_task_count));
    dots
}
