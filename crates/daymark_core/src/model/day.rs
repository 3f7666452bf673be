//! Day cell annotation records.
//!
//! # Responsibility
//! - Define the visual marker (`Dot`) and per-day record (`DayMetadata`).
//! - Canonicalize calendar days into cache keys (`DateKey`).
//!
//! # Invariants
//! - Two values describing the same calendar day yield the same `DateKey`.
//! - `DayMetadata::classes` is a set; duplicates are unrepresentable.

use chrono::{DateTime, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

/// Class added when a daily note exists for the day.
pub const CLASS_HAS_NOTE: &str = "has-note";
/// Class added when the day's note is the currently focused document.
pub const CLASS_ACTIVE: &str = "active";

const DATE_KEY_PREFIX: &str = "day-";

/// Marker color. Only the neutral color exists today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DotColor {
    #[default]
    Default,
}

/// One visual marker in a day cell.
///
/// Filled dots express content volume, hollow dots express open tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dot {
    pub color: DotColor,
    pub is_filled: bool,
}

impl Dot {
    /// Content-volume marker.
    pub fn filled() -> Self {
        Self {
            color: DotColor::Default,
            is_filled: true,
        }
    }

    /// Open-task marker.
    pub fn hollow() -> Self {
        Self {
            color: DotColor::Default,
            is_filled: false,
        }
    }
}

/// Everything the calendar UI needs to render one day cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayMetadata {
    /// Style hooks such as `has-note` and `active`.
    pub classes: BTreeSet<String>,
    /// Display/filter tags, in header declaration order.
    pub data_attributes: Vec<String>,
    /// Markers rendered left-to-right, filled before hollow.
    pub dots: Vec<Dot>,
}

impl DayMetadata {
    /// Metadata for a day without a note.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn solid_dot_count(&self) -> usize {
        self.dots.iter().filter(|dot| dot.is_filled).count()
    }

    pub fn hollow_dot_count(&self) -> usize {
        self.dots.iter().filter(|dot| !dot.is_filled).count()
    }
}

/// Canonical cache key for one calendar day (`day-YYYY-MM-DD`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DateKey(String);

impl DateKey {
    pub fn from_date(date: NaiveDate) -> Self {
        Self(format!("{DATE_KEY_PREFIX}{}", date.format("%Y-%m-%d")))
    }

    /// Uses the calendar day as observed in the value's own timezone.
    pub fn from_datetime<Tz: TimeZone>(value: &DateTime<Tz>) -> Self {
        Self::from_date(value.date_naive())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<NaiveDate> for DateKey {
    fn from(value: NaiveDate) -> Self {
        Self::from_date(value)
    }
}

impl Display for DateKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{DateKey, DayMetadata, Dot};
    use chrono::{FixedOffset, NaiveDate, TimeZone, Utc};

    #[test]
    fn date_key_is_stable_across_times_of_day() {
        let morning = Utc.with_ymd_and_hms(2026, 3, 7, 0, 0, 1).unwrap();
        let night = Utc.with_ymd_and_hms(2026, 3, 7, 23, 59, 59).unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();

        assert_eq!(DateKey::from_datetime(&morning), DateKey::from_datetime(&night));
        assert_eq!(DateKey::from_datetime(&morning), DateKey::from_date(date));
        assert_eq!(DateKey::from_date(date).as_str(), "day-2026-03-07");
    }

    #[test]
    fn date_key_uses_local_calendar_day_of_offset() {
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        let value = tokyo.with_ymd_and_hms(2026, 3, 8, 1, 0, 0).unwrap();
        assert_eq!(DateKey::from_datetime(&value).as_str(), "day-2026-03-08");
    }

    #[test]
    fn metadata_counts_dots_by_kind() {
        let metadata = DayMetadata {
            dots: vec![Dot::filled(), Dot::filled(), Dot::hollow()],
            ..DayMetadata::empty()
        };
        assert_eq!(metadata.solid_dot_count(), 2);
        assert_eq!(metadata.hollow_dot_count(), 1);
        assert!(!metadata.has_class("has-note"));
    }

    #[test]
    fn metadata_serializes_with_ui_field_names() {
        let metadata = DayMetadata {
            dots: vec![Dot::hollow()],
            ..DayMetadata::empty()
        };
        let json = serde_json::to_value(&metadata).unwrap();
        assert_eq!(json["dataAttributes"], serde_json::json!([]));
        assert_eq!(json["dots"][0]["isFilled"], serde_json::json!(false));
        assert_eq!(json["dots"][0]["color"], serde_json::json!("default"));
    }
}
