//! Display timestamp formatting.
//!
//! Every timestamp shown to a client or written to an export file goes
//! through [`format_timestamp`]. Instants are rendered in a fixed UTC+7 zone
//! (Indochina Time, no daylight saving) as `DD-MM-YY hh:mmAM`.

use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};

use crate::error::CoreError;

/// Offset of the display zone from UTC, in seconds.
pub const DISPLAY_UTC_OFFSET_SECS: i32 = 7 * 3600;

/// `strftime` pattern for rendered timestamps, e.g. `05-03-25 02:30PM`.
pub const DISPLAY_FORMAT: &str = "%d-%m-%y %I:%M%p";

/// The fixed zone all timestamps are rendered in.
pub fn display_zone() -> FixedOffset {
    FixedOffset::east_opt(DISPLAY_UTC_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// Current instant in the display zone.
pub fn now_in_display_zone() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&display_zone())
}

/// Today's calendar date in the display zone.
pub fn today_in_display_zone() -> NaiveDate {
    now_in_display_zone().date_naive()
}

/// An instant as it may come out of storage.
///
/// Naive values carry no zone and are taken to already be wall-clock time
/// in the display zone. Aware values are converted to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoredInstant {
    Naive(NaiveDateTime),
    Aware(DateTime<FixedOffset>),
}

impl From<NaiveDateTime> for StoredInstant {
    fn from(value: NaiveDateTime) -> Self {
        StoredInstant::Naive(value)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for StoredInstant {
    fn from(value: DateTime<Tz>) -> Self {
        StoredInstant::Aware(value.with_timezone(&display_zone()))
    }
}

impl StoredInstant {
    /// Wall-clock time of this instant in the display zone.
    pub fn local(&self) -> NaiveDateTime {
        match self {
            StoredInstant::Naive(naive) => *naive,
            StoredInstant::Aware(aware) => aware.with_timezone(&display_zone()).naive_local(),
        }
    }
}

/// Text layouts accepted for zone-less stored values.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

impl FromStr for StoredInstant {
    type Err = CoreError;

    /// Parse a stored text timestamp.
    ///
    /// Values carrying an offset (RFC 3339, or SQLite's space-separated
    /// variant) become [`StoredInstant::Aware`]. Values without one become
    /// [`StoredInstant::Naive`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Ok(aware) = DateTime::parse_from_rfc3339(s) {
            return Ok(StoredInstant::Aware(aware));
        }
        if let Ok(aware) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f%:z") {
            return Ok(StoredInstant::Aware(aware));
        }

        NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
            .map(StoredInstant::Naive)
            .ok_or_else(|| CoreError::Internal(format!("unrecognized stored timestamp '{s}'")))
    }
}

/// Render an optional instant for display. `None` stays `None`.
pub fn format_timestamp<T: Into<StoredInstant>>(ts: Option<T>) -> Option<String> {
    ts.map(|t| t.into().local().format(DISPLAY_FORMAT).to_string())
}
