//! Timestamp helpers shared across RecordLink crates.
//!
//! All timestamps in the system are `time::OffsetDateTime` values in UTC,
//! serialized as RFC 3339 strings. The display formatter below produces the
//! DD/MM/YYYY form used by patient-facing surfaces.

use time::OffsetDateTime;

/// Returns the current UTC timestamp.
pub fn now_utc() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}

/// Formats a timestamp as `DD/MM/YYYY` for display.
pub fn format_display_date(datetime: OffsetDateTime) -> String {
    format!(
        "{:02}/{:02}/{}",
        datetime.day(),
        u8::from(datetime.month()),
        datetime.year()
    )
}
