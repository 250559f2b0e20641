//! Clock helpers for record timestamps and relative date ranges.

use time::{Date, Duration, OffsetDateTime};

/// The current UTC time truncated to whole seconds.
///
/// Creation timestamps are stored with second precision so that they survive
/// a round trip through every store unchanged.
pub(crate) fn now() -> OffsetDateTime {
    let now = OffsetDateTime::now_utc();
    now - Duration::nanoseconds(i64::from(now.nanosecond()))
}

/// Today's date in UTC.
pub(crate) fn today() -> Date {
    OffsetDateTime::now_utc().date()
}
