use time::OffsetDateTime;
use time_tz::{Offset, TimeZone, Tz, timezones};

pub fn get_timezone(canonical_timezone: &str) -> Option<&'static Tz> {
    timezones::get_by_name(canonical_timezone)
}

/// Shift `date_time` to the offset `timezone` observed at that instant.
pub fn to_local_date_time(date_time: OffsetDateTime, timezone: &Tz) -> OffsetDateTime {
    date_time.to_offset(timezone.get_offset_utc(&date_time).to_utc())
}
