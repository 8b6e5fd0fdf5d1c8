//! Timestamp formatting for the `@timestamp` field
//!
//! Event timestamps are rendered as ISO 8601 with millisecond precision and a
//! numeric `+HH:MM` offset, e.g. `2001-09-09T01:46:40.000+00:00`.

use chrono::{DateTime, FixedOffset, Local, Offset, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// strftime layout of `yyyy-MM-dd'T'HH:mm:ss.SSSZZ`
pub const ISO_DATETIME_TIME_ZONE_FORMAT_WITH_MILLIS: &str = "%Y-%m-%dT%H:%M:%S%.3f%:z";

const SECONDS_PER_HOUR: i32 = 3_600;

/// Time zone used to render event timestamps
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventTimeZone {
    /// The process's local time zone
    #[default]
    Local,
    Utc,
    /// A fixed offset east of UTC
    FixedOffset { seconds: i32 },
}

impl EventTimeZone {
    /// Fixed offset built from hours east of UTC.
    ///
    /// Hour counts too large for an `i32` of seconds saturate, which
    /// [`EncoderConfig::validate`](crate::core::EncoderConfig::validate) rejects.
    pub fn hours_east(hours: i32) -> Self {
        EventTimeZone::FixedOffset {
            seconds: hours.saturating_mul(SECONDS_PER_HOUR),
        }
    }

    /// Fixed offsets must lie strictly within one day of UTC
    pub(crate) fn is_valid(&self) -> bool {
        match self {
            EventTimeZone::FixedOffset { seconds } => FixedOffset::east_opt(*seconds).is_some(),
            _ => true,
        }
    }

    /// Format epoch milliseconds in this time zone.
    ///
    /// Millisecond values chrono cannot represent render as the Unix epoch.
    #[must_use]
    pub fn format_millis(&self, timestamp_millis: i64) -> String {
        let utc = Utc
            .timestamp_millis_opt(timestamp_millis)
            .single()
            .unwrap_or_else(|| {
                tracing::debug!(timestamp_millis, "timestamp out of range, using epoch");
                DateTime::<Utc>::default()
            });

        match self {
            EventTimeZone::Local => format(&utc.with_timezone(&Local)),
            EventTimeZone::Utc => format(&utc),
            EventTimeZone::FixedOffset { seconds } => {
                let offset = FixedOffset::east_opt(*seconds).unwrap_or_else(|| Utc.fix());
                format(&utc.with_timezone(&offset))
            }
        }
    }
}

fn format<Tz: TimeZone>(datetime: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    datetime
        .format(ISO_DATETIME_TIME_ZONE_FORMAT_WITH_MILLIS)
        .to_string()
}
