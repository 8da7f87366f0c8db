//! Display formatting for snapshot timestamps

use chrono::{DateTime, Local, Utc};

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Time zone used when rendering millisecond timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimestampFormat {
    /// The host's local time zone
    #[default]
    Local,
    Utc,
}

impl TimestampFormat {
    /// Render milliseconds since the Unix epoch as `yyyy-MM-dd HH:mm`.
    ///
    /// Values chrono cannot represent are rendered as the raw millisecond count.
    pub fn format(self, millis: i64) -> String {
        let Some(utc) = DateTime::<Utc>::from_timestamp_millis(millis) else {
            return millis.to_string();
        };
        match self {
            TimestampFormat::Utc => utc.format(DISPLAY_FORMAT).to_string(),
            TimestampFormat::Local => utc
                .with_timezone(&Local)
                .format(DISPLAY_FORMAT)
                .to_string(),
        }
    }
}
