use chrono::{DateTime, Utc};

pub fn format_time(dt: &DateTime<Utc>) -> String {
    dt.format("%H:%M UTC").to_string()
}

pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.format("%A, %B %d at %H:%M UTC").to_string()
}
