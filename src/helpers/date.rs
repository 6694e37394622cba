//! Date helper functions

use chrono::{DateTime, TimeZone};

/// Long lowercase display date, e.g. "december 15, 2024"
pub fn display_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%B %-d, %Y").to_string().to_lowercase()
}

/// Machine-readable date for `<time datetime="...">`
pub fn date_xml<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
}
