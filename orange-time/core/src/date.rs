use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// Format used when rendering a calendar date for display and storage, e.g. `Jun 5, 2026`.
pub const DISPLAY_FORMAT: &str = "%b %-d, %Y";

/// Format of a month group key, e.g. `June, 2026`.
pub const MONTH_KEY_FORMAT: &str = "%B, %Y";

// `%d` accepts one or two digits, so both `Jun 5, 2026` and `Jun 05, 2026` parse.
const ACCEPTED_FORMATS: [&str; 4] = ["%b %d, %Y", "%B %d, %Y", "%Y-%m-%d", "%m/%d/%Y"];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateParseError {
    #[error("'{0}' is not a recognised calendar date")]
    Unrecognised(String),
}

/// Parses a human-formatted date string.
pub fn parse_date(raw: &str) -> Result<NaiveDate, DateParseError> {
    let trimmed = raw.trim();
    ACCEPTED_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| DateParseError::Unrecognised(raw.to_string()))
}

/// Renders a date in the `MMM D, YYYY` display format.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

/// Renders the month group key for a date.
pub fn month_key(date: NaiveDate) -> String {
    date.format(MONTH_KEY_FORMAT).to_string()
}

/// A task date as stored: the display string exactly as it was written, plus
/// the calendar date it was parsed into when the value entered the model.
///
/// Values that do not parse are kept verbatim so they survive a load/save
/// cycle, but carry no calendar date. They order after every dated value.
/// The default is the blank, unscheduled value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TaskDate {
    raw: String,
    date: Option<NaiveDate>,
}

impl TaskDate {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            raw: format_date(date),
            date: Some(date),
        }
    }

    /// Parses `raw`, failing on anything that is not a calendar date.
    pub fn parse(raw: &str) -> Result<Self, DateParseError> {
        let date = parse_date(raw)?;
        Ok(Self {
            raw: raw.to_string(),
            date: Some(date),
        })
    }

    /// Keeps `raw` whether or not it parses.
    pub fn parse_lenient(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let date = parse_date(&raw).ok();
        Self { raw, date }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// Key for ascending chronological order with undated values last.
    pub fn sort_key(&self) -> (bool, Option<NaiveDate>) {
        (self.date.is_none(), self.date)
    }
}

impl fmt::Display for TaskDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<NaiveDate> for TaskDate {
    fn from(date: NaiveDate) -> Self {
        Self::from_date(date)
    }
}

impl Serialize for TaskDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for TaskDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse_lenient(raw))
    }
}

/// Deserializes an optional date where an empty string means "no date".
pub(crate) fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<TaskDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .filter(|value| !value.trim().is_empty())
        .map(TaskDate::parse_lenient))
}
