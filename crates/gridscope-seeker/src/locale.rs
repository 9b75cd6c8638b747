//! Display locale: checkbox tokens, date-time format and time zone.
//!
//! Dates are compared and rendered in the viewer's calendar, so both the
//! normalizer and the date predicates read the zone from here.

use std::fmt::{self, Write as _};
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Time zone used to interpret epoch-millisecond values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Zone {
    /// The process's local time zone.
    #[default]
    Local,
    /// A fixed offset from UTC.
    Fixed(FixedOffset),
}

impl Zone {
    /// UTC as a fixed zone.
    pub fn utc() -> Self {
        Zone::Fixed(Utc.fix())
    }

    /// A fixed zone `hours` east of UTC, `None` if out of range.
    pub fn east_hours(hours: i32) -> Option<Self> {
        FixedOffset::east_opt(hours * 3600).map(Zone::Fixed)
    }
}

impl FromStr for Zone {
    type Err = String;

    /// Parses `local`, `utc`, or an offset like `+09:00` / `-0530`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("local") {
            return Ok(Zone::Local);
        }
        if trimmed.eq_ignore_ascii_case("utc") || trimmed == "Z" {
            return Ok(Zone::utc());
        }

        let invalid = || format!("invalid time zone '{}': expected local, utc or ±HH:MM", s);
        let (sign, rest) = match trimmed.chars().next() {
            Some('+') => (1, &trimmed[1..]),
            Some('-') => (-1, &trimmed[1..]),
            _ => return Err(invalid()),
        };
        let digits: String = rest.chars().filter(|c| *c != ':').collect();
        if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let hours: i32 = digits[..2].parse().map_err(|_| invalid())?;
        let minutes: i32 = digits[2..].parse().map_err(|_| invalid())?;
        if minutes >= 60 {
            return Err(invalid());
        }
        FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
            .map(Zone::Fixed)
            .ok_or_else(invalid)
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Zone::Local => f.write_str("local"),
            Zone::Fixed(offset) => write!(f, "{}", offset),
        }
    }
}

impl Serialize for Zone {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Zone {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Localized rendering settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Locale {
    /// Token for a checked checkbox.
    pub yes: String,
    /// Token for an unchecked checkbox.
    pub no: String,
    /// `strftime`-style pattern for timestamps.
    pub datetime_format: String,
    /// Zone used for rendering and calendar-day comparison.
    pub time_zone: Zone,
}

impl Default for Locale {
    fn default() -> Self {
        Locale {
            yes: "yes".to_string(),
            no: "no".to_string(),
            datetime_format: "%Y/%m/%d %H:%M:%S".to_string(),
            time_zone: Zone::Local,
        }
    }
}

impl Locale {
    /// Replaces the time zone.
    pub fn with_zone(mut self, zone: Zone) -> Self {
        self.time_zone = zone;
        self
    }

    /// Replaces the checkbox tokens.
    pub fn with_tokens(mut self, yes: impl Into<String>, no: impl Into<String>) -> Self {
        self.yes = yes.into();
        self.no = no.into();
        self
    }

    /// Returns the checkbox token for `checked`.
    pub fn checkbox_token(&self, checked: bool) -> &str {
        if checked {
            &self.yes
        } else {
            &self.no
        }
    }

    /// Renders an epoch-millisecond value.
    ///
    /// Returns `None` for values outside the representable range or when the
    /// format pattern is malformed.
    pub fn format_timestamp(&self, millis: i64) -> Option<String> {
        let utc = DateTime::<Utc>::from_timestamp_millis(millis)?;
        let mut out = String::new();
        let written = match self.time_zone {
            Zone::Local => write!(
                out,
                "{}",
                utc.with_timezone(&Local).format(&self.datetime_format)
            ),
            Zone::Fixed(offset) => write!(
                out,
                "{}",
                utc.with_timezone(&offset).format(&self.datetime_format)
            ),
        };
        written.ok().map(|_| out)
    }

    /// Parses a date or date-time typed by a user into epoch milliseconds.
    ///
    /// Accepts the locale's own format, ISO-like `YYYY-MM-DD[ HH:MM:SS]`
    /// and `YYYY/MM/DD`. Bare dates mean midnight in the locale's zone.
    pub fn parse_timestamp(&self, text: &str) -> Option<i64> {
        let text = text.trim();
        let naive = [self.datetime_format.as_str(), "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]
            .iter()
            .find_map(|pattern| NaiveDateTime::parse_from_str(text, pattern).ok())
            .or_else(|| {
                ["%Y-%m-%d", "%Y/%m/%d"]
                    .iter()
                    .find_map(|pattern| NaiveDate::parse_from_str(text, pattern).ok())
                    .and_then(|day| day.and_hms_opt(0, 0, 0))
            })?;

        let millis = match self.time_zone {
            Zone::Local => Local.from_local_datetime(&naive).earliest()?.timestamp_millis(),
            Zone::Fixed(offset) => offset.from_local_datetime(&naive).single()?.timestamp_millis(),
        };
        Some(millis)
    }

    /// Returns the calendar day an epoch-millisecond value falls on.
    pub fn calendar_day(&self, millis: i64) -> Option<NaiveDate> {
        let utc = DateTime::<Utc>::from_timestamp_millis(millis)?;
        Some(match self.time_zone {
            Zone::Local => utc.with_timezone(&Local).date_naive(),
            Zone::Fixed(offset) => utc.with_timezone(&offset).date_naive(),
        })
    }
}
