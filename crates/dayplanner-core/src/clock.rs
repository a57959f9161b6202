//! Wall-clock time-of-day arithmetic.
//!
//! Times are plain strings at the edges of the system, either in 12-hour
//! form with a meridiem suffix ("7:00 AM") or 24-hour form ("19:00").
//! [`ClockTime`] remembers which family it was parsed from so arithmetic
//! results are rendered back the same way.
//!
//! The string helpers [`add_minutes`] and [`subtract_minutes`] never fail:
//! an unparseable input is returned unchanged, so a bad profile value shows
//! up verbatim in a schedule instead of aborting generation.
//!
//! There is no timezone handling. Arithmetic wraps around midnight and the
//! day offset is discarded.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Which notation a clock time was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockFormat {
    /// "7:00 AM"
    TwelveHour,
    /// "19:00"
    TwentyFourHour,
}

impl ClockFormat {
    /// Any case-insensitive "AM"/"PM" token selects the 12-hour family.
    pub fn detect(input: &str) -> Self {
        let upper = input.to_ascii_uppercase();
        if upper.contains("AM") || upper.contains("PM") {
            ClockFormat::TwelveHour
        } else {
            ClockFormat::TwentyFourHour
        }
    }
}

/// Malformed clock time string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognised {format:?} clock time: {input:?}")]
pub struct TimeParseError {
    pub input: String,
    pub format: ClockFormat,
}

/// A time of day tagged with the notation it should be displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTime {
    time: NaiveTime,
    format: ClockFormat,
}

impl ClockTime {
    /// Shift by a signed number of minutes, wrapping at midnight.
    pub fn plus_minutes(self, delta: i64) -> Self {
        let offset = Duration::minutes(delta.rem_euclid(MINUTES_PER_DAY));
        let (time, _wrapped_secs) = self.time.overflowing_add_signed(offset);
        Self { time, ..self }
    }
}

impl FromStr for ClockTime {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format = ClockFormat::detect(s);
        let parsed = match format {
            ClockFormat::TwelveHour => parse_twelve_hour(s),
            ClockFormat::TwentyFourHour => NaiveTime::parse_from_str(s.trim(), "%H:%M").ok(),
        };
        parsed
            .map(|time| ClockTime { time, format })
            .ok_or_else(|| TimeParseError {
                input: s.to_string(),
                format,
            })
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.format {
            ClockFormat::TwelveHour => {
                // hour12() yields 1..=12, so there is never a leading zero
                // and noon/midnight render as "12".
                let (is_pm, hour) = self.time.hour12();
                let meridiem = if is_pm { "PM" } else { "AM" };
                write!(f, "{}:{:02} {}", hour, self.time.minute(), meridiem)
            }
            ClockFormat::TwentyFourHour => {
                write!(f, "{:02}:{:02}", self.time.hour(), self.time.minute())
            }
        }
    }
}

/// Parse "H:MM AM" / "HH:MM pm" / "7:05PM".
fn parse_twelve_hour(input: &str) -> Option<NaiveTime> {
    let s = input.trim();
    let split = s.len().checked_sub(2).filter(|&i| s.is_char_boundary(i))?;
    let (clock, meridiem) = s.split_at(split);
    // Normalise the separator so unspaced input ("7:05PM") matches the format.
    let normalised = format!("{} {}", clock.trim_end(), meridiem);
    NaiveTime::parse_from_str(&normalised, "%I:%M %p").ok()
}

/// Add `delta` minutes to a clock time string.
///
/// Returns `time` unchanged if it cannot be parsed.
pub fn add_minutes(time: &str, delta: i64) -> String {
    match time.parse::<ClockTime>() {
        Ok(parsed) => parsed.plus_minutes(delta).to_string(),
        Err(err) => {
            tracing::debug!(%err, "clock arithmetic skipped, keeping original value");
            time.to_string()
        }
    }
}

/// Subtract `delta` minutes from a clock time string.
///
/// Returns `time` unchanged if it cannot be parsed.
pub fn subtract_minutes(time: &str, delta: i64) -> String {
    add_minutes(time, -delta.rem_euclid(MINUTES_PER_DAY))
}
