//! 12-hour clock time model.

use std::fmt;
use std::str::FromStr;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minutes in a full day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// A clock-time string that failed to parse.
///
/// Carries the offending input so callers can attribute the failure
/// to the exact entry that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid time format: {0:?} (expected \"h:mm AM\" or \"h:mm PM\")")]
pub struct InvalidTimeFormat(pub String);

/// AM/PM marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Meridiem {
    #[serde(rename = "AM")]
    Am,
    #[serde(rename = "PM")]
    Pm,
}

impl fmt::Display for Meridiem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Meridiem::Am => write!(f, "AM"),
            Meridiem::Pm => write!(f, "PM"),
        }
    }
}

/// A time of day on a 12-hour clock, as written on a timecard.
///
/// Immutable once parsed. Invariants: hour in 1..=12, minute in 0..=59.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
    meridiem: Meridiem,
}

impl TimeOfDay {
    /// Construct a time of day, validating ranges.
    pub fn new(hour: u8, minute: u8, meridiem: Meridiem) -> Result<Self, InvalidTimeFormat> {
        if !(1..=12).contains(&hour) || minute > 59 {
            return Err(InvalidTimeFormat(format!("{}:{:02} {}", hour, minute, meridiem)));
        }
        Ok(Self {
            hour,
            minute,
            meridiem,
        })
    }

    /// Hour on the 12-hour clock (1–12).
    pub fn hour(&self) -> u8 {
        self.hour
    }

    /// Minute (0–59).
    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// AM/PM marker.
    pub fn meridiem(&self) -> Meridiem {
        self.meridiem
    }

    /// Minutes elapsed since midnight (12:00 AM = 0, 12:00 PM = 720).
    pub fn minutes_since_midnight(&self) -> u32 {
        let base = (self.hour % 12) as u32 * 60 + self.minute as u32;
        match self.meridiem {
            Meridiem::Am => base,
            Meridiem::Pm => base + 720,
        }
    }
}

impl FromStr for TimeOfDay {
    type Err = InvalidTimeFormat;

    /// Parse a clock string like `"08:00 AM"` or `"4:30 PM"`.
    ///
    /// Strict by contract: 1–2 digit hour, exactly 2-digit minute, a single
    /// space, and an uppercase `AM`/`PM` marker. Anything else is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let re = Regex::new(r"^(\d{1,2}):(\d{2}) (AM|PM)$").unwrap();
        let caps = re
            .captures(s)
            .ok_or_else(|| InvalidTimeFormat(s.to_string()))?;

        // Capture groups are all-digit and at most 2 chars, so u8 parse
        // cannot overflow.
        let hour: u8 = caps[1].parse().map_err(|_| InvalidTimeFormat(s.to_string()))?;
        let minute: u8 = caps[2].parse().map_err(|_| InvalidTimeFormat(s.to_string()))?;
        let meridiem = match &caps[3] {
            "AM" => Meridiem::Am,
            _ => Meridiem::Pm,
        };

        Self::new(hour, minute, meridiem).map_err(|_| InvalidTimeFormat(s.to_string()))
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02} {}", self.hour, self.minute, self.meridiem)
    }
}
