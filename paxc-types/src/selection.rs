//! Terminals, directions, dates, and congestion levels.

use serde_derive::{Serialize, Deserialize};
use std::fmt;
use std::str::FromStr;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Terminal {
    T1,
    T2
}
impl Terminal {
    pub fn name(self) -> &'static str {
        match self {
            Terminal::T1 => "Terminal 1",
            Terminal::T2 => "Terminal 2"
        }
    }
}
impl Default for Terminal {
    fn default() -> Self {
        Terminal::T1
    }
}
impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Terminal::T1 => write!(f, "T1"),
            Terminal::T2 => write!(f, "T2")
        }
    }
}
impl FromStr for Terminal {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, String> {
        match &s.trim().to_ascii_lowercase() as &str {
            "t1" | "1" => Ok(Terminal::T1),
            "t2" | "2" => Ok(Terminal::T2),
            x => Err(format!("unknown terminal '{}' (expected T1 or T2)", x))
        }
    }
}

/// Which side of the terminal: passengers coming in (entry, i.e. the arrivals
/// hall) or going out (departure).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Entry,
    Departure
}
impl Direction {
    pub fn hall_name(self) -> &'static str {
        match self {
            Direction::Entry => "arrivals hall",
            Direction::Departure => "departures hall"
        }
    }
}
impl Default for Direction {
    fn default() -> Self {
        Direction::Entry
    }
}
impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Direction::Entry => write!(f, "entry"),
            Direction::Departure => write!(f, "departure")
        }
    }
}
impl FromStr for Direction {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, String> {
        match &s.trim().to_ascii_lowercase() as &str {
            "entry" | "arrivals" | "in" => Ok(Direction::Entry),
            "departure" | "departures" | "out" => Ok(Direction::Departure),
            x => Err(format!("unknown direction '{}' (expected entry or departure)", x))
        }
    }
}

/// The `selectdate` the portal understands: today or tomorrow.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateSelector {
    Today,
    Tomorrow
}
impl DateSelector {
    /// Value of the `selectdate` query parameter.
    pub fn as_param(self) -> &'static str {
        match self {
            DateSelector::Today => "0",
            DateSelector::Tomorrow => "1"
        }
    }
    /// Days from today.
    pub fn offset_days(self) -> i64 {
        match self {
            DateSelector::Today => 0,
            DateSelector::Tomorrow => 1
        }
    }
}
impl Default for DateSelector {
    fn default() -> Self {
        DateSelector::Today
    }
}
impl fmt::Display for DateSelector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            DateSelector::Today => write!(f, "today"),
            DateSelector::Tomorrow => write!(f, "tomorrow")
        }
    }
}
impl FromStr for DateSelector {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, String> {
        match &s.trim().to_ascii_lowercase() as &str {
            "0" | "today" => Ok(DateSelector::Today),
            "1" | "tomorrow" => Ok(DateSelector::Tomorrow),
            x => Err(format!("unknown date '{}' (expected today or tomorrow)", x))
        }
    }
}

/// Counts above this are `Medium`.
pub const LOW_MAX: i64 = 500;
/// Counts above this are `High`.
pub const MEDIUM_MAX: i64 = 1500;
/// Count at which a congestion bar is full.
pub const BAR_FULL_COUNT: i64 = 2000;

/// How busy a time slot is.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum CongestionLevel {
    Low,
    Medium,
    High
}
impl CongestionLevel {
    pub fn from_count(count: i64) -> Self {
        if count <= LOW_MAX {
            CongestionLevel::Low
        }
        else if count <= MEDIUM_MAX {
            CongestionLevel::Medium
        }
        else {
            CongestionLevel::High
        }
    }
    pub fn label(self) -> &'static str {
        match self {
            CongestionLevel::Low => "quiet",
            CongestionLevel::Medium => "normal",
            CongestionLevel::High => "busy"
        }
    }
}
impl fmt::Display for CongestionLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            CongestionLevel::Low => write!(f, "low"),
            CongestionLevel::Medium => write!(f, "medium"),
            CongestionLevel::High => write!(f, "high")
        }
    }
}

/// Fraction of a congestion bar to fill for `count`, in `0.0..=1.0`.
pub fn bar_fill(count: i64) -> f64 {
    (count as f64 / BAR_FULL_COUNT as f64).max(0.0).min(1.0)
}

/// Formats an `HH_HH` time slot as `HH:00-HH:00`.
///
/// Anything that doesn't look like a slot is returned unchanged.
pub fn format_time_slot(slot: &str) -> String {
    let mut parts = slot.split('_');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(start), Some(end), None) if !start.is_empty() && !end.is_empty() => {
            format!("{}:00-{}:00", start, end)
        },
        _ => slot.to_owned()
    }
}
