//! Turning raw records into plain integer counts.

use serde_derive::{Serialize, Deserialize};

use crate::raw::RawRecord;
use crate::selection::{Terminal, Direction};

/// Parses one count field.
///
/// Missing, blank or non-numeric values count as zero. Otherwise, the leading
/// integer is taken (after an optional sign), so `"12abc"` gives 12 and `"3.7"`
/// gives 3. Values past the `i64` range saturate.
pub fn parse_numeric_field(value: Option<&str>) -> i64 {
    let s = match value {
        Some(s) => s.trim(),
        None => return 0
    };
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s)
    };
    let mut ret: i64 = 0;
    let mut seen = false;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        seen = true;
        let d = (b - b'0') as i64;
        ret = if negative {
            ret.saturating_mul(10).saturating_sub(d)
        }
        else {
            ret.saturating_mul(10).saturating_add(d)
        };
    }
    if seen { ret } else { 0 }
}

fn num(v: &Option<String>) -> i64 {
    parse_numeric_field(v.as_ref().map(|x| x as &str))
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct T1Entry {
    /// Gates A and B.
    pub eg1: i64,
    /// Gates E and F.
    pub eg2: i64,
    /// Gate C.
    pub eg3: i64,
    /// Gate D.
    pub eg4: i64,
    pub sum: i64
}
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct T1Departure {
    pub dg1: i64,
    pub dg2: i64,
    pub dg3: i64,
    pub dg4: i64,
    pub dg5: i64,
    pub dg6: i64,
    pub sum: i64
}
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct T2Entry {
    /// Gate A.
    pub eg1: i64,
    /// Gate B.
    pub eg2: i64,
    pub sum: i64
}
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct T2Departure {
    pub dg1: i64,
    pub dg2: i64,
    pub sum: i64
}
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Terminal1 {
    pub entry: T1Entry,
    pub departure: T1Departure
}
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Terminal2 {
    pub entry: T2Entry,
    pub departure: T2Departure
}

/// A time slot with every count parsed.
///
/// The `sum` fields are the portal's totals, passed through as-is; they are
/// never recomputed from (or checked against) the gate counts.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedRecord {
    #[serde(rename = "adate")]
    pub date: String,
    #[serde(rename = "atime")]
    pub time_slot: String,
    pub t1: Terminal1,
    pub t2: Terminal2
}

impl NormalizedRecord {
    /// The total for the given terminal and direction.
    pub fn sum_for(&self, terminal: Terminal, direction: Direction) -> i64 {
        match (terminal, direction) {
            (Terminal::T1, Direction::Entry) => self.t1.entry.sum,
            (Terminal::T1, Direction::Departure) => self.t1.departure.sum,
            (Terminal::T2, Direction::Entry) => self.t2.entry.sum,
            (Terminal::T2, Direction::Departure) => self.t2.departure.sum,
        }
    }
}

/// Normalizes a raw record. Never fails.
pub fn normalize(raw: &RawRecord) -> NormalizedRecord {
    NormalizedRecord {
        date: raw.adate.clone(),
        time_slot: raw.atime.clone(),
        t1: Terminal1 {
            entry: T1Entry {
                eg1: num(&raw.t1eg1),
                eg2: num(&raw.t1eg2),
                eg3: num(&raw.t1eg3),
                eg4: num(&raw.t1eg4),
                sum: num(&raw.t1egsum1),
            },
            departure: T1Departure {
                dg1: num(&raw.t1dg1),
                dg2: num(&raw.t1dg2),
                dg3: num(&raw.t1dg3),
                dg4: num(&raw.t1dg4),
                dg5: num(&raw.t1dg5),
                dg6: num(&raw.t1dg6),
                sum: num(&raw.t1dgsum1),
            }
        },
        t2: Terminal2 {
            entry: T2Entry {
                eg1: num(&raw.t2eg1),
                eg2: num(&raw.t2eg2),
                sum: num(&raw.t2egsum1),
            },
            departure: T2Departure {
                dg1: num(&raw.t2dg1),
                dg2: num(&raw.t2dg2),
                sum: num(&raw.t2dgsum2),
            }
        }
    }
}

impl From<&RawRecord> for NormalizedRecord {
    fn from(raw: &RawRecord) -> Self {
        normalize(raw)
    }
}

impl From<&NormalizedRecord> for RawRecord {
    /// Writes the counts back out in the portal's string form.
    fn from(n: &NormalizedRecord) -> Self {
        let s = |x: i64| Some(x.to_string());
        RawRecord {
            adate: n.date.clone(),
            atime: n.time_slot.clone(),
            t1eg1: s(n.t1.entry.eg1),
            t1eg2: s(n.t1.entry.eg2),
            t1eg3: s(n.t1.entry.eg3),
            t1eg4: s(n.t1.entry.eg4),
            t1egsum1: s(n.t1.entry.sum),
            t1dg1: s(n.t1.departure.dg1),
            t1dg2: s(n.t1.departure.dg2),
            t1dg3: s(n.t1.departure.dg3),
            t1dg4: s(n.t1.departure.dg4),
            t1dg5: s(n.t1.departure.dg5),
            t1dg6: s(n.t1.departure.dg6),
            t1dgsum1: s(n.t1.departure.sum),
            t2eg1: s(n.t2.entry.eg1),
            t2eg2: s(n.t2.entry.eg2),
            t2egsum1: s(n.t2.entry.sum),
            t2dg1: s(n.t2.departure.dg1),
            t2dg2: s(n.t2.departure.dg2),
            t2dgsum2: s(n.t2.departure.sum),
        }
    }
}
