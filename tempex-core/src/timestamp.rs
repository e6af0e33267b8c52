//! Normalized calendar points.
//!
//! A [`NormalizedTimestamp`] is a date at year, month or day granularity.
//! For comparison it is padded to day granularity and encoded as the
//! integer `YYYYMMDD`; the canonical string keeps only the known parts:
//!
//! ```text
//! Granularity::Year   "2001"        -> 20010101
//! Granularity::Month  "2001-03"     -> 20010301
//! Granularity::Day    "2001-03-12"  -> 20010312
//! ```

use crate::error::{Error, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// English name of a month (1-based).
#[must_use]
pub fn month_name(month: u8) -> Option<&'static str> {
    MONTHS.get(usize::from(month).checked_sub(1)?).copied()
}

/// Month number for an English month name or its three-letter abbreviation.
///
/// Case-insensitive. `"Sept"` is not accepted, matching the Wikipedia
/// date templates the grammar was written for.
#[must_use]
pub fn month_from_name(name: &str) -> Option<u8> {
    let lower = name.trim().to_lowercase();
    let month = match lower.as_str() {
        "january" | "jan" => 1,
        "february" | "feb" => 2,
        "march" | "mar" => 3,
        "april" | "apr" => 4,
        "may" => 5,
        "june" | "jun" => 6,
        "july" | "jul" => 7,
        "august" | "aug" => 8,
        "september" | "sep" => 9,
        "october" | "oct" => 10,
        "november" | "nov" => 11,
        "december" | "dec" => 12,
        _ => return None,
    };
    Some(month)
}

/// Precision of a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// `YYYY`
    Year,
    /// `YYYY-MM`
    Month,
    /// `YYYY-MM-DD`
    Day,
}

/// A calendar point at year, month or day granularity.
///
/// Missing parts are stored as `1`, so `month()`/`day()` are always usable
/// for padding. Ordering follows [`NormalizedTimestamp::comparable`], with
/// granularity as a tie-breaker (coarser first).
///
/// Serializes as its canonical string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct NormalizedTimestamp {
    year: i32,
    month: u8,
    day: u8,
    granularity: Granularity,
}

impl NormalizedTimestamp {
    /// A year-granular timestamp.
    #[must_use]
    pub const fn year(year: i32) -> Self {
        Self {
            year,
            month: 1,
            day: 1,
            granularity: Granularity::Year,
        }
    }

    /// A month-granular timestamp. Fails when `month` is not in `1..=12`.
    pub fn year_month(year: i32, month: u8) -> Result<Self> {
        check_month(month)?;
        Ok(Self {
            year,
            month,
            day: 1,
            granularity: Granularity::Month,
        })
    }

    /// A day-granular timestamp.
    ///
    /// Only the component ranges are checked (`1..=12`, `1..=31`); no
    /// calendar validation is attempted.
    pub fn ymd(year: i32, month: u8, day: u8) -> Result<Self> {
        check_month(month)?;
        if !(1..=31).contains(&day) {
            return Err(Error::out_of_range(format!("day {} not in 1..=31", day)));
        }
        Ok(Self {
            year,
            month,
            day,
            granularity: Granularity::Day,
        })
    }

    /// Year component.
    #[must_use]
    pub const fn year_value(&self) -> i32 {
        self.year
    }

    /// Month component (1 when the granularity is `Year`).
    #[must_use]
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Day component (1 when the granularity is coarser than `Day`).
    #[must_use]
    pub const fn day(&self) -> u8 {
        self.day
    }

    /// Precision of this timestamp.
    #[must_use]
    pub const fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Integer `YYYYMMDD` encoding padded to day granularity.
    #[must_use]
    pub fn comparable(&self) -> i64 {
        let year = i64::from(self.year);
        let rest = i64::from(self.month) * 100 + i64::from(self.day);
        if year < 0 {
            year * 10_000 - (10_000 - rest)
        } else {
            year * 10_000 + rest
        }
    }

    /// First day covered by this timestamp, at day granularity.
    #[must_use]
    pub const fn start_of(&self) -> Self {
        Self {
            granularity: Granularity::Day,
            ..*self
        }
    }

    /// Last day covered by this timestamp, at day granularity.
    ///
    /// Years widen to 31 December, months to their real last day.
    #[must_use]
    pub fn end_of(&self) -> Self {
        let (month, day) = match self.granularity {
            Granularity::Year => (12, 31),
            Granularity::Month => (self.month, last_day_of_month(self.year, self.month)),
            Granularity::Day => (self.month, self.day),
        };
        Self {
            year: self.year,
            month,
            day,
            granularity: Granularity::Day,
        }
    }

    /// Wikidata timestamp form of the (day-padded) point: `2001-03-12T00:00:00Z`.
    #[must_use]
    pub fn to_wikidata(&self) -> String {
        format!(
            "{}-{:02}-{:02}T00:00:00Z",
            format_year(self.year),
            self.month,
            self.day
        )
    }

    /// Human-readable form used when turning timestamps back into text.
    ///
    /// Day-granular 1 January renders as the bare year: Wikidata stores
    /// year-precision values as `YYYY-01-01`.
    #[must_use]
    pub fn to_readable(&self) -> String {
        let month = month_name(self.month).unwrap_or("");
        match self.granularity {
            Granularity::Year => format_year(self.year),
            Granularity::Month => format!("{} {}", month, format_year(self.year)),
            Granularity::Day if self.month == 1 && self.day == 1 => format_year(self.year),
            Granularity::Day => format!("{} {} {}", self.day, month, format_year(self.year)),
        }
    }
}

impl PartialOrd for NormalizedTimestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NormalizedTimestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.comparable()
            .cmp(&other.comparable())
            .then(self.granularity.cmp(&other.granularity))
    }
}

impl fmt::Display for NormalizedTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let year = format_year(self.year);
        match self.granularity {
            Granularity::Year => write!(f, "{}", year),
            Granularity::Month => write!(f, "{}-{:02}", year, self.month),
            Granularity::Day => write!(f, "{}-{:02}-{:02}", year, self.month, self.day),
        }
    }
}

impl FromStr for NormalizedTimestamp {
    type Err = Error;

    /// Parse a canonical string (`2001`, `2001-03`, `2001-03-12`) or a
    /// Wikidata timestamp (`"2001-03-12T00:00:00Z"`, quotes optional).
    ///
    /// Wikidata encodes reduced precision with zero parts, so `2001-00-00`
    /// parses as a year and `2001-03-00` as a month.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim().trim_matches('"');
        let date = trimmed.split('T').next().unwrap_or(trimmed);
        let (negative, body) = match date.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, date),
        };

        let parts: Vec<&str> = body.split('-').collect();
        if parts.is_empty() || parts.len() > 3 {
            return Err(Error::parse(format!("not a timestamp: {:?}", s)));
        }

        let year = parse_component::<i32>(parts[0], s)?;
        let year = if negative { -year } else { year };
        let month = parts.get(1).map(|p| parse_component::<u8>(p, s)).transpose()?;
        let day = parts.get(2).map(|p| parse_component::<u8>(p, s)).transpose()?;

        match (month, day) {
            (None, _) | (Some(0), _) => Ok(Self::year(year)),
            (Some(m), None) | (Some(m), Some(0)) => Self::year_month(year, m),
            (Some(m), Some(d)) => Self::ymd(year, m, d),
        }
    }
}

impl From<NormalizedTimestamp> for String {
    fn from(ts: NormalizedTimestamp) -> Self {
        ts.to_string()
    }
}

impl TryFrom<String> for NormalizedTimestamp {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

fn parse_component<T: FromStr>(part: &str, original: &str) -> Result<T> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::parse(format!("not a timestamp: {:?}", original)));
    }
    part.parse::<T>()
        .map_err(|_| Error::parse(format!("not a timestamp: {:?}", original)))
}

fn check_month(month: u8) -> Result<()> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(Error::out_of_range(format!("month {} not in 1..=12", month)))
    }
}

fn format_year(year: i32) -> String {
    if year < 0 {
        format!("-{:04}", year.unsigned_abs())
    } else {
        format!("{:04}", year)
    }
}

fn last_day_of_month(year: i32, month: u8) -> u8 {
    let (next_year, next_month) = if month >= 12 {
        (year + 1, 1)
    } else {
        (year, u32::from(month) + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .and_then(|last| u8::try_from(last.day()).ok())
        .unwrap_or(31)
}
