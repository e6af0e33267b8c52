//! Intervals and the relations between them.

use crate::timestamp::NormalizedTimestamp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A pair of day-granular timestamps `[start, end]` (both inclusive).
///
/// Point-in-time mentions have `start == end`. Coarse mentions are widened:
/// `2001` becomes `[2001-01-01, 2001-12-31]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Timespan {
    /// First day covered
    pub start: NormalizedTimestamp,
    /// Last day covered
    pub end: NormalizedTimestamp,
}

impl Timespan {
    /// Span covering everything `ts` denotes.
    #[must_use]
    pub fn covering(ts: NormalizedTimestamp) -> Self {
        Self {
            start: ts.start_of(),
            end: ts.end_of(),
        }
    }

    /// Span from the start of `first` to the end of `last`.
    #[must_use]
    pub fn between(first: NormalizedTimestamp, last: NormalizedTimestamp) -> Self {
        Self {
            start: first.start_of(),
            end: last.end_of(),
        }
    }

    /// True when the span is a single day.
    #[must_use]
    pub fn is_point(&self) -> bool {
        self.start == self.end
    }

    /// Integer form used by the relation reasoner.
    #[must_use]
    pub fn as_interval(&self) -> Interval {
        Interval::new(self.start.comparable(), self.end.comparable())
    }
}

impl fmt::Display for Timespan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// Integer interval in `YYYYMMDD` form, as compared by the reasoner.
///
/// Year-granular facts are `[YYYY0101, YYYY1231]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    /// Start, `YYYYMMDD`
    pub start: i64,
    /// End, `YYYYMMDD`
    pub end: i64,
}

impl Interval {
    /// Create an interval. Callers guarantee normalized `YYYYMMDD` input.
    #[must_use]
    pub const fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// A single-point interval.
    #[must_use]
    pub const fn point(at: i64) -> Self {
        Self { start: at, end: at }
    }

    /// The interval covering whole years `first..=last`.
    #[must_use]
    pub const fn years(first: i64, last: i64) -> Self {
        Self {
            start: first * 10_000 + 101,
            end: last * 10_000 + 1231,
        }
    }

    /// `start == end`.
    #[must_use]
    pub const fn is_point(&self) -> bool {
        self.start == self.end
    }

    /// Starts on 1 January and ends on 31 December (one or more years).
    #[must_use]
    pub const fn is_year_granular(&self) -> bool {
        self.start % 10_000 == 101 && self.end % 10_000 == 1231
    }

    /// Exactly one calendar year.
    #[must_use]
    pub const fn is_single_year(&self) -> bool {
        self.is_year_granular() && self.start / 10_000 == self.end / 10_000
    }
}

impl From<Timespan> for Interval {
    fn from(span: Timespan) -> Self {
        span.as_interval()
    }
}

impl From<(i64, i64)> for Interval {
    fn from((start, end): (i64, i64)) -> Self {
        Self::new(start, end)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.start, self.end)
    }
}

/// How a main fact relates in time to a constraint fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Relation {
    /// Main ends shortly before the constraint starts.
    Before,
    /// Main starts shortly after the constraint ends.
    After,
    /// Containment or intersection.
    Overlap,
    /// No relation worth phrasing.
    None,
}

impl Relation {
    /// Upper-case label (`BEFORE`, `AFTER`, `OVERLAP`, `NONE`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Relation::Before => "BEFORE",
            Relation::After => "AFTER",
            Relation::Overlap => "OVERLAP",
            Relation::None => "NONE",
        }
    }

    /// Word used to phrase the relation in a question.
    #[must_use]
    pub const fn as_phrase(&self) -> Option<&'static str> {
        match self {
            Relation::Before => Some("before"),
            Relation::After => Some("after"),
            Relation::Overlap => Some("during"),
            Relation::None => None,
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
