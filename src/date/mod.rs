//! Lexical date matcher.
//!
//! Two passes over the raw string, merged by the span conflict resolver:
//!
//! ```text
//!   text ──┬── textual grammars (regex cascade) ──┐
//!          │                                      ├── resolve ── Vec<DateMatch>
//!          └── numeric grammars (per token)  ─────┘
//! ```
//!
//! Textual matches are keyed first, numeric matches second, so a numeric
//! reading replaces a textual one at the identical span. Overlap between the
//! survivors is then settled by length (see [`crate::resolve`]).

pub mod numeric;
pub mod textual;

use crate::offset::SpanConverter;
use crate::resolve::resolve;
use crate::{CharSpan, DateMatch, Disambiguation, Method, Timespan};

/// A date reading before conflict resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Surface text
    pub text: String,
    /// Character span
    pub span: CharSpan,
    /// Normalized interval
    pub interval: Timespan,
    /// Which pass produced it
    pub method: Method,
    /// Readings, in mention order
    pub disambiguation: Vec<Disambiguation>,
    /// Grammar rule name, for tracing
    pub rule: &'static str,
}

impl From<Candidate> for DateMatch {
    fn from(c: Candidate) -> Self {
        DateMatch {
            text: c.text,
            span: c.span,
            interval: c.interval,
            method: c.method,
            disambiguation: c.disambiguation,
        }
    }
}

/// Finds literal date and timespan mentions.
///
/// Stateless; the grammars are compiled once per process.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateMatcher;

impl DateMatcher {
    /// Create a matcher.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// All non-overlapping date mentions in `text`, ordered by span.
    ///
    /// Never fails: text without dates yields an empty list.
    #[must_use]
    pub fn find(&self, text: &str) -> Vec<DateMatch> {
        if text.is_empty() {
            return Vec::new();
        }
        let converter = SpanConverter::new(text);
        let textual = textual::find(text, &converter);
        let numeric = numeric::find(text);
        log::trace!(
            "[date] {} textual, {} numeric candidates",
            textual.len(),
            numeric.len()
        );
        resolve(textual, numeric)
    }
}

/// Shorthand for [`DateMatcher::find`].
#[must_use]
pub fn annotate_dates(text: &str) -> Vec<DateMatch> {
    DateMatcher::new().find(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text() {
        assert!(annotate_dates("").is_empty());
        assert!(annotate_dates("no dates here").is_empty());
    }

    #[test]
    fn textual_beats_contained_numeric() {
        let dates = annotate_dates("12 March 2001");
        assert_eq!(dates.len(), 1);
        assert_eq!(dates[0].span, CharSpan::new(0, 13));
        assert_eq!(dates[0].method, Method::Textual);
        assert_eq!(dates[0].interval.start.to_string(), "2001-03-12");
        assert!(dates[0].interval.is_point());
    }

    #[test]
    fn year_range_is_one_mention() {
        let dates = annotate_dates("2003–2005");
        assert_eq!(dates.len(), 1);
        assert_eq!(dates[0].interval.start.to_string(), "2003-01-01");
        assert_eq!(dates[0].interval.end.to_string(), "2005-12-31");
    }

    #[test]
    fn long_timespan_swallows_parts() {
        let dates = annotate_dates("reigned 29 May 2000 – 13 July 2000.");
        assert_eq!(dates.len(), 1);
        assert_eq!(dates[0].text, "29 May 2000 – 13 July 2000");
    }

    #[test]
    fn numeric_mentions_survive_alongside() {
        let dates = annotate_dates("from 1990 to 1995");
        assert_eq!(dates.len(), 2);
        assert!(dates.iter().all(|d| d.method == Method::Numeric));
        assert!(dates[0].span.end <= dates[1].span.start);
    }

    #[test]
    fn idempotent() {
        let text = "On 4 July 1776, and again in March 1777 (1778).";
        assert_eq!(annotate_dates(text), annotate_dates(text));
    }
}
