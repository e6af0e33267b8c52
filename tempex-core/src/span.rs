//! Character spans.
//!
//! Every offset in tempex counts Unicode scalar values, not bytes: the
//! regex engine reports byte offsets, which are converted at the boundary
//! (see `tempex::offset`).

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A half-open `[start, end)` range of character offsets into one string.
///
/// Spans order by `(start, end)`, which is the order the resolver and the
/// assembler walk them in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CharSpan {
    /// Character offset (start, inclusive)
    pub start: usize,
    /// Character offset (end, exclusive)
    pub end: usize,
}

impl CharSpan {
    /// Create a span without validation.
    ///
    /// Use [`CharSpan::try_new`] for offsets that come from outside the crate.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Create a span, rejecting empty or inverted ranges.
    pub fn try_new(start: usize, end: usize) -> Result<Self> {
        if start >= end {
            return Err(Error::invalid_input(format!(
                "span start {} must be before end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// Number of characters covered.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// True when the span covers nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// True when `other` lies entirely inside `self` (equal spans included).
    #[must_use]
    pub const fn contains(&self, other: &CharSpan) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    /// Conservative overlap test used for conflict resolution.
    ///
    /// Spans that merely touch (`self.end == other.start`) count as
    /// overlapping, so adjacent partial matches cannot coexist.
    #[must_use]
    pub const fn touches(&self, other: &CharSpan) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Strict overlap: at least one character in common.
    #[must_use]
    pub const fn overlaps(&self, other: &CharSpan) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Extract the covered text from the string the span was taken from.
    ///
    /// Returns an empty string when the span lies outside `text`.
    #[must_use]
    pub fn extract(&self, text: &str) -> String {
        text.chars()
            .skip(self.start)
            .take(self.len())
            .collect()
    }
}

impl fmt::Display for CharSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

impl From<(usize, usize)> for CharSpan {
    fn from((start, end): (usize, usize)) -> Self {
        Self::new(start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_spans_conflict() {
        let a = CharSpan::new(0, 4);
        let b = CharSpan::new(4, 8);
        assert!(a.touches(&b));
        assert!(b.touches(&a));
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn disjoint_spans_do_not_touch() {
        let a = CharSpan::new(0, 4);
        let b = CharSpan::new(5, 8);
        assert!(!a.touches(&b));
        assert!(!b.touches(&a));
    }

    #[test]
    fn containment() {
        let outer = CharSpan::new(2, 10);
        assert!(outer.contains(&CharSpan::new(2, 10)));
        assert!(outer.contains(&CharSpan::new(3, 5)));
        assert!(!outer.contains(&CharSpan::new(1, 5)));
    }

    #[test]
    fn try_new_rejects_empty() {
        assert!(CharSpan::try_new(3, 3).is_err());
        assert!(CharSpan::try_new(4, 3).is_err());
        assert_eq!(CharSpan::try_new(1, 3).unwrap().len(), 2);
    }

    #[test]
    fn extract_counts_chars() {
        let text = "café 2001";
        assert_eq!(CharSpan::new(5, 9).extract(text), "2001");
    }
}
