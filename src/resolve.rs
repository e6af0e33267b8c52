//! Span conflict resolution for date candidates.
//!
//! Candidates are keyed by span. Within the textual pass the first rule (in
//! priority order) to claim a span keeps it; a numeric reading at the same
//! span replaces the textual one. Survivors that touch each other are then
//! settled pairwise in span order:
//!
//! ```text
//!   "12 March 2001"
//!    [0..13)  DMY          keep (longest)
//!       [3..13)  MONTH_YEAR    drop
//!             [9..13) YEAR      drop
//! ```
//!
//! Two spans touch when they share a character or one ends where the other
//! starts. The shorter of a touching pair is dropped; on equal length the one
//! later in span order goes.

use crate::date::Candidate;
use crate::{CharSpan, DateMatch};
use std::collections::BTreeMap;

// =============================================================================
// Conflict Resolution
// =============================================================================

#[derive(Debug, PartialEq, Eq)]
enum Resolution {
    KeepExisting,
    Replace,
}

/// Longest span wins; the earlier span wins a tie.
fn settle(existing: CharSpan, candidate: CharSpan) -> Resolution {
    if candidate.len() > existing.len() {
        Resolution::Replace
    } else {
        Resolution::KeepExisting
    }
}

/// Merge textual and numeric candidates into non-overlapping date matches.
///
/// The result is ordered by span start (then end).
#[must_use]
pub fn resolve(textual: Vec<Candidate>, numeric: Vec<Candidate>) -> Vec<DateMatch> {
    let mut by_span: BTreeMap<CharSpan, Candidate> = BTreeMap::new();
    for candidate in textual {
        by_span.entry(candidate.span).or_insert(candidate);
    }
    for candidate in numeric {
        if let Some(prev) = by_span.insert(candidate.span, candidate) {
            log::trace!("[resolve] numeric reading replaces {} at {}", prev.rule, prev.span);
        }
    }

    let spans: Vec<CharSpan> = by_span.keys().copied().collect();
    let mut alive = vec![true; spans.len()];
    for i in 0..spans.len() {
        if !alive[i] {
            continue;
        }
        for j in (i + 1)..spans.len() {
            if !alive[j] || !spans[i].touches(&spans[j]) {
                continue;
            }
            match settle(spans[i], spans[j]) {
                Resolution::KeepExisting => alive[j] = false,
                Resolution::Replace => {
                    alive[i] = false;
                    break;
                }
            }
        }
    }

    by_span
        .into_values()
        .zip(alive)
        .filter_map(|(candidate, keep)| {
            if !keep {
                log::trace!("[resolve] dropped {} {:?}", candidate.rule, candidate.text);
            }
            keep.then(|| DateMatch::from(candidate))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Method, NormalizedTimestamp, Timespan};

    fn cand(start: usize, end: usize, method: Method, rule: &'static str) -> Candidate {
        let ts = NormalizedTimestamp::year(2001);
        Candidate {
            text: "x".repeat(end - start),
            span: CharSpan::new(start, end),
            interval: Timespan::covering(ts),
            method,
            disambiguation: Vec::new(),
            rule,
        }
    }

    #[test]
    fn longest_wins() {
        let out = resolve(
            vec![cand(0, 13, Method::Textual, "DMY"), cand(3, 13, Method::Textual, "MONTH_YEAR")],
            vec![cand(9, 13, Method::Numeric, "YEAR")],
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].span, CharSpan::new(0, 13));
    }

    #[test]
    fn numeric_replaces_textual_at_same_span() {
        let out = resolve(
            vec![cand(0, 4, Method::Textual, "T")],
            vec![cand(0, 4, Method::Numeric, "YEAR")],
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].method, Method::Numeric);
    }

    #[test]
    fn first_textual_rule_keeps_its_span() {
        let out = resolve(
            vec![cand(0, 4, Method::Textual, "A"), cand(0, 4, Method::Textual, "B")],
            Vec::new(),
        );
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn tie_drops_later_span() {
        // [0,4) and [4,8) touch at the boundary
        let out = resolve(
            Vec::new(),
            vec![cand(0, 4, Method::Numeric, "YEAR"), cand(4, 8, Method::Numeric, "YEAR")],
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].span, CharSpan::new(0, 4));
    }

    #[test]
    fn separated_spans_survive() {
        let out = resolve(
            Vec::new(),
            vec![cand(5, 9, Method::Numeric, "YEAR"), cand(13, 17, Method::Numeric, "YEAR")],
        );
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].span, CharSpan::new(5, 9));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn spans() -> impl Strategy<Value = Vec<(usize, usize)>> {
            prop::collection::vec((0usize..60, 1usize..15), 0..12)
                .prop_map(|v| v.into_iter().map(|(s, l)| (s, s + l)).collect())
        }

        proptest! {
            /// Survivors never touch each other.
            #[test]
            fn survivors_are_disjoint(textual in spans(), numeric in spans()) {
                let out = resolve(
                    textual.into_iter().map(|(s, e)| cand(s, e, Method::Textual, "T")).collect(),
                    numeric.into_iter().map(|(s, e)| cand(s, e, Method::Numeric, "N")).collect(),
                );
                for (i, a) in out.iter().enumerate() {
                    for b in &out[i + 1..] {
                        prop_assert!(!a.span.touches(&b.span), "{} touches {}", a.span, b.span);
                    }
                }
            }

            /// Output is sorted by span.
            #[test]
            fn output_sorted(numeric in spans()) {
                let out = resolve(
                    Vec::new(),
                    numeric.into_iter().map(|(s, e)| cand(s, e, Method::Numeric, "N")).collect(),
                );
                prop_assert!(out.windows(2).all(|w| w[0].span < w[1].span));
            }
        }
    }
}
