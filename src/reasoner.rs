//! Interval relation reasoner.
//!
//! Classifies how a main fact's interval sits relative to a constraint
//! fact's interval. Checks run in a fixed order and the first hit wins:
//!
//! ```text
//!   AFTER     constraint ─────┤  ├───── main          gap < 3
//!   BEFORE    main ─────┤  ├───── constraint          gap < 3
//!   OVERLAP   containment or partial intersection
//!   NONE      everything else
//! ```
//!
//! BEFORE and AFTER only claim near neighbours: facts more than a couple of
//! units apart are left as NONE. OVERLAP has no distance cap.
//!
//! When both intervals are year-granular (`YYYY0101..YYYY1231`) they are
//! compared on the year scale, so a single year acts as a point and the gap
//! counts years. Anything finer is compared in raw `YYYYMMDD` units.

use crate::{Interval, Relation};

/// Maximum gap (exclusive) for BEFORE and AFTER.
pub const ADJACENCY_TOLERANCE: i64 = 3;

/// Relation of `main` to `constraint`.
#[must_use]
pub fn classify(main: Interval, constraint: Interval) -> Relation {
    if main == constraint {
        return Relation::Overlap;
    }
    let (main, constraint) = to_common_scale(main, constraint);
    if is_after(main, constraint) {
        Relation::After
    } else if is_before(main, constraint) {
        Relation::Before
    } else if overlaps(main, constraint) {
        Relation::Overlap
    } else {
        Relation::None
    }
}

fn to_common_scale(main: Interval, constraint: Interval) -> (Interval, Interval) {
    if main.is_year_granular() && constraint.is_year_granular() {
        let years = |i: Interval| Interval::new(i.start / 10_000, i.end / 10_000);
        (years(main), years(constraint))
    } else {
        (main, constraint)
    }
}

fn is_after(main: Interval, constraint: Interval) -> bool {
    let gap = main.start - constraint.end;
    let separated = if main.is_point() {
        gap > 0
    } else {
        main.start < main.end && gap >= 0
    };
    separated && gap < ADJACENCY_TOLERANCE
}

fn is_before(main: Interval, constraint: Interval) -> bool {
    let gap = constraint.start - main.end;
    let separated = if main.is_point() {
        gap > 0
    } else {
        main.start < main.end && gap >= 0
    };
    separated && gap < ADJACENCY_TOLERANCE
}

fn overlaps(main: Interval, constraint: Interval) -> bool {
    let contains = |outer: Interval, inner: Interval| outer.start <= inner.start && inner.end <= outer.end;
    let leads = |a: Interval, b: Interval| a.start <= b.start && b.start < a.end && a.end <= b.end;
    contains(main, constraint)
        || contains(constraint, main)
        || leads(main, constraint)
        || leads(constraint, main)
}
