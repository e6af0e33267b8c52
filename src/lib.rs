//! # tempex
//!
//! Temporal expressions for Rust: find dates in encyclopedic text, normalize
//! them to intervals, tie them to their signal words, and compare intervals.
//!
//! - **Dates**: textual ("12 March 2001", "2003–2005") and numeric
//!   ("2001-03-12", "12/03/2001") mentions, widened to day-granular intervals
//! - **Signals**: "before 2001", "from 1990 to 1995", keyword tables per kind
//! - **Ordinals**: "third", "21st"
//! - **Reasoning**: BEFORE / AFTER / OVERLAP / NONE between two intervals
//!
//! ## Quick Start
//!
//! ```rust
//! use tempex::{classify, Relation, SignalKind, TemporalAnnotator};
//!
//! let annotator = TemporalAnnotator::default();
//! let result = annotator.annotate("He left the club before 2001.", "2020-01-01").unwrap();
//!
//! let expr = &result.explicit[0];
//! assert_eq!(expr.signal, SignalKind::Before);
//! assert_eq!(expr.text, "before 2001");
//!
//! let joined = annotator.annotate("He joined in 2002.", "2020-01-01").unwrap();
//! let relation = classify(result.intervals()[0], joined.intervals()[0]);
//! assert_eq!(relation, Relation::Before);
//! ```
//!
//! ## Dates Only
//!
//! Date matching needs no linguistic provider and never fails:
//!
//! ```rust
//! let dates = tempex::annotate_dates("Reigned 29 May 2000 – 13 July 2000.");
//! assert_eq!(dates.len(), 1);
//! assert_eq!(dates[0].interval.end.to_string(), "2000-07-13");
//! ```
//!
//! ## Pipeline
//!
//! | Stage              | Module                  | Output                    |
//! |--------------------|-------------------------|---------------------------|
//! | Date matching      | [`date`], [`resolve`]   | `Vec<DateMatch>`          |
//! | Ordinals           | [`ordinal`]             | `Vec<OrdinalMatch>`       |
//! | Signal patterns    | [`signal`]              | `Vec<ExplicitExpression>` |
//! | Assembly           | [`assemble`]            | `Vec<TemporalAnnotation>` |
//! | Relation reasoning | [`reasoner`]            | `Relation`                |
//!
//! ## Feature Flags
//!
//! ```toml
//! [dependencies]
//! tempex = "0.1"                                      # everything, sequential
//! tempex = { version = "0.1", features = ["parallel"] } # rayon batch annotation
//! ```

#![warn(missing_docs)]

pub mod annotator;
pub mod assemble;
pub mod date;
mod error;
pub mod linguistic;
pub mod offset;
pub mod ordinal;
pub mod reasoner;
pub mod resolve;
pub mod signal;
pub mod types;

pub mod prelude {
    //! Commonly used items, re-exported for convenience.
    //!
    //! ```rust
    //! use tempex::prelude::*;
    //!
    //! let annotator = TemporalAnnotator::default();
    //! let result = annotator.annotate("Since 1990 it grew.", "2020-01-01").unwrap();
    //! for expr in &result.explicit {
    //!     println!("{}: {} {}", expr.signal, expr.text, expr.timespan);
    //! }
    //! ```
    pub use crate::annotator::TemporalAnnotator;
    pub use crate::error::{Error, Result};
    pub use crate::linguistic::{LinguisticProvider, RuleProvider};
    pub use crate::reasoner::classify;
    pub use crate::signal::SignalTable;
    pub use crate::types::{Annotation, DateMatch, ExplicitExpression, TemporalAnnotation};
    pub use crate::{Interval, Relation, SignalKind, Timespan};
}

// Re-exports
pub use annotator::{TemporalAnnotator, TemporalAnnotatorBuilder};
pub use date::{annotate_dates, DateMatcher};
pub use error::{Error, Result};
pub use linguistic::{LinguisticProvider, RuleProvider, UnavailableProvider};
pub use reasoner::classify;
pub use signal::{SignalMatcher, SignalTable, SignalTableBuilder};
pub use types::{
    Annotation, AnnotationKind, AnnotationValue, DateMatch, Disambiguation, ExplicitExpression,
    Method, OrdinalMatch, TemporalAnnotation,
};

// Core value types
pub use tempex_core::{
    month_from_name, month_name, CharSpan, Granularity, Interval, NormalizedTimestamp, Relation,
    SignalKind, Timespan,
};
