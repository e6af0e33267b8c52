//! # tempex-core
//!
//! Core value types for the tempex toolbox: shared data structures used by the
//! matcher, the resolver and the interval reasoner.
//!
//! This crate provides:
//! - **Spans**: `CharSpan`, half-open character offsets into one source string
//! - **Timestamps**: `NormalizedTimestamp`, `Granularity`, `Timespan`
//! - **Reasoning types**: `Interval`, `Relation`
//! - **Signals**: `SignalKind`, the closed set of temporal cue categories
//!
//! Everything here is an immutable value object. Nothing holds shared state.

pub mod error;
pub mod interval;
pub mod signal;
pub mod span;
pub mod timestamp;

// Re-exports for convenience
pub use error::{Error, Result};
pub use interval::{Interval, Relation, Timespan};
pub use signal::SignalKind;
pub use span::CharSpan;
pub use timestamp::{month_from_name, month_name, Granularity, NormalizedTimestamp};
