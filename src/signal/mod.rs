//! Temporal signals: keyword tables and the pattern matcher built on them.

mod matcher;
mod table;

pub use matcher::{covered_spans, resolve_claims, SignalMatcher, TEMP_LABEL};
pub use table::{KeywordShape, SignalTable, SignalTableBuilder};
