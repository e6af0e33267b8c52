//! Temporal signal categories.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category of a lexical cue that ties a date to an event.
///
/// The set is closed: keyword tables may only map phrases onto the
/// keyword-bearing kinds (see [`SignalKind::is_keyword_kind`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalKind {
    /// "before", "prior to"
    Before,
    /// "after", "following"
    After,
    /// "during", "in"
    Overlap,
    /// "since", "starting"
    Start,
    /// "until", "till"
    Finish,
    /// "A to B", "from A to B": a range with dates on both sides
    Duration,
    /// Ordinal mentions ("third", "2nd")
    Ordinal,
    /// A date with no cue around it
    None,
}

impl SignalKind {
    /// Kinds that carry keywords, in matching order.
    pub const KEYWORD_KINDS: [SignalKind; 6] = [
        SignalKind::Before,
        SignalKind::After,
        SignalKind::Overlap,
        SignalKind::Start,
        SignalKind::Finish,
        SignalKind::Duration,
    ];

    /// Upper-case label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            SignalKind::Before => "BEFORE",
            SignalKind::After => "AFTER",
            SignalKind::Overlap => "OVERLAP",
            SignalKind::Start => "START",
            SignalKind::Finish => "FINISH",
            SignalKind::Duration => "DURATION",
            SignalKind::Ordinal => "ORDINAL",
            SignalKind::None => "NONE",
        }
    }

    /// Whether a keyword table may map phrases onto this kind.
    #[must_use]
    pub const fn is_keyword_kind(&self) -> bool {
        !matches!(self, SignalKind::Ordinal | SignalKind::None)
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignalKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "BEFORE" => Ok(SignalKind::Before),
            "AFTER" => Ok(SignalKind::After),
            "OVERLAP" | "DURING" => Ok(SignalKind::Overlap),
            "START" | "BEGIN" => Ok(SignalKind::Start),
            "FINISH" | "END" => Ok(SignalKind::Finish),
            "DURATION" => Ok(SignalKind::Duration),
            "ORDINAL" => Ok(SignalKind::Ordinal),
            "NONE" | "NO SIGNAL" => Ok(SignalKind::None),
            other => Err(Error::parse(format!("unknown signal kind {:?}", other))),
        }
    }
}
