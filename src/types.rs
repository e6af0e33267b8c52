//! Annotation records produced per input string.
//!
//! All of these are created fresh for one string and never mutated after
//! creation; later stages only filter or reference them.

use crate::{CharSpan, NormalizedTimestamp, Result, SignalKind, Timespan};
use serde::{Deserialize, Serialize};

/// How an annotation was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// Textual date grammar ("12 March 2001", "2003–2005")
    Textual,
    /// Numeric token grammar ("2001", "2001-03-12", "12/03/2001")
    Numeric,
    /// Lexical ordinal recognizer
    Lexical,
    /// Signal pattern over the token stream
    Pattern,
}

/// One normalized reading of a date mention.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Disambiguation {
    /// Canonical string at the mention's own granularity (`2001`, `2001-03`)
    pub label: String,
    /// Day-padded point
    pub timestamp: NormalizedTimestamp,
}

impl Disambiguation {
    /// Reading for a single timestamp.
    #[must_use]
    pub fn of(ts: NormalizedTimestamp) -> Self {
        Self {
            label: ts.to_string(),
            timestamp: ts.start_of(),
        }
    }

    /// Reading for the closing side of a range; the point is padded to the
    /// last day `ts` covers.
    #[must_use]
    pub fn closing(ts: NormalizedTimestamp) -> Self {
        Self {
            label: ts.to_string(),
            timestamp: ts.end_of(),
        }
    }
}

/// A literal date or timespan mention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateMatch {
    /// Surface text
    pub text: String,
    /// Character span in the source string
    pub span: CharSpan,
    /// Normalized interval; `start == end` for point mentions
    pub interval: Timespan,
    /// Which grammar produced it
    pub method: Method,
    /// Readings, in mention order
    pub disambiguation: Vec<Disambiguation>,
}

/// An ordinal number mention ("third", "21st").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrdinalMatch {
    /// Surface text
    pub text: String,
    /// Character span in the source string
    pub span: CharSpan,
    /// Numeric value
    pub value: i64,
}

/// A signal phrase tied to the date(s) it governs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplicitExpression {
    /// Surface text of the whole expression
    pub text: String,
    /// Character span of the whole expression
    pub span: CharSpan,
    /// Signal category
    pub signal: SignalKind,
    /// Span of the cue words; `None` for synthesized expressions
    pub signal_span: Option<CharSpan>,
    /// Cue words as they appear in the text
    pub signal_text: String,
    /// Interval the expression denotes
    pub timespan: Timespan,
    /// Spans of the nested date mentions
    pub nested_spans: Vec<CharSpan>,
    /// Ids of the nested date mentions (positions in the date list)
    pub nested_date_ids: Vec<usize>,
    /// `span.end - span.start`
    pub length: usize,
}

/// Kind of a unified annotation record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationKind {
    /// A [`DateMatch`]
    Date,
    /// An [`OrdinalMatch`]
    Ordinal,
    /// An [`ExplicitExpression`]
    Explicit,
}

/// Normalized value carried by an annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AnnotationValue {
    /// Date interval plus its readings
    Date {
        /// Normalized interval
        timespan: Timespan,
        /// Readings
        disambiguation: Vec<Disambiguation>,
    },
    /// Ordinal number
    Ordinal {
        /// Numeric value
        value: i64,
    },
    /// Interval denoted by an explicit expression
    Explicit {
        /// Normalized interval
        timespan: Timespan,
    },
}

/// Unified, cross-referenced annotation record.
///
/// Ids are sequential: dates first, then ordinals, then explicit
/// expressions, so every `nest` entry points backward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemporalAnnotation {
    /// Sequential id
    pub id: usize,
    /// Record kind
    pub kind: AnnotationKind,
    /// Surface text
    pub mention: String,
    /// Normalized value
    pub value: AnnotationValue,
    /// Character span in the source string
    pub span: CharSpan,
    /// How it was found
    pub method: Method,
    /// Signal; `None` for dates
    pub signal: Option<SignalKind>,
    /// Ids of the annotations this one subsumes
    pub nest: Vec<usize>,
}

/// Everything [`crate::TemporalAnnotator::annotate`] produces for one string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// Reference date the string was annotated against
    pub reference_date: chrono::NaiveDate,
    /// Unified, id-ordered records
    pub annotations: Vec<TemporalAnnotation>,
    /// Resolved explicit expressions, one per surviving date at most
    pub explicit: Vec<ExplicitExpression>,
    /// Surviving date mentions
    pub dates: Vec<DateMatch>,
    /// Surviving ordinal mentions
    pub ordinals: Vec<OrdinalMatch>,
}

impl Annotation {
    /// Render as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Intervals of every explicit expression, in order.
    ///
    /// This is what the relation reasoner consumes when two separately
    /// annotated facts get compared.
    #[must_use]
    pub fn intervals(&self) -> Vec<crate::Interval> {
        self.explicit
            .iter()
            .map(|e| e.timespan.as_interval())
            .collect()
    }
}
