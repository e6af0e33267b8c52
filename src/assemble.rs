//! Unified annotation records.
//!
//! Two passes. The first numbers dates, then ordinals, and records each
//! span's id. The second appends the explicit expressions, resolving their
//! nested spans through that map, so every `nest` entry points backward:
//!
//! ```text
//!   id 0  date      "1990"               nest []
//!   id 1  date      "1995"               nest []
//!   id 2  ordinal   "third"              nest []
//!   id 3  explicit  "from 1990 to 1995"  nest [0, 1]
//! ```

use crate::{
    AnnotationKind, AnnotationValue, CharSpan, DateMatch, ExplicitExpression, Method,
    OrdinalMatch, SignalKind, TemporalAnnotation,
};
use std::collections::HashMap;

/// Build the id-ordered annotation list.
#[must_use]
pub fn assemble(
    dates: &[DateMatch],
    ordinals: &[OrdinalMatch],
    explicit: &[ExplicitExpression],
) -> Vec<TemporalAnnotation> {
    let mut out = Vec::with_capacity(dates.len() + ordinals.len() + explicit.len());
    let mut ids: HashMap<CharSpan, usize> = HashMap::new();

    for date in dates {
        let id = out.len();
        ids.entry(date.span).or_insert(id);
        out.push(TemporalAnnotation {
            id,
            kind: AnnotationKind::Date,
            mention: date.text.clone(),
            value: AnnotationValue::Date {
                timespan: date.interval,
                disambiguation: date.disambiguation.clone(),
            },
            span: date.span,
            method: date.method,
            signal: None,
            nest: Vec::new(),
        });
    }

    for ordinal in ordinals {
        let id = out.len();
        ids.entry(ordinal.span).or_insert(id);
        out.push(TemporalAnnotation {
            id,
            kind: AnnotationKind::Ordinal,
            mention: ordinal.text.clone(),
            value: AnnotationValue::Ordinal {
                value: ordinal.value,
            },
            span: ordinal.span,
            method: Method::Lexical,
            signal: Some(SignalKind::Ordinal),
            nest: Vec::new(),
        });
    }

    for expression in explicit {
        let nest = expression
            .nested_spans
            .iter()
            .filter_map(|span| {
                let id = ids.get(span).copied();
                if id.is_none() {
                    log::warn!("[assemble] nested span {} has no annotation", span);
                }
                id
            })
            .collect();
        out.push(TemporalAnnotation {
            id: out.len(),
            kind: AnnotationKind::Explicit,
            mention: expression.text.clone(),
            value: AnnotationValue::Explicit {
                timespan: expression.timespan,
            },
            span: expression.span,
            method: Method::Pattern,
            signal: Some(expression.signal),
            nest,
        });
    }

    out
}
