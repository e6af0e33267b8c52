//! Signal pattern matching and per-date disambiguation.
//!
//! Each signal kind compiles to token patterns over the `TEMP` entity
//! label the date matcher's spans are tagged with:
//!
//! ```text
//!   BEFORE .. FINISH   [keyword] TEMP+
//!   DURATION           TEMP+ [keyword] TEMP+
//!                      [open] TEMP+ [separator] TEMP+     ("from ... to")
//! ```
//!
//! Every match becomes one or more candidate expressions. A date may end up
//! claimed by several candidates; [`resolve_claims`] keeps the shortest, and
//! gives unclaimed dates a synthesized `NONE` expression.

use super::table::{KeywordShape, SignalTable};
use crate::linguistic::{AnnotatedDocument, LinguisticProvider, PatternElement, PatternMatch, TokenPattern};
use crate::{CharSpan, DateMatch, ExplicitExpression, Result, SignalKind, Timespan};
use std::collections::{BTreeSet, HashSet};

/// Entity label attached to date spans before pattern matching.
pub const TEMP_LABEL: &str = "TEMP";

/// Signal patterns compiled from a [`SignalTable`].
#[derive(Debug, Clone)]
pub struct SignalMatcher {
    table: SignalTable,
    patterns: Vec<(SignalKind, TokenPattern)>,
}

impl SignalMatcher {
    /// Compile the patterns for every kind in `table`.
    #[must_use]
    pub fn new(table: SignalTable) -> Self {
        let mut patterns = Vec::new();
        for kind in table.kinds() {
            for elements in kind_patterns(&table, kind) {
                let id = patterns.len();
                patterns.push((kind, TokenPattern::new(id, elements)));
            }
        }
        log::debug!(
            "[signal] compiled {} patterns from {} keywords",
            patterns.len(),
            table.len()
        );
        Self { table, patterns }
    }

    /// The table the patterns were built from.
    #[must_use]
    pub fn table(&self) -> &SignalTable {
        &self.table
    }

    /// Number of compiled patterns.
    #[must_use]
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// Candidate expressions for every pattern match in `doc`.
    ///
    /// `doc` must be the tokenization of `text` with the spans of `dates`
    /// tagged [`TEMP_LABEL`].
    pub fn candidates(
        &self,
        provider: &dyn LinguisticProvider,
        text: &str,
        doc: &AnnotatedDocument,
        dates: &[DateMatch],
    ) -> Result<Vec<ExplicitExpression>> {
        let mut out = Vec::new();
        for (kind, pattern) in &self.patterns {
            for hit in provider.match_pattern(doc, pattern)? {
                expressions_for(*kind, hit, text, doc, dates, &mut out);
            }
        }
        Ok(out)
    }
}

/// Token patterns for one kind.
fn kind_patterns(table: &SignalTable, kind: SignalKind) -> Vec<Vec<PatternElement>> {
    let temp = || PatternElement::entity(TEMP_LABEL);
    let lemmas = |words: &[String]| words.iter().map(PatternElement::lemma).collect::<Vec<_>>();

    let mut singles = BTreeSet::new();
    let mut out = Vec::new();
    for keyword in table.keywords(kind) {
        match KeywordShape::of(keyword) {
            KeywordShape::Word(word) => {
                singles.insert(word);
            }
            KeywordShape::Phrase(words) => {
                let mut elements = Vec::new();
                if kind == SignalKind::Duration {
                    elements.push(temp());
                }
                elements.extend(lemmas(&words));
                elements.push(temp());
                out.push(elements);
            }
            KeywordShape::Bracket { open, separator } => {
                let mut elements = lemmas(&open);
                elements.push(temp());
                elements.extend(lemmas(&separator));
                elements.push(temp());
                out.push(elements);
            }
        }
    }
    if !singles.is_empty() {
        let keyword = PatternElement::LemmaIn(singles);
        let elements = if kind == SignalKind::Duration {
            vec![temp(), keyword, temp()]
        } else {
            vec![keyword, temp()]
        };
        out.insert(0, elements);
    }
    out
}

/// Turn one pattern hit into candidate expressions.
fn expressions_for(
    kind: SignalKind,
    hit: PatternMatch,
    text: &str,
    doc: &AnnotatedDocument,
    dates: &[DateMatch],
    out: &mut Vec<ExplicitExpression>,
) {
    let Some(span) = doc.char_span(hit.token_start, hit.token_end) else {
        return;
    };
    let nested: Vec<(usize, &DateMatch)> = dates
        .iter()
        .enumerate()
        .filter(|(_, d)| span.contains(&d.span))
        .collect();
    let signal_span = signal_tokens(kind, hit, doc).and_then(|(s, e)| doc.char_span(s, e));
    let signal_text = signal_span.map(|s| s.extract(text)).unwrap_or_default();
    let expression_text = span.extract(text);

    if kind == SignalKind::Duration {
        if nested.len() < 2 {
            log::trace!("[signal] DURATION {:?} spans fewer than two dates", expression_text);
            return;
        }
        let mut points: Vec<_> = nested
            .iter()
            .flat_map(|(_, d)| [d.interval.start, d.interval.end])
            .collect();
        points.sort_by_key(|ts| ts.comparable());
        let (Some(&start), Some(&end)) = (points.first(), points.last()) else {
            return;
        };
        out.push(ExplicitExpression {
            text: expression_text,
            span,
            signal: kind,
            signal_span,
            signal_text,
            timespan: Timespan { start, end },
            nested_spans: nested.iter().map(|(_, d)| d.span).collect(),
            nested_date_ids: nested.iter().map(|(id, _)| *id).collect(),
            length: span.len(),
        });
        return;
    }

    for (id, date) in nested {
        out.push(ExplicitExpression {
            text: expression_text.clone(),
            span,
            signal: kind,
            signal_span,
            signal_text: signal_text.clone(),
            timespan: date.interval,
            nested_spans: vec![date.span],
            nested_date_ids: vec![id],
            length: span.len(),
        });
    }
}

/// Token range of the cue words inside a hit.
///
/// For DURATION that is the first untagged run after the first date run
/// (the separator); otherwise the untagged tokens before the first date.
fn signal_tokens(kind: SignalKind, hit: PatternMatch, doc: &AnnotatedDocument) -> Option<(usize, usize)> {
    let is_temp = |i: usize| doc.has_label(i, TEMP_LABEL);
    let first_temp = (hit.token_start..hit.token_end).find(|&i| is_temp(i))?;
    if kind != SignalKind::Duration {
        return (first_temp > hit.token_start).then_some((hit.token_start, first_temp));
    }
    let sep_start = (first_temp..hit.token_end).find(|&i| !is_temp(i))?;
    let sep_end = (sep_start..hit.token_end).find(|&i| is_temp(i)).unwrap_or(hit.token_end);
    Some((sep_start, sep_end))
}

/// Pick at most one expression per date.
///
/// Dates are visited in order. A date claimed by one candidate keeps it; a
/// date claimed by several keeps the shortest (earliest on ties); an
/// unclaimed date gets a `NONE` expression over its own span. A candidate
/// shared by several dates is reported once.
#[must_use]
pub fn resolve_claims(dates: &[DateMatch], candidates: &[ExplicitExpression]) -> Vec<ExplicitExpression> {
    let mut out = Vec::new();
    let mut emitted = HashSet::new();
    for (id, date) in dates.iter().enumerate() {
        let winner = candidates
            .iter()
            .enumerate()
            .filter(|(_, c)| c.nested_date_ids.contains(&id))
            .min_by_key(|(_, c)| c.length);
        match winner {
            Some((idx, candidate)) => {
                if emitted.insert(idx) {
                    out.push(candidate.clone());
                }
            }
            None => out.push(unsignalled(id, date)),
        }
    }
    out
}

/// `NONE` expression for a date no signal claimed.
fn unsignalled(id: usize, date: &DateMatch) -> ExplicitExpression {
    ExplicitExpression {
        text: date.text.clone(),
        span: date.span,
        signal: SignalKind::None,
        signal_span: None,
        signal_text: String::new(),
        timespan: date.interval,
        nested_spans: vec![date.span],
        nested_date_ids: vec![id],
        length: date.span.len(),
    }
}

/// Spans of every date an expression list covers, for diagnostics.
#[must_use]
pub fn covered_spans(expressions: &[ExplicitExpression]) -> BTreeSet<CharSpan> {
    expressions
        .iter()
        .flat_map(|e| e.nested_spans.iter().copied())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::annotate_dates;
    use crate::linguistic::RuleProvider;

    fn run(table: SignalTable, text: &str) -> (Vec<DateMatch>, Vec<ExplicitExpression>) {
        let provider = RuleProvider::new();
        let dates = annotate_dates(text);
        let spans: Vec<_> = dates.iter().map(|d| d.span).collect();
        let doc = provider.tag_entities(text, &spans, TEMP_LABEL).unwrap();
        let matcher = SignalMatcher::new(table);
        let cands = matcher.candidates(&provider, text, &doc, &dates).unwrap();
        let resolved = resolve_claims(&dates, &cands);
        (dates, resolved)
    }

    fn table(lines: &str) -> SignalTable {
        SignalTable::parse(lines).unwrap()
    }

    #[test]
    fn before_keyword() {
        let (_, exprs) = run(table("before || BEFORE"), "He left before 2001.");
        assert_eq!(exprs.len(), 1);
        assert_eq!(exprs[0].signal, SignalKind::Before);
        assert_eq!(exprs[0].text, "before 2001");
        assert_eq!(exprs[0].signal_text, "before");
        assert_eq!(exprs[0].signal_span, Some(CharSpan::new(8, 14)));
        assert_eq!(exprs[0].timespan.start.to_string(), "2001-01-01");
    }

    #[test]
    fn multi_word_keyword() {
        let (_, exprs) = run(table("prior to || BEFORE"), "prior to 12 March 2001");
        assert_eq!(exprs.len(), 1);
        assert_eq!(exprs[0].signal_text, "prior to");
        assert_eq!(exprs[0].nested_date_ids, vec![0]);
    }

    #[test]
    fn bracketing_duration() {
        let (dates, exprs) = run(table("from ... to || DURATION"), "from 1990 to 1995");
        assert_eq!(dates.len(), 2);
        assert_eq!(exprs.len(), 1);
        assert_eq!(exprs[0].signal, SignalKind::Duration);
        assert_eq!(exprs[0].text, "from 1990 to 1995");
        assert_eq!(exprs[0].signal_text, "to");
        assert_eq!(exprs[0].nested_date_ids, vec![0, 1]);
        assert_eq!(exprs[0].timespan.start.to_string(), "1990-01-01");
        assert_eq!(exprs[0].timespan.end.to_string(), "1995-12-31");
    }

    #[test]
    fn duration_takes_min_and_max() {
        let (_, exprs) = run(table("to || DURATION"), "1995 to 1990");
        assert_eq!(exprs[0].timespan.start.to_string(), "1990-01-01");
        assert_eq!(exprs[0].timespan.end.to_string(), "1995-12-31");
    }

    #[test]
    fn shortest_claim_wins() {
        // 1990 is claimed by "in 1990" and by "1990 to 1995"
        let t = table("to || DURATION\nin || OVERLAP");
        let (_, exprs) = run(t, "in 1990 to 1995");
        let kinds: Vec<_> = exprs.iter().map(|e| e.signal).collect();
        assert_eq!(kinds, vec![SignalKind::Overlap, SignalKind::Duration]);
        assert_eq!(exprs[0].text, "in 1990");
    }

    #[test]
    fn unclaimed_date_gets_none() {
        let (_, exprs) = run(table("before || BEFORE"), "It opened in 2001.");
        assert_eq!(exprs.len(), 1);
        assert_eq!(exprs[0].signal, SignalKind::None);
        assert_eq!(exprs[0].signal_span, None);
        assert_eq!(exprs[0].text, "2001");
    }

    #[test]
    fn one_keyword_per_date_in_a_run() {
        let (dates, exprs) = run(SignalTable::english().clone(), "after 1990 and before 1995");
        assert_eq!(dates.len(), 2);
        assert_eq!(exprs.len(), 2);
        assert_eq!(exprs[0].signal, SignalKind::After);
        assert_eq!(exprs[1].signal, SignalKind::Before);
        assert_eq!(covered_spans(&exprs).len(), 2);
    }

    #[test]
    fn english_table_scenario() {
        let (_, exprs) = run(SignalTable::english().clone(), "from 1990 to 1995");
        assert_eq!(exprs.len(), 1);
        assert_eq!(exprs[0].signal, SignalKind::Duration);
        assert_eq!(exprs[0].nested_date_ids, vec![0, 1]);
    }

    #[test]
    fn patterns_per_kind() {
        let m = SignalMatcher::new(table("to || DURATION\nthrough || DURATION\nfrom ... to || DURATION"));
        // one LemmaIn pattern for the single words, one bracket pattern
        assert_eq!(m.pattern_count(), 2);
    }
}
