//! The annotation pipeline.
//!
//! ```text
//!   text ── DateMatcher ── dates ──┬── tag TEMP spans ── SignalMatcher ── resolve_claims ──┐
//!                                  │                                                      │
//!                                  └── ordinals (provider, minus those inside dates) ─────┤
//!                                                                                         │
//!                                                         assemble ◄──────────────────────┘
//! ```
//!
//! Date matching never touches the linguistic provider, so
//! [`TemporalAnnotator::annotate_dates`] keeps working when the provider is
//! down. Everything else propagates the provider's error.

use crate::date::DateMatcher;
use crate::linguistic::{LinguisticProvider, RuleProvider};
use crate::ordinal::find_ordinals;
use crate::signal::{resolve_claims, SignalMatcher, SignalTable, TEMP_LABEL};
use crate::{assemble::assemble, Annotation, DateMatch, Error, Result};
use chrono::NaiveDate;
use std::sync::Arc;

/// Turns raw strings into normalized, cross-referenced temporal annotations.
///
/// Holds only read-only configuration, so one instance can be shared
/// across threads.
///
/// # Example
///
/// ```rust
/// use tempex::{SignalKind, TemporalAnnotator};
///
/// let annotator = TemporalAnnotator::default();
/// let result = annotator.annotate("He served from 1990 to 1995.", "2020-01-01").unwrap();
/// assert_eq!(result.dates.len(), 2);
/// assert_eq!(result.explicit[0].signal, SignalKind::Duration);
/// ```
#[derive(Clone)]
pub struct TemporalAnnotator {
    provider: Arc<dyn LinguisticProvider>,
    dates: DateMatcher,
    signals: SignalMatcher,
}

impl std::fmt::Debug for TemporalAnnotator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemporalAnnotator")
            .field("provider", &self.provider.name())
            .field("patterns", &self.signals.pattern_count())
            .finish()
    }
}

impl Default for TemporalAnnotator {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl TemporalAnnotator {
    /// Configure a new annotator.
    #[must_use]
    pub fn builder() -> TemporalAnnotatorBuilder {
        TemporalAnnotatorBuilder::default()
    }

    /// Annotator with `table` and the rule-based provider.
    #[must_use]
    pub fn new(table: SignalTable) -> Self {
        Self::builder().signal_table(table).build()
    }

    /// The signal table in use.
    #[must_use]
    pub fn signal_table(&self) -> &SignalTable {
        self.signals.table()
    }

    /// Name of the linguistic provider in use.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Date mentions only. Never fails.
    #[must_use]
    pub fn annotate_dates(&self, text: &str) -> Vec<DateMatch> {
        self.dates.find(text)
    }

    /// Full annotation of `text`.
    ///
    /// `reference_date` is an ISO date (`YYYY-MM-DD`) recorded with the
    /// result.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] for a malformed reference date and
    /// [`Error::Linguistic`] when the provider fails.
    pub fn annotate(&self, text: &str, reference_date: &str) -> Result<Annotation> {
        let reference_date = parse_reference_date(reference_date)?;

        let dates = self.dates.find(text);
        let spans: Vec<_> = dates.iter().map(|d| d.span).collect();
        let doc = self.provider.tag_entities(text, &spans, TEMP_LABEL)?;
        if doc.entities.len() < dates.len() {
            log::debug!(
                "[annotate] {} of {} dates did not align with tokens",
                dates.len() - doc.entities.len(),
                dates.len()
            );
        }

        let ordinals = find_ordinals(self.provider.as_ref(), text, &doc.tokens, &dates)?;
        let candidates = self
            .signals
            .candidates(self.provider.as_ref(), text, &doc, &dates)?;
        let explicit = resolve_claims(&dates, &candidates);
        let annotations = assemble(&dates, &ordinals, &explicit);

        log::debug!(
            "[annotate] {} dates, {} ordinals, {} candidates -> {} expressions",
            dates.len(),
            ordinals.len(),
            candidates.len(),
            explicit.len()
        );

        Ok(Annotation {
            reference_date,
            annotations,
            explicit,
            dates,
            ordinals,
        })
    }

    /// [`annotate`](Self::annotate) over many `(text, reference_date)` pairs.
    ///
    /// Results come back in input order. With the `parallel` feature the
    /// inputs are spread over the rayon thread pool.
    #[must_use]
    pub fn annotate_batch(&self, inputs: &[(&str, &str)]) -> Vec<Result<Annotation>> {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            inputs
                .par_iter()
                .map(|(text, reference)| self.annotate(text, reference))
                .collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            inputs
                .iter()
                .map(|(text, reference)| self.annotate(text, reference))
                .collect()
        }
    }
}

/// Builder for [`TemporalAnnotator`].
#[derive(Default)]
pub struct TemporalAnnotatorBuilder {
    provider: Option<Arc<dyn LinguisticProvider>>,
    table: Option<SignalTable>,
}

impl TemporalAnnotatorBuilder {
    /// Use `provider` for tokenization, tagging and ordinals.
    #[must_use]
    pub fn provider<P: LinguisticProvider + 'static>(mut self, provider: P) -> Self {
        self.provider = Some(Arc::new(provider));
        self
    }

    /// Use an already shared provider.
    #[must_use]
    pub fn shared_provider(mut self, provider: Arc<dyn LinguisticProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Use `table` instead of the built-in English keywords.
    #[must_use]
    pub fn signal_table(mut self, table: SignalTable) -> Self {
        self.table = Some(table);
        self
    }

    /// Build the annotator.
    #[must_use]
    pub fn build(self) -> TemporalAnnotator {
        let table = self
            .table
            .unwrap_or_else(|| SignalTable::english().clone());
        let provider = self
            .provider
            .unwrap_or_else(|| Arc::new(RuleProvider::new()));
        TemporalAnnotator {
            provider,
            dates: DateMatcher::new(),
            signals: SignalMatcher::new(table),
        }
    }
}

fn parse_reference_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|e| Error::invalid_input(format!("reference date {:?}: {}", raw, e)))
}
