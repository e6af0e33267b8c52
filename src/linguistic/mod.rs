//! Linguistic provider boundary.
//!
//! Everything that needs tokens goes through [`LinguisticProvider`]:
//! tokenization with lemmas, entity tagging at given character spans,
//! token-pattern matching and ordinal recognition. Only `tokenize` is
//! required; the rest have defaults built on it.
//!
//! # Implementations
//!
//! | Provider                | Notes                                         |
//! |-------------------------|-----------------------------------------------|
//! | [`RuleProvider`]        | Regex tokenizer, lower-case lemmas, lexicon    |
//! | [`UnavailableProvider`] | Always fails; date-only pipelines still work   |
//!
//! Providers are shared across threads (`Send + Sync`).

mod lexicon;
mod pattern;
mod rule;

pub use lexicon::{ordinal_value, recognize_ordinals};
pub use pattern::{PatternElement, TokenPattern};
pub use rule::{RuleProvider, UnavailableProvider};

use crate::{CharSpan, OrdinalMatch, Result};

/// A token with its lemma and character span.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    /// Surface text
    pub text: String,
    /// Lemma (lower case)
    pub lemma: String,
    /// Character span in the source string
    pub span: CharSpan,
}

impl Token {
    /// Create a token.
    #[must_use]
    pub fn new(text: impl Into<String>, lemma: impl Into<String>, span: CharSpan) -> Self {
        Self {
            text: text.into(),
            lemma: lemma.into(),
            span,
        }
    }
}

/// A tagged entity: a label over a contiguous token range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedEntity {
    /// Character span
    pub span: CharSpan,
    /// Label
    pub label: String,
    /// First token index
    pub token_start: usize,
    /// One past the last token index
    pub token_end: usize,
}

/// A tokenized string with entity labels attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedDocument {
    /// Tokens, in text order
    pub tokens: Vec<Token>,
    /// Per-token entity label
    pub labels: Vec<Option<String>>,
    /// Entities that aligned with token boundaries
    pub entities: Vec<TaggedEntity>,
}

impl AnnotatedDocument {
    /// A document with no entities.
    #[must_use]
    pub fn untagged(tokens: Vec<Token>) -> Self {
        let labels = vec![None; tokens.len()];
        Self {
            tokens,
            labels,
            entities: Vec::new(),
        }
    }

    /// Tag every span that starts and ends on token boundaries.
    ///
    /// Spans that cut through a token, or that cover a token already
    /// tagged, are skipped.
    #[must_use]
    pub fn tagged(tokens: Vec<Token>, spans: &[CharSpan], label: &str) -> Self {
        let mut doc = Self::untagged(tokens);
        for &span in spans {
            let Some(first) = doc.tokens.iter().position(|t| t.span.start == span.start) else {
                log::trace!("[linguistic] {} does not start on a token", span);
                continue;
            };
            let Some(last) = doc.tokens[first..]
                .iter()
                .position(|t| t.span.end == span.end)
                .map(|i| first + i)
            else {
                log::trace!("[linguistic] {} does not end on a token", span);
                continue;
            };
            if doc.labels[first..=last].iter().any(Option::is_some) {
                continue;
            }
            for slot in &mut doc.labels[first..=last] {
                *slot = Some(label.to_string());
            }
            doc.entities.push(TaggedEntity {
                span,
                label: label.to_string(),
                token_start: first,
                token_end: last + 1,
            });
        }
        doc
    }

    /// Number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True when there are no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Whether token `idx` carries `label`.
    #[must_use]
    pub fn has_label(&self, idx: usize, label: &str) -> bool {
        self.labels.get(idx).and_then(Option::as_deref) == Some(label)
    }

    /// Character span covered by tokens `start..end`.
    #[must_use]
    pub fn char_span(&self, start: usize, end: usize) -> Option<CharSpan> {
        if start >= end {
            return None;
        }
        let first = self.tokens.get(start)?;
        let last = self.tokens.get(end - 1)?;
        Some(CharSpan::new(first.span.start, last.span.end))
    }
}

/// A pattern hit over token indices `[token_start, token_end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PatternMatch {
    /// Id of the pattern that matched
    pub pattern_id: usize,
    /// First token index
    pub token_start: usize,
    /// One past the last token index
    pub token_end: usize,
}

/// Tokenization, entity tagging, pattern matching and ordinal recognition.
///
/// Any failure surfaces as [`crate::Error::Linguistic`].
pub trait LinguisticProvider: Send + Sync {
    /// Provider name, for logs.
    fn name(&self) -> &'static str;

    /// Split `text` into tokens with lemmas and character spans.
    fn tokenize(&self, text: &str) -> Result<Vec<Token>>;

    /// Tokenize `text` and tag each of `spans` with `label`.
    fn tag_entities(&self, text: &str, spans: &[CharSpan], label: &str) -> Result<AnnotatedDocument> {
        let tokens = self.tokenize(text)?;
        Ok(AnnotatedDocument::tagged(tokens, spans, label))
    }

    /// All matches of `pattern` in `document`, ordered by token start.
    fn match_pattern(&self, document: &AnnotatedDocument, pattern: &TokenPattern) -> Result<Vec<PatternMatch>> {
        Ok(pattern.find_all(document))
    }

    /// Ordinal mentions among `tokens`.
    fn find_ordinals(&self, _text: &str, tokens: &[Token]) -> Result<Vec<OrdinalMatch>> {
        Ok(recognize_ordinals(tokens))
    }
}
