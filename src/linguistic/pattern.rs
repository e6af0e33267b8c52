//! Token patterns.
//!
//! A pattern is a sequence of elements, each consuming tokens:
//!
//! | Element              | Consumes                                       |
//! |----------------------|------------------------------------------------|
//! | `Lemma("before")`    | one token with that lemma                      |
//! | `LemmaIn({..})`      | one token whose lemma is in the set            |
//! | `Entity("TEMP")`     | one or more consecutive tokens with that label |
//!
//! Matching is greedy with backtracking: an entity run takes as many tokens
//! as it can while the rest of the pattern still matches. At most one match
//! is reported per start token, and a pattern that opens with an entity
//! element only starts at the beginning of a run.

use super::{AnnotatedDocument, PatternMatch};
use std::collections::BTreeSet;

/// One element of a [`TokenPattern`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternElement {
    /// Exactly one token with this lemma
    Lemma(String),
    /// Exactly one token whose lemma is in the set
    LemmaIn(BTreeSet<String>),
    /// One or more tokens carrying this entity label
    Entity(String),
}

impl PatternElement {
    /// `Lemma` from anything string-like.
    #[must_use]
    pub fn lemma(lemma: impl Into<String>) -> Self {
        Self::Lemma(lemma.into())
    }

    /// `Entity` from anything string-like.
    #[must_use]
    pub fn entity(label: impl Into<String>) -> Self {
        Self::Entity(label.into())
    }
}

/// A token pattern with an id reported on every match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPattern {
    /// Id reported in [`PatternMatch::pattern_id`]
    pub id: usize,
    /// Elements, matched left to right
    pub elements: Vec<PatternElement>,
}

impl TokenPattern {
    /// Create a pattern.
    #[must_use]
    pub fn new(id: usize, elements: Vec<PatternElement>) -> Self {
        Self { id, elements }
    }

    /// All matches in `doc`, ordered by start token.
    #[must_use]
    pub fn find_all(&self, doc: &AnnotatedDocument) -> Vec<PatternMatch> {
        if self.elements.is_empty() {
            return Vec::new();
        }
        let opening_label = match &self.elements[0] {
            PatternElement::Entity(label) => Some(label.as_str()),
            _ => None,
        };

        let mut matches = Vec::new();
        for start in 0..doc.len() {
            if let Some(label) = opening_label {
                if start > 0 && doc.has_label(start - 1, label) {
                    continue;
                }
            }
            if let Some(end) = self.match_at(doc, 0, start) {
                matches.push(PatternMatch {
                    pattern_id: self.id,
                    token_start: start,
                    token_end: end,
                });
            }
        }
        matches
    }

    /// End token of the longest match of `elements[elem..]` from `tok`.
    fn match_at(&self, doc: &AnnotatedDocument, elem: usize, tok: usize) -> Option<usize> {
        let Some(element) = self.elements.get(elem) else {
            return Some(tok);
        };
        let token = doc.tokens.get(tok);
        match element {
            PatternElement::Lemma(lemma) => {
                if token?.lemma == *lemma {
                    self.match_at(doc, elem + 1, tok + 1)
                } else {
                    None
                }
            }
            PatternElement::LemmaIn(set) => {
                if set.contains(&token?.lemma) {
                    self.match_at(doc, elem + 1, tok + 1)
                } else {
                    None
                }
            }
            PatternElement::Entity(label) => {
                let mut run_end = tok;
                while run_end < doc.len() && doc.has_label(run_end, label) {
                    run_end += 1;
                }
                // Longest run first
                ((tok + 1)..=run_end)
                    .rev()
                    .find_map(|end| self.match_at(doc, elem + 1, end))
            }
        }
    }
}
