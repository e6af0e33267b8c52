//! Rule-based provider and a failing stand-in.

use super::{LinguisticProvider, Token};
use crate::offset::SpanConverter;
use crate::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;

// Numbers keep their internal delimiters and trailing letters, so
// "2001-03-12", "12/03/2001", "21st" and "1990s" stay whole. The en-dash is
// never absorbed.
static TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d+(?:[-/.:]\d+)*\p{L}*|[\p{L}\p{M}]+(?:['’-][\p{L}\p{M}]+)*|\S")
        .expect("TOKEN regex is invalid")
});

const IRREGULAR_LEMMAS: &[(&str, &str)] = &[
    ("began", "begin"),
    ("begun", "begin"),
    ("started", "start"),
    ("starts", "start"),
    ("ended", "end"),
    ("ends", "end"),
    ("finished", "finish"),
    ("lasted", "last"),
    ("was", "be"),
    ("were", "be"),
    ("is", "be"),
    ("are", "be"),
];

/// Lemma of a surface word: lower case, with a few irregular forms mapped.
#[must_use]
pub fn lemma_of(word: &str) -> String {
    let lower = word.to_lowercase();
    IRREGULAR_LEMMAS
        .iter()
        .find(|(form, _)| *form == lower)
        .map_or(lower, |(_, lemma)| (*lemma).to_string())
}

/// Dependency-free provider: regex tokenizer plus lower-case lemmas.
///
/// Good enough for signal keywords, which are function words and short
/// phrases; the entity spans it tags come from the date matcher anyway.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleProvider;

impl RuleProvider {
    /// Create a provider.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl LinguisticProvider for RuleProvider {
    fn name(&self) -> &'static str {
        "rule"
    }

    fn tokenize(&self, text: &str) -> Result<Vec<Token>> {
        let converter = SpanConverter::new(text);
        Ok(TOKEN
            .find_iter(text)
            .map(|m| {
                Token::new(
                    m.as_str(),
                    lemma_of(m.as_str()),
                    converter.char_span(m.start(), m.end()),
                )
            })
            .collect())
    }
}

/// Provider that fails every call.
///
/// Stands in for a linguistic backend that could not be loaded.
#[derive(Debug, Clone, Default)]
pub struct UnavailableProvider {
    reason: String,
}

impl UnavailableProvider {
    /// Create a provider failing with `reason`.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl LinguisticProvider for UnavailableProvider {
    fn name(&self) -> &'static str {
        "unavailable"
    }

    fn tokenize(&self, _text: &str) -> Result<Vec<Token>> {
        Err(Error::linguistic(format!(
            "provider unavailable: {}",
            self.reason
        )))
    }
}
