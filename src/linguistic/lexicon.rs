//! English ordinal lexicon.
//!
//! Recognizes digit ordinals ("1st", "22nd", "103rd") and spelled-out
//! ordinals up to "hundredth", including hyphenated compounds
//! ("twenty-first").

use super::Token;
use crate::OrdinalMatch;
use once_cell::sync::Lazy;
use regex::Regex;

static DIGIT_ORDINAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+)(?:st|nd|rd|th)$").expect("DIGIT_ORDINAL regex is invalid")
});

const UNITS: &[(&str, i64)] = &[
    ("first", 1),
    ("second", 2),
    ("third", 3),
    ("fourth", 4),
    ("fifth", 5),
    ("sixth", 6),
    ("seventh", 7),
    ("eighth", 8),
    ("ninth", 9),
    ("tenth", 10),
    ("eleventh", 11),
    ("twelfth", 12),
    ("thirteenth", 13),
    ("fourteenth", 14),
    ("fifteenth", 15),
    ("sixteenth", 16),
    ("seventeenth", 17),
    ("eighteenth", 18),
    ("nineteenth", 19),
];

const TENS: &[(&str, &str, i64)] = &[
    ("twenty", "twentieth", 20),
    ("thirty", "thirtieth", 30),
    ("forty", "fortieth", 40),
    ("fifty", "fiftieth", 50),
    ("sixty", "sixtieth", 60),
    ("seventy", "seventieth", 70),
    ("eighty", "eightieth", 80),
    ("ninety", "ninetieth", 90),
];

/// Numeric value of a single ordinal word, if it is one.
#[must_use]
pub fn ordinal_value(word: &str) -> Option<i64> {
    let word = word.to_lowercase();
    if let Some(caps) = DIGIT_ORDINAL.captures(&word) {
        return caps[1].parse().ok();
    }
    if word == "hundredth" {
        return Some(100);
    }
    if let Some(&(_, value)) = UNITS.iter().find(|(w, _)| *w == word) {
        return Some(value);
    }
    if let Some(&(_, _, value)) = TENS.iter().find(|(_, w, _)| *w == word) {
        return Some(value);
    }
    let (tens, unit) = word.split_once('-')?;
    let &(_, _, tens_value) = TENS.iter().find(|(w, _, _)| *w == tens)?;
    let &(_, unit_value) = UNITS.iter().take(9).find(|(w, _)| *w == unit)?;
    Some(tens_value + unit_value)
}

/// Ordinal mentions among `tokens`, in token order.
#[must_use]
pub fn recognize_ordinals(tokens: &[Token]) -> Vec<OrdinalMatch> {
    tokens
        .iter()
        .filter_map(|t| {
            ordinal_value(&t.text).map(|value| OrdinalMatch {
                text: t.text.clone(),
                span: t.span,
                value,
            })
        })
        .collect()
}
