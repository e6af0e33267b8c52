//! Numeric date grammars.
//!
//! Works token by token: the text is split on whitespace, surrounding
//! punctuation is stripped, and each token is tried against the numeric
//! forms in order. The first form that both matches and normalizes wins.
//!
//! | Form      | Example      | Result                        |
//! |-----------|--------------|-------------------------------|
//! | year      | `2001`       | whole year                    |
//! | Y-M-D     | `2001-03-12` | point                         |
//! | M/D/Y     | `03/12/2001` | point; falls back to D/M/Y    |
//! | Y-M       | `2001-03`    | whole month                   |
//! | M-Y       | `03.2001`    | whole month                   |
//!
//! `-`, `/` and `.` are accepted as delimiters everywhere. A zero month
//! collapses the reading to the year, a zero day to the month.

use super::Candidate;
use crate::{Disambiguation, Method, NormalizedTimestamp, Timespan};
use once_cell::sync::Lazy;
use regex::Regex;

const STRIP: &[char] = &['.', ';', '(', ')', '[', ']', ','];

static YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})$").expect("YEAR regex is invalid"));
static YEAR_MONTH_DAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4})[-/.](\d{1,2})[-/.](\d{1,2})$").expect("YEAR_MONTH_DAY regex is invalid")
});
static SHORT_FIRST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2})[-/.](\d{1,2})[-/.](\d{4})$").expect("SHORT_FIRST regex is invalid")
});
static YEAR_MONTH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4})[-/.](\d{1,2})$").expect("YEAR_MONTH regex is invalid")
});
static MONTH_YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2})[-/.](\d{4})$").expect("MONTH_YEAR regex is invalid")
});

/// A whitespace-delimited token with its char offsets, punctuation stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawToken<'a> {
    /// Token text
    pub text: &'a str,
    /// Char offset of the first char
    pub start: usize,
    /// Char offset one past the last char
    pub end: usize,
}

/// Split `text` on whitespace and strip [`STRIP`] characters from both ends
/// of every token. Empty results are skipped.
pub fn tokens(text: &str) -> Vec<RawToken<'_>> {
    let mut out = Vec::new();
    let mut current: Option<(usize, usize)> = None; // (byte start, char start)
    let mut char_idx = 0;

    for (byte_idx, ch) in text.char_indices() {
        if ch.is_whitespace() {
            if let Some((bs, cs)) = current.take() {
                push_stripped(text, bs, cs, byte_idx, &mut out);
            }
        } else if current.is_none() {
            current = Some((byte_idx, char_idx));
        }
        char_idx += 1;
    }
    if let Some((bs, cs)) = current {
        push_stripped(text, bs, cs, text.len(), &mut out);
    }
    out
}

fn push_stripped<'a>(
    text: &'a str,
    byte_start: usize,
    char_start: usize,
    byte_end: usize,
    out: &mut Vec<RawToken<'a>>,
) {
    let raw = &text[byte_start..byte_end];
    let head = raw.len() - raw.trim_start_matches(STRIP).len();
    let trimmed = raw.trim_matches(STRIP);
    if trimmed.is_empty() {
        return;
    }
    // STRIP chars are all single-byte, so byte counts equal char counts
    let start = char_start + head;
    out.push(RawToken {
        text: trimmed,
        start,
        end: start + trimmed.chars().count(),
    });
}

/// Run the numeric forms over every token of `text`.
pub fn find(text: &str) -> Vec<Candidate> {
    tokens(text)
        .into_iter()
        .filter_map(|token| {
            let (rule, ts) = read_token(token.text)?;
            Some(Candidate {
                text: token.text.to_string(),
                span: crate::CharSpan::new(token.start, token.end),
                interval: Timespan::covering(ts),
                method: Method::Numeric,
                disambiguation: vec![Disambiguation::of(ts)],
                rule,
            })
        })
        .collect()
}

/// Interpret a single token as a numeric date.
#[must_use]
pub fn read_token(token: &str) -> Option<(&'static str, NormalizedTimestamp)> {
    if let Some(caps) = YEAR.captures(token) {
        let year = caps[1].parse().ok()?;
        return Some(("YEAR", NormalizedTimestamp::year(year)));
    }
    if let Some(caps) = YEAR_MONTH_DAY.captures(token) {
        return normalize(&caps[1], &caps[2], &caps[3]).map(|ts| ("YEAR_MONTH_DAY", ts));
    }
    if let Some(caps) = SHORT_FIRST.captures(token) {
        // Month first, day first if that does not normalize
        return normalize(&caps[3], &caps[1], &caps[2])
            .map(|ts| ("MONTH_DAY_YEAR", ts))
            .or_else(|| normalize(&caps[3], &caps[2], &caps[1]).map(|ts| ("DAY_MONTH_YEAR", ts)));
    }
    if let Some(caps) = YEAR_MONTH.captures(token) {
        return normalize(&caps[1], &caps[2], "0").map(|ts| ("YEAR_MONTH", ts));
    }
    if let Some(caps) = MONTH_YEAR.captures(token) {
        return normalize(&caps[2], &caps[1], "0").map(|ts| ("MONTH_YEAR", ts));
    }
    None
}

fn normalize(year: &str, month: &str, day: &str) -> Option<NormalizedTimestamp> {
    let year: i32 = year.parse().ok()?;
    let month: u8 = month.parse().ok()?;
    let day: u8 = day.parse().ok()?;
    match (month, day) {
        (0, _) => Some(NormalizedTimestamp::year(year)),
        (1..=12, 0) => NormalizedTimestamp::year_month(year, month).ok(),
        (1..=12, 1..=31) => NormalizedTimestamp::ymd(year, month, day).ok(),
        _ => {
            log::trace!("[date] numeric {}-{}-{} does not normalize", year, month, day);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CharSpan;

    fn read(token: &str) -> Option<String> {
        read_token(token).map(|(_, ts)| ts.to_string())
    }

    #[test]
    fn tokens_strip_punctuation_with_real_offsets() {
        let toks = tokens("(2001), and 2001.");
        assert_eq!(toks.len(), 3);
        assert_eq!(toks[0].text, "2001");
        assert_eq!((toks[0].start, toks[0].end), (1, 5));
        assert_eq!(toks[2].text, "2001");
        assert_eq!((toks[2].start, toks[2].end), (12, 16));
    }

    #[test]
    fn tokens_count_chars_not_bytes() {
        let toks = tokens("Köln 1990");
        assert_eq!(toks[1].text, "1990");
        assert_eq!((toks[1].start, toks[1].end), (5, 9));
    }

    #[test]
    fn year_token() {
        assert_eq!(read("2001").as_deref(), Some("2001"));
        assert_eq!(read("201"), None);
        assert_eq!(read("20011"), None);
    }

    #[test]
    fn full_dates() {
        assert_eq!(read("2001-03-12").as_deref(), Some("2001-03-12"));
        assert_eq!(read("2001/3/2").as_deref(), Some("2001-03-02"));
        assert_eq!(read("03.12.2001").as_deref(), Some("2001-03-12"));
    }

    #[test]
    fn day_first_fallback() {
        // 25 cannot be a month
        assert_eq!(read("25/12/2001").as_deref(), Some("2001-12-25"));
        assert_eq!(read("25/13/2001"), None);
    }

    #[test]
    fn zero_components_collapse() {
        assert_eq!(read("2001-00-00").as_deref(), Some("2001"));
        assert_eq!(read("2001-03-00").as_deref(), Some("2001-03"));
        assert_eq!(read("2001-00").as_deref(), Some("2001"));
    }

    #[test]
    fn month_level_forms() {
        assert_eq!(read("2001-03").as_deref(), Some("2001-03"));
        assert_eq!(read("3/2001").as_deref(), Some("2001-03"));
        assert_eq!(read("13/2001"), None);
    }

    #[test]
    fn find_widens_year_tokens() {
        let cands = find("founded in 1990, closed 2001-03-12");
        assert_eq!(cands.len(), 2);
        assert_eq!(cands[0].span, CharSpan::new(11, 15));
        assert_eq!(cands[0].interval.start.to_string(), "1990-01-01");
        assert_eq!(cands[0].interval.end.to_string(), "1990-12-31");
        assert!(cands[1].interval.is_point());
        assert!(cands.iter().all(|c| c.method == Method::Numeric));
    }

    #[test]
    fn month_token_widens_to_real_month_end() {
        let cands = find("2001-02");
        assert_eq!(cands[0].interval.end.to_string(), "2001-02-28");
    }
}
