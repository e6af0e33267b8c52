//! Textual date grammars.
//!
//! Written-out dates as they appear on Wikipedia, following the `dmy` and
//! `mdy` date templates, plus the en-dash timespan phrasings used in
//! infoboxes and year pages:
//!
//! | Rule         | Example                         | Interval                   |
//! |--------------|---------------------------------|----------------------------|
//! | `DMY`        | 12 March 2001                   | point                      |
//! | `TIMESPAN1`  | 2003, March 20–May 22           | 2003-03-20 .. 2003-05-22   |
//! | `TIMESPAN2`  | 2003–2005                       | 2003-01-01 .. 2005-12-31   |
//! | `TIMESPAN3`  | 2003, March 20–22               | 2003-03-20 .. 2003-03-22   |
//! | `TIMESPAN4`  | 24 May 2001 – 2008              | 2001-05-24 .. 2008-12-31   |
//! | `TIMESPAN5`  | 29 May 2000 – 13 July 2000      | 2000-05-29 .. 2000-07-13   |
//! | `TIMESPAN6`  | May 29, 2000 – July 13, 2000    | 2000-05-29 .. 2000-07-13   |
//! | `MONTH_YEAR` | March 2001                      | 2001-03-01 .. 2001-03-31   |
//! | `YMD`        | 2003, March 20                  | point                      |
//! | `MDY`        | March 20, 2003                  | point                      |

use super::Candidate;
use crate::offset::SpanConverter;
use crate::{
    month_from_name, Disambiguation, Method, NormalizedTimestamp, Timespan,
};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// A textual grammar rule: regex plus the conversion of its captures.
pub struct GrammarRule {
    /// Rule name, for tracing.
    pub name: &'static str,
    /// The compiled regex pattern.
    pub regex: &'static Lazy<Regex>,
    /// Capture conversion; `None` drops the candidate.
    pub convert: fn(&Captures<'_>) -> Option<Reading>,
}

/// Interval and readings of one matched mention.
pub struct Reading {
    /// Normalized interval
    pub interval: Timespan,
    /// Readings, in mention order
    pub disambiguation: Vec<Disambiguation>,
}

impl Reading {
    fn point(ts: NormalizedTimestamp) -> Self {
        Self {
            interval: Timespan::covering(ts),
            disambiguation: vec![Disambiguation::of(ts)],
        }
    }

    fn pair(first: NormalizedTimestamp, last: NormalizedTimestamp) -> Self {
        Self {
            interval: Timespan::between(first, last),
            disambiguation: vec![Disambiguation::of(first), Disambiguation::closing(last)],
        }
    }
}

/// All textual rules, in priority order.
pub static RULES: &[GrammarRule] = &[
    GrammarRule { name: "DMY", regex: &DMY, convert: convert_dmy },
    GrammarRule { name: "TIMESPAN1", regex: &TIMESPAN1, convert: convert_timespan1 },
    GrammarRule { name: "TIMESPAN2", regex: &TIMESPAN2, convert: convert_timespan2 },
    GrammarRule { name: "TIMESPAN3", regex: &TIMESPAN3, convert: convert_timespan3 },
    GrammarRule { name: "TIMESPAN4", regex: &TIMESPAN4, convert: convert_timespan4 },
    GrammarRule { name: "TIMESPAN5", regex: &TIMESPAN5, convert: convert_timespan5 },
    GrammarRule { name: "TIMESPAN6", regex: &TIMESPAN6, convert: convert_timespan6 },
    GrammarRule { name: "MONTH_YEAR", regex: &MONTH_YEAR, convert: convert_month_year },
    GrammarRule { name: "YMD", regex: &YMD, convert: convert_ymd },
    GrammarRule { name: "MDY", regex: &MDY, convert: convert_mdy },
];

// =============================================================================
// Regex Definitions (compiled once, lazily)
// =============================================================================
// These patterns are compile-time constants. An invalid regex is a
// programmer error and panics on first use.

static DMY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{1,2}) ([A-Za-z]+) (\d{4})\b").expect("DMY regex is invalid")
});
static TIMESPAN1: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{4}),\s([A-Za-z]+)\s(\d{1,2})–([A-Za-z]+)\s(\d{1,2})\b")
        .expect("TIMESPAN1 regex is invalid")
});
static TIMESPAN2: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{4})–(\d{4})\b").expect("TIMESPAN2 regex is invalid")
});
static TIMESPAN3: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{4}),\s([A-Za-z]+)\s(\d{1,2})–(\d{1,2})\b")
        .expect("TIMESPAN3 regex is invalid")
});
static TIMESPAN4: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{1,2})\s([A-Za-z]+)\s(\d{4})\s–\s(\d{4})\b")
        .expect("TIMESPAN4 regex is invalid")
});
static TIMESPAN5: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{1,2})\s([A-Za-z]+)\s(\d{4})\s–\s(\d{1,2})\s([A-Za-z]+)\s(\d{4})\b")
        .expect("TIMESPAN5 regex is invalid")
});
static TIMESPAN6: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b([A-Za-z]+)\s(\d{1,2}),\s(\d{4})\s–\s([A-Za-z]+)\s(\d{1,2}),\s(\d{4})\b")
        .expect("TIMESPAN6 regex is invalid")
});
static MONTH_YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(January|February|March|April|May|June|July|August|September|October|November|December)\s(\d{4})\b")
        .expect("MONTH_YEAR regex is invalid")
});
static YMD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{4}), ([A-Za-z]+) (\d{1,2})\b").expect("YMD regex is invalid")
});
static MDY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b([A-Za-z]+) (\d{1,2}), (\d{4})\b").expect("MDY regex is invalid")
});

/// Run every textual rule over `text`.
///
/// Candidates come out grouped by rule, in rule priority order. Captures
/// that fail validation (unknown month name, day outside 1–31) are dropped.
pub fn find(text: &str, converter: &SpanConverter) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    for rule in RULES {
        for caps in rule.regex.captures_iter(text) {
            let Some(whole) = caps.get(0) else { continue };
            match (rule.convert)(&caps) {
                Some(reading) => candidates.push(Candidate {
                    text: whole.as_str().to_string(),
                    span: converter.char_span(whole.start(), whole.end()),
                    interval: reading.interval,
                    method: Method::Textual,
                    disambiguation: reading.disambiguation,
                    rule: rule.name,
                }),
                None => log::trace!("[date] {} dropped {:?}", rule.name, whole.as_str()),
            }
        }
    }
    candidates
}

// =============================================================================
// Capture conversion
// =============================================================================

fn year(caps: &Captures<'_>, idx: usize) -> Option<i32> {
    caps.get(idx)?.as_str().parse().ok()
}

fn number(caps: &Captures<'_>, idx: usize) -> Option<u8> {
    caps.get(idx)?.as_str().parse().ok()
}

fn month(caps: &Captures<'_>, idx: usize) -> Option<u8> {
    month_from_name(caps.get(idx)?.as_str())
}

fn ymd(y: Option<i32>, m: Option<u8>, d: Option<u8>) -> Option<NormalizedTimestamp> {
    NormalizedTimestamp::ymd(y?, m?, d?).ok()
}

// 12 March 2001
fn convert_dmy(caps: &Captures<'_>) -> Option<Reading> {
    let ts = ymd(year(caps, 3), month(caps, 2), number(caps, 1))?;
    Some(Reading::point(ts))
}

// 2003, March 20–May 22
fn convert_timespan1(caps: &Captures<'_>) -> Option<Reading> {
    let y = year(caps, 1);
    let first = ymd(y, month(caps, 2), number(caps, 3))?;
    let last = ymd(y, month(caps, 4), number(caps, 5))?;
    Some(Reading::pair(first, last))
}

// 2003–2005
fn convert_timespan2(caps: &Captures<'_>) -> Option<Reading> {
    let first = NormalizedTimestamp::year(year(caps, 1)?);
    let last = NormalizedTimestamp::year(year(caps, 2)?);
    Some(Reading::pair(first, last))
}

// 2003, March 20–22
fn convert_timespan3(caps: &Captures<'_>) -> Option<Reading> {
    let (y, m) = (year(caps, 1), month(caps, 2));
    let first = ymd(y, m, number(caps, 3))?;
    let last = ymd(y, m, number(caps, 4))?;
    Some(Reading::pair(first, last))
}

// 24 May 2001 – 2008
fn convert_timespan4(caps: &Captures<'_>) -> Option<Reading> {
    let first = ymd(year(caps, 3), month(caps, 2), number(caps, 1))?;
    let last = NormalizedTimestamp::year(year(caps, 4)?);
    Some(Reading::pair(first, last))
}

// 29 May 2000 – 13 July 2000
fn convert_timespan5(caps: &Captures<'_>) -> Option<Reading> {
    let first = ymd(year(caps, 3), month(caps, 2), number(caps, 1))?;
    let last = ymd(year(caps, 6), month(caps, 5), number(caps, 4))?;
    Some(Reading::pair(first, last))
}

// May 29, 2000 – July 13, 2000
fn convert_timespan6(caps: &Captures<'_>) -> Option<Reading> {
    let first = ymd(year(caps, 3), month(caps, 1), number(caps, 2))?;
    let last = ymd(year(caps, 6), month(caps, 4), number(caps, 5))?;
    Some(Reading::pair(first, last))
}

// March 2001
fn convert_month_year(caps: &Captures<'_>) -> Option<Reading> {
    let ts = NormalizedTimestamp::year_month(year(caps, 2)?, month(caps, 1)?).ok()?;
    Some(Reading {
        interval: Timespan::covering(ts),
        disambiguation: vec![Disambiguation::of(ts)],
    })
}

// 2003, March 20
fn convert_ymd(caps: &Captures<'_>) -> Option<Reading> {
    let ts = ymd(year(caps, 1), month(caps, 2), number(caps, 3))?;
    Some(Reading::point(ts))
}

// March 20, 2003
fn convert_mdy(caps: &Captures<'_>) -> Option<Reading> {
    let ts = ymd(year(caps, 3), month(caps, 1), number(caps, 2))?;
    Some(Reading::point(ts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CharSpan;

    fn run(text: &str) -> Vec<Candidate> {
        find(text, &SpanConverter::new(text))
    }

    fn by_rule<'a>(cands: &'a [Candidate], rule: &str) -> Vec<&'a Candidate> {
        cands.iter().filter(|c| c.rule == rule).collect()
    }

    #[test]
    fn test_patterns_compile() {
        for rule in RULES {
            assert!(!rule.regex.as_str().is_empty(), "{}", rule.name);
        }
    }

    #[test]
    fn dmy_point() {
        let cands = run("born 12 March 2001 in Leeds");
        let dmy = by_rule(&cands, "DMY");
        assert_eq!(dmy.len(), 1);
        assert_eq!(dmy[0].span, CharSpan::new(5, 18));
        assert_eq!(dmy[0].interval.start.to_string(), "2001-03-12");
        assert!(dmy[0].interval.is_point());
    }

    #[test]
    fn unknown_month_is_dropped() {
        let cands = run("12 Marchember 2001");
        assert!(by_rule(&cands, "DMY").is_empty());
    }

    #[test]
    fn day_out_of_range_is_dropped() {
        let cands = run("45 March 2001");
        assert!(by_rule(&cands, "DMY").is_empty());
    }

    #[test]
    fn timespan1_two_months() {
        let cands = run("2003, March 20–May 22");
        let ts = by_rule(&cands, "TIMESPAN1");
        assert_eq!(ts.len(), 1);
        assert_eq!(ts[0].interval.start.to_string(), "2003-03-20");
        assert_eq!(ts[0].interval.end.to_string(), "2003-05-22");
        assert_eq!(ts[0].disambiguation.len(), 2);
    }

    #[test]
    fn timespan2_year_range_widens() {
        let cands = run("2003–2005");
        let ts = by_rule(&cands, "TIMESPAN2");
        assert_eq!(ts.len(), 1);
        assert_eq!(ts[0].span, CharSpan::new(0, 9));
        assert_eq!(ts[0].interval.start.to_string(), "2003-01-01");
        assert_eq!(ts[0].interval.end.to_string(), "2005-12-31");
    }

    #[test]
    fn timespan3_same_month() {
        let ts = run("2003, March 20–22");
        let ts = by_rule(&ts, "TIMESPAN3");
        assert_eq!(ts[0].interval.end.to_string(), "2003-03-22");
    }

    #[test]
    fn timespan4_widens_year_end() {
        let cands = run("24 May 2001 – 2008");
        let ts = by_rule(&cands, "TIMESPAN4");
        assert_eq!(ts.len(), 1);
        assert_eq!(ts[0].interval.start.to_string(), "2001-05-24");
        assert_eq!(ts[0].interval.end.to_string(), "2008-12-31");
    }

    #[test]
    fn timespan5_and_6() {
        let five = run("29 May 2000 – 13 July 2000");
        let five = by_rule(&five, "TIMESPAN5");
        assert_eq!(five[0].interval.end.to_string(), "2000-07-13");

        let six = run("May 29, 2000 – July 13, 2000");
        let six = by_rule(&six, "TIMESPAN6");
        assert_eq!(six[0].interval.start.to_string(), "2000-05-29");
        assert_eq!(six[0].interval.end.to_string(), "2000-07-13");
    }

    #[test]
    fn month_year_widens_to_month_end() {
        let cands = run("in february 2004");
        let my = by_rule(&cands, "MONTH_YEAR");
        assert_eq!(my.len(), 1);
        assert_eq!(my[0].interval.start.to_string(), "2004-02-01");
        assert_eq!(my[0].interval.end.to_string(), "2004-02-29");
        assert_eq!(my[0].disambiguation[0].label, "2004-02");
    }

    #[test]
    fn ymd_and_mdy() {
        let ymd = run("2003, March 20");
        assert_eq!(by_rule(&ymd, "YMD")[0].interval.start.to_string(), "2003-03-20");
        let mdy = run("March 20, 2003");
        assert_eq!(by_rule(&mdy, "MDY")[0].interval.start.to_string(), "2003-03-20");
    }

    #[test]
    fn spans_are_char_offsets() {
        let text = "Zürich, 1990–1995";
        let cands = run(text);
        let ts = by_rule(&cands, "TIMESPAN2");
        assert_eq!(ts[0].span, CharSpan::new(8, 17));
        assert_eq!(ts[0].span.extract(text), "1990–1995");
    }

    #[test]
    fn repeated_mentions_get_their_own_offsets() {
        let cands = run("1 May 2001 and again 1 May 2001");
        let dmy = by_rule(&cands, "DMY");
        assert_eq!(dmy.len(), 2);
        assert_ne!(dmy[0].span, dmy[1].span);
    }
}
