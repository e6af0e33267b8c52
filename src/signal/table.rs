//! Signal keyword tables.
//!
//! A table maps keywords to signal kinds. Two file formats are accepted:
//!
//! ```text
//! # line format: keyword || KIND
//! before      || BEFORE
//! prior to    || BEFORE
//! from ... to || DURATION
//! ```
//!
//! ```json
//! {"before": "BEFORE", "from ... to": "DURATION"}
//! ```
//!
//! Keywords are lower-cased and whitespace-normalized. `...` marks a
//! bracketing DURATION keyword: the words before it open the range, the
//! words after it separate the two dates.

use crate::{Error, Result, SignalKind};
use once_cell::sync::Lazy;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

const BRACKET: &str = "...";

/// Built-in English keywords.
///
/// "from" is left out of START and "to" out of FINISH: both mostly occur
/// inside a range, which DURATION covers.
const ENGLISH: &[(&str, SignalKind)] = &[
    ("before", SignalKind::Before),
    ("prior to", SignalKind::Before),
    ("earlier than", SignalKind::Before),
    ("ahead of", SignalKind::Before),
    ("after", SignalKind::After),
    ("following", SignalKind::After),
    ("later than", SignalKind::After),
    ("subsequent to", SignalKind::After),
    ("during", SignalKind::Overlap),
    ("in", SignalKind::Overlap),
    ("on", SignalKind::Overlap),
    ("within", SignalKind::Overlap),
    ("throughout", SignalKind::Overlap),
    ("since", SignalKind::Start),
    ("starting", SignalKind::Start),
    ("beginning", SignalKind::Start),
    ("until", SignalKind::Finish),
    ("till", SignalKind::Finish),
    ("up to", SignalKind::Finish),
    ("to", SignalKind::Duration),
    ("through", SignalKind::Duration),
    ("from ... to", SignalKind::Duration),
    ("between ... and", SignalKind::Duration),
];

static ENGLISH_TABLE: Lazy<SignalTable> = Lazy::new(|| {
    let mut builder = SignalTable::builder();
    for &(keyword, kind) in ENGLISH {
        builder = builder.keyword(keyword, kind);
    }
    builder.build().expect("built-in signal table is invalid")
});

/// How a keyword is laid out around its date(s).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeywordShape {
    /// A single word
    Word(String),
    /// Several words in sequence
    Phrase(Vec<String>),
    /// `open ... separator` around two date runs
    Bracket {
        /// Words before the first date run
        open: Vec<String>,
        /// Words between the two date runs
        separator: Vec<String>,
    },
}

impl KeywordShape {
    /// Shape of a normalized keyword.
    #[must_use]
    pub fn of(keyword: &str) -> Self {
        if let Some((open, separator)) = keyword.split_once(BRACKET) {
            return KeywordShape::Bracket {
                open: open.split_whitespace().map(str::to_string).collect(),
                separator: separator.split_whitespace().map(str::to_string).collect(),
            };
        }
        let words: Vec<String> = keyword.split_whitespace().map(str::to_string).collect();
        match <[String; 1]>::try_from(words) {
            Ok([word]) => KeywordShape::Word(word),
            Err(words) => KeywordShape::Phrase(words),
        }
    }
}

/// Keyword to signal-kind mapping.
///
/// A keyword may map to several kinds; each kind gets its own patterns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignalTable {
    entries: BTreeMap<SignalKind, BTreeSet<String>>,
}

impl SignalTable {
    /// Start building a table in code.
    #[must_use]
    pub fn builder() -> SignalTableBuilder {
        SignalTableBuilder::default()
    }

    /// The built-in English table.
    #[must_use]
    pub fn english() -> &'static SignalTable {
        &ENGLISH_TABLE
    }

    /// Parse the `keyword || KIND` line format.
    ///
    /// Blank lines and lines starting with `#` are ignored.
    pub fn parse(text: &str) -> Result<Self> {
        let mut table = Self::default();
        for (idx, line) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((keyword, kind)) = line.split_once("||") else {
                return Err(Error::signal_table(line_no, "expected `keyword || KIND`"));
            };
            let kind = parse_kind(kind, line_no)?;
            table.insert(keyword, kind, line_no)?;
        }
        log::debug!("[signal] parsed table with {} keywords", table.len());
        Ok(table)
    }

    /// Parse a JSON object of `keyword: KIND` pairs.
    ///
    /// Entries are numbered from 1 in key order for error reporting.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, String> = serde_json::from_str(json)?;
        let mut table = Self::default();
        for (idx, (keyword, kind)) in raw.iter().enumerate() {
            let kind = parse_kind(kind, idx + 1)?;
            table.insert(keyword, kind, idx + 1)?;
        }
        Ok(table)
    }

    /// Load a table from disk; `.json` files are read as JSON, anything else
    /// as the line format.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json(&text)
        } else {
            Self::parse(&text)
        }
    }

    fn insert(&mut self, keyword: &str, kind: SignalKind, line: usize) -> Result<()> {
        let keyword = normalize_keyword(keyword, kind, line)?;
        self.entries.entry(kind).or_default().insert(keyword);
        Ok(())
    }

    /// Keywords for `kind`, sorted.
    pub fn keywords(&self, kind: SignalKind) -> impl Iterator<Item = &str> {
        self.entries
            .get(&kind)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    /// Kinds with at least one keyword, in [`SignalKind`] order.
    pub fn kinds(&self) -> impl Iterator<Item = SignalKind> + '_ {
        self.entries.keys().copied()
    }

    /// Kinds `keyword` maps to.
    #[must_use]
    pub fn kinds_of(&self, keyword: &str) -> Vec<SignalKind> {
        let keyword = keyword.to_lowercase();
        self.entries
            .iter()
            .filter(|(_, set)| set.contains(&keyword))
            .map(|(kind, _)| *kind)
            .collect()
    }

    /// Total number of (keyword, kind) entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.values().map(BTreeSet::len).sum()
    }

    /// True when the table has no keywords.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Builder for [`SignalTable`].
#[derive(Debug, Clone, Default)]
pub struct SignalTableBuilder {
    keywords: Vec<(String, SignalKind)>,
}

impl SignalTableBuilder {
    /// Add a keyword.
    #[must_use]
    pub fn keyword(mut self, keyword: impl Into<String>, kind: SignalKind) -> Self {
        self.keywords.push((keyword.into(), kind));
        self
    }

    /// Validate and build. Entries are numbered from 1 in insertion order.
    pub fn build(self) -> Result<SignalTable> {
        let mut table = SignalTable::default();
        for (idx, (keyword, kind)) in self.keywords.iter().enumerate() {
            table.insert(keyword, *kind, idx + 1)?;
        }
        Ok(table)
    }
}

fn parse_kind(raw: &str, line: usize) -> Result<SignalKind> {
    let kind: SignalKind = raw
        .parse()
        .map_err(|_| Error::signal_table(line, format!("unknown signal kind {:?}", raw.trim())))?;
    if !kind.is_keyword_kind() {
        return Err(Error::signal_table(line, format!("{} cannot carry keywords", kind)));
    }
    Ok(kind)
}

fn normalize_keyword(raw: &str, kind: SignalKind, line: usize) -> Result<String> {
    if !kind.is_keyword_kind() {
        return Err(Error::signal_table(line, format!("{} cannot carry keywords", kind)));
    }
    let lower = raw.to_lowercase();
    if let Some((open, separator)) = lower.split_once(BRACKET) {
        if kind != SignalKind::Duration {
            return Err(Error::signal_table(
                line,
                format!("bracketing keyword {:?} is only allowed for DURATION", raw.trim()),
            ));
        }
        let open = words(open);
        let separator = words(separator);
        if open.is_empty() || separator.is_empty() || separator.contains(BRACKET) {
            return Err(Error::signal_table(
                line,
                format!("bracketing keyword {:?} needs words on both sides of `...`", raw.trim()),
            ));
        }
        return Ok(format!("{} {} {}", open, BRACKET, separator));
    }
    let keyword = words(&lower);
    if keyword.is_empty() {
        return Err(Error::signal_table(line, "empty keyword"));
    }
    Ok(keyword)
}

fn words(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_line_format() {
        let table = SignalTable::parse(
            "# comment\n\nbefore || BEFORE\n  Prior   To || before\nfrom...to || DURATION\n",
        )
        .unwrap();
        assert_eq!(table.len(), 3);
        let before: Vec<_> = table.keywords(SignalKind::Before).collect();
        assert_eq!(before, vec!["before", "prior to"]);
        let duration: Vec<_> = table.keywords(SignalKind::Duration).collect();
        assert_eq!(duration, vec!["from ... to"]);
    }

    #[test]
    fn reports_line_numbers() {
        let err = SignalTable::parse("before || BEFORE\nsoon || LATER\n").unwrap_err();
        assert!(matches!(err, Error::SignalTable { line: 2, .. }), "{err}");

        let err = SignalTable::parse("\n\n || AFTER").unwrap_err();
        assert!(matches!(err, Error::SignalTable { line: 3, .. }), "{err}");

        let err = SignalTable::parse("no separator here").unwrap_err();
        assert!(matches!(err, Error::SignalTable { line: 1, .. }));
    }

    #[test]
    fn rejects_reserved_kinds() {
        assert!(SignalTable::parse("third || ORDINAL").is_err());
        assert!(SignalTable::parse("plain || NONE").is_err());
    }

    #[test]
    fn bracket_only_for_duration() {
        assert!(SignalTable::parse("from ... to || BEFORE").is_err());
        assert!(SignalTable::parse("... to || DURATION").is_err());
        assert!(SignalTable::parse("between ... and || DURATION").is_ok());
    }

    #[test]
    fn json_format() {
        let table = SignalTable::from_json(r#"{"since": "START", "till": "FINISH"}"#).unwrap();
        assert_eq!(table.kinds_of("since"), vec![SignalKind::Start]);
        assert!(SignalTable::from_json(r#"{"since": "SOON"}"#).is_err());
        assert!(matches!(SignalTable::from_json("[1, 2]"), Err(Error::Json(_))));
    }

    #[test]
    fn one_keyword_many_kinds() {
        let table = SignalTable::builder()
            .keyword("to", SignalKind::Duration)
            .keyword("to", SignalKind::Finish)
            .build()
            .unwrap();
        assert_eq!(table.kinds_of("to"), vec![SignalKind::Finish, SignalKind::Duration]);
    }

    #[test]
    fn english_table() {
        let table = SignalTable::english();
        assert!(table.kinds_of("from").is_empty());
        assert_eq!(table.kinds_of("to"), vec![SignalKind::Duration]);
        assert_eq!(table.kinds_of("before"), vec![SignalKind::Before]);
        assert_eq!(table.kinds().count(), 6);
    }

    #[test]
    fn keyword_shapes() {
        assert_eq!(KeywordShape::of("before"), KeywordShape::Word("before".into()));
        assert_eq!(
            KeywordShape::of("prior to"),
            KeywordShape::Phrase(vec!["prior".into(), "to".into()])
        );
        assert_eq!(
            KeywordShape::of("from ... to"),
            KeywordShape::Bracket { open: vec!["from".into()], separator: vec!["to".into()] }
        );
    }
}
