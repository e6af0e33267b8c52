//! Byte to character offset conversion.
//!
//! The regex engine reports byte offsets; every span tempex hands out counts
//! characters. The two agree on ASCII text and drift apart as soon as a
//! multi-byte character shows up, and Wikipedia text is full of them:
//!
//! ```text
//! Text:   "1990–1995"          (en-dash is 3 bytes, 1 char)
//!
//! bytes:  1 9 9 0 [ – ] 1 9 9 5
//!         0 1 2 3  4-6  7 8 9 10
//!
//! chars:  1 9 9 0  –  1 9 9 5
//!         0 1 2 3  4  5 6 7 8
//! ```
//!
//! [`SpanConverter`] pre-computes the mapping once per string so each
//! conversion is O(1).

use crate::CharSpan;

/// Converter for many spans taken from the same text.
#[derive(Debug, Clone)]
pub struct SpanConverter {
    byte_to_char: Vec<usize>,
    char_len: usize,
    is_ascii: bool,
}

impl SpanConverter {
    /// Create a converter for the given text.
    #[must_use]
    pub fn new(text: &str) -> Self {
        if text.is_ascii() {
            // Identity mapping
            return Self {
                byte_to_char: Vec::new(),
                char_len: text.len(),
                is_ascii: true,
            };
        }

        let mut map = vec![0usize; text.len() + 1];
        let mut char_len = 0;
        for (char_idx, (byte_idx, ch)) in text.char_indices().enumerate() {
            // Every byte of a multi-byte char maps to the same char index
            for slot in map.iter_mut().skip(byte_idx).take(ch.len_utf8()) {
                *slot = char_idx;
            }
            char_len = char_idx + 1;
        }
        map[text.len()] = char_len;

        Self {
            byte_to_char: map,
            char_len,
            is_ascii: false,
        }
    }

    /// Convert a byte offset to a char offset.
    ///
    /// Offsets past the end clamp to the char length.
    #[must_use]
    pub fn byte_to_char(&self, byte_idx: usize) -> usize {
        if self.is_ascii {
            byte_idx.min(self.char_len)
        } else {
            self.byte_to_char
                .get(byte_idx)
                .copied()
                .unwrap_or(self.char_len)
        }
    }

    /// Convert a byte range to a [`CharSpan`].
    #[must_use]
    pub fn char_span(&self, byte_start: usize, byte_end: usize) -> CharSpan {
        CharSpan::new(self.byte_to_char(byte_start), self.byte_to_char(byte_end))
    }

    /// Number of characters in the text.
    #[must_use]
    pub const fn char_len(&self) -> usize {
        self.char_len
    }

    /// Whether the text is pure ASCII.
    #[must_use]
    pub const fn is_ascii(&self) -> bool {
        self.is_ascii
    }
}
