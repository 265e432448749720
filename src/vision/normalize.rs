//! OCR text normalization
//!
//! Tracking codes are digit strings, but recognizers routinely misread a
//! handful of letters in place of visually similar digits (O for 0, l for 1).
//! Normalization strips whitespace, substitutes those confusable letters, and
//! discards everything that is not a decimal digit, yielding a canonical
//! numeric string to match against.

use std::collections::HashMap;

/// Letter-to-digit substitution table applied before digit filtering.
///
/// The table is plain data so hosts can extend or replace the built-in
/// confusable set without touching the normalization logic.
#[derive(Debug, Clone)]
pub struct ConfusionTable {
    map: HashMap<char, char>,
}

impl Default for ConfusionTable {
    /// The stock confusable set: z/Z → 2, o/O → 0, l/I → 1
    fn default() -> Self {
        Self::from_pairs([
            ('z', '2'),
            ('Z', '2'),
            ('o', '0'),
            ('O', '0'),
            ('l', '1'),
            ('I', '1'),
        ])
    }
}

impl ConfusionTable {
    /// Build a table from explicit substitution pairs
    pub fn from_pairs(pairs: impl IntoIterator<Item = (char, char)>) -> Self {
        Self {
            map: pairs.into_iter().collect(),
        }
    }

    /// Number of substitutions in the table
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the table has no substitutions
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Reduce a raw recognized line to its canonical numeric form.
    ///
    /// Whitespace is removed, confusable letters are substituted, and any
    /// remaining non-digit characters are dropped. Order is preserved; the
    /// result may be empty.
    pub fn normalize(&self, raw: &str) -> String {
        raw.chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| self.map.get(&c).copied().unwrap_or(c))
            .filter(|c| c.is_ascii_digit())
            .collect()
    }
}
