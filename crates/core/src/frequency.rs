//! Symbol frequency analysis.
//!
//! Counts each distinct character of the input and remembers the order in
//! which symbols were first seen. That order becomes the creation sequence of
//! the leaves in [`crate::tree`], which is what makes tie-breaking between
//! equal frequencies deterministic.

use serde::Serialize;
use std::collections::HashMap;

/// Ordered mapping symbol -> count, ordered by first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FrequencyTable {
    /// (symbol, count) in first-occurrence order
    entries: Vec<(char, u64)>,
    /// symbol -> index into `entries`
    #[serde(skip)]
    index: HashMap<char, usize>,
}

impl FrequencyTable {
    /// Count every character of `text`.
    ///
    /// Empty input yields an empty table.
    pub fn analyze(text: &str) -> Self {
        Self::from_symbols(text.chars())
    }

    /// Count an arbitrary sequence of symbols.
    pub fn from_symbols<I>(symbols: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        let mut table = Self::default();
        for symbol in symbols {
            table.record(symbol);
        }
        table
    }

    /// Build a table directly from `(symbol, count)` pairs.
    ///
    /// Pair order is taken as first-occurrence order. Repeated symbols are
    /// summed into their first slot; zero counts are kept.
    pub fn from_counts<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = (char, u64)>,
    {
        let mut table = Self::default();
        for (symbol, count) in counts {
            match table.index.get(&symbol) {
                Some(&i) => table.entries[i].1 += count,
                None => {
                    table.index.insert(symbol, table.entries.len());
                    table.entries.push((symbol, count));
                }
            }
        }
        table
    }

    fn record(&mut self, symbol: char) {
        match self.index.get(&symbol) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                self.index.insert(symbol, self.entries.len());
                self.entries.push((symbol, 1));
            }
        }
    }

    /// Count for `symbol`, if it occurred.
    pub fn get(&self, symbol: char) -> Option<u64> {
        self.index.get(&symbol).map(|&i| self.entries[i].1)
    }

    /// Iterate `(symbol, count)` in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (char, u64)> + '_ {
        self.entries.iter().copied()
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts (the input length in symbols).
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|&(_, c)| c).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_occurrence_order() {
        let table = FrequencyTable::analyze("banana");
        let entries: Vec<_> = table.iter().collect();
        assert_eq!(entries, vec![('b', 1), ('a', 3), ('n', 2)]);
    }

    #[test]
    fn test_empty_input() {
        let table = FrequencyTable::analyze("");
        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
    }

    #[test]
    fn test_unicode_symbols() {
        let table = FrequencyTable::analyze("héé✓");
        assert_eq!(table.get('é'), Some(2));
        assert_eq!(table.get('✓'), Some(1));
        assert_eq!(table.total(), 4);
    }

    #[test]
    fn test_from_counts_merges_duplicates() {
        let table = FrequencyTable::from_counts([('x', 2), ('y', 1), ('x', 3)]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get('x'), Some(5));
        assert_eq!(table.iter().next(), Some(('x', 5)));
    }

    #[test]
    fn test_missing_symbol() {
        let table = FrequencyTable::analyze("abc");
        assert_eq!(table.get('z'), None);
    }
}
