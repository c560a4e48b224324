//! Code generation: one bit string per leaf.
//!
//! Walking from the root, a left edge appends `'0'` and a right edge appends
//! `'1'`. A tree that is a single leaf gives that symbol the empty code.

use crate::frequency::FrequencyTable;
use crate::tree::Tree;
use serde::Serialize;
use std::collections::HashMap;

/// Mapping symbol -> bit string (characters `'0'` / `'1'`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CodeTable {
    /// (symbol, code) in leaf creation order, i.e. first-occurrence order
    entries: Vec<(char, String)>,
    #[serde(skip)]
    index: HashMap<char, usize>,
}

impl CodeTable {
    /// Assign codes to every leaf of `tree`.
    pub fn generate(tree: &Tree) -> Self {
        let mut assigned: Vec<(usize, char, String)> = Vec::new();

        if let Some(root) = tree.root() {
            let mut stack = vec![(root, String::new())];
            while let Some((id, prefix)) = stack.pop() {
                let node = tree.node(id);
                match node.children() {
                    None => {
                        if let Some(symbol) = node.symbol() {
                            assigned.push((id.index(), symbol, prefix));
                        }
                    }
                    Some((left, right)) => {
                        let mut right_code = prefix.clone();
                        right_code.push('1');
                        let mut left_code = prefix;
                        left_code.push('0');
                        stack.push((right, right_code));
                        stack.push((left, left_code));
                    }
                }
            }
        }

        // Leaf ids follow first-occurrence order
        assigned.sort_by_key(|&(seq, _, _)| seq);

        let mut table = Self::default();
        for (_, symbol, code) in assigned {
            table.index.insert(symbol, table.entries.len());
            table.entries.push((symbol, code));
        }
        table
    }

    /// Code for `symbol`, if it is in the table.
    pub fn get(&self, symbol: char) -> Option<&str> {
        self.index
            .get(&symbol)
            .map(|&i| self.entries[i].1.as_str())
    }

    /// Iterate `(symbol, code)` in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (char, &str)> + '_ {
        self.entries.iter().map(|(s, c)| (*s, c.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True if no code is a prefix of another.
    ///
    /// The single-symbol table (one empty code) counts as prefix-free.
    pub fn is_prefix_free(&self) -> bool {
        let mut codes: Vec<&str> = self.entries.iter().map(|(_, c)| c.as_str()).collect();
        // After sorting, a prefix sorts immediately before some code it prefixes
        codes.sort_unstable();
        codes.windows(2).all(|pair| !pair[1].starts_with(pair[0]))
    }

    /// `sum(freq[s] * len(code[s]))` over the symbols of `frequencies`.
    ///
    /// Symbols without a code contribute nothing.
    pub fn weighted_length(&self, frequencies: &FrequencyTable) -> u64 {
        frequencies
            .iter()
            .filter_map(|(symbol, freq)| self.get(symbol).map(|code| freq * code.len() as u64))
            .sum()
    }

    /// Average bits per symbol for `frequencies`; 0.0 for an empty table.
    pub fn average_length(&self, frequencies: &FrequencyTable) -> f64 {
        let total = frequencies.total();
        if total == 0 {
            0.0
        } else {
            self.weighted_length(frequencies) as f64 / total as f64
        }
    }
}
