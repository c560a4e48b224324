//! Sample text generation.
//!
//! When no text or input file is given, we generate a sample with an
//! interesting frequency profile: a few dominant symbols, a long tail of
//! rare ones, and some runs. That makes both the code lengths and the tree
//! shape worth looking at.
//!
//! # Design
//!
//! Generated text is built from segments of:
//! - English-like letters drawn with skewed weights
//! - Runs of a single symbol (pushes the tree towards a skewed shape)
//! - Short repeated words
//!
//! The same seed always produces the same text.

use rand::distributions::WeightedIndex;
use rand::prelude::Distribution;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Letters with rough English frequencies (per mille).
const LETTERS: &[(char, u32)] = &[
    (' ', 180),
    ('e', 102),
    ('t', 75),
    ('a', 65),
    ('o', 62),
    ('i', 57),
    ('n', 57),
    ('s', 53),
    ('h', 50),
    ('r', 50),
    ('d', 35),
    ('l', 33),
    ('u', 23),
    ('c', 22),
    ('m', 20),
    ('w', 19),
    ('f', 18),
    ('g', 16),
    ('y', 16),
    ('p', 15),
    ('b', 12),
    ('v', 8),
    ('k', 6),
    ('x', 2),
    ('j', 1),
    ('q', 1),
    ('z', 1),
];

const WORDS: &[&str] = &["huffman ", "tree ", "code ", "merge ", "leaf "];

/// Generate `len` characters of sample text.
///
/// # Arguments
/// - `seed`: random seed for determinism
/// - `len`: exact number of characters to produce
pub fn generate_sample_text(seed: u64, len: usize) -> String {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let weights: Vec<u32> = LETTERS.iter().map(|&(_, w)| w).collect();
    let letters = WeightedIndex::new(&weights).ok();

    let mut text = String::with_capacity(len);
    let mut remaining = len;

    while remaining > 0 {
        let segment = remaining.min(rng.gen_range(8..=64));

        match rng.gen_range(0..10u8) {
            // 70% letters with English-like weights
            0..=6 => {
                for _ in 0..segment {
                    let idx = match &letters {
                        Some(dist) => dist.sample(&mut rng),
                        None => rng.gen_range(0..LETTERS.len()),
                    };
                    text.push(LETTERS[idx].0);
                }
            }

            // 10% runs of one letter
            7 => {
                let (symbol, _) = LETTERS[rng.gen_range(0..LETTERS.len())];
                text.extend(std::iter::repeat(symbol).take(segment));
            }

            // 20% repeated words
            _ => {
                let word = WORDS[rng.gen_range(0..WORDS.len())];
                text.extend(word.chars().cycle().take(segment));
            }
        }

        remaining -= segment;
    }

    text
}
