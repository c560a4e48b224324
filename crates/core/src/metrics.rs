//! Compression statistics.
//!
//! Sizes are counted in bits: every input symbol is charged 8 bits in the
//! original, the compressed size is the length of the encoded bit string.
//!
//! # Single-symbol input
//!
//! A text with one distinct symbol gets the empty code, so it encodes to
//! zero bits and reports 100% saved even though nothing was really encoded.
//! Callers may depend on this exact number; it is reported as-is.

use serde::Serialize;

/// Original size, compressed size and percentage saved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CompressionStats {
    /// `input_len * 8`
    pub original_bits: u64,

    /// Length of the encoded bit string
    pub compressed_bits: u64,

    /// `100 * (original - compressed) / original`, 0.0 for empty input
    pub percent_saved: f64,
}

impl CompressionStats {
    /// Compute statistics for an input of `input_len` symbols that encoded
    /// to `compressed_bits` bits.
    pub fn new(input_len: u64, compressed_bits: u64) -> Self {
        let original_bits = input_len * 8;
        let percent_saved = if original_bits == 0 {
            0.0
        } else {
            100.0 * (original_bits as f64 - compressed_bits as f64) / original_bits as f64
        };

        Self {
            original_bits,
            compressed_bits,
            percent_saved,
        }
    }

    /// Compression ratio (compressed / original).
    ///
    /// Returns 0.0 if there was no input.
    pub fn ratio(&self) -> f64 {
        if self.original_bits == 0 {
            0.0
        } else {
            self.compressed_bits as f64 / self.original_bits as f64
        }
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("=== Compression ===");
        println!("Original Size: {} bits", self.original_bits);
        println!("Compressed Size: {} bits", self.compressed_bits);
        println!("Compression Saved: {:.2}%", self.percent_saved);
        println!("Ratio: {:.1}%", self.ratio() * 100.0);
    }

    /// Export as `key=value` lines (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "original_bits={}\n\
             compressed_bits={}\n\
             percent_saved={:.4}\n\
             ratio={:.4}\n",
            self.original_bits,
            self.compressed_bits,
            self.percent_saved,
            self.ratio(),
        )
    }
}
