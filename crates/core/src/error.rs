//! Error types for the huffviz core.
//!
//! Degenerate inputs (empty text, a single distinct symbol, a layout request
//! without a root) are not errors: they produce well-defined empty or
//! single-node outputs. The variants below cover the remaining cases:
//! - Encode: a symbol of the input has no code (internal-consistency violation)
//! - Layout: layout parameters that cannot produce finite coordinates

use thiserror::Error;

/// Top-level error type for all operations in the crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Encoding hit a symbol outside the code table's domain
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),

    /// Layout parameters were rejected
    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),
}

/// Encoding errors.
///
/// A correctly built tree covers every symbol of the text it was built from,
/// so these only surface when a code table is applied to foreign input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    /// Symbol at `position` (in chars) has no entry in the code table
    #[error("symbol {symbol:?} at position {position} has no code")]
    MissingCode { symbol: char, position: usize },
}

/// Layout parameter errors.
#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    /// Zoom must be finite and strictly positive
    #[error("invalid zoom factor {0}: must be finite and > 0")]
    InvalidZoom(f64),

    /// A gap, spacing or margin was negative or not finite
    #[error("invalid spacing `{name}` = {value}")]
    InvalidSpacing { name: &'static str, value: f64 },

    /// Node radius must be finite and non-negative
    #[error("invalid node radius {0}")]
    InvalidRadius(f64),
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
