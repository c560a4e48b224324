//! Text encoding through a code table.

use crate::codes::CodeTable;
use crate::error::{EncodeError, Result};
use tracing::error;

/// Concatenate the code of every symbol of `text`, in order.
///
/// # Errors
/// `EncodeError::MissingCode` if a symbol of `text` has no code. A table
/// generated from the same text always covers it, so this signals a
/// mismatched table rather than bad input.
pub fn encode(text: &str, codes: &CodeTable) -> Result<String> {
    let mut encoded = String::new();
    for (position, symbol) in text.chars().enumerate() {
        match codes.get(symbol) {
            Some(code) => encoded.push_str(code),
            None => {
                error!(?symbol, position, "symbol outside the code table");
                return Err(EncodeError::MissingCode { symbol, position }.into());
            }
        }
    }
    Ok(encoded)
}
