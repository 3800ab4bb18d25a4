//! Exact decimal amount handling.
//!
//! Amounts are carried as `rust_decimal::Decimal` end to end and stored as
//! canonical decimal text. They never pass through binary floating point,
//! and comparisons are exact (no epsilon).

use rust_decimal::Decimal;

use crate::error::{LedgerError, Result};

/// Parse a decimal-formatted string into an exact amount.
///
/// Accepts an optional leading sign; surrounding whitespace is ignored.
/// The scale of the input is preserved, so `"50.00"` round-trips as
/// `"50.00"`.
///
/// # Errors
///
/// Returns `LedgerError::Parse` for empty or malformed input.
pub fn parse_amount(input: &str) -> Result<Decimal> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::Parse("empty amount".to_string()));
    }
    Decimal::from_str_exact(trimmed)
        .map_err(|e| LedgerError::Parse(format!("'{}': {}", trimmed, e)))
}

/// Canonical text form used for storage.
pub fn canonical(amount: &Decimal) -> String {
    amount.to_string()
}
