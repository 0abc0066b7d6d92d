//! Domain-level errors.
//!
//! These errors represent inputs the pure domain routines refuse to handle.
//! They are independent of infrastructure concerns (HTTP, backend client).

use thiserror::Error;

/// Errors raised while converting an amount into words.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AmountError {
    /// Negative, NaN or infinite amount
    #[error("Amount must be a finite, non-negative number (got {0})")]
    InvalidArgument(f64),

    /// Amount whose integer part needs a scale word above Billion
    #[error("Amounts of one trillion or more are not supported (got {0})")]
    Unsupported(f64),
}
