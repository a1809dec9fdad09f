// ============================================================================
// Calculator Errors
// Error types for display decoding and fixed-point arithmetic
// ============================================================================

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Reasons a display string could not be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FormatError {
    /// Input was empty (or only whitespace)
    Empty,
    /// Input contained a sign and/or point but no digits
    NoDigits,
    /// A second decimal point was found
    DuplicateDecimalPoint,
    /// A character other than an ASCII digit, '.' or a leading '-'
    InvalidCharacter(char),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::Empty => write!(f, "display text is empty"),
            FormatError::NoDigits => write!(f, "display text contains no digits"),
            FormatError::DuplicateDecimalPoint => {
                write!(f, "display text has more than one decimal point")
            },
            FormatError::InvalidCharacter(c) => {
                write!(f, "display text contains invalid character {:?}", c)
            },
        }
    }
}

/// Errors that can occur while decoding input or evaluating an operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CalcError {
    /// Malformed display text
    Format(FormatError),
    /// Attempted division by zero
    DivisionByZero,
    /// Square root of a negative number
    Domain,
    /// Value does not fit the configured display width
    Overflow,
    /// Symbol or key name that maps to no operation
    UnknownOperator(String),
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalcError::Format(reason) => write!(f, "format error: {}", reason),
            CalcError::DivisionByZero => write!(f, "division by zero"),
            CalcError::Domain => {
                write!(f, "domain error: square root of a negative number")
            },
            CalcError::Overflow => {
                write!(f, "overflow: value exceeds the display width")
            },
            CalcError::UnknownOperator(symbol) => write!(f, "unknown operator {:?}", symbol),
        }
    }
}

impl std::error::Error for CalcError {}

impl From<FormatError> for CalcError {
    fn from(reason: FormatError) -> Self {
        CalcError::Format(reason)
    }
}

/// Result type alias for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;
