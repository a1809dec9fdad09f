// ============================================================================
// Operator Domain Model
// Closed operator sets with exhaustive dispatch
// ============================================================================

use crate::numeric::{CalcError, CalcResult, FixedPointValue};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Binary Operators
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub const ALL: [Operator; 4] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
    ];

    /// ASCII symbol, as typed on a keyboard
    pub const fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
        }
    }

    /// Apply `lhs op rhs`, rounding into `max_digits`.
    ///
    /// # Errors
    /// - `DivisionByZero` for `x / 0`
    /// - `Overflow` if the result does not fit
    pub fn apply(
        self,
        lhs: FixedPointValue,
        rhs: FixedPointValue,
        max_digits: u32,
    ) -> CalcResult<FixedPointValue> {
        match self {
            Operator::Add => lhs.checked_add(rhs, max_digits),
            Operator::Subtract => lhs.checked_sub(rhs, max_digits),
            Operator::Multiply => lhs.checked_mul(rhs, max_digits),
            Operator::Divide => lhs.checked_div(rhs, max_digits),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Operator {
    type Err = CalcError;

    /// Accepts ASCII symbols and the typographic `×`, `÷`, `−`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "+" => Ok(Operator::Add),
            "-" | "−" => Ok(Operator::Subtract),
            "*" | "×" | "x" => Ok(Operator::Multiply),
            "/" | "÷" => Ok(Operator::Divide),
            other => Err(CalcError::UnknownOperator(other.to_string())),
        }
    }
}

// ============================================================================
// Unary Operators
// ============================================================================

/// Operators that act on the displayed value immediately, bypassing the
/// pending-operator machinery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnaryOp {
    Negate,
    Percent,
    SquareRoot,
}

impl UnaryOp {
    pub const fn label(self) -> &'static str {
        match self {
            UnaryOp::Negate => "±",
            UnaryOp::Percent => "%",
            UnaryOp::SquareRoot => "√",
        }
    }

    /// Whether the result is a finished value that the next digit replaces.
    /// Negation keeps the entry editable.
    pub const fn completes_entry(self) -> bool {
        !matches!(self, UnaryOp::Negate)
    }

    /// # Errors
    /// - `Domain` for the square root of a negative value
    /// - `Overflow` if the result does not fit
    pub fn apply(self, value: FixedPointValue, max_digits: u32) -> CalcResult<FixedPointValue> {
        match self {
            UnaryOp::Negate => Ok(-value),
            UnaryOp::Percent => value.percent(max_digits),
            UnaryOp::SquareRoot => value.checked_sqrt(max_digits),
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for UnaryOp {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "±" | "+/-" | "neg" => Ok(UnaryOp::Negate),
            "%" => Ok(UnaryOp::Percent),
            "√" | "sqrt" => Ok(UnaryOp::SquareRoot),
            other => Err(CalcError::UnknownOperator(other.to_string())),
        }
    }
}

// ============================================================================
// Memory Operations
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MemoryOp {
    /// M+
    Add,
    /// M-
    Subtract,
    /// M0
    Clear,
    /// MR
    Recall,
}

impl MemoryOp {
    pub const fn label(self) -> &'static str {
        match self {
            MemoryOp::Add => "M+",
            MemoryOp::Subtract => "M-",
            MemoryOp::Clear => "M0",
            MemoryOp::Recall => "MR",
        }
    }
}

impl fmt::Display for MemoryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MemoryOp {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "M+" => Ok(MemoryOp::Add),
            "M-" => Ok(MemoryOp::Subtract),
            "M0" | "MC" => Ok(MemoryOp::Clear),
            "MR" => Ok(MemoryOp::Recall),
            other => Err(CalcError::UnknownOperator(other.to_string())),
        }
    }
}
