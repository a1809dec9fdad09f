// ============================================================================
// Numeric Module
// Fixed-point values for keypad entry and display
// ============================================================================
//
// This module provides:
// - FixedPointValue: `result / 10^scale` with a display-string codec
// - CalcError / FormatError: typed failures for decoding and arithmetic
//
// Design principles:
// - No floating-point operations
// - All arithmetic returns Result (no panics, no sentinel values)
// - Results are rounded once, into the caller's display width

mod errors;
mod fixed_point;

pub use errors::{CalcError, CalcResult, FormatError};
pub use fixed_point::FixedPointValue;
