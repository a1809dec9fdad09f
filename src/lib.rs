// ============================================================================
// Pocket Calculator Library
// Fixed-point display codec and chained-operator evaluation for keypads
// ============================================================================

//! # Pocket Calc
//!
//! The arithmetic core of a keypad calculator, without any UI.
//!
//! ## Features
//!
//! - **Fixed-point values** (`result / 10^scale`) with an exact display
//!   codec: `"12.50"` stays `"12.50"`, `{5, 1}` renders `"0.5"`
//! - **Left-to-right chain evaluation** with one pending operator
//! - **Unary operators** (negate, percent, square root) and a **memory cell**
//! - **Typed errors** for malformed text, division by zero, negative roots
//!   and display overflow; never `NaN` or a sentinel string
//! - **Event handlers** for logging and a paper-tape history
//!
//! ## Example
//!
//! ```rust
//! use pocket_calc::prelude::*;
//! use std::sync::Arc;
//!
//! let tape = Arc::new(TapeRecorder::new());
//! let mut calculator = Calculator::new(CalculatorConfig::desktop(), tape.clone());
//!
//! calculator.press_labels("1 2 . 5 + 3 × 2 =").unwrap();
//! assert_eq!(calculator.display(), "31");
//!
//! assert_eq!(tape.lines(), vec!["12.5 + 3 = 15.5", "15.5 * 2 = 31"]);
//! ```

pub mod domain;
pub mod engine;
pub mod interfaces;
pub mod numeric;

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{
        CalculatorConfig, Key, KeyMap, MemoryCell, MemoryOp, Operator, UnaryOp,
    };
    pub use crate::engine::{
        create_from_config, Calculator, CalculatorBuilder, CalculatorState, ClearTrap,
        EvaluationState,
    };
    pub use crate::interfaces::{
        CalculatorEvent, ClearScope, EventHandler, LoggingEventHandler, NoOpEventHandler,
        TapeEntry, TapeRecorder,
    };
    pub use crate::numeric::{CalcError, CalcResult, FixedPointValue, FormatError};
}
