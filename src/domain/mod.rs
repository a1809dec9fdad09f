// ============================================================================
// Domain Models Module
// Keypad keys, operators, memory and configuration
// ============================================================================

pub mod config;
pub mod key;
pub mod memory;
pub mod operator;

pub use config::{CalculatorConfig, DEFAULT_ERROR_TEXT, DEFAULT_MAX_DIGITS};
pub use key::{Key, KeyMap};
pub use memory::MemoryCell;
pub use operator::{MemoryOp, Operator, UnaryOp};
