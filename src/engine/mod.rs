// ============================================================================
// Engine Module
// Contains the evaluation state machine and the keypad controller
// ============================================================================

mod calculator;
mod evaluation;

pub mod factory;

pub use calculator::{Calculator, CalculatorState, ClearTrap};
pub use evaluation::{Evaluation, EvaluationState, OperatorOutcome};
pub use factory::{create_from_config, CalculatorBuilder};
