// ============================================================================
// Event Handler Interface
// Defines the contract for observing calculator activity
// ============================================================================

use crate::domain::{MemoryOp, Operator, UnaryOp};
use crate::numeric::{CalcError, FixedPointValue};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What a clear key wiped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ClearScope {
    /// Entry and error only
    Entry,
    /// Entry, pending computation and error
    All,
}

/// Events emitted by the calculator
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CalculatorEvent {
    /// Display text changed
    DisplayChanged {
        display: String,
        timestamp: DateTime<Utc>,
    },

    /// Binary operator stored, waiting for the second operand
    OperatorPending {
        operand: FixedPointValue,
        operator: Operator,
        timestamp: DateTime<Utc>,
    },

    /// Pending binary operation resolved
    Evaluated {
        lhs: FixedPointValue,
        operator: Operator,
        rhs: FixedPointValue,
        result: FixedPointValue,
        timestamp: DateTime<Utc>,
    },

    /// Unary operator applied to the displayed value
    UnaryApplied {
        operator: UnaryOp,
        operand: FixedPointValue,
        result: FixedPointValue,
        timestamp: DateTime<Utc>,
    },

    /// Memory cell written or cleared
    MemoryChanged {
        operation: MemoryOp,
        value: FixedPointValue,
        timestamp: DateTime<Utc>,
    },

    /// Clear key pressed
    Cleared {
        scope: ClearScope,
        timestamp: DateTime<Utc>,
    },

    /// Operation failed; the calculator is in the error state
    Failed {
        error: CalcError,
        timestamp: DateTime<Utc>,
    },
}

/// Event handler trait for processing calculator events
/// Implementations can handle logging, history tapes, UI refresh, etc.
pub trait EventHandler: Send + Sync {
    /// Handle a calculator event
    fn on_event(&self, event: CalculatorEvent);

    /// Batch event handler (optional optimization)
    fn on_events(&self, events: Vec<CalculatorEvent>) {
        for event in events {
            self.on_event(event);
        }
    }
}

/// No-op event handler for testing
#[derive(Debug, Default)]
pub struct NoOpEventHandler;

impl EventHandler for NoOpEventHandler {
    fn on_event(&self, _event: CalculatorEvent) {
        // Do nothing
    }
}

/// Logging event handler
#[derive(Debug, Default)]
pub struct LoggingEventHandler;

impl EventHandler for LoggingEventHandler {
    fn on_event(&self, event: CalculatorEvent) {
        match &event {
            CalculatorEvent::Failed { error, .. } => {
                tracing::warn!(%error, "Calculator operation failed");
            },
            _ => tracing::debug!("Calculator event: {:?}", event),
        }
    }
}

// ============================================================================
// Paper Tape
// ============================================================================

/// One printed line of the tape
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TapeEntry {
    Binary {
        lhs: FixedPointValue,
        operator: Operator,
        rhs: FixedPointValue,
        result: FixedPointValue,
    },
    Unary {
        operator: UnaryOp,
        operand: FixedPointValue,
        result: FixedPointValue,
    },
    Error(CalcError),
}

impl fmt::Display for TapeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TapeEntry::Binary {
                lhs,
                operator,
                rhs,
                result,
            } => write!(f, "{} {} {} = {}", lhs, operator, rhs, result),
            TapeEntry::Unary {
                operator,
                operand,
                result,
            } => write!(f, "{}({}) = {}", operator, operand, result),
            TapeEntry::Error(error) => write!(f, "! {}", error),
        }
    }
}

/// Records every evaluation, like the paper roll of a desk calculator.
#[derive(Debug, Default)]
pub struct TapeRecorder {
    entries: Mutex<Vec<TapeEntry>>,
}

impl TapeRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<TapeEntry> {
        self.entries.lock().clone()
    }

    /// Tape rendered one entry per line
    pub fn lines(&self) -> Vec<String> {
        self.entries.lock().iter().map(ToString::to_string).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl EventHandler for TapeRecorder {
    fn on_event(&self, event: CalculatorEvent) {
        let entry = match event {
            CalculatorEvent::Evaluated {
                lhs,
                operator,
                rhs,
                result,
                ..
            } => TapeEntry::Binary {
                lhs,
                operator,
                rhs,
                result,
            },
            CalculatorEvent::UnaryApplied {
                operator,
                operand,
                result,
                ..
            } => TapeEntry::Unary {
                operator,
                operand,
                result,
            },
            CalculatorEvent::Failed { error, .. } => TapeEntry::Error(error),
            _ => return,
        };
        self.entries.lock().push(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fp(text: &str) -> FixedPointValue {
        text.parse().unwrap()
    }

    #[test]
    fn test_noop_handler() {
        let handler = NoOpEventHandler;
        handler.on_event(CalculatorEvent::Cleared {
            scope: ClearScope::All,
            timestamp: Utc::now(),
        });
        // Should not panic
    }

    #[test]
    fn test_tape_records_evaluations_only() {
        let tape = TapeRecorder::new();
        tape.on_events(vec![
            CalculatorEvent::DisplayChanged {
                display: "3".to_string(),
                timestamp: Utc::now(),
            },
            CalculatorEvent::Evaluated {
                lhs: fp("3"),
                operator: Operator::Add,
                rhs: fp("4"),
                result: fp("7"),
                timestamp: Utc::now(),
            },
            CalculatorEvent::UnaryApplied {
                operator: UnaryOp::SquareRoot,
                operand: fp("16"),
                result: fp("4"),
                timestamp: Utc::now(),
            },
            CalculatorEvent::Failed {
                error: CalcError::DivisionByZero,
                timestamp: Utc::now(),
            },
        ]);

        assert_eq!(tape.len(), 3);
        assert_eq!(
            tape.lines(),
            vec!["3 + 4 = 7", "√(16) = 4", "! division by zero"]
        );

        tape.clear();
        assert!(tape.is_empty());
    }
}
