// ============================================================================
// Evaluation State
// One pending operand plus one pending operator, resolved left to right
// ============================================================================

use crate::domain::Operator;
use crate::numeric::{CalcResult, FixedPointValue};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Pending-operation state machine.
///
/// An operator can only be pending together with its first operand; the
/// variants make any other combination unrepresentable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EvaluationState {
    /// Nothing stored
    #[default]
    Empty,
    /// Result of `=`, kept so a following operator continues from it
    Result { operand: FixedPointValue },
    /// First operand and operator, waiting for the second operand
    Pending {
        operand: FixedPointValue,
        operator: Operator,
    },
}

/// A resolved binary operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    pub lhs: FixedPointValue,
    pub operator: Operator,
    pub rhs: FixedPointValue,
    pub result: FixedPointValue,
}

impl Evaluation {
    fn resolve(
        lhs: FixedPointValue,
        operator: Operator,
        rhs: FixedPointValue,
        max_digits: u32,
    ) -> CalcResult<Self> {
        let result = operator.apply(lhs, rhs, max_digits)?;
        Ok(Self {
            lhs,
            operator,
            rhs,
            result,
        })
    }
}

/// What the display should show after an operator key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorOutcome {
    pub display: FixedPointValue,
    /// Next digit starts a fresh operand instead of appending
    pub arm_clear_trap: bool,
    /// Set when a pending operation was chained
    pub evaluation: Option<Evaluation>,
}

impl EvaluationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn first_operand(&self) -> Option<FixedPointValue> {
        match *self {
            EvaluationState::Empty => None,
            EvaluationState::Result { operand } | EvaluationState::Pending { operand, .. } => {
                Some(operand)
            },
        }
    }

    pub fn pending_operator(&self) -> Option<Operator> {
        match *self {
            EvaluationState::Pending { operator, .. } => Some(operator),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, EvaluationState::Empty)
    }

    /// Binary operator pressed with `current` on the display.
    ///
    /// - Empty: store `current` and `op`
    /// - Result: keep the result, store `op`
    /// - Pending: resolve the pending operation against `current`, then
    ///   store the result and `op` (chain evaluation)
    ///
    /// # Errors
    /// Propagates arithmetic failures from chaining; the state is left
    /// unchanged on error.
    pub fn on_operator(
        &mut self,
        op: Operator,
        current: FixedPointValue,
        max_digits: u32,
    ) -> CalcResult<OperatorOutcome> {
        let (operand, evaluation) = match *self {
            EvaluationState::Empty => (current, None),
            EvaluationState::Result { operand } => (operand, None),
            EvaluationState::Pending { operand, operator } => {
                let evaluation = Evaluation::resolve(operand, operator, current, max_digits)?;
                (evaluation.result, Some(evaluation))
            },
        };

        *self = EvaluationState::Pending {
            operand,
            operator: op,
        };

        Ok(OperatorOutcome {
            display: operand,
            arm_clear_trap: true,
            evaluation,
        })
    }

    /// `=` pressed with `current` on the display. Resolves a pending
    /// operation and keeps its result; otherwise a no-op (so repeated `=`
    /// changes nothing).
    ///
    /// # Errors
    /// Propagates arithmetic failures; the state is left unchanged on error.
    pub fn on_equals(
        &mut self,
        current: FixedPointValue,
        max_digits: u32,
    ) -> CalcResult<Option<Evaluation>> {
        let EvaluationState::Pending { operand, operator } = *self else {
            return Ok(None);
        };

        let evaluation = Evaluation::resolve(operand, operator, current, max_digits)?;
        *self = EvaluationState::Result {
            operand: evaluation.result,
        };
        Ok(Some(evaluation))
    }

    /// Overwrite the pending operator (`3 + ×` means `3 ×`).
    /// Returns false if nothing was pending.
    pub fn replace_operator(&mut self, op: Operator) -> bool {
        match self {
            EvaluationState::Pending { operator, .. } => {
                *operator = op;
                true
            },
            _ => false,
        }
    }

    /// Forget a retained `=` result once the display shows something else.
    pub fn discard_result(&mut self) {
        if matches!(self, EvaluationState::Result { .. }) {
            *self = EvaluationState::Empty;
        }
    }

    pub fn reset(&mut self) {
        *self = EvaluationState::Empty;
    }
}
