// ============================================================================
// Calculator
// Keypad controller: entry buffer, clear trap, evaluation and memory
// ============================================================================

use crate::domain::{CalculatorConfig, Key, MemoryCell, MemoryOp, Operator, UnaryOp};
use crate::engine::evaluation::{Evaluation, EvaluationState};
use crate::interfaces::{CalculatorEvent, ClearScope, EventHandler, NoOpEventHandler};
use crate::numeric::{CalcError, CalcResult, FixedPointValue};
use chrono::Utc;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One-shot trap that makes the next digit start a fresh number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ClearTrap {
    #[default]
    Disarmed,
    /// Armed by a binary operator; another operator overwrites it
    ArmedByOperator,
    /// Armed by `=`, a unary result or a memory key
    ArmedByResult,
}

impl ClearTrap {
    pub fn is_armed(self) -> bool {
        !matches!(self, ClearTrap::Disarmed)
    }
}

/// Everything a calculator session owns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalculatorState {
    /// Value being entered or last result shown
    pub entry: FixedPointValue,
    /// A decimal point is part of the entry
    pub decimal_active: bool,
    pub clear_trap: ClearTrap,
    pub evaluation: EvaluationState,
    pub memory: MemoryCell,
    /// Set after a failed operation until cleared
    pub error: Option<CalcError>,
}

/// Keypad calculator.
///
/// Every key is handled to completion before the next; all state lives in
/// [`CalculatorState`] owned by this controller.
pub struct Calculator {
    config: CalculatorConfig,
    state: CalculatorState,
    event_handler: Arc<dyn EventHandler>,
}

impl Calculator {
    /// Create a calculator. Use [`crate::engine::create_from_config`] to
    /// validate the configuration first.
    pub fn new(config: CalculatorConfig, event_handler: Arc<dyn EventHandler>) -> Self {
        Self {
            config,
            state: CalculatorState::default(),
            event_handler,
        }
    }

    /// Desktop configuration, no event handling
    pub fn with_defaults() -> Self {
        Self::new(CalculatorConfig::default(), Arc::new(NoOpEventHandler))
    }

    // ========================================================================
    // Input
    // ========================================================================

    /// Handle one key.
    ///
    /// # Errors
    /// - `Overflow` if a digit would exceed the display width (the entry is
    ///   kept)
    /// - `DivisionByZero`, `Domain` or `Overflow` from an operation; the
    ///   calculator then shows the error text until cleared
    pub fn press(&mut self, key: Key) -> CalcResult<()> {
        tracing::trace!(%key, "Key pressed");

        let before = self.display();
        let mut events = Vec::new();
        let outcome = self.handle(key, &mut events);
        self.finish(before, events);
        outcome
    }

    /// Handle a keyboard key by name, e.g. `"Escape"` or `"p"`.
    ///
    /// # Errors
    /// `UnknownOperator` if the name is not bound, otherwise as [`Self::press`].
    pub fn press_key(&mut self, name: &str) -> CalcResult<()> {
        let key = self.config.key_map.resolve(name)?;
        self.press(key)
    }

    /// Handle a button by its label, e.g. `"7"`, `"×"` or `"MR"`.
    ///
    /// # Errors
    /// `UnknownOperator` for an unknown label, otherwise as [`Self::press`].
    pub fn press_label(&mut self, label: &str) -> CalcResult<()> {
        let key: Key = label.parse()?;
        self.press(key)
    }

    /// Press whitespace-separated button labels in order, stopping at the
    /// first error.
    ///
    /// # Errors
    /// The first error returned by [`Self::press_label`].
    pub fn press_labels(&mut self, labels: &str) -> CalcResult<()> {
        labels
            .split_whitespace()
            .try_for_each(|label| self.press_label(label))
    }

    /// Press keys in order, stopping at the first error.
    ///
    /// # Errors
    /// The first error returned by [`Self::press`].
    pub fn press_sequence(&mut self, keys: impl IntoIterator<Item = Key>) -> CalcResult<()> {
        keys.into_iter().try_for_each(|key| self.press(key))
    }

    /// Replace the entry with decoded text (clipboard paste).
    ///
    /// # Errors
    /// `Format` for malformed text, `Overflow` if it does not fit the
    /// display. The calculator is unchanged on error.
    pub fn paste(&mut self, text: &str) -> CalcResult<()> {
        let value = FixedPointValue::decode(text)?;
        if value.display_digits() > self.config.max_digits {
            return Err(CalcError::Overflow);
        }

        let before = self.display();
        self.state.error = None;
        self.state.evaluation.discard_result();
        self.state.entry = value;
        self.state.decimal_active = text.contains('.');
        self.state.clear_trap = ClearTrap::Disarmed;
        self.finish(before, Vec::new());
        Ok(())
    }

    // ========================================================================
    // Output
    // ========================================================================

    /// Text for the display element.
    ///
    /// A typed point with no fractional digit yet is shown (`"3."`);
    /// otherwise this is the plain encoding of the entry.
    pub fn display(&self) -> String {
        if self.state.error.is_some() {
            return self.config.error_text.clone();
        }

        let mut text = self.state.entry.encode();
        if self.state.decimal_active && self.state.entry.scale() == 0 {
            text.push('.');
        }
        text
    }

    /// Value currently on the display
    pub fn value(&self) -> FixedPointValue {
        self.state.entry
    }

    pub fn memory(&self) -> FixedPointValue {
        self.state.memory.recall()
    }

    pub fn error(&self) -> Option<&CalcError> {
        self.state.error.as_ref()
    }

    pub fn pending_operator(&self) -> Option<Operator> {
        self.state.evaluation.pending_operator()
    }

    pub fn is_awaiting_fresh_operand(&self) -> bool {
        self.state.clear_trap.is_armed()
    }

    pub fn is_decimal_active(&self) -> bool {
        self.state.decimal_active
    }

    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    // ========================================================================
    // Private methods
    // ========================================================================

    fn max_digits(&self) -> u32 {
        self.config.max_digits
    }

    fn finish(&self, before: String, mut events: Vec<CalculatorEvent>) {
        let after = self.display();
        if after != before {
            events.push(CalculatorEvent::DisplayChanged {
                display: after,
                timestamp: Utc::now(),
            });
        }
        if !events.is_empty() {
            self.event_handler.on_events(events);
        }
    }

    fn handle(&mut self, key: Key, events: &mut Vec<CalculatorEvent>) -> CalcResult<()> {
        if self.state.error.is_some() {
            match key {
                Key::ClearEntry | Key::AllClear => {},
                // Typing after an error starts over
                k if k.is_entry() => self.all_clear(events),
                _ => {
                    tracing::debug!(%key, "Ignoring key while in error state");
                    return Ok(());
                },
            }
        }

        match key {
            Key::Digit(digit) => self.enter_digit(digit),
            Key::DecimalPoint => {
                self.enter_decimal_point();
                Ok(())
            },
            Key::Operator(op) => self.apply_operator(op, events),
            Key::Equals => self.apply_equals(events),
            Key::Unary(op) => self.apply_unary(op, events),
            Key::Memory(op) => self.apply_memory(op, events),
            Key::Backspace => {
                self.backspace();
                Ok(())
            },
            Key::ClearEntry => {
                self.clear_entry(events);
                Ok(())
            },
            Key::AllClear => {
                self.all_clear(events);
                Ok(())
            },
        }
    }

    /// Fire the clear trap if armed. Disarms itself, so it fires once.
    fn begin_entry(&mut self) {
        if self.state.clear_trap.is_armed() {
            self.state.clear_trap = ClearTrap::Disarmed;
            self.state.entry = FixedPointValue::ZERO;
            self.state.decimal_active = false;
            self.state.evaluation.discard_result();
        }
    }

    fn enter_digit(&mut self, digit: u8) -> CalcResult<()> {
        let (base, decimal_active) = if self.state.clear_trap.is_armed() {
            (FixedPointValue::ZERO, false)
        } else {
            (self.state.entry, self.state.decimal_active)
        };

        let next = base.append_digit(digit, decimal_active)?;
        if next.display_digits() > self.max_digits() {
            tracing::debug!(digit, "Display full, digit rejected");
            return Err(CalcError::Overflow);
        }

        self.begin_entry();
        self.state.entry = next;
        Ok(())
    }

    fn enter_decimal_point(&mut self) {
        self.begin_entry();
        if self.state.decimal_active {
            tracing::trace!("Decimal point already entered");
        }
        self.state.decimal_active = true;
    }

    fn apply_operator(
        &mut self,
        op: Operator,
        events: &mut Vec<CalculatorEvent>,
    ) -> CalcResult<()> {
        if self.state.clear_trap == ClearTrap::ArmedByOperator
            && self.state.evaluation.replace_operator(op)
        {
            if let Some(operand) = self.state.evaluation.first_operand() {
                events.push(CalculatorEvent::OperatorPending {
                    operand,
                    operator: op,
                    timestamp: Utc::now(),
                });
            }
            return Ok(());
        }

        let max_digits = self.max_digits();
        let outcome = match self.state.evaluation.on_operator(op, self.state.entry, max_digits) {
            Ok(outcome) => outcome,
            Err(error) => return self.fail(error, events),
        };

        if let Some(evaluation) = outcome.evaluation {
            events.push(evaluated_event(evaluation));
        }
        self.state.entry = outcome.display;
        self.state.decimal_active = false;
        if outcome.arm_clear_trap {
            self.state.clear_trap = ClearTrap::ArmedByOperator;
        }
        events.push(CalculatorEvent::OperatorPending {
            operand: outcome.display,
            operator: op,
            timestamp: Utc::now(),
        });
        Ok(())
    }

    fn apply_equals(&mut self, events: &mut Vec<CalculatorEvent>) -> CalcResult<()> {
        let max_digits = self.max_digits();
        match self.state.evaluation.on_equals(self.state.entry, max_digits) {
            Ok(Some(evaluation)) => {
                self.state.entry = evaluation.result;
                self.state.decimal_active = false;
                self.state.clear_trap = ClearTrap::ArmedByResult;
                events.push(evaluated_event(evaluation));
                Ok(())
            },
            Ok(None) => Ok(()),
            Err(error) => self.fail(error, events),
        }
    }

    fn apply_unary(&mut self, op: UnaryOp, events: &mut Vec<CalculatorEvent>) -> CalcResult<()> {
        let operand = self.state.entry;
        let result = match op.apply(operand, self.max_digits()) {
            Ok(result) => result,
            Err(error) => return self.fail(error, events),
        };

        self.state.evaluation.discard_result();
        self.state.entry = result;
        if op.completes_entry() {
            self.state.decimal_active = false;
            self.state.clear_trap = ClearTrap::ArmedByResult;
        } else if self.state.clear_trap == ClearTrap::ArmedByOperator {
            // The display now holds an operand, so the next operator chains
            self.state.clear_trap = ClearTrap::ArmedByResult;
        }
        events.push(CalculatorEvent::UnaryApplied {
            operator: op,
            operand,
            result,
            timestamp: Utc::now(),
        });
        Ok(())
    }

    fn apply_memory(&mut self, op: MemoryOp, events: &mut Vec<CalculatorEvent>) -> CalcResult<()> {
        let max_digits = self.max_digits();
        match self.state.memory.apply(op, self.state.entry, max_digits) {
            Ok(Some(recalled)) => {
                self.state.evaluation.discard_result();
                self.state.entry = recalled;
                self.state.decimal_active = false;
                self.state.clear_trap = ClearTrap::ArmedByResult;
                Ok(())
            },
            Ok(None) => {
                if op != MemoryOp::Clear && !self.state.clear_trap.is_armed() {
                    self.state.clear_trap = ClearTrap::ArmedByResult;
                }
                events.push(CalculatorEvent::MemoryChanged {
                    operation: op,
                    value: self.state.memory.recall(),
                    timestamp: Utc::now(),
                });
                Ok(())
            },
            Err(error) => self.fail(error, events),
        }
    }

    fn backspace(&mut self) {
        if self.state.clear_trap.is_armed() {
            tracing::trace!("Backspace ignored on a computed value");
            return;
        }

        if self.state.decimal_active && self.state.entry.scale() == 0 {
            self.state.decimal_active = false;
        } else {
            self.state.entry = self.state.entry.backspace();
        }
    }

    fn clear_entry(&mut self, events: &mut Vec<CalculatorEvent>) {
        self.state.entry = FixedPointValue::ZERO;
        self.state.decimal_active = false;
        self.state.clear_trap = ClearTrap::Disarmed;
        self.state.error = None;
        events.push(CalculatorEvent::Cleared {
            scope: ClearScope::Entry,
            timestamp: Utc::now(),
        });
    }

    fn all_clear(&mut self, events: &mut Vec<CalculatorEvent>) {
        self.state = CalculatorState {
            memory: self.state.memory,
            ..CalculatorState::default()
        };
        events.push(CalculatorEvent::Cleared {
            scope: ClearScope::All,
            timestamp: Utc::now(),
        });
    }

    fn fail(&mut self, error: CalcError, events: &mut Vec<CalculatorEvent>) -> CalcResult<()> {
        tracing::debug!(%error, "Calculator entering error state");
        self.state.error = Some(error.clone());
        self.state.clear_trap = ClearTrap::Disarmed;
        events.push(CalculatorEvent::Failed {
            error: error.clone(),
            timestamp: Utc::now(),
        });
        Err(error)
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn evaluated_event(evaluation: Evaluation) -> CalculatorEvent {
    CalculatorEvent::Evaluated {
        lhs: evaluation.lhs,
        operator: evaluation.operator,
        rhs: evaluation.rhs,
        result: evaluation.result,
        timestamp: Utc::now(),
    }
}
