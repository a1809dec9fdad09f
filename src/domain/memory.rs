// ============================================================================
// Memory Cell
// Single accumulator slot driven by M+, M-, M0 and MR
// ============================================================================

use super::operator::MemoryOp;
use crate::numeric::{CalcResult, FixedPointValue};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One mutable slot owned by a single calculator. Starts at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MemoryCell {
    value: FixedPointValue,
}

impl MemoryCell {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    /// Returns `Overflow` if the sum does not fit `max_digits`; the cell is
    /// left unchanged.
    pub fn add(&mut self, x: FixedPointValue, max_digits: u32) -> CalcResult<()> {
        self.value = self.value.checked_add(x, max_digits)?;
        Ok(())
    }

    /// # Errors
    /// Returns `Overflow` if the difference does not fit `max_digits`; the
    /// cell is left unchanged.
    pub fn subtract(&mut self, x: FixedPointValue, max_digits: u32) -> CalcResult<()> {
        self.value = self.value.checked_sub(x, max_digits)?;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.value = FixedPointValue::ZERO;
    }

    pub fn recall(&self) -> FixedPointValue {
        self.value
    }

    /// Whether anything other than zero is stored (drives an "M" indicator).
    pub fn is_set(&self) -> bool {
        !self.value.is_zero()
    }

    /// Dispatch a memory key against the current display value. Only
    /// `Recall` produces a value to display.
    ///
    /// # Errors
    /// Returns `Overflow` from `Add` / `Subtract`.
    pub fn apply(
        &mut self,
        op: MemoryOp,
        current: FixedPointValue,
        max_digits: u32,
    ) -> CalcResult<Option<FixedPointValue>> {
        match op {
            MemoryOp::Add => self.add(current, max_digits).map(|()| None),
            MemoryOp::Subtract => self.subtract(current, max_digits).map(|()| None),
            MemoryOp::Clear => {
                self.clear();
                Ok(None)
            },
            MemoryOp::Recall => Ok(Some(self.recall())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::CalcError;

    fn fp(text: &str) -> FixedPointValue {
        text.parse().unwrap()
    }

    #[test]
    fn test_untouched_cell_recalls_zero() {
        let cell = MemoryCell::new();
        assert_eq!(cell.recall(), FixedPointValue::ZERO);
        assert!(!cell.is_set());
    }

    #[test]
    fn test_add_subtract_recall() {
        let mut cell = MemoryCell::new();
        cell.apply(MemoryOp::Clear, fp("99"), 15).unwrap();
        cell.apply(MemoryOp::Add, fp("7"), 15).unwrap();
        assert_eq!(cell.apply(MemoryOp::Recall, fp("0"), 15).unwrap(), Some(fp("7")));

        cell.apply(MemoryOp::Subtract, fp("2"), 15).unwrap();
        assert_eq!(cell.recall().encode(), "5");
        assert!(cell.is_set());

        cell.clear();
        assert_eq!(cell.recall(), FixedPointValue::ZERO);
    }

    #[test]
    fn test_overflow_leaves_cell_unchanged() {
        let mut cell = MemoryCell::new();
        cell.add(fp("99999999"), 8).unwrap();
        assert_eq!(cell.add(fp("1"), 8), Err(CalcError::Overflow));
        assert_eq!(cell.recall(), fp("99999999"));
    }
}
