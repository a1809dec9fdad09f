// ============================================================================
// Key Domain Model
// Keypad keys, button labels and keyboard bindings
// ============================================================================

use super::operator::{MemoryOp, Operator, UnaryOp};
use crate::numeric::{CalcError, CalcResult};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One keypad action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Key {
    /// 0-9
    Digit(u8),
    DecimalPoint,
    Operator(Operator),
    Equals,
    Unary(UnaryOp),
    Memory(MemoryOp),
    Backspace,
    /// Clear the entry, keep the pending computation
    ClearEntry,
    /// Reset everything except memory
    AllClear,
}

impl Key {
    /// # Errors
    /// Returns `UnknownOperator` for values above 9.
    pub fn digit(value: u8) -> CalcResult<Self> {
        if value <= 9 {
            Ok(Key::Digit(value))
        } else {
            Err(CalcError::UnknownOperator(value.to_string()))
        }
    }

    /// Keys that edit the entry and therefore work after an error.
    pub fn is_entry(self) -> bool {
        matches!(self, Key::Digit(_) | Key::DecimalPoint)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Digit(d) => write!(f, "{}", d),
            Key::DecimalPoint => f.write_str("."),
            Key::Operator(op) => write!(f, "{}", op),
            Key::Equals => f.write_str("="),
            Key::Unary(op) => write!(f, "{}", op),
            Key::Memory(op) => write!(f, "{}", op),
            Key::Backspace => f.write_str("←"),
            Key::ClearEntry => f.write_str("CE"),
            Key::AllClear => f.write_str("AC"),
        }
    }
}

impl FromStr for Key {
    type Err = CalcError;

    /// Parse a button label as printed on the keypad.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        let mut chars = label.chars();
        if let (Some(c @ '0'..='9'), None) = (chars.next(), chars.next()) {
            return Ok(Key::Digit(c as u8 - b'0'));
        }

        match label {
            "." => Ok(Key::DecimalPoint),
            "=" => Ok(Key::Equals),
            "←" | "⌫" => Ok(Key::Backspace),
            "CE" => Ok(Key::ClearEntry),
            "AC" | "C" => Ok(Key::AllClear),
            _ => label
                .parse()
                .map(Key::Operator)
                .or_else(|_| label.parse().map(Key::Unary))
                .or_else(|_| label.parse().map(Key::Memory))
                .map_err(|_| CalcError::UnknownOperator(label.to_string())),
        }
    }
}

// ============================================================================
// Keyboard Bindings
// ============================================================================

/// Maps keyboard key names (as reported by the host, e.g. `"Escape"`) to
/// keypad actions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KeyMap {
    bindings: HashMap<String, Key>,
}

impl KeyMap {
    /// Create a map with no bindings
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Builder method: bind a key name, replacing any previous binding
    pub fn with_binding(mut self, name: impl Into<String>, key: Key) -> Self {
        self.bind(name, key);
        self
    }

    pub fn bind(&mut self, name: impl Into<String>, key: Key) -> Option<Key> {
        self.bindings.insert(name.into(), key)
    }

    pub fn unbind(&mut self, name: &str) -> Option<Key> {
        self.bindings.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<Key> {
        self.bindings.get(name).copied()
    }

    /// # Errors
    /// Returns `UnknownOperator` if `name` is not bound.
    pub fn resolve(&self, name: &str) -> CalcResult<Key> {
        self.get(name)
            .ok_or_else(|| CalcError::UnknownOperator(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Key)> {
        self.bindings.iter().map(|(name, key)| (name.as_str(), *key))
    }
}

impl Default for KeyMap {
    /// Digits, `.`, the four operators, `=`/`Enter`, `Backspace`,
    /// `Delete` (clear entry), `Escape` (all clear), `p`/`m`/`z`/`r` for
    /// memory, `n` negate, `%` percent and `s` square root.
    fn default() -> Self {
        let mut map = Self::empty();
        for d in 0..=9u8 {
            map.bind(d.to_string(), Key::Digit(d));
        }
        for op in Operator::ALL {
            map.bind(op.symbol().to_string(), Key::Operator(op));
        }
        map.bind(".", Key::DecimalPoint);
        map.bind("=", Key::Equals);
        map.bind("Enter", Key::Equals);
        map.bind("Backspace", Key::Backspace);
        map.bind("Delete", Key::ClearEntry);
        map.bind("Escape", Key::AllClear);
        map.bind("p", Key::Memory(MemoryOp::Add));
        map.bind("m", Key::Memory(MemoryOp::Subtract));
        map.bind("z", Key::Memory(MemoryOp::Clear));
        map.bind("r", Key::Memory(MemoryOp::Recall));
        map.bind("n", Key::Unary(UnaryOp::Negate));
        map.bind("%", Key::Unary(UnaryOp::Percent));
        map.bind("s", Key::Unary(UnaryOp::SquareRoot));
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_labels() {
        assert_eq!("7".parse::<Key>(), Ok(Key::Digit(7)));
        assert_eq!(".".parse::<Key>(), Ok(Key::DecimalPoint));
        assert_eq!("×".parse::<Key>(), Ok(Key::Operator(Operator::Multiply)));
        assert_eq!("√".parse::<Key>(), Ok(Key::Unary(UnaryOp::SquareRoot)));
        assert_eq!("MR".parse::<Key>(), Ok(Key::Memory(MemoryOp::Recall)));
        assert_eq!("CE".parse::<Key>(), Ok(Key::ClearEntry));
        assert_eq!("AC".parse::<Key>(), Ok(Key::AllClear));
        assert_eq!("←".parse::<Key>(), Ok(Key::Backspace));
    }

    #[test]
    fn test_parse_unknown_label() {
        assert_eq!(
            "12".parse::<Key>(),
            Err(CalcError::UnknownOperator("12".to_string()))
        );
        assert!("^".parse::<Key>().is_err());
    }

    #[test]
    fn test_display_parses_back() {
        let keys = [
            Key::Digit(0),
            Key::DecimalPoint,
            Key::Operator(Operator::Divide),
            Key::Equals,
            Key::Unary(UnaryOp::Negate),
            Key::Memory(MemoryOp::Subtract),
            Key::Backspace,
            Key::ClearEntry,
            Key::AllClear,
        ];
        for key in keys {
            assert_eq!(key.to_string().parse::<Key>(), Ok(key));
        }
    }

    #[test]
    fn test_digit_constructor() {
        assert_eq!(Key::digit(9), Ok(Key::Digit(9)));
        assert!(Key::digit(10).is_err());
        assert!(Key::Digit(3).is_entry());
        assert!(!Key::Equals.is_entry());
    }

    #[test]
    fn test_default_key_map() {
        let map = KeyMap::default();
        assert_eq!(map.resolve("Escape"), Ok(Key::AllClear));
        assert_eq!(map.resolve("Delete"), Ok(Key::ClearEntry));
        assert_eq!(map.resolve("Enter"), Ok(Key::Equals));
        assert_eq!(map.resolve("p"), Ok(Key::Memory(MemoryOp::Add)));
        assert_eq!(map.resolve("r"), Ok(Key::Memory(MemoryOp::Recall)));
        assert_eq!(map.resolve("*"), Ok(Key::Operator(Operator::Multiply)));
        assert_eq!(
            map.resolve("F1"),
            Err(CalcError::UnknownOperator("F1".to_string()))
        );
    }

    #[test]
    fn test_custom_bindings() {
        let mut map = KeyMap::empty().with_binding("x", Key::Operator(Operator::Multiply));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("x"), Some(Key::Operator(Operator::Multiply)));
        assert_eq!(map.unbind("x"), Some(Key::Operator(Operator::Multiply)));
        assert!(map.is_empty());
    }
}
