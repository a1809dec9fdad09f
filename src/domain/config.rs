// ============================================================================
// Calculator Configuration
// Display width, error text and keyboard bindings
// ============================================================================

use super::key::{Key, KeyMap};
use crate::numeric::FixedPointValue;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default display width (digit characters), comfortably inside the
/// precision of a 64-bit mantissa.
pub const DEFAULT_MAX_DIGITS: u32 = 15;

/// Text shown while the calculator is in the error state
pub const DEFAULT_ERROR_TEXT: &str = "Error";

/// Complete configuration for a calculator
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CalculatorConfig {
    /// Maximum digit characters on the display (1-18)
    pub max_digits: u32,

    /// Rendered instead of a number after a failed operation
    pub error_text: String,

    /// Keyboard key name -> keypad action
    pub key_map: KeyMap,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self::desktop()
    }
}

impl CalculatorConfig {
    /// Create a new configuration with required parameters
    pub fn new(max_digits: u32) -> Self {
        Self {
            max_digits,
            error_text: DEFAULT_ERROR_TEXT.to_string(),
            key_map: KeyMap::default(),
        }
    }

    /// Builder method: Set display width
    pub fn with_max_digits(mut self, max_digits: u32) -> Self {
        self.max_digits = max_digits;
        self
    }

    /// Builder method: Set error text
    pub fn with_error_text(mut self, text: impl Into<String>) -> Self {
        self.error_text = text.into();
        self
    }

    /// Builder method: Replace the whole key map
    pub fn with_key_map(mut self, key_map: KeyMap) -> Self {
        self.key_map = key_map;
        self
    }

    /// Builder method: Add or replace a single key binding
    pub fn with_key_binding(mut self, name: impl Into<String>, key: Key) -> Self {
        self.key_map.bind(name, key);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_digits == 0 || self.max_digits > FixedPointValue::MAX_DIGITS {
            return Err(format!(
                "Max digits must be between 1 and {}",
                FixedPointValue::MAX_DIGITS
            ));
        }

        if self.error_text.trim().is_empty() {
            return Err("Error text cannot be empty".to_string());
        }

        // The error marker must never be mistaken for a number
        if FixedPointValue::decode(&self.error_text).is_ok() {
            return Err("Error text cannot be a number".to_string());
        }

        for (name, key) in self.key_map.iter() {
            if name.is_empty() {
                return Err("Key names cannot be empty".to_string());
            }
            if let Key::Digit(d) = key {
                if d > 9 {
                    return Err(format!("Key {:?} is bound to invalid digit {}", name, d));
                }
            }
        }

        Ok(())
    }

    /// Load from JSON; missing fields take their defaults.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, String> {
        let config: Self = serde_json::from_str(json).map_err(|e| e.to_string())?;
        config.validate()?;
        Ok(config)
    }

    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self).map_err(|e| e.to_string())
    }
}

// ============================================================================
// Preset Configurations (Factory Methods)
// ============================================================================

impl CalculatorConfig {
    /// Desktop calculator: 15-digit display
    pub fn desktop() -> Self {
        Self::new(DEFAULT_MAX_DIGITS)
    }

    /// Pocket calculator: 8-digit display, "E" on error
    pub fn pocket() -> Self {
        Self::new(8).with_error_text("E")
    }
}
