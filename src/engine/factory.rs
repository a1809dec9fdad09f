// ============================================================================
// Calculator Factory
// Creates calculators with validated configuration
// ============================================================================

use crate::domain::{CalculatorConfig, Key, KeyMap};
use crate::engine::Calculator;
use crate::interfaces::EventHandler;
use std::sync::Arc;

// ============================================================================
// Factory Functions
// ============================================================================

/// Creates a calculator from configuration
///
/// # Arguments
/// * `config` - Display width, error text and key bindings
/// * `event_handler` - Receives calculator events
///
/// # Returns
/// * `Result<Calculator, String>` - Configured calculator or validation error
///
/// # Example
/// ```
/// use pocket_calc::prelude::*;
/// use pocket_calc::engine::factory::create_from_config;
/// use std::sync::Arc;
///
/// let config = CalculatorConfig::pocket();
/// let calculator = create_from_config(config, Arc::new(NoOpEventHandler)).unwrap();
/// assert_eq!(calculator.display(), "0");
/// ```
pub fn create_from_config(
    config: CalculatorConfig,
    event_handler: Arc<dyn EventHandler>,
) -> Result<Calculator, String> {
    config.validate()?;
    Ok(Calculator::new(config, event_handler))
}

// ============================================================================
// Builder Pattern for Advanced Configuration
// ============================================================================

/// Builder for creating calculators with fluent API
///
/// # Example
/// ```
/// use pocket_calc::prelude::*;
/// use pocket_calc::engine::factory::CalculatorBuilder;
/// use std::sync::Arc;
///
/// let mut calculator = CalculatorBuilder::new()
///     .max_digits(10)
///     .error_text("Err")
///     .key_binding("x", Key::Operator(Operator::Multiply))
///     .build(Arc::new(NoOpEventHandler))
///     .unwrap();
///
/// for name in ["6", "x", "7", "Enter"] {
///     calculator.press_key(name).unwrap();
/// }
/// assert_eq!(calculator.display(), "42");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CalculatorBuilder {
    config: CalculatorConfig,
}

impl CalculatorBuilder {
    /// Create a new builder with the desktop defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set display width in digits
    pub fn max_digits(mut self, max_digits: u32) -> Self {
        self.config.max_digits = max_digits;
        self
    }

    /// Set text shown in the error state
    pub fn error_text(mut self, text: impl Into<String>) -> Self {
        self.config.error_text = text.into();
        self
    }

    /// Replace all key bindings
    pub fn key_map(mut self, key_map: KeyMap) -> Self {
        self.config.key_map = key_map;
        self
    }

    /// Add or replace one key binding
    pub fn key_binding(mut self, name: impl Into<String>, key: Key) -> Self {
        self.config.key_map.bind(name, key);
        self
    }

    // ========================================================================
    // Preset Configurations
    // ========================================================================

    /// Start from the pocket preset
    pub fn pocket() -> Self {
        Self {
            config: CalculatorConfig::pocket(),
        }
    }

    /// Start from the desktop preset
    pub fn desktop() -> Self {
        Self {
            config: CalculatorConfig::desktop(),
        }
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Build the calculator
    pub fn build(self, event_handler: Arc<dyn EventHandler>) -> Result<Calculator, String> {
        create_from_config(self.config, event_handler)
    }

    /// Get the configuration without building (for inspection)
    pub fn get_config(&self) -> &CalculatorConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::NoOpEventHandler;

    #[test]
    fn test_create_from_valid_config() {
        let calculator =
            create_from_config(CalculatorConfig::desktop(), Arc::new(NoOpEventHandler)).unwrap();
        assert_eq!(calculator.config().max_digits, 15);
    }

    #[test]
    fn test_create_from_invalid_config() {
        let config = CalculatorConfig::desktop().with_max_digits(0);
        assert!(create_from_config(config, Arc::new(NoOpEventHandler)).is_err());
    }

    #[test]
    fn test_builder_pattern() {
        let calculator = CalculatorBuilder::new()
            .max_digits(12)
            .error_text("Err")
            .build(Arc::new(NoOpEventHandler))
            .unwrap();

        assert_eq!(calculator.config().max_digits, 12);
        assert_eq!(calculator.config().error_text, "Err");
    }

    #[test]
    fn test_builder_rejects_numeric_error_text() {
        let result = CalculatorBuilder::new()
            .error_text("0")
            .build(Arc::new(NoOpEventHandler));
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_custom_key_map() {
        let mut calculator = CalculatorBuilder::new()
            .key_map(KeyMap::empty())
            .key_binding("a", Key::Digit(1))
            .key_binding("b", Key::Equals)
            .build(Arc::new(NoOpEventHandler))
            .unwrap();

        calculator.press_key("a").unwrap();
        calculator.press_key("b").unwrap();
        assert_eq!(calculator.display(), "1");
        assert!(calculator.press_key("1").is_err());
    }

    #[test]
    fn test_preset_builders() {
        let pocket = CalculatorBuilder::pocket();
        assert_eq!(pocket.get_config().max_digits, 8);

        let desktop = CalculatorBuilder::desktop()
            .build(Arc::new(NoOpEventHandler))
            .unwrap();
        assert_eq!(desktop.config().error_text, "Error");
    }
}
