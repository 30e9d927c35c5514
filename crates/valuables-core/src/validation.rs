//! Form field validation
//!
//! Pure checks for the add-item form. Failures are data, never errors: each
//! check returns a [`FieldValidation`] that the form uses to gate submit and
//! to show an inline message.

use crate::format::{format_amount, number_to_string};

/// Default ceiling for the total value of all stored valuables, in euros
pub const DEFAULT_VALUE_CEILING: f64 = 40_000.0;

/// Outcome of validating one form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValidation {
    pub is_valid: bool,
    pub error_message: String,
}

impl FieldValidation {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            error_message: String::new(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error_message: message.into(),
        }
    }
}

/// Result of the image picker
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PhotoSelection {
    pub uri: String,
    pub cancelled: bool,
}

impl PhotoSelection {
    pub fn picked(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            cancelled: false,
        }
    }

    pub fn cancelled() -> Self {
        Self {
            uri: String::new(),
            cancelled: true,
        }
    }
}

/// Value ceiling applied by [`validate_value_with`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueLimits {
    pub ceiling: f64,
}

impl Default for ValueLimits {
    fn default() -> Self {
        Self {
            ceiling: DEFAULT_VALUE_CEILING,
        }
    }
}

impl ValueLimits {
    /// The ceiling as shown to users, e.g. `€40,000`
    pub fn ceiling_label(&self) -> String {
        format!("€{}", format_amount(&number_to_string(self.ceiling)))
    }
}

pub fn validate_name(name: &str) -> FieldValidation {
    if name.is_empty() {
        return FieldValidation::invalid("Name is required");
    }
    FieldValidation::valid()
}

/// Validate a price entry against the default ceiling
///
/// `total` is the value of everything already stored.
pub fn validate_value(value: &str, total: f64) -> FieldValidation {
    validate_value_with(value, total, &ValueLimits::default())
}

pub fn validate_value_with(value: &str, total: f64, limits: &ValueLimits) -> FieldValidation {
    if value.is_empty() {
        return FieldValidation::invalid("Value is required");
    }

    let amount = match parse_value(value) {
        Some(amount) => amount,
        None => return FieldValidation::invalid("Value must be a number"),
    };

    let ceiling = limits.ceiling_label();

    if amount > limits.ceiling {
        return FieldValidation::invalid(format!("Your limit is {}", ceiling));
    }

    if amount + total > limits.ceiling {
        return FieldValidation::invalid(format!(
            "Your limit is {}, you already have €{} worth of valuables",
            ceiling,
            format_amount(&number_to_string(total))
        ));
    }

    FieldValidation::valid()
}

pub fn validate_photo(photo: Option<&PhotoSelection>) -> FieldValidation {
    match photo {
        Some(selection) if !selection.uri.is_empty() => FieldValidation::valid(),
        _ => FieldValidation::invalid("Photo is required"),
    }
}

/// Parse a price as typed on a decimal keypad
///
/// Surrounding whitespace is ignored. Anything that is not a finite number
/// yields `None`.
pub fn parse_value(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name(""), FieldValidation::invalid("Name is required"));
        assert!(validate_name("Bracelet").is_valid);
        assert_eq!(validate_name("Bracelet").error_message, "");
    }

    #[test]
    fn test_validate_value_required_and_numeric() {
        assert_eq!(
            validate_value("", 0.0),
            FieldValidation::invalid("Value is required")
        );
        assert_eq!(
            validate_value("seven", 0.0),
            FieldValidation::invalid("Value must be a number")
        );
        assert!(validate_value("700", 0.0).is_valid);
        assert!(validate_value("12.50", 0.0).is_valid);
    }

    #[test]
    fn test_validate_value_single_item_over_ceiling() {
        assert_eq!(
            validate_value("40001", 0.0),
            FieldValidation::invalid("Your limit is €40,000")
        );
    }

    #[test]
    fn test_validate_value_cumulative_over_ceiling() {
        let result = validate_value("200", 39_900.0);
        assert!(!result.is_valid);
        assert_eq!(
            result.error_message,
            "Your limit is €40,000, you already have €39,900 worth of valuables"
        );
    }

    #[test]
    fn test_validate_value_exactly_at_ceiling_is_valid() {
        assert!(validate_value("100", 39_900.0).is_valid);
        assert!(validate_value("40000", 0.0).is_valid);
    }

    #[test]
    fn test_validate_value_custom_ceiling() {
        let limits = ValueLimits { ceiling: 1_500.0 };
        assert_eq!(limits.ceiling_label(), "€1,500");
        assert_eq!(
            validate_value_with("2000", 0.0, &limits),
            FieldValidation::invalid("Your limit is €1,500")
        );
    }

    #[test]
    fn test_validate_photo() {
        assert_eq!(
            validate_photo(None),
            FieldValidation::invalid("Photo is required")
        );
        assert!(!validate_photo(Some(&PhotoSelection::cancelled())).is_valid);
        assert!(validate_photo(Some(&PhotoSelection::picked("file:///ring.jpg"))).is_valid);
    }
}
