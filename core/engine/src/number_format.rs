//! FILENAME: core/engine/src/number_format.rs
//! PURPOSE: Number formatting utilities for displaying calculation results.
//! CONTEXT: This module converts raw numeric values to display strings at a
//! configurable precision. Values within 1e-10 of zero collapse to "0";
//! magnitudes above 1e10 switch to scientific notation; everything else is
//! fixed-point with trailing zeros trimmed.

/// Display precision bounds (decimal places).
pub const MIN_PRECISION: u8 = 0;
pub const MAX_PRECISION: u8 = 15;

/// Default display precision.
pub const DEFAULT_PRECISION: u8 = 6;

/// Formats a result for display at the given precision.
/// Precision is clamped to the supported range.
pub fn format_result(value: f64, precision: u8) -> String {
    let precision = precision.min(MAX_PRECISION) as usize;

    if !value.is_finite() {
        // The engine rejects non-finite results, but format defensively
        return format!("{}", value);
    }

    if value.abs() < 1e-10 {
        return "0".to_string();
    }

    if value.abs() > 1e10 {
        return format!("{:.prec$e}", value, prec = precision);
    }

    let formatted = format!("{:.prec$}", value, prec = precision);
    if formatted.contains('.') {
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    } else {
        formatted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers_have_no_decimals() {
        assert_eq!(format_result(8.0, 6), "8");
        assert_eq!(format_result(-42.0, 6), "-42");
    }

    #[test]
    fn test_trailing_zeros_trimmed() {
        assert_eq!(format_result(2.5, 6), "2.5");
        assert_eq!(format_result(0.125, 6), "0.125");
    }

    #[test]
    fn test_precision_rounds() {
        assert_eq!(format_result(1.0 / 3.0, 6), "0.333333");
        assert_eq!(format_result(1.0 / 3.0, 2), "0.33");
    }

    #[test]
    fn test_zero_precision() {
        assert_eq!(format_result(3.7, 0), "4");
    }

    #[test]
    fn test_tiny_values_collapse_to_zero() {
        assert_eq!(format_result(1e-12, 6), "0");
        assert_eq!(format_result(-1e-11, 6), "0");
    }

    #[test]
    fn test_large_values_use_scientific() {
        let formatted = format_result(1.5e12, 4);
        assert!(formatted.contains('e'), "got {}", formatted);
    }

    #[test]
    fn test_precision_clamped() {
        // Precision beyond 15 behaves like 15
        assert_eq!(format_result(2.5, 200), format_result(2.5, 15));
    }
}
