//! Compact numeric formatting shared across chart kinds.

use serde_json::Value;

use crate::data::coerce_number;

/// Format a number into short display form: `1500000` -> "1.5M",
/// `999` -> "999", `0.0456` -> "0.046".
///
/// Magnitudes of 1e3/1e6/1e9/1e12 get k/M/B/T suffixes with one decimal
/// place (trailing `.0` stripped). Values below 1 keep two significant
/// digits. Non-finite input is stringified as-is rather than crashing or
/// silently becoming zero.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let abs = value.abs();
    if abs >= 1e12 {
        return scaled(value / 1e12, "T");
    }
    if abs >= 1e9 {
        return scaled(value / 1e9, "B");
    }
    if abs >= 1e6 {
        return scaled(value / 1e6, "M");
    }
    if abs >= 1e3 {
        return scaled(value / 1e3, "k");
    }
    if abs >= 1.0 {
        return format!("{value:.0}");
    }

    two_significant_digits(value)
}

/// Format a raw cell: numeric values (including numeric strings) go through
/// [`format_number`], anything else is shown as plain text.
pub fn format_cell(value: &Value) -> String {
    match coerce_number(value) {
        Some(n) => format_number(n),
        None => crate::data::cell_text(Some(value)),
    }
}

fn scaled(value: f64, suffix: &str) -> String {
    let s = format!("{value:.1}");
    let trimmed = s.strip_suffix(".0").unwrap_or(&s);
    format!("{trimmed}{suffix}")
}

/// Two significant digits for sub-unit values, e.g. 0.0456 -> "0.046".
fn two_significant_digits(value: f64) -> String {
    if value == 0.0 {
        return "0.0".to_string();
    }
    let pre_exponent = value.abs().log10().floor() as i32;
    // Rounding at two significant digits can carry into the next decade
    // (0.0999 rounds to 0.10), so the exponent is taken after rounding.
    let scale = 10f64.powi(1 - pre_exponent);
    let rounded = (value * scale).round() / scale;
    let exponent = if rounded.is_finite() && rounded != 0.0 {
        rounded.abs().log10().floor() as i32
    } else {
        pre_exponent
    };
    let decimals = (1 - exponent).max(0) as usize;
    format!("{:.*}", decimals, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_suffixed_magnitudes() {
        assert_eq!(format_number(1_500_000.0), "1.5M");
        assert_eq!(format_number(2_000.0), "2k");
        assert_eq!(format_number(3_100_000_000.0), "3.1B");
        assert_eq!(format_number(1.2e12), "1.2T");
        assert_eq!(format_number(-1_500_000.0), "-1.5M");
    }

    #[test]
    fn test_integers_below_thousand() {
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(1.0), "1");
        assert_eq!(format_number(42.7), "43");
    }

    #[test]
    fn test_tiny_values_two_significant_digits() {
        assert_eq!(format_number(0.0456), "0.046");
        assert_eq!(format_number(0.5), "0.50");
        assert_eq!(format_number(0.0), "0.0");
    }

    #[test]
    fn test_rounding_across_a_decade_keeps_two_digits() {
        assert_eq!(format_number(0.0999), "0.10");
        assert_eq!(format_number(0.999), "1.0");
    }

    #[test]
    fn test_non_finite_passthrough() {
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::INFINITY), "inf");
    }

    #[test]
    fn test_format_cell() {
        assert_eq!(format_cell(&json!(1500000)), "1.5M");
        assert_eq!(format_cell(&json!("2500")), "2.5k");
        assert_eq!(format_cell(&json!("SpaceX")), "SpaceX");
        assert_eq!(format_cell(&json!(null)), "");
    }
}
