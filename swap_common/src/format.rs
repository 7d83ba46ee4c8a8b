//! # Display Formatting
//!
//! Number formatting for amounts, rates, fees and prices shown by the form.
//!
//! ## Policy
//!
//! - non-finite → [`PLACEHOLDER`]
//! - `0` → `"0"`
//! - `>= 1000` → comma-grouped, at most 2 decimals
//! - `< 1e-6` → scientific notation with 2 decimals (`1.00e-7`)
//! - otherwise → comma-grouped, at most `max_dp` decimals
//!
//! Trailing zeros of the fraction are trimmed.

/// Shown wherever a value is undefined.
pub const PLACEHOLDER: &str = "—";
/// Fraction digits used when the call site does not ask for fewer.
pub const DEFAULT_DECIMALS: usize = 6;

/// Format a number for display following the module policy.
///
/// # Examples
///
/// ```rust
/// use swap_common::format::format_number;
///
/// assert_eq!(format_number(1234.5678, 6), "1,234.57");
/// assert_eq!(format_number(0.5, 6), "0.5");
/// assert_eq!(format_number(0.0000001, 6), "1.00e-7");
/// ```
pub fn format_number(value: f64, max_dp: usize) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    if value >= 1000.0 {
        return group_thousands(value, 2);
    }
    if value < 0.000001 {
        return to_exponential(value, 2);
    }
    group_thousands(value, max_dp)
}

/// Round to `max_dp` fraction digits, trim trailing zeros, add comma separators.
fn group_thousands(value: f64, max_dp: usize) -> String {
    let fixed = format!("{:.prec$}", value.abs(), prec = max_dp);
    let (integer_part, decimal_part) = match fixed.split_once('.') {
        Some((int, frac)) => (int, frac.trim_end_matches('0')),
        None => (fixed.as_str(), ""),
    };

    let mut result = String::new();
    for (i, ch) in integer_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    let integer_with_commas: String = result.chars().rev().collect();

    let is_zero = integer_part.bytes().all(|b| b == b'0') && decimal_part.is_empty();
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };

    if decimal_part.is_empty() {
        format!("{}{}", sign, integer_with_commas)
    } else {
        format!("{}{}.{}", sign, integer_with_commas, decimal_part)
    }
}

/// Scientific notation with an explicitly signed exponent (`1.00e-7`, `5.00e+0`).
fn to_exponential(value: f64, digits: usize) -> String {
    let raw = format!("{:.prec$e}", value, prec = digits);
    match raw.split_once('e') {
        Some((mantissa, exp)) => match exp.parse::<i32>() {
            Ok(exp) if exp < 0 => format!("{}e-{}", mantissa, -exp),
            Ok(exp) => format!("{}e+{}", mantissa, exp),
            Err(_) => raw,
        },
        None => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_and_non_finite() {
        assert_eq!(format_number(0.0, 6), "0");
        assert_eq!(format_number(-0.0, 6), "0");
        assert_eq!(format_number(f64::NAN, 6), PLACEHOLDER);
        assert_eq!(format_number(f64::INFINITY, 6), PLACEHOLDER);
        assert_eq!(format_number(f64::NEG_INFINITY, 6), PLACEHOLDER);
    }

    #[test]
    fn test_large_values_use_two_decimals() {
        assert_eq!(format_number(1500.0, 6), "1,500");
        assert_eq!(format_number(3000.0, 6), "3,000");
        assert_eq!(format_number(1234567.891, 6), "1,234,567.89");
        assert_eq!(format_number(1000.005001, 6), "1,000.01");
    }

    #[test]
    fn test_tiny_values_use_scientific_form() {
        assert_eq!(format_number(0.0000001, 6), "1.00e-7");
        assert_eq!(format_number(0.00000045678, 6), "4.57e-7");
    }

    #[test]
    fn test_regular_values_trim_zeros() {
        assert_eq!(format_number(6.0005, 6), "6.0005");
        assert_eq!(format_number(0.1234567, 6), "0.123457");
        assert_eq!(format_number(98.5, 4), "98.5");
        assert_eq!(format_number(2.0, 6), "2");
    }

    #[test]
    fn test_rounding_into_grouped_range() {
        assert_eq!(format_number(999.9999999, 6), "1,000");
    }

    #[test]
    fn test_negative_values_fall_into_scientific_branch() {
        assert_eq!(format_number(-5.0, 6), "-5.00e+0");
    }
}
