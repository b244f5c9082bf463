//! FILENAME: core/engine/src/number_format.rs
//! PURPOSE: Number formatting utilities for displaying aggregated values.
//! CONTEXT: The drill-down table shows every group value with a fixed number
//! of decimal places, optionally grouped with thousands separators.

/// Format a number with a fixed number of decimal places and an optional
/// thousands separator. Negative zero prints as zero.
pub fn format_fixed(value: f64, decimal_places: usize, use_thousands_separator: bool) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    let rounded = format!("{:.prec$}", value, prec = decimal_places);

    // "-0.00" can still appear for tiny negatives that round to zero
    let rounded = if rounded.starts_with('-') && rounded[1..].chars().all(|c| c == '0' || c == '.') {
        rounded[1..].to_string()
    } else {
        rounded
    };

    if use_thousands_separator && value.is_finite() {
        add_thousands_separator(&rounded)
    } else {
        rounded
    }
}

/// Add thousands separators to a numeric string.
fn add_thousands_separator(s: &str) -> String {
    let (integer_part, decimal_part) = match s.split_once('.') {
        Some((int, dec)) => (int, Some(dec)),
        None => (s, None),
    };

    let negative = integer_part.starts_with('-');
    let digits: Vec<char> = integer_part.chars().filter(|c| c.is_ascii_digit()).collect();
    let len = digits.len();

    let mut result = String::with_capacity(s.len() + len / 3 + 1);
    if negative {
        result.push('-');
    }
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    if let Some(decimal) = decimal_part {
        result.push('.');
        result.push_str(decimal);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_decimals() {
        assert_eq!(format_fixed(15.0, 2, false), "15.00");
        assert_eq!(format_fixed(7.0, 2, false), "7.00");
        assert_eq!(format_fixed(0.126, 2, false), "0.13");
        assert_eq!(format_fixed(-3.5, 2, false), "-3.50");
    }

    #[test]
    fn test_negative_zero() {
        assert_eq!(format_fixed(-0.0, 2, false), "0.00");
        assert_eq!(format_fixed(-0.001, 2, false), "0.00");
    }

    #[test]
    fn test_thousands_separator() {
        assert_eq!(format_fixed(1234567.891, 2, true), "1,234,567.89");
        assert_eq!(format_fixed(-1234.5, 1, true), "-1,234.5");
        assert_eq!(format_fixed(999.0, 0, true), "999");
    }
}
